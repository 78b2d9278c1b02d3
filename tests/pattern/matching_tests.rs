//! Matcher tests: command-style grammars end to end.

use std::ptr;

use phrasebook_pattern::{Constraint, Matcher, Pattern, compile, match_pattern};

fn pattern(grammar: &str) -> Pattern {
    compile(grammar).unwrap()
}

#[test]
fn patterns_are_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Pattern>();

    let p = &pattern("(take|get) %item%");
    std::thread::scope(|scope| {
        let handles: Vec<_> = ["take lamp", "get key"]
            .into_iter()
            .map(|input| {
                scope.spawn(move || p.matches(input, false).texts_for_type("item")[0].to_string())
            })
            .collect();
        let items: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(items, vec!["lamp", "key"]);
    });
}

#[test]
fn parse_marks_pick_the_verb() {
    let p = pattern("(1¦take|1¦get|2¦drop) [the] %item%");
    assert_eq!(p.matches("take lamp", false).mark(), 1);
    assert_eq!(p.matches("get the lamp", false).mark(), 1);
    assert_eq!(p.matches("drop the lamp", false).mark(), 2);
    assert!(p.matches("throw lamp", false).is_failure());
}

#[test]
fn marks_from_independent_groups_combine() {
    let p = pattern("(1¦w|2¦x)(3¦y|4¦z)");
    let marks: Vec<i32> = ["wy", "wz", "xy", "xz"]
        .iter()
        .map(|input| p.matches(input, false).mark())
        .collect();
    assert_eq!(marks, vec![1 ^ 3, 1 ^ 4, 2 ^ 3, 2 ^ 4]);
}

#[test]
fn optional_article_keeps_single_spaces() {
    let p = pattern("take [the] lamp");
    assert!(p.matches("take the lamp", false).is_success());
    assert!(p.matches("take lamp", false).is_success());
    assert!(p.matches("take  lamp", false).is_failure());
    assert!(p.matches("takelamp", false).is_failure());
    assert!(p.matches("take thelamp", false).is_failure());
}

#[test]
fn greedy_and_lazy_split_between_placeholders() {
    let p = pattern("put %item% (in|on) %container%");
    let greedy = p.matches("put cup in bag on shelf", false);
    assert_eq!(greedy.texts_for_type("item"), vec!["cup in bag"]);
    assert_eq!(greedy.texts_for_type("container"), vec!["shelf"]);

    let lazy_p = p.clone().with_greedy(false);
    let lazy = lazy_p.matches("put cup in bag on shelf", false);
    assert_eq!(lazy.texts_for_type("item"), vec!["cup"]);
    assert_eq!(lazy.texts_for_type("container"), vec!["bag on shelf"]);
}

#[test]
fn unambiguous_split_is_the_same_either_way() {
    let p = pattern("put %item% in %container%");
    for greedy in [true, false] {
        let flagged = p.clone().with_greedy(greedy);
        let result = flagged.matches("put lamp in box", false);
        assert_eq!(result.texts_for_type("item"), vec!["lamp"]);
        assert_eq!(result.texts_for_type("container"), vec!["box"]);
    }
}

#[test]
fn regex_extracts_numbers() {
    let p = pattern(r"drop <\d+> (coin|coins)");
    let result = p.matches("drop 25 coins", false);
    assert!(result.is_success());
    assert_eq!(result.regex_texts().collect::<Vec<_>>(), vec!["25"]);
    assert!(p.matches("drop many coins", false).is_failure());
}

#[test]
fn constraint_tags_are_reported() {
    let p = pattern("set %^var% to %*value%");
    let result = p.matches("set x to 5", false);
    assert_eq!(
        result.constraints().collect::<Vec<_>>(),
        vec![Constraint::VariableOnly, Constraint::LiteralOnly]
    );
}

#[test]
fn leftover_lets_a_prefix_match() {
    let p = pattern("(north|n)");
    let result = p.matches("north and then east", true);
    assert!(result.is_success());
    assert_eq!(result.matched_text(), "north");
    assert_eq!(result.leftover(), Some(" and then east"));
    assert!(p.matches("north and then east", false).is_failure());
}

#[test]
fn failure_points_at_the_furthest_node() {
    let p = pattern("(take|get) lamp");
    let result = p.matches("take lantern", false);
    assert!(result.is_failure());
    assert!(ptr::eq(result.failed_node().unwrap(), &p.nodes()[2]));
}

#[test]
fn matcher_and_free_function_agree() {
    let p = pattern("go [north|south]");
    for input in ["go", "go north", "go south", "go west"] {
        let direct = Matcher::new(&p, input, false).run();
        let free = match_pattern(&p, input, false);
        assert_eq!(direct.is_success(), free.is_success(), "{input}");
        assert_eq!(direct.matched_text(), free.matched_text(), "{input}");
    }
}

#[test]
fn matched_text_and_leftover_rebuild_input() {
    let p = pattern("look [at %thing%]");
    for input in ["look", "look at lamp", "look at the brass lamp"] {
        let result = p.matches(input, true);
        assert!(result.is_success(), "{input}");
        let mut rebuilt = result.matched_text();
        rebuilt.push_str(result.leftover().unwrap_or(""));
        assert_eq!(rebuilt, input);
    }
}

#[test]
fn optional_at_end_of_choice_alternative_skips_its_space() {
    let p = pattern("(x [y])z");
    assert!(p.matches("xz", false).is_success());
    assert!(p.matches("x yz", false).is_success());
    assert!(p.matches("xyz", false).is_failure());

    let names: Vec<String> = p.unroll().into_iter().collect();
    assert_eq!(names, vec!["x yz", "xz"]);
    for name in &names {
        assert!(p.matches(name, false).is_success(), "{name:?}");
    }
}
