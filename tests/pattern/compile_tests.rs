//! Compiler tests: node structure, rendering, and error positions.

use phrasebook_foundation::{ErrorKind, GroupKind};
use phrasebook_pattern::{Constraint, Node, Pattern, compile};

fn grammar_round_trip(text: &str) -> String {
    compile(text).unwrap().to_string()
}

#[test]
fn rendered_grammar_is_canonical() {
    assert_eq!(grammar_round_trip("look [around]"), "look [around]");
    assert_eq!(grammar_round_trip("(1¦take|2¦get) %item%"), "(1¦take|2¦get) %item%");
    assert_eq!(grammar_round_trip("%*name% <\\d+>"), "%*name% <\\d+>");
}

#[test]
fn escaped_metacharacters_render_escaped() {
    let pattern = compile(r"50\% off").unwrap();
    assert_eq!(pattern.nodes()[0], Node::Literal("50%".to_string()));
    let again = compile(&pattern.to_string()).unwrap();
    assert_eq!(again, pattern);
}

#[test]
fn from_str_matches_compile() {
    let parsed: Pattern = "go [north|south]".parse().unwrap();
    assert_eq!(parsed, compile("go [north|south]").unwrap());
}

#[test]
fn placeholders_are_listed_in_order() {
    let pattern = compile("give %item% [to %-player%]").unwrap();
    let found: Vec<(&str, Constraint)> = pattern
        .placeholders()
        .into_iter()
        .map(|p| (p.type_name.as_str(), p.constraint))
        .collect();
    assert_eq!(
        found,
        vec![
            ("item", Constraint::Unconstrained),
            ("player", Constraint::NullIfAbsent)
        ]
    );
}

#[test]
fn specificity_counts_top_level_literals() {
    let pinned = compile("take %item%").unwrap();
    let open = compile("%verb% %item%").unwrap();
    assert!(pinned.specificity() > open.specificity());
}

#[test]
fn empty_grammar_is_empty_pattern() {
    let pattern = compile("").unwrap();
    assert!(pattern.is_empty());
    assert!(pattern.matches("", false).is_success());
    assert!(pattern.matches("x", false).is_failure());
}

#[test]
fn error_kinds_and_positions() {
    let cases: [(&str, usize); 7] = [
        ("look (at", 5),
        ("look [at", 5),
        ("n <\\d+", 2),
        ("give %item", 5),
        ("%~%", 0),
        ("(one¦a|b)", 1),
        ("tail\\", 4),
    ];
    for (grammar, position) in cases {
        let err = compile(grammar).unwrap_err();
        assert_eq!(err.position(), Some(position), "{grammar}");
        assert!(err.is_compile_error());
    }
}

#[test]
fn unclosed_group_names_the_group() {
    let err = compile("a [b (c]").unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::UnclosedGroup {
            group: GroupKind::Optional,
            position: 2
        }
    ));
}

#[test]
fn invalid_regex_reports_message() {
    let err = compile("x <[a-> y").unwrap_err();
    let ErrorKind::InvalidRegex { message, position } = err.kind else {
        panic!("expected invalid regex, got {:?}", err.kind);
    };
    assert_eq!(position, 2);
    assert!(!message.is_empty());
}
