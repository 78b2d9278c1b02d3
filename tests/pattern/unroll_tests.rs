//! Unroll tests: literal-string enumeration.

use phrasebook_pattern::{compile, unroll};

fn names(grammar: &str) -> Vec<String> {
    unroll(&compile(grammar).unwrap()).into_iter().collect()
}

#[test]
fn golden_cases() {
    assert_eq!(names("x[y]"), ["x", "xy"]);
    assert_eq!(names("%x% [y]"), ["x", "x y", "y"]);
    assert_eq!(names("[a] [b] c"), ["a b c", "a c", "b c", "c"]);
}

#[test]
fn object_names() {
    assert_eq!(
        names("[small] [brass] (lamp|lantern)"),
        [
            "brass lamp",
            "brass lantern",
            "lamp",
            "lantern",
            "small brass lamp",
            "small brass lantern",
            "small lamp",
            "small lantern",
        ]
    );
}

#[test]
fn marks_do_not_affect_names() {
    assert_eq!(names("(1¦north|2¦n)"), names("(north|n)"));
}

#[test]
fn method_and_free_function_agree() {
    let pattern = compile("go [north|south]").unwrap();
    assert_eq!(pattern.unroll(), unroll(&pattern));
}

#[test]
fn every_name_is_matched_exactly() {
    let pattern = compile("(take|get) [the] [brass] lamp").unwrap();
    let all = pattern.unroll();
    assert_eq!(all.len(), 8);
    for name in &all {
        let result = pattern.matches(name, false);
        assert!(result.is_success(), "{name}");
        assert_eq!(&result.matched_text(), name);
    }
}
