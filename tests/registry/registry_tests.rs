//! Pattern registry tests: ranking and persistence of registrations.

use phrasebook_pattern::Pattern;
use phrasebook_registry::{PatternRegistry, RegisteredGrammar};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Action {
    Look,
    Examine,
    Take,
    Drop,
    Catchall,
}

fn actions() -> PatternRegistry<Action> {
    let mut registry = PatternRegistry::new();
    registry.register(Action::Look, "(look|l) [around]", 0).unwrap();
    registry.register(Action::Examine, "(look|l) at %thing%", 0).unwrap();
    registry.register(Action::Take, "(take|get) [the] %item%", 0).unwrap();
    registry.register(Action::Drop, "drop [the] %item%", 0).unwrap();
    registry.register(Action::Catchall, "%verb% %rest%", -10).unwrap();
    registry
}

#[test]
fn best_match_wins_over_catchall() {
    let registry = actions();
    let best = registry.match_first("take the lamp", false).unwrap();
    assert_eq!(*best.key, Action::Take);
    assert_eq!(best.result.texts_for_type("item"), vec!["lamp"]);

    let all: Vec<Action> = registry
        .match_all("take the lamp", false)
        .iter()
        .map(|m| *m.key)
        .collect();
    assert_eq!(all, vec![Action::Take, Action::Catchall]);
}

#[test]
fn catchall_covers_unknown_verbs() {
    let registry = actions();
    let best = registry.match_first("dance wildly", false).unwrap();
    assert_eq!(*best.key, Action::Catchall);
    assert_eq!(best.priority, -10);
}

#[test]
fn specificity_breaks_priority_ties() {
    let registry = actions();
    // "look at lamp" is also "%verb% %rest%", but that one has lower priority.
    let best = registry.match_first("look at lamp", false).unwrap();
    assert_eq!(*best.key, Action::Examine);
    assert!(best.specificity >= 1);
}

#[test]
fn leftover_is_per_call() {
    let registry = actions();
    assert!(registry.match_first("l around twice", false).map(|m| *m.key) != Some(Action::Look));
    let lenient = registry.match_all("l around twice", true);
    assert!(lenient.iter().any(|m| *m.key == Action::Look));
}

#[test]
fn no_match_at_all() {
    let mut registry = PatternRegistry::new();
    registry.register(1u8, "yes", 0).unwrap();
    assert!(registry.match_all("no", false).is_empty());
    assert!(registry.match_first("no", false).is_none());
}

#[test]
fn compile_errors_leave_registry_unchanged() {
    let mut registry = actions();
    assert!(registry.register(Action::Look, "(look", 0).is_err());
    assert_eq!(registry.len(), 5);
    assert_eq!(registry.source(&Action::Look), Some("(look|l) [around]"));
}

#[test]
fn registered_patterns_are_listed_in_order() {
    let registry = actions();
    let keys: Vec<Action> = registry.keys().copied().collect();
    assert_eq!(
        keys,
        vec![
            Action::Look,
            Action::Examine,
            Action::Take,
            Action::Drop,
            Action::Catchall
        ]
    );
    assert_eq!(registry.iter().count(), 5);
}

#[test]
fn precompiled_lazy_pattern_keeps_its_flag() {
    let mut registry = PatternRegistry::new();
    let lazy = Pattern::compile("put %item% in %box%").unwrap().with_greedy(false);
    registry.register_pattern("put", lazy, 0);
    assert!(!registry.get(&"put").unwrap().greedy());
}

#[test]
fn set_greedy_changes_split_choice() {
    let mut registry = PatternRegistry::new();
    registry.register("put", "put %item% (in|on) %box%", 0).unwrap();

    {
        let greedy = registry.match_first("put cup in bag on shelf", false).unwrap();
        assert_eq!(greedy.result.texts_for_type("item"), vec!["cup in bag"]);
    }

    registry.set_greedy(false);
    let lazy = registry.match_first("put cup in bag on shelf", false).unwrap();
    assert_eq!(lazy.result.texts_for_type("item"), vec!["cup"]);
}

#[test]
fn grammars_rebuild_the_same_registry() {
    let registry = actions();
    let saved: Vec<RegisteredGrammar<Action>> = registry.to_grammars();
    assert_eq!(saved[4].priority, -10);

    let rebuilt = PatternRegistry::from_grammars(saved).unwrap();
    let keys: Vec<Action> = rebuilt
        .match_all("drop lamp", false)
        .iter()
        .map(|m| *m.key)
        .collect();
    assert_eq!(keys, vec![Action::Drop, Action::Catchall]);
}

#[test]
fn from_grammars_reports_bad_records() {
    let records = vec![RegisteredGrammar {
        key: 1u32,
        grammar: "%item".to_string(),
        priority: 0,
    }];
    let err = PatternRegistry::from_grammars(records).unwrap_err();
    assert!(err.is_compile_error());
}
