//! Name table tests: offline unrolling and exact lookup.

use phrasebook_registry::{NameTable, PatternRegistry};

fn objects() -> PatternRegistry<&'static str> {
    let mut registry = PatternRegistry::new();
    registry.register("lamp", "[small] [brass] (lamp|lantern)", 0).unwrap();
    registry.register("lantern", "(lantern|light)", 0).unwrap();
    registry.register("coins", r"[<\d+>] (coin|coins)", 0).unwrap();
    registry
}

#[test]
fn table_lists_every_spelling() {
    let table = NameTable::from_registry(&objects());
    assert_eq!(table.len(), 8 + 1 + 2);
    assert!(table.contains("small brass lantern"));
    assert!(table.contains("light"));
    assert!(!table.contains("brass"));
}

#[test]
fn shared_names_list_every_key_in_registration_order() {
    let table = NameTable::from_registry(&objects());
    assert_eq!(table.lookup("lantern"), Some(&["lamp", "lantern"][..]));
    assert_eq!(table.lookup("light"), Some(&["lantern"][..]));
}

#[test]
fn regexes_contribute_no_text() {
    let table = NameTable::from_registry(&objects());
    assert_eq!(table.lookup("coins"), Some(&["coins"][..]));
    assert!(!table.names().any(|n| n.contains('\\')));
}

#[test]
fn lookup_is_exact() {
    let table = NameTable::from_registry(&objects());
    assert_eq!(table.lookup("lamp "), None);
    assert_eq!(table.lookup("Lamp"), None);
}

#[test]
fn case_insensitive_table_from_registry() {
    let mut table = NameTable::case_insensitive();
    let mut registry = PatternRegistry::new();
    registry.register(7, "Brass (Lamp|Lantern)", 0).unwrap();
    table.extend_from_registry(&registry);
    assert_eq!(table.lookup("brass lamp"), Some(&[7][..]));
    assert_eq!(table.lookup("BRASS LANTERN"), Some(&[7][..]));
}

#[test]
fn extending_merges_keys() {
    let mut first = PatternRegistry::new();
    first.register("a", "(x|y)", 0).unwrap();
    let mut second = PatternRegistry::new();
    second.register("b", "y", 0).unwrap();

    let mut table = NameTable::from_registry(&first);
    table.extend_from_registry(&second);
    assert_eq!(table.lookup("y"), Some(&["a", "b"][..]));
    assert_eq!(
        table.iter().map(|(name, keys)| (name, keys.len())).collect::<Vec<_>>(),
        vec![("x", 1), ("y", 2)]
    );
}

#[test]
fn names_are_sorted() {
    let table = NameTable::from_registry(&objects());
    let names: Vec<&str> = table.names().collect();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
}
