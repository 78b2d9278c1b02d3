//! Grammar file to name table to lookup.

use phrasebook_foundation::ErrorKind;
use phrasebook_registry::NameTable;
use phrasebook_runtime::{parse_grammar_file, serialize};

const GAME: &str = "\
# Verbs
look = (look|l) [around]
examine@1 = (look|l) at %thing%
take@1 = (take|get) [the] %item%

# Objects
lamp = [brass] (lamp|lantern)
coins = [<\\d+>] gold (coin|coins)
";

#[test]
fn grammar_file_drives_matching() {
    let registry = parse_grammar_file(GAME, "game.pb").unwrap();
    assert_eq!(registry.len(), 5);

    let best = registry.match_first("get the brass lamp", false).unwrap();
    assert_eq!(best.key, "take");
    assert_eq!(best.result.texts_for_type("item"), vec!["brass lamp"]);

    let objects = registry.match_all("brass lamp", false);
    assert_eq!(objects.len(), 1);
    assert_eq!(objects[0].key, "lamp");

    let coins = registry.match_first("12 gold coins", false).unwrap();
    assert_eq!(coins.key, "coins");
    assert_eq!(coins.result.regex_texts().collect::<Vec<_>>(), vec!["12"]);
}

#[test]
fn name_table_survives_serialization() {
    let registry = parse_grammar_file(GAME, "game.pb").unwrap();
    let table = NameTable::from_registry(&registry);

    let bytes = serialize::to_bytes(&table).unwrap();
    let shipped: NameTable<String> = serialize::from_bytes(&bytes).unwrap();
    assert_eq!(shipped, table);

    assert_eq!(shipped.lookup("brass lantern"), Some(&["lamp".to_string()][..]));
    assert_eq!(
        shipped.lookup("gold coin"),
        Some(&["coins".to_string()][..])
    );
    assert_eq!(shipped.lookup("l"), Some(&["look".to_string()][..]));
    // Placeholders unroll to their type name or nothing.
    assert_eq!(shipped.lookup("take item"), Some(&["take".to_string()][..]));
    assert_eq!(
        shipped.lookup("look at"),
        Some(&["examine".to_string()][..])
    );
}

#[test]
fn table_file_round_trip() {
    let registry = parse_grammar_file(GAME, "game.pb").unwrap();
    let mut table = NameTable::case_insensitive();
    table.extend_from_registry(&registry);

    let path = std::env::temp_dir().join("phrasebook_workflow_table.msgpack");
    serialize::save_to_file(&table, &path).unwrap();
    let loaded: NameTable<String> = serialize::load_from_file(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    assert!(loaded.is_case_insensitive());
    assert!(loaded.contains("Brass Lamp"));
}

#[test]
fn broken_line_is_located() {
    let text = format!("{GAME}bad = take [the %item%\n");
    let err = parse_grammar_file(&text, "game.pb").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnclosedGroup { .. }));
    let context = err.context.unwrap();
    assert_eq!(context.name.as_deref(), Some("game.pb:9"));
    assert_eq!(context.position, Some(5));
    assert_eq!(
        context.to_string(),
        "in game.pb:9\n  take [the %item%\n       ^\n"
    );
}
