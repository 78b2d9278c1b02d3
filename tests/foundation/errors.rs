//! Integration tests for error types

use phrasebook_foundation::{Error, ErrorContext, ErrorKind, GroupKind};

#[test]
fn compile_kinds_carry_positions() {
    let kinds = [
        Error::unclosed_group(GroupKind::Choice, 1),
        Error::unclosed_regex(2),
        Error::unclosed_placeholder(3),
        Error::empty_type_name(4),
        Error::invalid_parse_mark("x", 5),
        Error::invalid_regex("unclosed group", 6),
        Error::dangling_escape(7),
    ];
    for (expected, err) in (1..).zip(&kinds) {
        assert_eq!(err.position(), Some(expected));
        assert!(err.is_compile_error());
    }
}

#[test]
fn runtime_kinds_have_no_position() {
    for kind in [
        ErrorKind::IoError("disk".to_string()),
        ErrorKind::SerializationError("eof".to_string()),
        ErrorKind::InvalidArgument("flag".to_string()),
        ErrorKind::Internal("oops".to_string()),
    ] {
        let err = Error::new(kind);
        assert_eq!(err.position(), None);
        assert!(!err.is_compile_error());
    }
}

#[test]
fn messages_name_the_problem() {
    assert_eq!(
        Error::unclosed_group(GroupKind::Optional, 4).to_string(),
        "unclosed optional group '[' at index 4"
    );
    assert_eq!(
        Error::invalid_parse_mark("x", 1).to_string(),
        "invalid parse mark 'x' at index 1: expected an integer"
    );
    assert_eq!(
        Error::new(ErrorKind::IoError("gone".to_string())).to_string(),
        "I/O error: gone"
    );
}

#[test]
fn group_kind_brackets() {
    assert_eq!(GroupKind::Choice.open(), '(');
    assert_eq!(GroupKind::Choice.close(), ')');
    assert_eq!(GroupKind::Optional.open(), '[');
    assert_eq!(GroupKind::Optional.close(), ']');
}

#[test]
fn context_renders_caret_under_position() {
    let context = ErrorContext::new()
        .with_name("objects.pb:3")
        .with_source("take %item")
        .with_position(5);
    assert_eq!(
        context.to_string(),
        "in objects.pb:3\n  take %item\n       ^\n"
    );
}

#[test]
fn context_caret_counts_characters() {
    let context = ErrorContext::new().with_source("äö(x").with_position(2);
    assert_eq!(context.to_string(), "  äö(x\n    ^\n");
}

#[test]
fn empty_context_renders_nothing() {
    assert_eq!(ErrorContext::new().to_string(), "");
}

#[test]
fn with_context_attaches() {
    let err = Error::dangling_escape(2).with_context(ErrorContext::new().with_source("ab\\"));
    assert_eq!(
        err.context.and_then(|c| c.source).as_deref(),
        Some("ab\\")
    );
}
