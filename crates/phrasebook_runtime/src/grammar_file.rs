//! Grammar files.
//!
//! A grammar file holds one `key = grammar` registration per line. Blank
//! lines and lines whose first non-blank character is `#` are ignored. Keys
//! and grammars are trimmed, so a grammar that must start or end with a
//! space has to escape it. A key may carry a priority in the form
//! `key@priority`.

use std::fs;
use std::path::Path;

use phrasebook_foundation::{Error, ErrorContext, ErrorKind, Result};
use phrasebook_registry::PatternRegistry;

/// Parses grammar file text into a registry keyed by the file's keys.
///
/// `origin` names the file in error messages.
///
/// # Errors
///
/// Returns an error for a line without `=`, an empty key, a malformed
/// priority, a repeated key, or a grammar that fails to compile. Every error
/// carries `origin:line` as its context name.
pub fn parse_grammar_file(text: &str, origin: &str) -> Result<PatternRegistry<String>> {
    let mut registry = PatternRegistry::new();

    for (index, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let location = format!("{origin}:{}", index + 1);
        let line_error = |message: String| {
            Error::new(ErrorKind::InvalidArgument(message)).with_context(
                ErrorContext::new()
                    .with_name(location.clone())
                    .with_source(trimmed),
            )
        };

        let Some((key, grammar)) = trimmed.split_once('=') else {
            return Err(line_error("expected 'key = grammar'".to_string()));
        };
        let (key, priority) = split_priority(key.trim()).map_err(&line_error)?;
        if key.is_empty() {
            return Err(line_error("empty key".to_string()));
        }
        if registry.contains(&key) {
            return Err(line_error(format!("duplicate key '{key}'")));
        }

        registry
            .register(key, grammar.trim(), priority)
            .map_err(|mut e| {
                let context = e
                    .context
                    .take()
                    .unwrap_or_default()
                    .with_name(location.clone());
                e.with_context(context)
            })?;
    }

    Ok(registry)
}

fn split_priority(key: &str) -> std::result::Result<(String, i32), String> {
    match key.rsplit_once('@') {
        Some((name, priority)) => {
            let priority = priority
                .trim()
                .parse()
                .map_err(|_| format!("invalid priority '{priority}': expected an integer"))?;
            Ok((name.trim().to_string(), priority))
        }
        None => Ok((key.to_string(), 0)),
    }
}

/// Reads and parses a grammar file.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read, or any error from
/// [`parse_grammar_file`].
pub fn load_grammar_file<P: AsRef<Path>>(path: P) -> Result<PatternRegistry<String>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| {
        Error::new(ErrorKind::IoError(format!(
            "failed to read file '{}': {e}",
            path.display()
        )))
    })?;
    parse_grammar_file(&text, &path.display().to_string())
}
