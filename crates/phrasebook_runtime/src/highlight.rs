//! Syntax highlighting for the REPL.

use std::borrow::Cow;

use phrasebook_pattern::MARK_SEPARATOR;

/// Highlighter for REPL commands and grammar notation.
///
/// Bare input lines are left alone; they are text to match, not grammar.
pub struct GrammarHighlighter {}

impl GrammarHighlighter {
    /// Creates a new highlighter.
    pub const fn new() -> Self {
        Self {}
    }

    /// Highlight a line of input.
    #[allow(clippy::unused_self)]
    pub fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if !line.starts_with(':') {
            return Cow::Borrowed(line);
        }

        let (command, rest) = match line.split_once(' ') {
            Some((command, rest)) => (command, Some(rest)),
            None => (line, None),
        };

        let mut result = String::with_capacity(line.len() * 2);
        result.push_str("\x1b[1;36m"); // bold cyan
        result.push_str(command);
        result.push_str("\x1b[0m");

        if let Some(rest) = rest {
            result.push(' ');
            if command == ":grammar" {
                highlight_grammar(rest, &mut result);
            } else {
                result.push_str(rest);
            }
        }

        Cow::Owned(result)
    }
}

impl Default for GrammarHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

fn highlight_grammar(grammar: &str, out: &mut String) {
    let mut chars = grammar.chars().peekable();
    let mut in_placeholder = false;
    let mut in_regex = false;

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                out.push_str("\x1b[2m"); // dim
                out.push(c);
                if let Some(next) = chars.next() {
                    out.push(next);
                }
                out.push_str("\x1b[0m");
                if in_placeholder {
                    out.push_str("\x1b[33m");
                } else if in_regex {
                    out.push_str("\x1b[32m");
                }
            }

            // Regex bodies are raw up to '>'
            '>' if in_regex => {
                out.push(c);
                out.push_str("\x1b[0m");
                in_regex = false;
            }
            _ if in_regex => out.push(c),

            '%' if in_placeholder => {
                out.push(c);
                out.push_str("\x1b[0m");
                in_placeholder = false;
            }
            '%' => {
                out.push_str("\x1b[33m"); // yellow
                out.push(c);
                in_placeholder = true;
            }
            _ if in_placeholder => out.push(c),

            '<' => {
                out.push_str("\x1b[32m"); // green
                out.push(c);
                in_regex = true;
            }

            '(' | ')' | '[' | ']' | '|' => {
                out.push_str("\x1b[35m"); // magenta
                out.push(c);
                out.push_str("\x1b[0m");
            }

            c if c == MARK_SEPARATOR => {
                out.push_str("\x1b[34m"); // blue
                out.push(c);
                out.push_str("\x1b[0m");
            }

            _ => out.push(c),
        }
    }

    if in_placeholder || in_regex {
        out.push_str("\x1b[0m");
    }
}
