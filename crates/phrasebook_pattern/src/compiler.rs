//! Grammar compiler.
//!
//! Recursive-descent parser turning grammar text into a [`Pattern`]. The text
//! is consumed one node at a time; each sub-parser either recognizes its
//! introducing character and returns the node plus the remaining position, or
//! declines. Sub-parsers are tried in a fixed priority order:
//!
//! ```text
//! (a|b)     choice       1¦a   parse mark on an alternative
//! [a|b]     optional     \x    escaped literal character
//! <re>      regex
//! %type%    placeholder  %*type%  %~type%  %^type%  %-type%
//! ' '       space
//! other     literal run up to the next special character
//! ```
//!
//! Every error position is a character index into the top-level text, also
//! for errors raised inside nested alternatives.

use std::ops::ControlFlow;

use phrasebook_foundation::{Error, ErrorKind, GroupKind, Result};

use crate::node::{Alternative, Constraint, MARK_SEPARATOR, Node, Placeholder, RegexNode};
use crate::pattern::Pattern;

/// Compiles grammar text into a pattern.
///
/// # Errors
///
/// Returns a compile error for unbalanced brackets, missing `>` or `%`
/// terminators, malformed parse marks, invalid regexes and a dangling `\`.
pub fn compile(text: &str) -> Result<Pattern> {
    let compiler = Compiler::new(text);
    let nodes = compiler.parse_sequence(0, text.len())?;
    Ok(Pattern::from_nodes(nodes))
}

/// A sub-parser: `Ok(None)` means "not mine".
type SubParser<'src> = fn(&Compiler<'src>, usize, usize) -> Result<Option<(Node, usize)>>;

/// Recursive-descent grammar compiler.
///
/// Works on byte ranges of one source string; nested alternatives are parsed
/// in place rather than copied out.
struct Compiler<'src> {
    source: &'src str,
}

impl<'src> Compiler<'src> {
    fn new(source: &'src str) -> Self {
        Self { source }
    }

    /// Parses `start..end` into a node sequence.
    fn parse_sequence(&self, start: usize, end: usize) -> Result<Vec<Node>> {
        let parsers: [SubParser<'src>; 6] = [
            Self::parse_choice,
            Self::parse_optional,
            Self::parse_regex,
            Self::parse_placeholder,
            Self::parse_space,
            Self::parse_literal,
        ];

        let mut nodes = Vec::new();
        let mut pos = start;
        'outer: while pos < end {
            for parser in parsers {
                if let Some((node, next)) = parser(self, pos, end)? {
                    nodes.push(node);
                    pos = next;
                    continue 'outer;
                }
            }
            return Err(Error::new(ErrorKind::Internal(format!(
                "no sub-parser accepted input at index {}",
                self.char_index(pos)
            ))));
        }
        Ok(nodes)
    }

    fn parse_choice(&self, pos: usize, end: usize) -> Result<Option<(Node, usize)>> {
        self.parse_group(pos, end, GroupKind::Choice)
    }

    fn parse_optional(&self, pos: usize, end: usize) -> Result<Option<(Node, usize)>> {
        self.parse_group(pos, end, GroupKind::Optional)
    }

    /// Parses `(...)` or `[...]` starting at `pos`.
    fn parse_group(
        &self,
        pos: usize,
        end: usize,
        kind: GroupKind,
    ) -> Result<Option<(Node, usize)>> {
        if self.char_at(pos) != Some(kind.open()) {
            return Ok(None);
        }

        let body_start = pos + kind.open().len_utf8();
        let mut close = None;
        let mut separators = Vec::new();
        self.scan(body_start, end, |at, c, depth| {
            if depth > 0 {
                return ControlFlow::Continue(());
            }
            if c == kind.close() {
                close = Some(at);
                return ControlFlow::Break(());
            }
            if c == '|' {
                separators.push(at);
            }
            ControlFlow::Continue(())
        });

        let Some(close) = close else {
            return Err(Error::unclosed_group(kind, self.char_index(pos)));
        };

        let mut alternatives = Vec::with_capacity(separators.len() + 1);
        let mut alt_start = body_start;
        for boundary in separators.into_iter().chain(std::iter::once(close)) {
            alternatives.push(self.parse_alternative(alt_start, boundary)?);
            alt_start = boundary + 1;
        }

        let node = match kind {
            GroupKind::Choice => Node::Choice(alternatives),
            GroupKind::Optional => Node::Optional(alternatives),
        };
        Ok(Some((node, close + kind.close().len_utf8())))
    }

    /// Parses one alternative, including its optional `N¦` parse mark.
    fn parse_alternative(&self, start: usize, end: usize) -> Result<Alternative> {
        let mut separator = None;
        self.scan(start, end, |at, c, depth| {
            if depth == 0 && c == MARK_SEPARATOR {
                separator = Some(at);
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });

        let (mark, body_start) = match separator {
            Some(at) => {
                let text = &self.source[start..at];
                let mark = text
                    .parse::<i32>()
                    .map_err(|_| Error::invalid_parse_mark(text, self.char_index(start)))?;
                (mark, at + MARK_SEPARATOR.len_utf8())
            }
            None => (0, start),
        };

        let nodes = self.parse_sequence(body_start, end)?;
        Ok(Alternative::new(mark, Pattern::from_nodes(nodes)))
    }

    fn parse_regex(&self, pos: usize, end: usize) -> Result<Option<(Node, usize)>> {
        if self.char_at(pos) != Some('<') {
            return Ok(None);
        }

        let mut body = String::new();
        let mut chars = self.source[pos + 1..end].char_indices();
        while let Some((offset, c)) = chars.next() {
            match c {
                '>' => {
                    let regex = RegexNode::new(body)
                        .map_err(|e| Error::invalid_regex(e.to_string(), self.char_index(pos)))?;
                    return Ok(Some((Node::Regex(regex), pos + 1 + offset + 1)));
                }
                '\\' => match chars.next() {
                    Some((_, '>')) => body.push('>'),
                    Some((_, other)) => {
                        body.push('\\');
                        body.push(other);
                    }
                    None => body.push('\\'),
                },
                _ => body.push(c),
            }
        }
        Err(Error::unclosed_regex(self.char_index(pos)))
    }

    fn parse_placeholder(&self, pos: usize, end: usize) -> Result<Option<(Node, usize)>> {
        if self.char_at(pos) != Some('%') {
            return Ok(None);
        }

        let body_start = pos + 1;
        let Some(len) = self.source[body_start..end].find('%') else {
            return Err(Error::unclosed_placeholder(self.char_index(pos)));
        };
        let body = &self.source[body_start..body_start + len];

        let mut chars = body.chars();
        let (constraint, type_name) = match chars.next().and_then(Constraint::from_sigil) {
            Some(constraint) => (constraint, chars.as_str()),
            None => (Constraint::Unconstrained, body),
        };
        if type_name.is_empty() {
            return Err(Error::empty_type_name(self.char_index(pos)));
        }

        let node = Node::Placeholder(Placeholder::new(type_name).with_constraint(constraint));
        Ok(Some((node, body_start + len + 1)))
    }

    fn parse_space(&self, pos: usize, _end: usize) -> Result<Option<(Node, usize)>> {
        if self.char_at(pos) == Some(' ') {
            Ok(Some((Node::Space, pos + 1)))
        } else {
            Ok(None)
        }
    }

    /// Parses a run of literal characters. Never declines.
    fn parse_literal(&self, pos: usize, end: usize) -> Result<Option<(Node, usize)>> {
        let mut text = String::new();
        let mut chars = self.source[pos..end].char_indices().peekable();
        let mut next = end;
        while let Some(&(offset, c)) = chars.peek() {
            if is_special(c) && !text.is_empty() {
                next = pos + offset;
                break;
            }
            chars.next();
            if c == '\\' {
                match chars.next() {
                    Some((_, escaped)) => text.push(escaped),
                    None => return Err(Error::dangling_escape(self.char_index(pos + offset))),
                }
            } else {
                text.push(c);
            }
        }
        Ok(Some((Node::Literal(text), next)))
    }

    /// Walks `start..end`, reporting each structural character with the
    /// bracket depth *before* it. Escaped characters and regex bodies are
    /// skipped.
    fn scan(
        &self,
        start: usize,
        end: usize,
        mut visit: impl FnMut(usize, char, usize) -> ControlFlow<()>,
    ) {
        let mut depth = 0usize;
        let mut chars = self.source[start..end].char_indices();
        while let Some((offset, c)) = chars.next() {
            let at = start + offset;
            match c {
                '\\' => {
                    chars.next();
                    continue;
                }
                '<' => {
                    // Skip to the regex terminator; an unterminated regex is
                    // reported later by `parse_regex`.
                    let mut lookahead = chars.clone();
                    let mut closed = false;
                    while let Some((_, r)) = lookahead.next() {
                        match r {
                            '\\' => {
                                lookahead.next();
                            }
                            '>' => {
                                closed = true;
                                break;
                            }
                            _ => {}
                        }
                    }
                    if closed {
                        chars = lookahead;
                    }
                    continue;
                }
                _ => {}
            }

            let before = depth;
            match c {
                '(' | '[' => depth += 1,
                ')' | ']' => depth = depth.saturating_sub(1),
                _ => {}
            }
            if visit(at, c, before).is_break() {
                return;
            }
        }
    }

    fn char_at(&self, pos: usize) -> Option<char> {
        self.source[pos..].chars().next()
    }

    /// Converts a byte offset into a character index.
    fn char_index(&self, byte: usize) -> usize {
        self.source[..byte].chars().count()
    }
}

/// Characters that end a literal run.
fn is_special(c: char) -> bool {
    matches!(c, ' ' | '%' | '[' | '(' | '<')
}
