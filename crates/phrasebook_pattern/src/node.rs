//! Grammar node model.
//!
//! A compiled [`Pattern`](crate::Pattern) is an ordered sequence of [`Node`]s.
//! Choice and Optional nodes hold [`Alternative`]s, each of which is itself a
//! full sub-pattern, so nodes nest arbitrarily.

use std::fmt;

use regex::Regex;

use crate::pattern::Pattern;

/// The separator between a parse mark and its alternative (`1¦text`).
pub const MARK_SEPARATOR: char = '\u{A6}';

/// A compiled grammar node.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// Exact text, matched character for character.
    Literal(String),
    /// Exactly one U+0020.
    Space,
    /// A span to be re-parsed as a value of a named type.
    Placeholder(Placeholder),
    /// An embedded regular expression that must match the whole span.
    Regex(RegexNode),
    /// Exactly one of the alternatives must match.
    Choice(Vec<Alternative>),
    /// At most one of the alternatives matches; skipping is allowed.
    Optional(Vec<Alternative>),
}

impl Node {
    /// Short name of the node kind, used in traces and diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Literal(_) => "literal",
            Self::Space => "space",
            Self::Placeholder(_) => "placeholder",
            Self::Regex(_) => "regex",
            Self::Choice(_) => "choice",
            Self::Optional(_) => "optional",
        }
    }

    /// Returns true for a Space node.
    #[must_use]
    pub const fn is_space(&self) -> bool {
        matches!(self, Self::Space)
    }

    /// Returns true for an Optional node.
    #[must_use]
    pub const fn is_optional(&self) -> bool {
        matches!(self, Self::Optional(_))
    }

    /// Returns the alternatives of a Choice or Optional node.
    #[must_use]
    pub fn alternatives(&self) -> Option<&[Alternative]> {
        match self {
            Self::Choice(alts) | Self::Optional(alts) => Some(alts),
            _ => None,
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => {
                for c in text.chars() {
                    if needs_escape(c) {
                        write!(f, "\\")?;
                    }
                    write!(f, "{c}")?;
                }
                Ok(())
            }
            Self::Space => write!(f, " "),
            Self::Placeholder(placeholder) => write!(f, "{placeholder}"),
            Self::Regex(regex) => write!(f, "{regex}"),
            Self::Choice(alts) => write_group(f, '(', ')', alts),
            Self::Optional(alts) => write_group(f, '[', ']', alts),
        }
    }
}

fn write_group(f: &mut fmt::Formatter<'_>, open: char, close: char, alts: &[Alternative]) -> fmt::Result {
    write!(f, "{open}")?;
    for (i, alt) in alts.iter().enumerate() {
        if i > 0 {
            write!(f, "|")?;
        }
        write!(f, "{alt}")?;
    }
    write!(f, "{close}")
}

/// Characters that must be escaped inside a rendered literal.
fn needs_escape(c: char) -> bool {
    matches!(
        c,
        '\\' | ' ' | '%' | '[' | ']' | '(' | ')' | '<' | '>' | '|' | MARK_SEPARATOR
    )
}

/// How a placeholder's text may be resolved downstream.
///
/// The matcher treats every constraint the same way; the tag is carried
/// through to the type resolver.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Constraint {
    /// No constraint.
    #[default]
    Unconstrained,
    /// `*`: only literal values.
    LiteralOnly,
    /// `~`: only non-literal values (expressions).
    NonLiteral,
    /// `^`: only variables.
    VariableOnly,
    /// `-`: resolves to null when the placeholder is absent.
    NullIfAbsent,
}

impl Constraint {
    /// Parses a constraint sigil.
    #[must_use]
    pub const fn from_sigil(c: char) -> Option<Self> {
        match c {
            '*' => Some(Self::LiteralOnly),
            '~' => Some(Self::NonLiteral),
            '^' => Some(Self::VariableOnly),
            '-' => Some(Self::NullIfAbsent),
            _ => None,
        }
    }

    /// The sigil written for this constraint, if any.
    #[must_use]
    pub const fn sigil(self) -> Option<char> {
        match self {
            Self::Unconstrained => None,
            Self::LiteralOnly => Some('*'),
            Self::NonLiteral => Some('~'),
            Self::VariableOnly => Some('^'),
            Self::NullIfAbsent => Some('-'),
        }
    }
}

/// A typed placeholder: `%[sigil]type%`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Placeholder {
    /// Name of the type the span resolves to.
    pub type_name: String,
    /// Constraint tag.
    pub constraint: Constraint,
}

impl Placeholder {
    /// Creates an unconstrained placeholder.
    #[must_use]
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            constraint: Constraint::Unconstrained,
        }
    }

    /// Sets the constraint.
    #[must_use]
    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraint = constraint;
        self
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%")?;
        if let Some(sigil) = self.constraint.sigil() {
            write!(f, "{sigil}")?;
        }
        write!(f, "{}%", self.type_name)
    }
}

/// An embedded regular expression.
///
/// Holds two compiled forms of the same source: one anchored at both ends
/// for span verification, one anchored at the start for terminal matching.
#[derive(Clone, Debug)]
pub struct RegexNode {
    source: String,
    full: Regex,
    prefix: Regex,
}

impl RegexNode {
    /// Compiles a regular expression node.
    ///
    /// # Errors
    ///
    /// Returns the regex compiler's error if `source` is not a valid
    /// expression.
    pub fn new(source: impl Into<String>) -> Result<Self, regex::Error> {
        let source = source.into();
        let full = Regex::new(&format!("^(?:{source})$"))?;
        let prefix = Regex::new(&format!("^(?:{source})"))?;
        Ok(Self {
            source,
            full,
            prefix,
        })
    }

    /// The expression as written in the grammar.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns true if the whole of `text` matches the expression.
    #[must_use]
    pub fn is_full_match(&self, text: &str) -> bool {
        self.full.is_match(text)
    }

    /// Length in bytes of the leftmost match anchored at the start of `text`.
    #[must_use]
    pub fn prefix_len(&self, text: &str) -> Option<usize> {
        self.prefix.find(text).map(|m| m.end())
    }
}

impl PartialEq for RegexNode {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl fmt::Display for RegexNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.source.replace('>', "\\>"))
    }
}

/// One alternative of a Choice or Optional node.
#[derive(Clone, Debug, PartialEq)]
pub struct Alternative {
    /// Parse mark XORed into the result when this alternative is taken.
    pub mark: i32,
    /// The alternative's own node sequence.
    pub pattern: Pattern,
}

impl Alternative {
    /// Creates an alternative with the given mark.
    #[must_use]
    pub fn new(mark: i32, pattern: Pattern) -> Self {
        Self { mark, pattern }
    }

    /// The alternative's nodes.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        self.pattern.nodes()
    }
}

impl fmt::Display for Alternative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mark != 0 {
            write!(f, "{}{MARK_SEPARATOR}", self.mark)?;
        }
        write!(f, "{}", self.pattern)
    }
}
