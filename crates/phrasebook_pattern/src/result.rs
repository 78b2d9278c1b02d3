//! Match results.
//!
//! A [`MatchResult`] accumulates the text each node consumed and the
//! XOR-combined parse mark. It is a persistent value: every addition returns a
//! new result sharing structure with the old one, so a backtracking branch can
//! never alter a sibling's partial result. Once a result reaches
//! [`MatchState::Success`] or [`MatchState::Failure`] it is frozen, and any
//! further mutation is a bug in the caller and panics.

use phrasebook_foundation::PVec;

use crate::node::{Constraint, Node, Placeholder};

/// The text one node consumed.
#[derive(Clone, Debug, PartialEq)]
pub struct Capture<'p> {
    /// The node that matched.
    pub node: &'p Node,
    /// The exact text it consumed.
    pub text: String,
}

/// Where a match attempt stands.
#[derive(Clone, Debug, PartialEq)]
pub enum MatchState<'p> {
    /// Still being built by the matcher.
    InProgress,
    /// The pattern matched; `leftover` holds unconsumed trailing input.
    Success {
        /// Trailing input, when leftover was allowed and input remained.
        leftover: Option<String>,
    },
    /// The pattern did not match.
    Failure {
        /// The offending node; `None` means trailing input was not allowed.
        node: Option<&'p Node>,
    },
}

impl MatchState<'_> {
    /// Returns true for the two terminal states.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// The outcome of matching one input against one pattern.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchResult<'p> {
    captures: PVec<Capture<'p>>,
    mark: i32,
    state: MatchState<'p>,
}

impl<'p> MatchResult<'p> {
    /// Creates an empty, in-progress result.
    #[must_use]
    pub fn new() -> Self {
        Self {
            captures: PVec::new(),
            mark: 0,
            state: MatchState::InProgress,
        }
    }

    /// Returns a copy with one more capture appended.
    ///
    /// # Panics
    ///
    /// Panics if this result is frozen.
    #[must_use]
    pub fn with_capture(&self, node: &'p Node, text: impl Into<String>) -> Self {
        self.assert_in_progress("add a capture to");
        Self {
            captures: self.captures.push_back(Capture {
                node,
                text: text.into(),
            }),
            mark: self.mark,
            state: MatchState::InProgress,
        }
    }

    /// Returns a copy with `mark` XORed into the accumulated parse mark.
    ///
    /// # Panics
    ///
    /// Panics if this result is frozen.
    #[must_use]
    pub fn with_mark(&self, mark: i32) -> Self {
        self.assert_in_progress("combine a parse mark into");
        Self {
            captures: self.captures.clone(),
            mark: self.mark ^ mark,
            state: MatchState::InProgress,
        }
    }

    /// Freezes this result as a success.
    ///
    /// # Panics
    ///
    /// Panics if this result is already frozen.
    #[must_use]
    pub fn succeed(mut self, leftover: Option<String>) -> Self {
        self.assert_in_progress("succeed");
        self.state = MatchState::Success { leftover };
        self
    }

    /// Freezes this result as a failure at `node`.
    ///
    /// # Panics
    ///
    /// Panics if this result is already frozen.
    #[must_use]
    pub fn fail(mut self, node: Option<&'p Node>) -> Self {
        self.assert_in_progress("fail");
        self.state = MatchState::Failure { node };
        self
    }

    fn assert_in_progress(&self, action: &str) {
        assert!(
            !self.state.is_terminal(),
            "attempted to {action} a frozen match result ({:?})",
            self.state
        );
    }

    /// The current state.
    #[must_use]
    pub fn state(&self) -> &MatchState<'p> {
        &self.state
    }

    /// Returns true if the match succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self.state, MatchState::Success { .. })
    }

    /// Returns true if the match failed.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self.state, MatchState::Failure { .. })
    }

    /// Returns true once the result is frozen.
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.state.is_terminal()
    }

    /// The accumulated parse mark.
    #[must_use]
    pub fn mark(&self) -> i32 {
        self.mark
    }

    /// Unconsumed trailing input of a successful match.
    #[must_use]
    pub fn leftover(&self) -> Option<&str> {
        match &self.state {
            MatchState::Success { leftover } => leftover.as_deref(),
            _ => None,
        }
    }

    /// The node a failed match stopped at.
    #[must_use]
    pub fn failed_node(&self) -> Option<&'p Node> {
        match self.state {
            MatchState::Failure { node } => node,
            _ => None,
        }
    }

    /// Captures in match order.
    pub fn captures(&self) -> impl Iterator<Item = &Capture<'p>> {
        self.captures.iter()
    }

    /// Number of captures.
    #[must_use]
    pub fn capture_count(&self) -> usize {
        self.captures.len()
    }

    /// The text consumed by `node`, compared by identity.
    #[must_use]
    pub fn text_of(&self, node: &Node) -> Option<&str> {
        self.captures
            .iter()
            .find(|c| std::ptr::eq(c.node, node))
            .map(|c| c.text.as_str())
    }

    /// Placeholder captures, in match order.
    ///
    /// This is what a type resolver consumes: the type to parse, its
    /// constraint, and the text to parse it from.
    pub fn placeholder_texts(&self) -> impl Iterator<Item = (&'p Placeholder, &str)> {
        self.captures.iter().filter_map(|c| match c.node {
            Node::Placeholder(p) => Some((p, c.text.as_str())),
            _ => None,
        })
    }

    /// Texts of placeholders with the given type name.
    #[must_use]
    pub fn texts_for_type(&self, type_name: &str) -> Vec<&str> {
        self.placeholder_texts()
            .filter(|(p, _)| p.type_name == type_name)
            .map(|(_, text)| text)
            .collect()
    }

    /// Texts consumed by regex nodes, in match order.
    pub fn regex_texts(&self) -> impl Iterator<Item = &str> {
        self.captures
            .iter()
            .filter(|c| matches!(c.node, Node::Regex(_)))
            .map(|c| c.text.as_str())
    }

    /// Constraints of the matched placeholders, in match order.
    pub fn constraints(&self) -> impl Iterator<Item = Constraint> + '_ {
        self.placeholder_texts().map(|(p, _)| p.constraint)
    }

    /// The consumed input, reassembled from captures.
    #[must_use]
    pub fn matched_text(&self) -> String {
        self.captures.iter().map(|c| c.text.as_str()).collect()
    }
}

impl Default for MatchResult<'_> {
    fn default() -> Self {
        Self::new()
    }
}
