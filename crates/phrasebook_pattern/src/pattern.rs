//! Compiled patterns.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use phrasebook_foundation::{Error, Result};

use crate::compiler;
use crate::matcher::Matcher;
use crate::node::{Node, Placeholder};
use crate::result::MatchResult;
use crate::trace::Tracer;
use crate::unroll;

/// A compiled grammar: an immutable, ordered sequence of nodes.
///
/// Nodes live in a shared slice, so cloning a pattern is cheap and a pattern
/// can be matched from several threads at once.
#[derive(Clone, Debug, PartialEq)]
pub struct Pattern {
    nodes: Arc<[Node]>,
    greedy: bool,
}

impl Pattern {
    /// Compiles grammar text into a pattern.
    ///
    /// # Errors
    ///
    /// Returns a compile error for unbalanced brackets, missing `>` or `%`
    /// terminators, malformed parse marks and invalid regular expressions.
    pub fn compile(text: &str) -> Result<Self> {
        compiler::compile(text)
    }

    /// Wraps an already-built node sequence.
    #[must_use]
    pub fn from_nodes(nodes: Vec<Node>) -> Self {
        Self {
            nodes: nodes.into(),
            greedy: true,
        }
    }

    /// The empty pattern, which only matches the empty string.
    #[must_use]
    pub fn empty() -> Self {
        Self::from_nodes(Vec::new())
    }

    /// The pattern's nodes in matching order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Number of top-level nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the pattern has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether placeholders and regexes prefer the longest span.
    #[must_use]
    pub fn greedy(&self) -> bool {
        self.greedy
    }

    /// Builder method to set the greedy flag.
    #[must_use]
    pub fn with_greedy(mut self, greedy: bool) -> Self {
        self.greedy = greedy;
        self
    }

    /// Sets the greedy flag; read by every subsequent match.
    pub fn set_greedy(&mut self, greedy: bool) {
        self.greedy = greedy;
    }

    /// Matches `input` against this pattern.
    ///
    /// With `allow_leftover`, trailing input is returned as leftover text
    /// instead of failing the match.
    #[must_use]
    pub fn matches(&self, input: &str, allow_leftover: bool) -> MatchResult<'_> {
        Matcher::new(self, input, allow_leftover).run()
    }

    /// Matches `input`, recording every matcher step into `tracer`.
    #[must_use]
    pub fn matches_traced(
        &self,
        input: &str,
        allow_leftover: bool,
        tracer: &mut Tracer,
    ) -> MatchResult<'_> {
        Matcher::new(self, input, allow_leftover)
            .with_tracer(tracer)
            .run()
    }

    /// Every literal string this pattern can spell out.
    #[must_use]
    pub fn unroll(&self) -> BTreeSet<String> {
        unroll::unroll(self)
    }

    /// All placeholders, nested ones included, in declaration order.
    #[must_use]
    pub fn placeholders(&self) -> Vec<&Placeholder> {
        let mut found = Vec::new();
        collect_placeholders(&self.nodes, &mut found);
        found
    }

    /// Number of top-level literal nodes.
    ///
    /// Used to rank competing matches: a pattern that pins down more literal
    /// text is more specific.
    #[must_use]
    pub fn specificity(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, Node::Literal(_)))
            .count()
    }
}

fn collect_placeholders<'a>(nodes: &'a [Node], found: &mut Vec<&'a Placeholder>) {
    for node in nodes {
        match node {
            Node::Placeholder(p) => found.push(p),
            Node::Choice(alts) | Node::Optional(alts) => {
                for alt in alts {
                    collect_placeholders(alt.nodes(), found);
                }
            }
            Node::Literal(_) | Node::Space | Node::Regex(_) => {}
        }
    }
}

impl Default for Pattern {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in self.nodes.iter() {
            write!(f, "{node}")?;
        }
        Ok(())
    }
}

impl FromStr for Pattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::compile(s)
    }
}
