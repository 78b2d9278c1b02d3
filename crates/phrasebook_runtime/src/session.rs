//! Session state for the REPL.
//!
//! The session holds the grammar under test and the settings every match
//! runs with.

use std::collections::BTreeSet;
use std::fmt;

use phrasebook_foundation::{Error, ErrorContext, ErrorKind, Result};
use phrasebook_pattern::{MatchResult, Node, Pattern, Tracer, TracerConfig};

/// Session state for an interactive REPL session.
pub struct Session {
    /// Grammar text and its compiled pattern.
    grammar: Option<(String, Pattern)>,

    /// Greedy flag applied to every compiled pattern.
    greedy: bool,

    /// Whether matches may leave trailing input unconsumed.
    allow_leftover: bool,

    /// Tracer for match steps; disabled unless turned on.
    tracer: Tracer,
}

impl Session {
    /// Creates a session with no grammar, greedy matching and no leftover.
    #[must_use]
    pub fn new() -> Self {
        Self {
            grammar: None,
            greedy: true,
            allow_leftover: false,
            tracer: Tracer::new(TracerConfig::new()),
        }
    }

    /// Compiles `text` and makes it the current grammar.
    ///
    /// # Errors
    ///
    /// Returns the compile error with the grammar attached as context; the
    /// previous grammar is kept.
    pub fn set_grammar(&mut self, text: &str) -> Result<&Pattern> {
        let pattern = Pattern::compile(text).map_err(|e| {
            let mut context = ErrorContext::new().with_source(text);
            if let Some(position) = e.position() {
                context = context.with_position(position);
            }
            e.with_context(context)
        })?;
        let (_, pattern) = self
            .grammar
            .insert((text.to_string(), pattern.with_greedy(self.greedy)));
        Ok(&*pattern)
    }

    /// The current grammar text.
    #[must_use]
    pub fn grammar(&self) -> Option<&str> {
        self.grammar.as_ref().map(|(text, _)| text.as_str())
    }

    /// The current compiled pattern.
    #[must_use]
    pub fn pattern(&self) -> Option<&Pattern> {
        self.grammar.as_ref().map(|(_, pattern)| pattern)
    }

    fn require_pattern(&self) -> Result<&Pattern> {
        self.pattern().ok_or_else(no_grammar)
    }

    /// Whether placeholders and regexes prefer longer spans.
    #[must_use]
    pub fn greedy(&self) -> bool {
        self.greedy
    }

    /// Sets the greedy flag, including on the current pattern.
    pub fn set_greedy(&mut self, greedy: bool) {
        self.greedy = greedy;
        if let Some((_, pattern)) = &mut self.grammar {
            pattern.set_greedy(greedy);
        }
    }

    /// Whether matches may leave trailing input unconsumed.
    #[must_use]
    pub fn allow_leftover(&self) -> bool {
        self.allow_leftover
    }

    /// Sets whether matches may leave trailing input unconsumed.
    pub fn set_allow_leftover(&mut self, allow: bool) {
        self.allow_leftover = allow;
    }

    /// Whether matches are traced.
    #[must_use]
    pub fn is_tracing(&self) -> bool {
        self.tracer.is_enabled()
    }

    /// Turns match tracing on or off.
    pub fn set_tracing(&mut self, on: bool) {
        if on {
            self.tracer.enable();
        } else {
            self.tracer.disable();
            self.tracer.clear();
        }
    }

    /// Matches `input` against the current grammar.
    ///
    /// With tracing on, the trace of this match replaces the previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if no grammar has been set.
    pub fn match_input(&mut self, input: &str) -> Result<MatchReport> {
        let pattern = self.grammar.as_ref().map(|(_, p)| p).ok_or_else(no_grammar)?;
        let result = if self.tracer.is_enabled() {
            self.tracer.clear();
            pattern.matches_traced(input, self.allow_leftover, &mut self.tracer)
        } else {
            pattern.matches(input, self.allow_leftover)
        };
        Ok(MatchReport::from_result(&result))
    }

    /// The formatted trace of the last traced match.
    #[must_use]
    pub fn trace_output(&self) -> String {
        self.tracer.format_all()
    }

    /// Every literal string the current grammar spells out.
    ///
    /// # Errors
    ///
    /// Returns an error if no grammar has been set.
    pub fn unroll(&self) -> Result<BTreeSet<String>> {
        Ok(self.require_pattern()?.unroll())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

fn no_grammar() -> Error {
    Error::new(ErrorKind::InvalidArgument(
        "no grammar set (use :grammar <text>)".to_string(),
    ))
}

// =============================================================================
// MatchReport
// =============================================================================

/// Owned summary of a match, detached from the pattern it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchReport {
    /// Whether the match succeeded.
    pub success: bool,
    /// Accumulated parse mark.
    pub mark: i32,
    /// `(grammar, text)` for each placeholder and regex capture, in order.
    pub captures: Vec<(String, String)>,
    /// Unconsumed input of a successful match.
    pub leftover: Option<String>,
    /// Grammar of the top-level node the match got furthest into.
    pub failed_at: Option<String>,
}

impl MatchReport {
    /// Summarizes `result`.
    #[must_use]
    pub fn from_result(result: &MatchResult<'_>) -> Self {
        let captures = result
            .captures()
            .filter(|c| matches!(c.node, Node::Placeholder(_) | Node::Regex(_)))
            .map(|c| (c.node.to_string(), c.text.clone()))
            .collect();
        Self {
            success: result.is_success(),
            mark: result.mark(),
            captures,
            leftover: result.leftover().map(str::to_string),
            failed_at: result.failed_node().map(Node::to_string),
        }
    }
}

impl fmt::Display for MatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.success {
            return match &self.failed_at {
                Some(node) => write!(f, "no match (failed at {node})"),
                None => write!(f, "no match"),
            };
        }
        write!(f, "match mark={}", self.mark)?;
        for (node, text) in &self.captures {
            write!(f, "\n  {node} = {text:?}")?;
        }
        if let Some(leftover) = &self.leftover {
            write!(f, "\n  leftover: {leftover:?}")?;
        }
        Ok(())
    }
}
