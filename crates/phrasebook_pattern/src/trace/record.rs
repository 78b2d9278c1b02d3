//! Trace event and record types.
//!
//! Events own their data so a trace can outlive the match that produced it.

// =============================================================================
// Trace Event
// =============================================================================

/// Events recorded while matching.
#[derive(Clone, Debug, PartialEq)]
pub enum TraceEvent {
    /// The matcher reached a node.
    NodeEnter {
        /// Node kind name.
        kind: &'static str,
        /// The node rendered as grammar text.
        grammar: String,
        /// Byte offset into the input.
        position: usize,
    },

    /// A node consumed some input.
    NodeMatched {
        /// Node kind name.
        kind: &'static str,
        /// The consumed text.
        text: String,
        /// Byte offset where the text began.
        position: usize,
    },

    /// A node could not match at this position.
    NodeFailed {
        /// Node kind name.
        kind: &'static str,
        /// Byte offset into the input.
        position: usize,
    },

    /// A placeholder or regex tried owning a span.
    SplitTried {
        /// Node kind name.
        kind: &'static str,
        /// The span being tried.
        span: String,
        /// Byte offset where the span began.
        position: usize,
    },

    /// A choice or optional tried one of its alternatives.
    AlternativeTried {
        /// Zero-based alternative index.
        index: usize,
        /// The alternative's parse mark.
        mark: i32,
        /// Byte offset into the input.
        position: usize,
    },

    /// A space was skipped ahead of an optional.
    SpaceSkipped {
        /// Byte offset into the input.
        position: usize,
    },

    /// A space was elided after a node that consumed nothing.
    SpaceElided {
        /// Byte offset into the input.
        position: usize,
    },

    /// The match attempt finished.
    MatchFinished {
        /// Whether the match succeeded.
        success: bool,
        /// Accumulated parse mark.
        mark: i32,
        /// Unconsumed trailing input, if any.
        leftover: Option<String>,
    },
}

impl TraceEvent {
    /// Returns a short name for the event type.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::NodeEnter { .. } => "node-enter",
            Self::NodeMatched { .. } => "node-matched",
            Self::NodeFailed { .. } => "node-failed",
            Self::SplitTried { .. } => "split-tried",
            Self::AlternativeTried { .. } => "alternative-tried",
            Self::SpaceSkipped { .. } => "space-skipped",
            Self::SpaceElided { .. } => "space-elided",
            Self::MatchFinished { .. } => "match-finished",
        }
    }

    /// Input position the event refers to, if it has one.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::NodeEnter { position, .. }
            | Self::NodeMatched { position, .. }
            | Self::NodeFailed { position, .. }
            | Self::SplitTried { position, .. }
            | Self::AlternativeTried { position, .. }
            | Self::SpaceSkipped { position }
            | Self::SpaceElided { position } => Some(*position),
            Self::MatchFinished { .. } => None,
        }
    }

    /// Returns true for events about the space adjacency rules.
    #[must_use]
    pub fn is_space_event(&self) -> bool {
        matches!(self, Self::SpaceSkipped { .. } | Self::SpaceElided { .. })
    }

    /// Returns true for backtracking decision points.
    #[must_use]
    pub fn is_decision(&self) -> bool {
        matches!(
            self,
            Self::SplitTried { .. } | Self::AlternativeTried { .. }
        )
    }
}

// =============================================================================
// Trace Record
// =============================================================================

/// A timestamped trace record.
#[derive(Clone, Debug)]
pub struct TraceRecord {
    /// Unique record ID within the tracer's lifetime.
    pub id: u64,
    /// Nesting depth of the alternative being matched.
    pub depth: usize,
    /// Timestamp in nanoseconds since the tracer was created.
    pub timestamp_ns: u64,
    /// The trace event.
    pub event: TraceEvent,
}

impl TraceRecord {
    /// Creates a new trace record.
    #[must_use]
    pub fn new(id: u64, depth: usize, timestamp_ns: u64, event: TraceEvent) -> Self {
        Self {
            id,
            depth,
            timestamp_ns,
            event,
        }
    }

    /// Returns the event type name.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        self.event.event_type()
    }
}
