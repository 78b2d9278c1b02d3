//! Trace output formatters.

use std::fmt::Write;

use super::record::{TraceEvent, TraceRecord};

/// Trait for formatting trace records.
pub trait TraceFormatter {
    /// Formats a single trace record.
    fn format(&self, record: &TraceRecord) -> String;

    /// Formats multiple records, one per line.
    fn format_many(&self, records: &[&TraceRecord]) -> String {
        records
            .iter()
            .map(|r| self.format(r))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// =============================================================================
// Human-Readable Formatter
// =============================================================================

/// Formats trace records as indented lines, two spaces per nesting level.
#[derive(Clone, Debug, Default)]
pub struct HumanFormatter {
    /// Whether to include timestamps.
    pub show_timestamps: bool,
    /// Whether to include record IDs.
    pub show_ids: bool,
}

impl HumanFormatter {
    /// Creates a formatter with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to show timestamps.
    #[must_use]
    pub fn with_timestamps(mut self) -> Self {
        self.show_timestamps = true;
        self
    }

    /// Builder method to show record IDs.
    #[must_use]
    pub fn with_ids(mut self) -> Self {
        self.show_ids = true;
        self
    }

    #[allow(clippy::cast_precision_loss)]
    fn format_timestamp(ns: u64) -> String {
        let us = ns / 1000;
        if us >= 1000 {
            format!("{:.3}ms", us as f64 / 1000.0)
        } else {
            format!("{us}us")
        }
    }
}

impl TraceFormatter for HumanFormatter {
    fn format(&self, record: &TraceRecord) -> String {
        let mut line = String::new();

        if self.show_ids {
            let _ = write!(line, "[{:06}] ", record.id);
        }
        if self.show_timestamps {
            let _ = write!(line, "{:>10} ", Self::format_timestamp(record.timestamp_ns));
        }
        line.push_str(&"  ".repeat(record.depth));

        let _ = match &record.event {
            TraceEvent::NodeEnter {
                kind,
                grammar,
                position,
            } => write!(line, "@{position} {kind} {grammar:?}"),
            TraceEvent::NodeMatched {
                kind,
                text,
                position,
            } => write!(line, "@{position} {kind} matched {text:?}"),
            TraceEvent::NodeFailed { kind, position } => {
                write!(line, "@{position} {kind} FAILED")
            }
            TraceEvent::SplitTried {
                kind,
                span,
                position,
            } => write!(line, "@{position} {kind} tries {span:?}"),
            TraceEvent::AlternativeTried {
                index,
                mark,
                position,
            } => write!(line, "@{position} alternative #{index} (mark {mark})"),
            TraceEvent::SpaceSkipped { position } => {
                write!(line, "@{position} space skipped before optional")
            }
            TraceEvent::SpaceElided { position } => write!(line, "@{position} space elided"),
            TraceEvent::MatchFinished {
                success,
                mark,
                leftover,
            } => {
                let status = if *success { "OK" } else { "FAILED" };
                match leftover {
                    Some(rest) => write!(line, "=== MATCH {status} mark={mark} leftover={rest:?}"),
                    None => write!(line, "=== MATCH {status} mark={mark}"),
                }
            }
        };

        line
    }
}

// =============================================================================
// JSON Formatter
// =============================================================================

/// Formats trace records as single-line JSON objects.
#[derive(Clone, Debug, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    /// Creates a new JSON formatter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn escape_string(s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '\\' => out.push_str("\\\\"),
                '"' => out.push_str("\\\""),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                c if c.is_control() => {
                    let _ = write!(out, "\\u{:04x}", u32::from(c));
                }
                c => out.push(c),
            }
        }
        out
    }
}

impl TraceFormatter for JsonFormatter {
    fn format(&self, record: &TraceRecord) -> String {
        let data = match &record.event {
            TraceEvent::NodeEnter {
                kind,
                grammar,
                position,
            } => format!(
                "\"kind\":\"{kind}\",\"grammar\":\"{}\",\"position\":{position}",
                Self::escape_string(grammar)
            ),
            TraceEvent::NodeMatched {
                kind,
                text,
                position,
            } => format!(
                "\"kind\":\"{kind}\",\"text\":\"{}\",\"position\":{position}",
                Self::escape_string(text)
            ),
            TraceEvent::NodeFailed { kind, position } => {
                format!("\"kind\":\"{kind}\",\"position\":{position}")
            }
            TraceEvent::SplitTried {
                kind,
                span,
                position,
            } => format!(
                "\"kind\":\"{kind}\",\"span\":\"{}\",\"position\":{position}",
                Self::escape_string(span)
            ),
            TraceEvent::AlternativeTried {
                index,
                mark,
                position,
            } => format!("\"index\":{index},\"mark\":{mark},\"position\":{position}"),
            TraceEvent::SpaceSkipped { position } | TraceEvent::SpaceElided { position } => {
                format!("\"position\":{position}")
            }
            TraceEvent::MatchFinished {
                success,
                mark,
                leftover,
            } => {
                let leftover = leftover.as_ref().map_or_else(
                    || "null".to_string(),
                    |rest| format!("\"{}\"", Self::escape_string(rest)),
                );
                format!("\"success\":{success},\"mark\":{mark},\"leftover\":{leftover}")
            }
        };

        format!(
            "{{\"id\":{},\"depth\":{},\"ts\":{},\"type\":\"{}\",{data}}}",
            record.id,
            record.depth,
            record.timestamp_ns,
            record.event_type()
        )
    }
}
