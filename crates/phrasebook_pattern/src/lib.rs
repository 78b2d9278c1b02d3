//! Grammar patterns for Phrasebook.
//!
//! This crate provides:
//! - [`compile`] - Grammar text to [`Pattern`]
//! - [`Pattern::matches`] - Backtracking match producing a [`MatchResult`]
//! - [`unroll`] - Every literal string a pattern can spell out
//! - [`Tracer`] - Step-by-step match tracing
//!
//! # Example
//!
//! ```
//! use phrasebook_pattern::Pattern;
//!
//! let pattern = Pattern::compile("(1¦take|2¦get) %item% from %container%").unwrap();
//! let result = pattern.matches("get lamp from chest", false);
//! assert!(result.is_success());
//! assert_eq!(result.mark(), 2);
//! assert_eq!(result.texts_for_type("item"), vec!["lamp"]);
//! assert_eq!(result.texts_for_type("container"), vec!["chest"]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod compiler;
pub mod matcher;
pub mod node;
pub mod pattern;
pub mod result;
pub mod trace;
pub mod unroll;


pub use compiler::compile;
pub use matcher::{Matcher, match_pattern};
pub use node::{Alternative, Constraint, MARK_SEPARATOR, Node, Placeholder, RegexNode};
pub use pattern::Pattern;
pub use result::{Capture, MatchResult, MatchState};
pub use trace::{
    HumanFormatter, JsonFormatter, TraceBuffer, TraceEvent, TraceFormatter, TraceOutput,
    TraceRecord, Tracer, TracerConfig,
};
pub use unroll::unroll;
