//! REPL, CLI, and serialization for Phrasebook.
//!
//! This crate provides:
//! - [`Repl`] - Interactive grammar workbench
//! - [`Session`] - Current grammar and match settings
//! - Grammar file loading and name-table serialization

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod editor;
pub mod grammar_file;
pub mod highlight;
pub mod repl;
pub mod serialize;
pub mod session;

pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use grammar_file::{load_grammar_file, parse_grammar_file};
pub use repl::{Repl, Reply};
pub use session::{MatchReport, Session};
