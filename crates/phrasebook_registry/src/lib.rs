//! Pattern registry and name tables for Phrasebook.
//!
//! This crate provides:
//! - [`PatternRegistry`] - Compiled patterns by caller key, ranked matching
//! - [`NameTable`] - Offline index from unrolled names to pattern keys
//!
//! Nothing here is global: callers construct a registry and pass it to
//! whatever needs it.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod name_table;
pub mod registry;

pub use name_table::NameTable;
pub use registry::{PatternRegistry, RegisteredGrammar, RegistryMatch};
