//! Core error types and persistent collections for Phrasebook.
//!
//! This crate provides:
//! - [`Error`] - Rich error types with grammar-position context
//! - [`PVec`] - Persistent vector used by match accumulators

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod collections;
pub mod error;

pub use collections::PVec;
pub use error::{Error, ErrorContext, ErrorKind, GroupKind, Result};
