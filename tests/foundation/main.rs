//! Integration tests for Layer 0: Foundation
//!
//! Tests for error kinds, error context rendering, and persistent collections.

mod collections;
mod errors;
