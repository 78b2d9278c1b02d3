//! Phrasebook - Grammar patterns for command parsing
//!
//! This crate re-exports all layers of the Phrasebook system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: phrasebook_runtime    - REPL, CLI, name-table serialization
//! Layer 2: phrasebook_registry   - Pattern registry, unrolled name tables
//! Layer 1: phrasebook_pattern    - Compiler, matcher, unroller, tracer
//! Layer 0: phrasebook_foundation - Errors, persistent collections
//! ```

pub use phrasebook_foundation as foundation;
pub use phrasebook_pattern as pattern;
pub use phrasebook_registry as registry;
pub use phrasebook_runtime as runtime;
