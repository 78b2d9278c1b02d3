//! End-to-end tests across all layers
//!
//! Grammar files are compiled into a registry, unrolled into a name table,
//! shipped through `MessagePack`, and exercised through the REPL.

mod repl_tests;
mod workflow_tests;
