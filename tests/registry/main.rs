//! Integration tests for Layer 2: Registry
//!
//! Tests for ranked matching over many patterns and unrolled name tables.

mod name_table_tests;
mod registry_tests;
