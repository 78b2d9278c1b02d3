//! Integration tests for Layer 1: Pattern
//!
//! Tests for the grammar compiler, the backtracking matcher, unrolling, and
//! match tracing.

mod compile_tests;
mod matching_tests;
mod trace_tests;
mod unroll_tests;
