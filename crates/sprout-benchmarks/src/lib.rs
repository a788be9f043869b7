//! Sprout benchmarking suite
//!
//! Benchmarks for resolution and version matching performance over
//! synthetic dependency graphs of various shapes and sizes.

pub mod common;

pub use common::*;
