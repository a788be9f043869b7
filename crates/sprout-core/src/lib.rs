//! # sprout-core
//!
//! Core value types shared across the Sprout crates.
//!
//! This crate provides:
//! - Version and Requirement types for version matching
//! - Dependency and Candidate types for package metadata
//! - Platform type with a compatibility predicate
//!
//! ## Architecture
//!
//! Everything lives under `types`; the resolver crate consumes these as
//! read-only values and never constructs candidates itself.

pub mod types;

// Re-export commonly used types
pub use types::{
    Candidate, Dependency, DependencyKind, Platform, Requirement, Version, VersionError,
};
