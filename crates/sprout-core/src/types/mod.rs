//! Core data types for Sprout dependency resolution.
//!
//! This module provides the fundamental types the resolver operates on:
//! - Version and Requirement types for version matching
//! - Dependency specifications and package candidates
//! - Platform identifiers with a compatibility predicate

pub mod candidate;
pub mod dependency;
pub mod platform;
pub mod version;

// Re-export all public types
pub use candidate::Candidate;
pub use dependency::{Dependency, DependencyKind};
pub use platform::Platform;
pub use version::{Comparator, Op, PartialVersion, Requirement, Version, VersionError};
