//! Dependency resolution engine for Sprout
//!
//! This crate turns a set of requested dependencies into a consistent,
//! conflict-free set of package versions to activate. Resolution is a
//! depth-first backtracking search over the candidates reported by an
//! injected [`CandidateSource`]; conflicts are detected, pruned, and
//! reported with the full chain of requests that produced them.

pub mod conflict;
pub mod engine;
pub mod request;
pub mod resolution;
pub mod source;

// Re-export main types
pub use conflict::Conflict;
pub use engine::{ResolveError, Resolver};
pub use request::{ActivationRequest, DependencyRequest};
pub use resolution::Resolution;
pub use source::{CandidateSource, ComposedSource, InstalledSource, PinnedSource};
