//! Dependency specification types.
//!
//! A dependency names a package, the versions that satisfy it, and whether
//! the edge is needed at runtime or only for development.

use super::{Candidate, Platform, Requirement};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Dependency specification
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Dependency {
    pub name: String,
    pub requirement: Requirement,
    pub kind: DependencyKind,
}

/// Type of dependency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum DependencyKind {
    /// Normal runtime dependency
    Runtime,
    /// Development-only dependency
    Development,
}

impl Dependency {
    /// Create a new runtime dependency
    pub fn new(name: impl Into<String>, requirement: Requirement) -> Self {
        Self {
            name: name.into(),
            requirement,
            kind: DependencyKind::Runtime,
        }
    }

    /// Create a development dependency
    pub fn development(name: impl Into<String>, requirement: Requirement) -> Self {
        Self {
            name: name.into(),
            requirement,
            kind: DependencyKind::Development,
        }
    }

    /// Check whether `candidate` satisfies this dependency: the names are
    /// equal, the requirement accepts the candidate's version, and the
    /// candidate's platform is compatible with `host`.
    pub fn matches(&self, candidate: &Candidate, host: &Platform) -> bool {
        self.name == candidate.name
            && self.requirement.matches(&candidate.version)
            && candidate.platform.compatible(host)
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.requirement)
    }
}

impl DependencyKind {
    /// Check if this dependency is needed at runtime
    pub fn is_runtime(&self) -> bool {
        matches!(self, DependencyKind::Runtime)
    }

    /// Check if this dependency is only for development
    pub fn is_development(&self) -> bool {
        matches!(self, DependencyKind::Development)
    }
}
