//! Package candidate metadata.
//!
//! A candidate is one installable version of a package as reported by a
//! candidate source. The resolver treats candidates as read-only and never
//! constructs them itself. Identity — equality and hashing — is by
//! `(name, version, platform)` only; the dependency list does not take part.

use super::{Dependency, Platform, Version};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// One installable version of a package
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Candidate {
    pub name: String,
    pub version: Version,
    pub platform: Platform,
    pub dependencies: Vec<Dependency>,
}

impl Candidate {
    /// Create a platform-independent candidate with no dependencies
    pub fn new(name: impl Into<String>, version: Version) -> Self {
        Self {
            name: name.into(),
            version,
            platform: Platform::Any,
            dependencies: Vec::new(),
        }
    }

    /// Set the platform this candidate was built for
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Add a dependency to this candidate
    pub fn with_dependency(mut self, dependency: Dependency) -> Self {
        self.dependencies.push(dependency);
        self
    }

    /// Canonical `name-version` label
    pub fn full_name(&self) -> String {
        format!("{}-{}", self.name, self.version)
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.version == other.version
            && self.platform == other.platform
    }
}

impl Eq for Candidate {}

impl Hash for Candidate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.version.hash(state);
        self.platform.hash(state);
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.platform {
            Platform::Any => write!(f, "{}-{}", self.name, self.version),
            platform => write!(f, "{}-{}-{}", self.name, self.version, platform),
        }
    }
}
