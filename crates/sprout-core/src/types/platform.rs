//! Platform identifiers and the compatibility predicate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Platform a candidate was built for
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Platform {
    /// Platform-independent; compatible with every environment
    Any,
    /// A specific target triple or platform tag
    Target(String),
}

impl Platform {
    /// Create a target platform from a tag
    pub fn target(tag: impl Into<String>) -> Self {
        Platform::Target(tag.into())
    }

    /// Check whether a candidate built for `self` can run on `host`.
    /// `Any` on either side is always compatible; targets must match exactly.
    pub fn compatible(&self, host: &Platform) -> bool {
        match (self, host) {
            (Platform::Any, _) | (_, Platform::Any) => true,
            (Platform::Target(a), Platform::Target(b)) => a == b,
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Platform::Any
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Any => write!(f, "any"),
            Platform::Target(tag) => write!(f, "{}", tag),
        }
    }
}
