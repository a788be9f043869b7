//! Semantic version and requirement types.
//!
//! Provides Version and Requirement types that follow the semantic versioning
//! specification. Requirements are comparator lists, so `">= 1.0, < 2.0"`
//! parses into two comparators that must both accept a version.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Semantic version (major.minor.patch-prerelease+build)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub prerelease: Option<String>,
    pub build: Option<String>,
}

/// Version requirement (^1.0.0, ~2.3.0, >= 1.0, < 2.0)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Requirement {
    pub comparators: Vec<Comparator>,
}

/// Individual version comparator
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Comparator {
    pub op: Op,
    pub version: PartialVersion,
}

/// Comparison operator for version requirements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Op {
    Exact,     // = 1.0.0
    Greater,   // > 1.0.0
    GreaterEq, // >= 1.0.0
    Less,      // < 1.0.0
    LessEq,    // <= 1.0.0
    Tilde,     // ~1.0.0
    Caret,     // ^1.0.0
    Wildcard,  // *
}

/// Partial version for comparisons (may have missing components)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PartialVersion {
    pub major: u64,
    pub minor: Option<u64>,
    pub patch: Option<u64>,
    pub prerelease: Option<String>,
}

/// Version parsing and validation errors
#[derive(Error, Debug)]
pub enum VersionError {
    #[error("Invalid version format: {input}")]
    InvalidFormat { input: String },

    #[error("Invalid number in version: {component}")]
    InvalidNumber { component: String },

    #[error("Invalid requirement: {input}")]
    InvalidRequirement { input: String },
}

impl Version {
    /// Create a new version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            prerelease: None,
            build: None,
        }
    }

    /// Check if this version satisfies a requirement
    pub fn satisfies(&self, req: &Requirement) -> bool {
        req.matches(self)
    }

    /// Check if this is a prerelease version
    pub fn is_prerelease(&self) -> bool {
        self.prerelease.is_some()
    }

    /// Get the precedence for comparison (ignores build metadata)
    fn precedence_cmp(&self, other: &Self) -> Ordering {
        match (self.major, self.minor, self.patch).cmp(&(other.major, other.minor, other.patch)) {
            Ordering::Equal => {
                match (&self.prerelease, &other.prerelease) {
                    (None, None) => Ordering::Equal,
                    (Some(_), None) => Ordering::Less, // prerelease < normal
                    (None, Some(_)) => Ordering::Greater,
                    (Some(a), Some(b)) => a.cmp(b),
                }
            },
            other => other,
        }
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();

        // Split on '+' for build metadata
        let (version_part, build) = match input.split_once('+') {
            Some((v, b)) => (v, Some(b.to_string())),
            None => (input, None),
        };

        // Split on '-' for prerelease
        let (core_part, prerelease) = match version_part.split_once('-') {
            Some((c, p)) => (c, Some(p.to_string())),
            None => (version_part, None),
        };

        // Parse major.minor.patch
        let parts: Vec<&str> = core_part.split('.').collect();
        if parts.len() != 3 {
            return Err(VersionError::InvalidFormat {
                input: input.to_string(),
            });
        }

        let major = parts[0].parse().map_err(|_| VersionError::InvalidNumber {
            component: parts[0].to_string(),
        })?;
        let minor = parts[1].parse().map_err(|_| VersionError::InvalidNumber {
            component: parts[1].to_string(),
        })?;
        let patch = parts[2].parse().map_err(|_| VersionError::InvalidNumber {
            component: parts[2].to_string(),
        })?;

        Ok(Version {
            major,
            minor,
            patch,
            prerelease,
            build,
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;

        if let Some(ref pre) = self.prerelease {
            write!(f, "-{}", pre)?;
        }

        if let Some(ref build) = self.build {
            write!(f, "+{}", build)?;
        }

        Ok(())
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.precedence_cmp(other)
    }
}

impl Requirement {
    /// Parse a requirement string. Comparators are comma separated and
    /// versions may be partial: `">= 1"`, `"= 1.2"`, `">= 1.0, < 2.0"`.
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(VersionError::InvalidRequirement {
                input: input.to_string(),
            });
        }

        let comparators = input
            .split(',')
            .map(|part| Comparator::parse(part.trim()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Requirement { comparators })
    }

    /// The requirement that accepts every version, rendered as `>= 0`
    pub fn any() -> Self {
        Requirement {
            comparators: vec![Comparator {
                op: Op::GreaterEq,
                version: PartialVersion {
                    major: 0,
                    minor: None,
                    patch: None,
                    prerelease: None,
                },
            }],
        }
    }

    /// A requirement accepting exactly one version
    pub fn exact(version: &Version) -> Self {
        Requirement {
            comparators: vec![Comparator {
                op: Op::Exact,
                version: PartialVersion {
                    major: version.major,
                    minor: Some(version.minor),
                    patch: Some(version.patch),
                    prerelease: version.prerelease.clone(),
                },
            }],
        }
    }

    /// Check if a version matches this requirement
    pub fn matches(&self, version: &Version) -> bool {
        self.comparators.iter().all(|comp| comp.matches(version))
    }
}

impl Default for Requirement {
    fn default() -> Self {
        Self::any()
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, comp) in self.comparators.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", comp)?;
        }
        Ok(())
    }
}

impl Comparator {
    fn parse(input: &str) -> Result<Self, VersionError> {
        if input == "*" {
            return Ok(Comparator {
                op: Op::Wildcard,
                version: PartialVersion {
                    major: 0,
                    minor: None,
                    patch: None,
                    prerelease: None,
                },
            });
        }

        // Parse operator prefix
        let (op, version_str) = if let Some(stripped) = input.strip_prefix("^") {
            (Op::Caret, stripped)
        } else if let Some(stripped) = input.strip_prefix("~") {
            (Op::Tilde, stripped)
        } else if let Some(stripped) = input.strip_prefix(">=") {
            (Op::GreaterEq, stripped)
        } else if let Some(stripped) = input.strip_prefix("<=") {
            (Op::LessEq, stripped)
        } else if let Some(stripped) = input.strip_prefix(">") {
            (Op::Greater, stripped)
        } else if let Some(stripped) = input.strip_prefix("<") {
            (Op::Less, stripped)
        } else if let Some(stripped) = input.strip_prefix("=") {
            (Op::Exact, stripped)
        } else {
            (Op::Exact, input)
        };

        let version = PartialVersion::parse(version_str.trim())?;
        Ok(Comparator { op, version })
    }

    /// Check if a version matches this comparator
    pub fn matches(&self, version: &Version) -> bool {
        match self.op {
            Op::Exact => self.version.matches_exact(version),
            Op::Wildcard => true,
            Op::Greater => version > &self.version.to_version(),
            Op::GreaterEq => version >= &self.version.to_version(),
            Op::Less => version < &self.version.to_version(),
            Op::LessEq => version <= &self.version.to_version(),
            Op::Tilde => self.version.matches_tilde(version),
            Op::Caret => self.version.matches_caret(version),
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self.op {
            Op::Exact => "=",
            Op::Greater => ">",
            Op::GreaterEq => ">=",
            Op::Less => "<",
            Op::LessEq => "<=",
            Op::Tilde => "~",
            Op::Caret => "^",
            Op::Wildcard => return write!(f, "*"),
        };
        match self.op {
            Op::Tilde | Op::Caret => write!(f, "{}{}", symbol, self.version),
            _ => write!(f, "{} {}", symbol, self.version),
        }
    }
}

impl PartialVersion {
    fn parse(input: &str) -> Result<Self, VersionError> {
        if input.is_empty() {
            return Err(VersionError::InvalidRequirement {
                input: input.to_string(),
            });
        }

        let (core_part, prerelease) = match input.split_once('-') {
            Some((c, p)) => (c, Some(p.to_string())),
            None => (input, None),
        };

        let mut parts = core_part.split('.');
        let major = Self::parse_component(parts.next())?;
        let minor = parts.next().map(|p| Self::parse_component(Some(p))).transpose()?;
        let patch = parts.next().map(|p| Self::parse_component(Some(p))).transpose()?;
        if parts.next().is_some() {
            return Err(VersionError::InvalidFormat {
                input: input.to_string(),
            });
        }

        Ok(PartialVersion {
            major,
            minor,
            patch,
            prerelease,
        })
    }

    fn parse_component(part: Option<&str>) -> Result<u64, VersionError> {
        let part = part.ok_or_else(|| VersionError::InvalidFormat {
            input: String::new(),
        })?;
        part.parse().map_err(|_| VersionError::InvalidNumber {
            component: part.to_string(),
        })
    }

    /// Convert to a full version (filling missing parts with 0)
    pub fn to_version(&self) -> Version {
        Version {
            major: self.major,
            minor: self.minor.unwrap_or(0),
            patch: self.patch.unwrap_or(0),
            prerelease: self.prerelease.clone(),
            build: None,
        }
    }

    /// Check exact match; missing components accept any value
    fn matches_exact(&self, version: &Version) -> bool {
        version.major == self.major
            && self.minor.map_or(true, |m| version.minor == m)
            && self.patch.map_or(true, |p| version.patch == p)
            && version.prerelease == self.prerelease
    }

    /// Check tilde match (~1.2.3 allows >=1.2.3 <1.3.0)
    fn matches_tilde(&self, version: &Version) -> bool {
        if version.major != self.major {
            return false;
        }

        match self.minor {
            Some(minor) => version.minor == minor && version.patch >= self.patch.unwrap_or(0),
            None => true,
        }
    }

    /// Check caret match (^1.2.3 allows >=1.2.3 <2.0.0)
    fn matches_caret(&self, version: &Version) -> bool {
        if version.major != self.major {
            return false;
        }

        let base_version = self.to_version();
        version >= &base_version
    }
}

impl fmt::Display for PartialVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.major)?;
        if let Some(minor) = self.minor {
            write!(f, ".{}", minor)?;
        }
        if let Some(patch) = self.patch {
            write!(f, ".{}", patch)?;
        }
        if let Some(ref pre) = self.prerelease {
            write!(f, "-{}", pre)?;
        }
        Ok(())
    }
}
