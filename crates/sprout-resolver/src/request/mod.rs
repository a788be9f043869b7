//! Request and activation value types.
//!
//! A [`DependencyRequest`] is a dependency plus the activation that asked for
//! it; an [`ActivationRequest`] is a chosen candidate plus the request it
//! satisfies. Together they form a parent-pointer chain from any activation
//! back to a root request. Both are cheap to clone (`Arc` inner) because the
//! engine snapshots whole worklists at every choice point.

use std::fmt;
use std::sync::Arc;

use sprout_core::types::{Candidate, Dependency, Platform, Version};

/// A dependency paired with the activation that introduced it
#[derive(Debug, Clone)]
pub struct DependencyRequest {
    inner: Arc<RequestInner>,
}

#[derive(Debug)]
struct RequestInner {
    dependency: Dependency,
    requester: Option<ActivationRequest>,
}

impl DependencyRequest {
    /// A request introduced by expanding an activated candidate's dependencies
    pub fn new(dependency: Dependency, requester: ActivationRequest) -> Self {
        Self {
            inner: Arc::new(RequestInner {
                dependency,
                requester: Some(requester),
            }),
        }
    }

    /// A root-level request with no requester
    pub fn root(dependency: Dependency) -> Self {
        Self {
            inner: Arc::new(RequestInner {
                dependency,
                requester: None,
            }),
        }
    }

    pub fn dependency(&self) -> &Dependency {
        &self.inner.dependency
    }

    /// The activation whose candidate listed this dependency, if any
    pub fn requester(&self) -> Option<&ActivationRequest> {
        self.inner.requester.as_ref()
    }

    pub fn name(&self) -> &str {
        &self.inner.dependency.name
    }

    pub fn is_root(&self) -> bool {
        self.inner.requester.is_none()
    }

    /// Delegate to [`Dependency::matches`]
    pub fn matches(&self, candidate: &Candidate, host: &Platform) -> bool {
        self.inner.dependency.matches(candidate, host)
    }
}

impl PartialEq for DependencyRequest {
    fn eq(&self, other: &Self) -> bool {
        self.inner.dependency == other.inner.dependency
            && self.inner.requester == other.inner.requester
    }
}

impl fmt::Display for DependencyRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner.dependency)
    }
}

/// The decision to activate one candidate to satisfy a request
#[derive(Debug, Clone)]
pub struct ActivationRequest {
    inner: Arc<ActivationInner>,
}

#[derive(Debug)]
struct ActivationInner {
    candidate: Arc<Candidate>,
    request: DependencyRequest,
    others_possible: bool,
}

impl ActivationRequest {
    /// Record the choice of `candidate` for `request`. `others_possible`
    /// marks whether other candidates were still available when the choice
    /// was made; a unique choice cannot itself be revisited on conflict.
    pub fn new(candidate: Arc<Candidate>, request: DependencyRequest, others_possible: bool) -> Self {
        Self {
            inner: Arc::new(ActivationInner {
                candidate,
                request,
                others_possible,
            }),
        }
    }

    pub fn candidate(&self) -> &Arc<Candidate> {
        &self.inner.candidate
    }

    /// The request this activation satisfies
    pub fn request(&self) -> &DependencyRequest {
        &self.inner.request
    }

    pub fn others_possible(&self) -> bool {
        self.inner.others_possible
    }

    pub fn name(&self) -> &str {
        &self.inner.candidate.name
    }

    pub fn version(&self) -> &Version {
        &self.inner.candidate.version
    }

    pub fn full_name(&self) -> String {
        self.inner.candidate.full_name()
    }

    /// The activation whose candidate asked for this one, if any
    pub fn parent(&self) -> Option<&ActivationRequest> {
        self.inner.request.requester()
    }
}

impl PartialEq for ActivationRequest {
    fn eq(&self, other: &Self) -> bool {
        self.inner.candidate == other.inner.candidate
            && self.inner.request == other.inner.request
    }
}

impl fmt::Display for ActivationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_name())
    }
}
