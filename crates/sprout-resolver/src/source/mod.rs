//! Candidate sources.
//!
//! A [`CandidateSource`] answers one question: which candidates could satisfy
//! a given request? The engine owns all selection policy; sources only filter
//! by name and requirement. Three implementations cover the common setups:
//! [`InstalledSource`] over a fixed set of already-installed candidates,
//! [`PinnedSource`] over a lockfile-style one-version-per-name map, and
//! [`ComposedSource`] which layers several sources with earlier ones taking
//! precedence.

use std::collections::HashSet;
use std::sync::Arc;

use indexmap::IndexMap;
use sprout_core::types::{Candidate, Platform};
use tracing::trace;

use crate::request::DependencyRequest;

/// Supplier of candidates for the resolver engine
pub trait CandidateSource {
    /// All candidates that could satisfy `request`, in the source's own
    /// preference order for equal versions (earlier is preferred)
    fn find_all(&self, request: &DependencyRequest) -> Vec<Arc<Candidate>>;

    /// Hint that the named requests are about to be resolved, so batched
    /// sources can fetch metadata ahead of time. The default does nothing.
    fn prefetch(&self, _requests: &[DependencyRequest]) {}
}

/// A fixed set of candidates, such as the packages already installed
#[derive(Debug, Default)]
pub struct InstalledSource {
    candidates: Vec<Arc<Candidate>>,
}

impl InstalledSource {
    pub fn new(candidates: Vec<Arc<Candidate>>) -> Self {
        Self { candidates }
    }

    pub fn add(&mut self, candidate: Candidate) {
        self.candidates.push(Arc::new(candidate));
    }
}

impl CandidateSource for InstalledSource {
    fn find_all(&self, request: &DependencyRequest) -> Vec<Arc<Candidate>> {
        let found: Vec<_> = self
            .candidates
            .iter()
            .filter(|c| request.matches(c, &Platform::Any))
            .cloned()
            .collect();
        trace!(request = %request, count = found.len(), "installed lookup");
        found
    }
}

/// At most one candidate per package name, lockfile style
#[derive(Debug, Default)]
pub struct PinnedSource {
    pins: IndexMap<String, Arc<Candidate>>,
}

impl PinnedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin `candidate` as the only answer for its name, replacing any
    /// previous pin
    pub fn pin(&mut self, candidate: Candidate) {
        self.pins.insert(candidate.name.clone(), Arc::new(candidate));
    }

    pub fn get(&self, name: &str) -> Option<&Arc<Candidate>> {
        self.pins.get(name)
    }
}

impl CandidateSource for PinnedSource {
    fn find_all(&self, request: &DependencyRequest) -> Vec<Arc<Candidate>> {
        match self.pins.get(request.name()) {
            Some(pinned) if request.matches(pinned, &Platform::Any) => vec![Arc::clone(pinned)],
            _ => Vec::new(),
        }
    }
}

/// Several sources layered together, earlier sources preferred
#[derive(Default)]
pub struct ComposedSource {
    sources: Vec<Box<dyn CandidateSource>>,
}

impl ComposedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, source: Box<dyn CandidateSource>) {
        self.sources.push(source);
    }

    pub fn with(mut self, source: Box<dyn CandidateSource>) -> Self {
        self.sources.push(source);
        self
    }
}

impl CandidateSource for ComposedSource {
    fn find_all(&self, request: &DependencyRequest) -> Vec<Arc<Candidate>> {
        // First source to report a candidate wins; later duplicates of the
        // same (name, version, platform) are dropped.
        let mut seen: HashSet<Arc<Candidate>> = HashSet::new();
        let mut found = Vec::new();
        for source in &self.sources {
            for candidate in source.find_all(request) {
                if seen.insert(Arc::clone(&candidate)) {
                    found.push(candidate);
                }
            }
        }
        found
    }

    fn prefetch(&self, requests: &[DependencyRequest]) {
        for source in &self.sources {
            source.prefetch(requests);
        }
    }
}
