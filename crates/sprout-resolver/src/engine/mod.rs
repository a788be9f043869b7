//! The backtracking resolution engine.
//!
//! Resolution is an iterative depth-first search over an explicit stack of
//! choice points. Each [`Frame`] snapshots the `needed` worklist and `chosen`
//! activation list at the moment a multi-candidate request was met, so trying
//! the next candidate is a restore-and-retry rather than an undo. Conflicts
//! travel as values: a request that collides with an existing activation
//! produces a [`Conflict`] which walks the frame stack looking for the choice
//! point it names. A frame that runs out of candidates converts into a
//! conflict charged to the enclosing choice point; only exhaustion of the
//! bottom frame is terminal.

use std::sync::Arc;

use sprout_core::types::{Candidate, Dependency, Platform};
use thiserror::Error;
use tracing::{debug, trace};

use crate::conflict::Conflict;
use crate::request::{ActivationRequest, DependencyRequest};
use crate::resolution::Resolution;
use crate::source::CandidateSource;

/// Terminal resolution failures
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No candidate at all exists for a request
    #[error("no candidate found for {0}")]
    Unsatisfiable(DependencyRequest),

    /// Candidates existed, but every one of them led to a conflict
    #[error("every candidate for {dependency} was rejected: {}", render_tried(.tried))]
    Impossible {
        dependency: Dependency,
        tried: Vec<(Arc<Candidate>, Conflict)>,
    },

    /// A conflict reached the top of the search with no choice point left
    /// that could fix it
    #[error("dependencies could not be reconciled: {0}")]
    Conflict(Conflict),
}

fn render_tried(tried: &[(Arc<Candidate>, Conflict)]) -> String {
    let rejected: Vec<_> = tried
        .iter()
        .map(|(candidate, conflict)| format!("{candidate} ({conflict})"))
        .collect();
    rejected.join("; ")
}

/// One choice point: a request that had more than one candidate
struct Frame {
    request: DependencyRequest,
    /// Untried candidates, sorted so the best is at the end
    remaining: Vec<Arc<Candidate>>,
    /// The candidate currently under trial
    current: Option<Arc<Candidate>>,
    /// Candidates given up on, each with the conflict that sank it
    tried: Vec<(Arc<Candidate>, Conflict)>,
    needed: Vec<DependencyRequest>,
    chosen: Vec<ActivationRequest>,
}

impl Frame {
    fn new(
        request: DependencyRequest,
        candidates: Vec<Arc<Candidate>>,
        needed: Vec<DependencyRequest>,
        chosen: Vec<ActivationRequest>,
    ) -> Self {
        // Order so that popping from the end yields the highest version, and
        // among equal versions the candidate an earlier source reported.
        let mut indexed: Vec<(usize, Arc<Candidate>)> =
            candidates.into_iter().enumerate().collect();
        indexed.sort_by(|(rank_a, a), (rank_b, b)| {
            a.version.cmp(&b.version).then(rank_b.cmp(rank_a))
        });
        Self {
            request,
            remaining: indexed.into_iter().map(|(_, c)| c).collect(),
            current: None,
            tried: Vec::new(),
            needed,
            chosen,
        }
    }

    /// Give up on the current candidate because of `conflict`. When the
    /// conflict names this frame's package, remaining candidates the
    /// conflicting requirement would also reject are dropped as well, each
    /// recorded with the same conflict.
    fn record(&mut self, conflict: &Conflict, host: &Platform) {
        if let Some(current) = self.current.take() {
            self.tried.push((current, conflict.clone()));
        }
        if !conflict.is_for(self.request.name()) {
            return;
        }
        let rejecting = conflict.unsatisfied().dependency();
        let mut keep = Vec::with_capacity(self.remaining.len());
        for candidate in self.remaining.drain(..).rev() {
            if rejecting.matches(&candidate, host) {
                keep.push(candidate);
            } else {
                trace!(candidate = %candidate, "pruned");
                self.tried.push((candidate, conflict.clone()));
            }
        }
        keep.reverse();
        self.remaining = keep;
    }
}

/// Resolves a set of requested dependencies against a [`CandidateSource`]
pub struct Resolver<'s> {
    source: &'s dyn CandidateSource,
    platform: Platform,
    soft_missing: bool,
    development: bool,
    conflicts: Vec<Conflict>,
    missing: Vec<DependencyRequest>,
}

impl<'s> Resolver<'s> {
    pub fn new(source: &'s dyn CandidateSource) -> Self {
        Self {
            source,
            platform: Platform::Any,
            soft_missing: false,
            development: false,
            conflicts: Vec::new(),
            missing: Vec::new(),
        }
    }

    /// Resolve for `platform` instead of platform-independent candidates only
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// When enabled, a request with no candidates is recorded as missing
    /// instead of failing the resolution
    pub fn soft_missing(mut self, enabled: bool) -> Self {
        self.soft_missing = enabled;
        self
    }

    /// When enabled, development dependencies are resolved too
    pub fn development(mut self, enabled: bool) -> Self {
        self.development = enabled;
        self
    }

    /// Every conflict met during the last call to [`Resolver::resolve`],
    /// including ones that backtracking recovered from
    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }

    /// Resolve `roots` into a consistent set of activations
    pub fn resolve(&mut self, roots: Vec<Dependency>) -> Result<Resolution, ResolveError> {
        self.conflicts.clear();
        self.missing.clear();

        let mut needed: Vec<DependencyRequest> = roots
            .into_iter()
            .rev()
            .map(DependencyRequest::root)
            .collect();
        let mut chosen: Vec<ActivationRequest> = Vec::new();
        let mut frames: Vec<Frame> = Vec::new();

        self.source.prefetch(&needed);

        while let Some(request) = needed.pop() {
            // A name resolves at most once per branch; a second request for
            // it either matches the standing activation or conflicts.
            if let Some(existing) = chosen
                .iter()
                .find(|a| a.name() == request.name())
                .cloned()
            {
                if request.matches(existing.candidate(), &self.platform) {
                    trace!(request = %request, existing = %existing, "already satisfied");
                    continue;
                }
                let blamed = if existing.others_possible() {
                    None
                } else {
                    existing.request().requester().map(|a| a.request().clone())
                };
                let conflict = Conflict::new(request, existing, blamed);
                debug!(conflict = %conflict, "conflict");
                self.conflicts.push(conflict.clone());
                self.backtrack(conflict, &mut frames, &mut needed, &mut chosen)?;
                continue;
            }

            let mut found = self.source.find_all(&request);
            found.retain(|c| request.matches(c, &self.platform));
            trace!(request = %request, count = found.len(), "candidates");

            if found.is_empty() {
                if self.soft_missing {
                    debug!(request = %request, "missing, skipped");
                    self.missing.push(request);
                    continue;
                }
                return Err(ResolveError::Unsatisfiable(request));
            }

            if found.len() == 1 {
                // Unique candidate: no choice point to come back to.
                let candidate = found.swap_remove(0);
                let activation = ActivationRequest::new(candidate, request, false);
                debug!(activation = %activation, "activated sole candidate");
                chosen.push(activation.clone());
                self.expand(&activation, &mut needed);
                continue;
            }

            let mut frame = Frame::new(request, found, needed.clone(), chosen.clone());
            self.try_candidate(&mut frame, &mut needed, &mut chosen);
            frames.push(frame);
        }

        debug!(activations = chosen.len(), "resolution complete");
        Ok(Resolution::new(chosen, self.missing.clone()))
    }

    /// Pop the frame's best remaining candidate and activate it on top of
    /// the frame's snapshots. Returns false when the frame is exhausted.
    fn try_candidate(
        &self,
        frame: &mut Frame,
        needed: &mut Vec<DependencyRequest>,
        chosen: &mut Vec<ActivationRequest>,
    ) -> bool {
        let candidate = match frame.remaining.pop() {
            Some(candidate) => candidate,
            None => return false,
        };
        needed.clone_from(&frame.needed);
        chosen.clone_from(&frame.chosen);
        let activation =
            ActivationRequest::new(Arc::clone(&candidate), frame.request.clone(), true);
        debug!(activation = %activation, "trying candidate");
        chosen.push(activation.clone());
        self.expand(&activation, needed);
        frame.current = Some(candidate);
        true
    }

    /// Queue the activated candidate's own dependencies, first dependency
    /// on top of the worklist
    fn expand(&self, activation: &ActivationRequest, needed: &mut Vec<DependencyRequest>) {
        let start = needed.len();
        for dependency in activation.candidate().dependencies.iter().rev() {
            if dependency.kind.is_development() && !self.development {
                continue;
            }
            needed.push(DependencyRequest::new(dependency.clone(), activation.clone()));
        }
        if needed.len() > start {
            self.source.prefetch(&needed[start..]);
        }
    }

    /// Drive `conflict` back through the frame stack. Frames the conflict
    /// does not name are abandoned outright; the frame it does name records
    /// the failure and tries its next candidate. An exhausted frame is
    /// charged to the enclosing frame as a conflict about that frame's own
    /// choice; exhausting the bottom frame ends the search.
    fn backtrack(
        &mut self,
        conflict: Conflict,
        frames: &mut Vec<Frame>,
        needed: &mut Vec<DependencyRequest>,
        chosen: &mut Vec<ActivationRequest>,
    ) -> Result<(), ResolveError> {
        while let Some(frame) = frames.last() {
            if conflict.is_for(frame.request.name()) {
                break;
            }
            trace!(frame = frame.request.name(), "abandoning choice point");
            frames.pop();
        }
        if frames.is_empty() {
            return Err(ResolveError::Conflict(conflict));
        }

        let mut conflict = conflict;
        while let Some(frame) = frames.last_mut() {
            frame.record(&conflict, &self.platform);
            if self.try_candidate(frame, needed, chosen) {
                return Ok(());
            }
            let exhausted = match frames.pop() {
                Some(frame) => frame,
                None => break,
            };
            debug!(frame = exhausted.request.name(), "choice point exhausted");
            if frames.is_empty() {
                return Err(ResolveError::Impossible {
                    dependency: exhausted.request.dependency().clone(),
                    tried: exhausted.tried,
                });
            }
            // Charge the failure to the enclosing frame's current candidate;
            // the recorded conflict keeps the structural detail.
            if let Some((_, last)) = exhausted.tried.last() {
                conflict = last.clone();
            }
        }
        Err(ResolveError::Conflict(conflict))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::InstalledSource;
    use sprout_core::types::{Requirement, Version};

    fn dep(name: &str, requirement: &str) -> Dependency {
        Dependency::new(name, Requirement::parse(requirement).unwrap())
    }

    fn candidate(name: &str, version: &str, deps: &[(&str, &str)]) -> Candidate {
        let mut candidate = Candidate::new(name, version.parse::<Version>().unwrap());
        for (name, requirement) in deps {
            candidate = candidate.with_dependency(dep(name, requirement));
        }
        candidate
    }

    fn names(resolution: &Resolution) -> Vec<String> {
        let mut names: Vec<_> = resolution
            .activations()
            .iter()
            .map(ActivationRequest::full_name)
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_unique_choice_blames_its_requester() {
        let mut source = InstalledSource::default();
        source.add(candidate("a", "1.0.0", &[("c", "= 1")]));
        source.add(candidate("b", "1.0.0", &[("c", "= 2")]));
        source.add(candidate("c", "1.0.0", &[]));
        source.add(candidate("c", "2.0.0", &[]));

        let mut resolver = Resolver::new(&source);
        let err = resolver
            .resolve(vec![dep("a", ">= 0"), dep("b", ">= 0")])
            .unwrap_err();

        // c@1 was forced by a, so the conflict blames a's request, not c's
        match err {
            ResolveError::Conflict(conflict) => {
                assert_eq!(conflict.unsatisfied().name(), "c");
                assert_eq!(conflict.activated().full_name(), "c-1.0.0");
                assert_eq!(conflict.blamed().map(DependencyRequest::name), Some("a"));
            }
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[test]
    fn test_revisitable_choice_carries_no_blame() {
        let mut source = InstalledSource::default();
        source.add(candidate("a", "1.0.0", &[("c", "= 1")]));
        source.add(candidate("c", "1.0.0", &[]));
        source.add(candidate("c", "2.0.0", &[]));

        let mut resolver = Resolver::new(&source);
        let resolution = resolver
            .resolve(vec![dep("c", ">= 0"), dep("a", ">= 0")])
            .unwrap();

        // c@2 chosen first from two candidates, then a's c(=1) backtracks it
        assert_eq!(names(&resolution), vec!["a-1.0.0", "c-1.0.0"]);
        assert_eq!(resolver.conflicts().len(), 1);
        assert!(resolver.conflicts()[0].blamed().is_none());
    }

    #[test]
    fn test_exhausted_frame_is_charged_to_enclosing_choice() {
        // Both versions of n fail under m@2; the n frame exhausts and the
        // failure is charged to the m frame, which falls back to m@1.
        let mut source = InstalledSource::default();
        source.add(candidate("m", "1.0.0", &[]));
        source.add(candidate("m", "2.0.0", &[("n", ">= 0")]));
        source.add(candidate("n", "1.0.0", &[("q", ">= 0")]));
        source.add(candidate("n", "2.0.0", &[("q", ">= 0")]));
        source.add(candidate("q", "1.0.0", &[("n", "= 5")]));

        let mut resolver = Resolver::new(&source);
        let resolution = resolver.resolve(vec![dep("m", ">= 0")]).unwrap();

        assert_eq!(names(&resolution), vec!["m-1.0.0"]);
        assert!(!resolver.conflicts().is_empty());
    }

    #[test]
    fn test_platform_filter_applies_to_candidates() {
        let host = Platform::target("x86_64-linux");
        let mut source = InstalledSource::default();
        source.add(
            candidate("ffi", "1.0.0", &[]).with_platform(Platform::target("arm64-darwin")),
        );
        source.add(candidate("ffi", "0.9.0", &[]));

        let mut resolver = Resolver::new(&source).with_platform(host);
        let resolution = resolver.resolve(vec![dep("ffi", ">= 0")]).unwrap();

        // the newer candidate is for a foreign platform and never considered
        assert_eq!(names(&resolution), vec!["ffi-0.9.0"]);
    }

    #[test]
    fn test_development_dependencies_are_off_by_default() {
        let mut source = InstalledSource::default();
        let mut app = candidate("app", "1.0.0", &[("rack", ">= 0")]);
        app = app.with_dependency(Dependency::development("rspec", Requirement::any()));
        source.add(app);
        source.add(candidate("rack", "2.2.0", &[]));
        source.add(candidate("rspec", "3.12.0", &[]));

        let mut resolver = Resolver::new(&source);
        let resolution = resolver.resolve(vec![dep("app", ">= 0")]).unwrap();
        assert_eq!(names(&resolution), vec!["app-1.0.0", "rack-2.2.0"]);

        let mut resolver = Resolver::new(&source).development(true);
        let resolution = resolver.resolve(vec![dep("app", ">= 0")]).unwrap();
        assert_eq!(
            names(&resolution),
            vec!["app-1.0.0", "rack-2.2.0", "rspec-3.12.0"]
        );
    }
}
