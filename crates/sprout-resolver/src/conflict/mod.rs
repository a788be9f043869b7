//! Conflict records.
//!
//! A conflict captures one unsatisfiable situation: a request that could not
//! be satisfied because a candidate with the same name was already activated
//! with an incompatible version. When the existing activation was the unique
//! choice for its own request, the conflict additionally blames the request
//! whose decision forced that unique choice, since that is the decision that
//! has to change.

use std::fmt;

use sprout_core::types::Dependency;

use crate::request::{ActivationRequest, DependencyRequest};

/// An unsatisfiable request paired with the activation it collided with
#[derive(Debug, Clone)]
pub struct Conflict {
    unsatisfied: DependencyRequest,
    activated: ActivationRequest,
    blamed: Option<DependencyRequest>,
}

impl Conflict {
    pub(crate) fn new(
        unsatisfied: DependencyRequest,
        activated: ActivationRequest,
        blamed: Option<DependencyRequest>,
    ) -> Self {
        Self {
            unsatisfied,
            activated,
            blamed,
        }
    }

    /// The request that could not be satisfied
    pub fn unsatisfied(&self) -> &DependencyRequest {
        &self.unsatisfied
    }

    /// The activation the request collided with
    pub fn activated(&self) -> &ActivationRequest {
        &self.activated
    }

    /// The request whose decision is actually at fault, when that is not the
    /// unsatisfied request itself
    pub fn blamed(&self) -> Option<&DependencyRequest> {
        self.blamed.as_ref()
    }

    /// Whether this conflict is about the package called `name`
    pub fn is_for(&self, name: &str) -> bool {
        self.unsatisfied.name() == name
    }

    /// The two dependencies that collided: the one at fault (blamed if
    /// present, unsatisfied otherwise) and the one the activation satisfies
    pub fn conflicting_dependencies(&self) -> (&Dependency, &Dependency) {
        let failed = self.blamed.as_ref().unwrap_or(&self.unsatisfied);
        (failed.dependency(), self.activated.request().dependency())
    }

    /// The activation whose candidate listed the failing dependency, if any
    pub fn requester(&self) -> Option<&ActivationRequest> {
        self.blamed
            .as_ref()
            .unwrap_or(&self.unsatisfied)
            .requester()
    }
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unsatisfied.requester() {
            Some(requester) => write!(f, "{} requires {}", requester.full_name(), self.unsatisfied)?,
            None => write!(f, "the request set requires {}", self.unsatisfied)?,
        }
        write!(
            f,
            " but {} was already activated to satisfy {}",
            self.activated.full_name(),
            self.activated.request()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprout_core::types::{Candidate, Requirement, Version};
    use std::sync::Arc;

    fn activation(name: &str, version: Version, others_possible: bool) -> ActivationRequest {
        let request = DependencyRequest::root(Dependency::new(name, Requirement::any()));
        ActivationRequest::new(Arc::new(Candidate::new(name, version)), request, others_possible)
    }

    #[test]
    fn test_conflicting_dependencies_without_blame() {
        let activated = activation("rack", Version::new(2, 0, 0), true);
        let unsatisfied =
            DependencyRequest::root(Dependency::new("rack", Requirement::parse("= 1").unwrap()));

        let conflict = Conflict::new(unsatisfied, activated, None);
        assert!(conflict.is_for("rack"));
        assert!(!conflict.is_for("rake"));

        let (failed, satisfied) = conflict.conflicting_dependencies();
        assert_eq!(failed.to_string(), "rack (= 1)");
        assert_eq!(satisfied.to_string(), "rack (>= 0)");
    }

    #[test]
    fn test_blame_redirects_fault() {
        let activated = activation("rack", Version::new(2, 0, 0), false);
        let unsatisfied =
            DependencyRequest::root(Dependency::new("rack", Requirement::parse("= 1").unwrap()));
        let blamed =
            DependencyRequest::root(Dependency::new("rails", Requirement::parse("= 7").unwrap()));

        let conflict = Conflict::new(unsatisfied, activated, Some(blamed));
        let (failed, _) = conflict.conflicting_dependencies();
        assert_eq!(failed.name, "rails");
        assert!(conflict.blamed().is_some());
    }

    #[test]
    fn test_display_names_both_sides() {
        let activated = activation("rack", Version::new(2, 0, 0), true);
        let unsatisfied =
            DependencyRequest::root(Dependency::new("rack", Requirement::parse("= 1").unwrap()));

        let rendered = Conflict::new(unsatisfied, activated, None).to_string();
        assert!(rendered.contains("rack (= 1)"));
        assert!(rendered.contains("rack-2.0.0"));
    }
}
