//! The outcome of a successful resolution.

use std::collections::HashMap;

use petgraph::algo::tarjan_scc;
use petgraph::graph::DiGraph;

use crate::request::{ActivationRequest, DependencyRequest};

/// A consistent set of activations, at most one per package name
#[derive(Debug, Clone)]
pub struct Resolution {
    activations: Vec<ActivationRequest>,
    missing: Vec<DependencyRequest>,
}

impl Resolution {
    pub(crate) fn new(
        activations: Vec<ActivationRequest>,
        missing: Vec<DependencyRequest>,
    ) -> Self {
        Self {
            activations,
            missing,
        }
    }

    /// The activations in the order the search made them
    pub fn activations(&self) -> &[ActivationRequest] {
        &self.activations
    }

    /// Requests skipped because no candidate existed, in soft-missing mode
    pub fn missing(&self) -> &[DependencyRequest] {
        &self.missing
    }

    pub fn find(&self, name: &str) -> Option<&ActivationRequest> {
        self.activations.iter().find(|a| a.name() == name)
    }

    /// The activations ordered so every package comes after the packages it
    /// depends on. Members of a dependency cycle stay grouped, in arbitrary
    /// relative order.
    pub fn sorted_activations(&self) -> Vec<ActivationRequest> {
        let mut graph = DiGraph::<usize, ()>::new();
        let mut node_of = HashMap::new();
        for (index, activation) in self.activations.iter().enumerate() {
            let node = graph.add_node(index);
            node_of.insert(activation.name().to_owned(), node);
        }

        for activation in &self.activations {
            let from = match node_of.get(activation.name()) {
                Some(node) => *node,
                None => continue,
            };
            for dependency in &activation.candidate().dependencies {
                if dependency.kind.is_development() {
                    continue;
                }
                if let Some(&to) = node_of.get(dependency.name.as_str()) {
                    if from != to {
                        graph.add_edge(from, to, ());
                    }
                }
            }
        }

        // components come out dependencies-first
        let mut sorted = Vec::with_capacity(self.activations.len());
        for component in tarjan_scc(&graph) {
            for node in component {
                sorted.push(self.activations[graph[node]].clone());
            }
        }
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprout_core::types::{Candidate, Dependency, Requirement, Version};
    use std::sync::Arc;

    fn activation(candidate: Candidate) -> ActivationRequest {
        let request = DependencyRequest::root(Dependency::new(
            candidate.name.clone(),
            Requirement::any(),
        ));
        ActivationRequest::new(Arc::new(candidate), request, false)
    }

    fn candidate(name: &str, deps: &[&str]) -> Candidate {
        let mut candidate = Candidate::new(name, Version::new(1, 0, 0));
        for dep in deps {
            candidate = candidate.with_dependency(Dependency::new(*dep, Requirement::any()));
        }
        candidate
    }

    #[test]
    fn test_sorted_activations_puts_dependencies_first() {
        let resolution = Resolution::new(
            vec![
                activation(candidate("app", &["web", "db"])),
                activation(candidate("web", &["db"])),
                activation(candidate("db", &[])),
            ],
            Vec::new(),
        );

        let order: Vec<_> = resolution
            .sorted_activations()
            .iter()
            .map(|a| a.name().to_owned())
            .collect();
        assert_eq!(order, vec!["db", "web", "app"]);
    }

    #[test]
    fn test_sorted_activations_tolerates_cycles() {
        let resolution = Resolution::new(
            vec![
                activation(candidate("top", &["left"])),
                activation(candidate("left", &["right"])),
                activation(candidate("right", &["left"])),
            ],
            Vec::new(),
        );

        let order: Vec<_> = resolution
            .sorted_activations()
            .iter()
            .map(|a| a.name().to_owned())
            .collect();
        assert_eq!(order.len(), 3);
        // the cycle sorts ahead of its dependent, whichever way it unwinds
        assert_eq!(order[2], "top");
    }

    #[test]
    fn test_find_by_name() {
        let resolution = Resolution::new(vec![activation(candidate("rack", &[]))], Vec::new());
        assert!(resolution.find("rack").is_some());
        assert!(resolution.find("rake").is_none());
    }
}
