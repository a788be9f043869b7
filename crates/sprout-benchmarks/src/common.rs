//! Common utilities for benchmarks

use criterion::Criterion;
use sprout_core::types::{Candidate, Dependency, Requirement, Version};
use sprout_resolver::source::InstalledSource;

/// Configure criterion for the longer-running resolution benchmarks
pub fn criterion_config() -> Criterion {
    Criterion::default()
        .warm_up_time(std::time::Duration::from_secs(3))
        .measurement_time(std::time::Duration::from_secs(10))
        .sample_size(100)
}

/// A deep chain: pkg0 -> pkg1 -> ... -> pkgN, three versions of each
pub fn chain_source(depth: usize) -> InstalledSource {
    let mut source = InstalledSource::default();
    for index in 0..depth {
        for minor in 0..3u64 {
            let mut candidate = Candidate::new(format!("pkg{index}"), Version::new(1, minor, 0));
            if index + 1 < depth {
                candidate = candidate
                    .with_dependency(Dependency::new(format!("pkg{}", index + 1), Requirement::any()));
            }
            source.add(candidate);
        }
    }
    source
}

/// A wide tree: one root depending on `width` leaves, three versions each
pub fn fanout_source(width: usize) -> InstalledSource {
    let mut source = InstalledSource::default();
    let mut root = Candidate::new("root", Version::new(1, 0, 0));
    for index in 0..width {
        root = root.with_dependency(Dependency::new(format!("leaf{index}"), Requirement::any()));
        for minor in 0..3u64 {
            source.add(Candidate::new(format!("leaf{index}"), Version::new(1, minor, 0)));
        }
    }
    source.add(root);
    source
}

/// A graph that forces backtracking: the newest shared version is rejected
/// by a strict requirement seen late in the search
pub fn backtracking_source(versions: usize) -> InstalledSource {
    let mut source = InstalledSource::default();
    source.add(
        Candidate::new("a", Version::new(1, 0, 0))
            .with_dependency(Dependency::new("shared", Requirement::any())),
    );
    source.add(
        Candidate::new("b", Version::new(1, 0, 0)).with_dependency(Dependency::new(
            "shared",
            Requirement::exact(&Version::new(1, 0, 0)),
        )),
    );
    for minor in 0..versions as u64 {
        source.add(Candidate::new("shared", Version::new(1, minor, 0)));
    }
    source
}

/// Root requests for the chain and fanout sources
pub fn root(name: &str) -> Vec<Dependency> {
    vec![Dependency::new(name, Requirement::any())]
}
