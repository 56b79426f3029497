//! Shared utilities for integration tests.

use std::collections::HashMap;
use std::sync::Arc;
use backend_registry::{Backend, Registry};

/// Build a shared registry holding one backend per name.
pub fn registry_with(names: &[&str]) -> Arc<Registry> {
    let registry = Arc::new(Registry::new());
    for name in names {
        registry.add(Backend::new(*name)).unwrap();
    }
    registry
}

/// Count how often each backend is returned by `pick`.
#[allow(dead_code)]
pub fn tally<F>(samples: usize, mut pick: F) -> HashMap<String, usize>
where
    F: FnMut() -> String,
{
    let mut counts = HashMap::new();
    for _ in 0..samples {
        *counts.entry(pick()).or_insert(0) += 1;
    }
    counts
}

/// Pearson chi-square statistic against a uniform expectation.
#[allow(dead_code)]
pub fn chi_square(counts: &HashMap<String, usize>, samples: usize) -> f64 {
    let expected = samples as f64 / counts.len() as f64;
    counts
        .values()
        .map(|&observed| {
            let diff = observed as f64 - expected;
            diff * diff / expected
        })
        .sum()
}
