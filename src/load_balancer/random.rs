//! Uniform random load balancing strategy.

use std::sync::Arc;
use rand::Rng;
use crate::load_balancer::{LoadBalancer, backend::Backend};

/// Random selector.
/// Draws from the calling thread's generator, so there is no shared RNG state.
#[derive(Debug, Default)]
pub struct Random;

impl Random {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick using a caller-supplied generator.
    pub fn next_server_with<R: Rng + ?Sized>(
        &self,
        backends: &[Arc<Backend>],
        rng: &mut R,
    ) -> Option<Arc<Backend>> {
        if backends.is_empty() {
            return None;
        }
        let index = rng.gen_range(0..backends.len());
        backends.get(index).cloned()
    }
}

impl LoadBalancer for Random {
    fn next_server(&self, backends: &[Arc<Backend>]) -> Option<Arc<Backend>> {
        if backends.is_empty() {
            return None;
        }
        let index = fastrand::usize(..backends.len());
        backends.get(index).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn backends(names: &[&str]) -> Vec<Arc<Backend>> {
        names.iter().map(|n| Arc::new(Backend::new(*n))).collect()
    }

    #[test]
    fn test_random_empty() {
        let lb = Random::new();
        assert!(lb.next_server(&[]).is_none());
        let mut rng = StdRng::seed_from_u64(7);
        assert!(lb.next_server_with(&[], &mut rng).is_none());
    }

    #[test]
    fn test_random_single() {
        let lb = Random::new();
        let set = backends(&["only"]);
        for _ in 0..100 {
            assert_eq!(lb.next_server(&set).unwrap().name, "only");
        }
    }

    #[test]
    fn test_random_covers_all() {
        let lb = Random::new();
        let set = backends(&["a", "b", "c", "d"]);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1_000 {
            seen.insert(lb.next_server(&set).unwrap().name.clone());
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_seeded_is_deterministic() {
        let lb = Random::new();
        let set = backends(&["a", "b", "c"]);

        let picks = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..32)
                .map(|_| lb.next_server_with(&set, &mut rng).unwrap().name.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(picks(42), picks(42));
    }
}
