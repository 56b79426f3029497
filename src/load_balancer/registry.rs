//! Backend registry.
//!
//! # Responsibilities
//! - Own the live backend set, keyed by name
//! - Apply add/remove as atomic copy-on-write swaps
//! - Answer "which backend serves the next request" from a consistent snapshot
//!
//! # Design Decisions
//! - Readers load the current `Arc<BackendSet>` without locking
//! - Writers build a new set and install it with `ArcSwap::rcu`; the CAS loop
//!   gives every mutation a place in a single total order
//! - Index and element are always read from the same immutable set

use std::collections::HashMap;
use std::sync::Arc;
use arc_swap::ArcSwap;
use rand::Rng;
use crate::config::RegistryConfig;
use crate::error::RegistryError;
use crate::load_balancer::{
    LoadBalancer,
    backend::Backend,
    random::Random,
};

/// Immutable backend collection shared between the registry and its snapshots.
#[derive(Debug, Clone, Default)]
struct BackendSet {
    /// Enumeration order used for positional selection.
    backends: Vec<Arc<Backend>>,
    /// name -> position in `backends`.
    index: HashMap<String, usize>,
}

impl BackendSet {
    fn from_backends(backends: impl IntoIterator<Item = Backend>) -> Self {
        let mut set = Self::default();
        for backend in backends {
            set.upsert(Arc::new(backend));
        }
        set
    }

    /// Returns true when an existing entry was replaced.
    fn upsert(&mut self, backend: Arc<Backend>) -> bool {
        match self.index.get(&backend.name) {
            Some(&pos) => {
                self.backends[pos] = backend;
                true
            }
            None => {
                self.index.insert(backend.name.clone(), self.backends.len());
                self.backends.push(backend);
                false
            }
        }
    }

    fn remove(&mut self, name: &str) -> Option<Arc<Backend>> {
        let pos = self.index.remove(name)?;
        let removed = self.backends.swap_remove(pos);
        if let Some(moved) = self.backends.get(pos) {
            self.index.insert(moved.name.clone(), pos);
        }
        Some(removed)
    }

    fn lookup(&self, name: &str) -> Option<&Arc<Backend>> {
        self.index.get(name).map(|&pos| &self.backends[pos])
    }
}

/// Concurrency-safe container of backends with uniform random selection.
///
/// Construct one per process and share it as `Arc<Registry>`.
#[derive(Debug)]
pub struct Registry {
    current: ArcSwap<BackendSet>,
    balancer: Random,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            current: ArcSwap::from_pointee(BackendSet::default()),
            balancer: Random::new(),
        }
    }

    /// Create a registry seeded from validated configuration.
    pub fn from_config(config: &RegistryConfig) -> Result<Self, RegistryError> {
        let registry = Self::new();
        registry.replace_all(config.backends.iter().cloned().map(Backend::from))?;
        Ok(registry)
    }

    /// Insert a backend, replacing any entry with the same name.
    pub fn add(&self, backend: Backend) -> Result<(), RegistryError> {
        if let Err(e) = backend.validate() {
            tracing::warn!(name = ?backend.name, error = %e, "Rejected backend");
            return Err(e);
        }

        let name = backend.name.clone();
        let backend = Arc::new(backend);
        let previous = self.current.rcu(|set| {
            let mut next = BackendSet::clone(set);
            next.upsert(Arc::clone(&backend));
            next
        });

        tracing::debug!(
            name = %name,
            replaced = previous.index.contains_key(&name),
            "Backend added"
        );
        Ok(())
    }

    /// Remove the backend with this name. Absent names are a no-op.
    ///
    /// Returns whether an entry was removed.
    pub fn remove(&self, name: &str) -> bool {
        let previous = self.current.rcu(|set| {
            if !set.index.contains_key(name) {
                return Arc::clone(set);
            }
            let mut next = BackendSet::clone(set);
            next.remove(name);
            Arc::new(next)
        });

        let removed = previous.index.contains_key(name);
        if removed {
            tracing::debug!(name = %name, "Backend removed");
        } else {
            tracing::trace!(name = %name, "Remove of unknown backend ignored");
        }
        removed
    }

    /// Atomically replace the whole backend set.
    ///
    /// Every entry is validated before anything changes. Duplicate names
    /// collapse to the last occurrence.
    pub fn replace_all<I>(&self, backends: I) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = Backend>,
    {
        let backends: Vec<Backend> = backends.into_iter().collect();
        for backend in &backends {
            if let Err(e) = backend.validate() {
                tracing::warn!(name = ?backend.name, error = %e, "Rejected backend set");
                return Err(e);
            }
        }

        let set = BackendSet::from_backends(backends);
        tracing::debug!(backends = set.backends.len(), "Backend set replaced");
        self.current.store(Arc::new(set));
        Ok(())
    }

    /// Remove every backend.
    pub fn clear(&self) {
        self.current.store(Arc::new(BackendSet::default()));
        tracing::debug!("Backend set cleared");
    }

    /// Pick one backend uniformly at random.
    pub fn select(&self) -> Result<Arc<Backend>, RegistryError> {
        let set = self.current.load();
        let picked = self
            .balancer
            .next_server(&set.backends)
            .ok_or(RegistryError::EmptyRegistry)?;
        tracing::trace!(name = %picked.name, backends = set.backends.len(), "Backend selected");
        Ok(picked)
    }

    /// Pick one backend uniformly at random using the given generator.
    pub fn select_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Arc<Backend>, RegistryError> {
        let set = self.current.load();
        self.balancer
            .next_server_with(&set.backends, rng)
            .ok_or(RegistryError::EmptyRegistry)
    }

    /// Point-in-time copy of the backend set.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            set: self.current.load_full(),
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<Backend>> {
        self.current.load().lookup(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.current.load().index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.current.load().backends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Immutable view of the registry at the moment it was taken.
#[derive(Debug, Clone)]
pub struct Snapshot {
    set: Arc<BackendSet>,
}

impl Snapshot {
    pub fn len(&self) -> usize {
        self.set.backends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.backends.is_empty()
    }

    /// Iterate in the registry's enumeration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Arc<Backend>> {
        self.set.backends.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Arc<Backend>> {
        self.set.lookup(name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.iter().map(|b| b.name.as_str()).collect()
    }

    pub fn into_vec(self) -> Vec<Arc<Backend>> {
        match Arc::try_unwrap(self.set) {
            Ok(set) => set.backends,
            Err(shared) => shared.backends.clone(),
        }
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a Arc<Backend>;
    type IntoIter = std::slice::Iter<'a, Arc<Backend>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
