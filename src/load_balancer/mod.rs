//! Load balancing subsystem.
//!
//! # Data Flow
//! ```text
//! Topology watcher → registry.rs add/remove (copy-on-write swap)
//!
//! Request handler → registry.rs select
//!     → load current backend set (lock-free)
//!     → random.rs (uniform index over that set)
//!     → Arc<Backend> or EmptyRegistry
//! ```
//!
//! # Design Decisions
//! - Backend names are unique keys; re-adding a name overwrites
//! - Selection never mixes two versions of the backend set
//! - Registry is passed around as `Arc<Registry>`, never a global

use std::sync::Arc;

pub mod backend;
pub mod random;
pub mod registry;

pub use backend::Backend;
pub use registry::{Registry, Snapshot};

/// Strategy for picking a backend out of a consistent backend list.
pub trait LoadBalancer: Send + Sync + std::fmt::Debug {
    /// Returns `None` only when `backends` is empty.
    fn next_server(&self, backends: &[Arc<Backend>]) -> Option<Arc<Backend>>;
}
