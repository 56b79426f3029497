//! Concurrency-safe backend registry with uniform random selection.
//!
//! The registry is a leaf component: request handlers call
//! [`Registry::select`] once per unit of work, topology watchers call
//! [`Registry::add`] / [`Registry::remove`]. Share one instance as
//! `Arc<Registry>`.

pub mod config;
pub mod error;
pub mod load_balancer;
pub mod observability;

pub use config::schema::RegistryConfig;
pub use error::RegistryError;
pub use load_balancer::{Backend, Registry, Snapshot};
