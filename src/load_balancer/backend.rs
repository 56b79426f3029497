//! Backend abstraction.
//!
//! # Responsibilities
//! - Represent a single named upstream target
//! - Carry caller-owned metadata untouched by the registry
//! - Validate identity before the registry accepts it

use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use crate::config::BackendConfig;
use crate::error::RegistryError;

/// Default weight for a backend.
pub const DEFAULT_WEIGHT: u32 = 1;

/// A single backend server.
///
/// Backends are immutable once handed to the registry; an update is a
/// new `Backend` added under the same name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Backend {
    /// Unique identity within a registry.
    pub name: String,
    /// Reserved for non-uniform selection. Always positive.
    pub weight: u32,
    /// Opaque caller data.
    pub metadata: HashMap<String, String>,
}

impl Backend {
    /// Create a new backend with default weight and no metadata.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            weight: DEFAULT_WEIGHT,
            metadata: HashMap::new(),
        }
    }

    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Check that this backend may enter a registry.
    pub fn validate(&self) -> Result<(), RegistryError> {
        check_name(&self.name).map_err(RegistryError::invalid)?;
        if self.weight == 0 {
            return Err(RegistryError::invalid(format!(
                "backend '{}' has zero weight",
                self.name
            )));
        }
        Ok(())
    }
}

impl From<BackendConfig> for Backend {
    fn from(config: BackendConfig) -> Self {
        Self {
            name: config.name,
            weight: config.weight,
            metadata: config.metadata,
        }
    }
}

/// Reject empty, blank, or control-character names.
pub(crate) fn check_name(name: &str) -> Result<(), &'static str> {
    if name.is_empty() {
        return Err("backend name is empty");
    }
    if name.trim().is_empty() {
        return Err("backend name is blank");
    }
    if name.chars().any(char::is_control) {
        return Err("backend name contains control characters");
    }
    Ok(())
}
