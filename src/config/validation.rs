//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Backend names must be well-formed and unique
//! - Weights must be positive
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RegistryConfig → Result<(), Vec<ValidationError>>

use std::collections::HashSet;
use thiserror::Error;
use crate::config::schema::RegistryConfig;
use crate::load_balancer::backend::check_name;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("backends[{index}]: {reason}")]
    InvalidName { index: usize, reason: &'static str },

    #[error("backends[{index}] '{name}': weight must be positive")]
    ZeroWeight { index: usize, name: String },

    #[error("backends[{index}]: duplicate name '{name}'")]
    DuplicateName { index: usize, name: String },

    #[error("unknown log level '{0}'")]
    LogLevel(String),
}

/// Check a parsed configuration.
pub fn validate_config(config: &RegistryConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for (index, backend) in config.backends.iter().enumerate() {
        if let Err(reason) = check_name(&backend.name) {
            errors.push(ValidationError::InvalidName { index, reason });
        } else if !seen.insert(backend.name.as_str()) {
            errors.push(ValidationError::DuplicateName {
                index,
                name: backend.name.clone(),
            });
        }

        if backend.weight == 0 {
            errors.push(ValidationError::ZeroWeight {
                index,
                name: backend.name.clone(),
            });
        }
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::LogLevel(config.observability.log_level.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::BackendConfig;

    fn backend(name: &str, weight: u32) -> BackendConfig {
        BackendConfig {
            name: name.into(),
            weight,
            metadata: Default::default(),
        }
    }

    #[test]
    fn test_default_is_valid() {
        assert!(validate_config(&RegistryConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = RegistryConfig {
            backends: vec![
                backend("a", 1),
                backend("", 1),
                backend("a", 1),
                backend("b", 0),
            ],
            ..Default::default()
        };
        config.observability.log_level = "loud".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::InvalidName { index: 1, reason: "backend name is empty" },
                ValidationError::DuplicateName { index: 2, name: "a".into() },
                ValidationError::ZeroWeight { index: 3, name: "b".into() },
                ValidationError::LogLevel("loud".into()),
            ]
        );
    }

    #[test]
    fn test_log_level_case_insensitive() {
        let mut config = RegistryConfig::default();
        config.observability.log_level = "WARN".into();
        assert!(validate_config(&config).is_ok());
    }
}
