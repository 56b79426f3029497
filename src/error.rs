//! Registry error definitions.

use thiserror::Error;

/// Errors returned by [`Registry`](crate::load_balancer::registry::Registry) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Backend rejected on insert (empty or malformed name, zero weight).
    /// The registry is left unchanged.
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// Selection was attempted while no backends were registered.
    #[error("No backends registered")]
    EmptyRegistry,
}

impl RegistryError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }
}
