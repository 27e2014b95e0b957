//! Product domain errors
//!
//! This module defines the error type returned by the product entity and the
//! product service.

use thiserror::Error;

use core_kernel::PortError;

/// Errors that can occur in the product domain
#[derive(Debug, Error)]
pub enum ProductError {
    /// A business rule rejected the operation
    #[error("Validation error: {0}")]
    Validation(String),

    /// The persistence port failed; the port error is carried unchanged
    #[error(transparent)]
    Port(#[from] PortError),
}

impl ProductError {
    /// Creates a Validation error with a message
    pub fn validation(message: impl Into<String>) -> Self {
        ProductError::Validation(message.into())
    }

    /// Returns true if a business rule rejected the operation
    pub fn is_validation(&self) -> bool {
        matches!(self, ProductError::Validation(_))
    }

    /// Returns true if the port reported that no record matched
    pub fn is_not_found(&self) -> bool {
        matches!(self, ProductError::Port(e) if e.is_not_found())
    }

    /// Returns the underlying port error, if any
    pub fn as_port_error(&self) -> Option<&PortError> {
        match self {
            ProductError::Port(e) => Some(e),
            ProductError::Validation(_) => None,
        }
    }
}
