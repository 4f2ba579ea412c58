//! Domain-specific error types and error handling.
//!
//! The taxonomy follows the workflow contracts: precondition failures map
//! to specific variants the API layer translates into HTTP status codes.
//! Notification failures are deliberately absent here; the sink's errors
//! are logged and swallowed, never propagated into workflow results.

use thiserror::Error;

use crate::domain::entities::swap::SwapStatus;

/// Swap workflow errors
///
/// Every variant represents a precondition or state-machine violation.
/// They surface as HTTP 400 except `OfferedItemNotOwned`, which is an
/// authorization failure (403).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SwapError {
    #[error("Item is not available for swap")]
    ItemUnavailable,

    #[error("Cannot swap your own item")]
    SelfSwapForbidden,

    #[error("Offered item is invalid: {reason}")]
    OfferedItemInvalid { reason: String },

    #[error("You can only offer items you own")]
    OfferedItemNotOwned,

    #[error("Insufficient points: {required} required, {available} available")]
    InsufficientPoints { required: i64, available: i64 },

    #[error("You already have a pending swap request for this item")]
    DuplicateRequest,

    #[error("Swap is {actual}, expected {expected}")]
    InvalidState {
        expected: &'static str,
        actual: &'static str,
    },
}

impl SwapError {
    /// Build an `InvalidState` error from the observed status
    pub fn invalid_state(expected: SwapStatus, actual: SwapStatus) -> Self {
        SwapError::InvalidState {
            expected: expected.as_str(),
            actual: actual.as_str(),
        }
    }
}

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error("Forbidden: {reason}")]
    Forbidden { reason: String },

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to the workflow taxonomy
    #[error(transparent)]
    Swap(#[from] SwapError),
}

impl DomainError {
    /// Convenience constructor for missing entities
    pub fn not_found(resource: impl Into<String>) -> Self {
        DomainError::NotFound {
            resource: resource.into(),
        }
    }

    /// Convenience constructor for authorization failures
    pub fn forbidden(reason: impl Into<String>) -> Self {
        DomainError::Forbidden {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for input validation failures
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation {
            message: message.into(),
        }
    }

    /// Convenience constructor for store failures
    pub fn database(message: impl Into<String>) -> Self {
        DomainError::Database {
            message: message.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap_error_messages() {
        let error = SwapError::InsufficientPoints {
            required: 50,
            available: 10,
        };
        let message = error.to_string();
        assert!(message.contains("50 required"));
        assert!(message.contains("10 available"));
    }

    #[test]
    fn test_invalid_state_names_both_states() {
        let error = SwapError::invalid_state(SwapStatus::Pending, SwapStatus::Completed);
        let message = error.to_string();
        assert!(message.contains("completed"));
        assert!(message.contains("pending"));
    }

    #[test]
    fn test_swap_error_bridges_transparently() {
        let error: DomainError = SwapError::SelfSwapForbidden.into();
        assert_eq!(error.to_string(), "Cannot swap your own item");
        assert!(matches!(
            error,
            DomainError::Swap(SwapError::SelfSwapForbidden)
        ));
    }

    #[test]
    fn test_not_found_message() {
        let error = DomainError::not_found("Swap request");
        assert_eq!(error.to_string(), "Swap request not found");
    }
}
