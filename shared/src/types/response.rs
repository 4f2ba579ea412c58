//! API response envelope types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Standard API response wrapper
///
/// Every endpoint responds with this envelope: `success` signals the
/// outcome, `message` carries a human-readable summary, `data` is present
/// on success and `errors` carries field-keyed validation failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,

    /// Human-readable outcome message
    pub message: String,

    /// Response payload (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Field-keyed validation errors (present on validation failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<HashMap<String, Vec<String>>>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response with a payload
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            errors: None,
        }
    }

    /// Create a failure response with a message only
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            errors: None,
        }
    }

    /// Create a validation failure response with field-keyed errors
    pub fn validation_error(
        message: impl Into<String>,
        errors: HashMap<String, Vec<String>>,
    ) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            errors: Some(errors),
        }
    }

    /// Check if the response is successful
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Extract the data, consuming the response
    pub fn into_data(self) -> Option<T> {
        self.data
    }

    /// Map the data to a different type
    pub fn map<U, F>(self, f: F) -> ApiResponse<U>
    where
        F: FnOnce(T) -> U,
    {
        ApiResponse {
            success: self.success,
            message: self.message,
            data: self.data.map(f),
            errors: self.errors,
        }
    }
}

/// Empty payload marker for responses that carry no data
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Empty {}
