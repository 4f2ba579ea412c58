//! Domain error to HTTP response translation.
//!
//! One function owns the mapping so every endpoint fails the same way:
//! the taxonomy variant picks the status code, the error's display
//! string becomes the envelope message. Store and internal failures are
//! logged and collapsed to a generic 500 body.

use std::collections::HashMap;

use actix_web::HttpResponse;
use validator::ValidationErrors;

use rw_core::errors::{DomainError, SwapError};
use rw_shared::types::response::ApiResponse;

/// Convert a domain error into the appropriate HTTP response
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    match &error {
        DomainError::NotFound { .. } => {
            HttpResponse::NotFound().json(ApiResponse::<()>::error(error.to_string()))
        }
        DomainError::Forbidden { .. } => {
            HttpResponse::Forbidden().json(ApiResponse::<()>::error(error.to_string()))
        }
        DomainError::Unauthenticated => {
            HttpResponse::Unauthorized().json(ApiResponse::<()>::error(error.to_string()))
        }
        DomainError::Validation { .. } => {
            HttpResponse::BadRequest().json(ApiResponse::<()>::error(error.to_string()))
        }
        DomainError::Swap(swap_error) => match swap_error {
            // Offering someone else's item is an authorization failure
            SwapError::OfferedItemNotOwned => {
                HttpResponse::Forbidden().json(ApiResponse::<()>::error(error.to_string()))
            }
            // Every other workflow violation is a state conflict
            _ => HttpResponse::BadRequest().json(ApiResponse::<()>::error(error.to_string())),
        },
        DomainError::Database { .. } | DomainError::Internal { .. } => {
            log::error!("Internal error: {:?}", error);
            HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Server error"))
        }
    }
}

/// Convert validator output into a 400 with field-keyed errors
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    let mut fields: HashMap<String, Vec<String>> = HashMap::new();

    for (field, field_errors) in errors.field_errors() {
        let messages = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
            .collect();
        fields.insert(field.to_string(), messages);
    }

    HttpResponse::BadRequest().json(ApiResponse::<()>::validation_error(
        "Invalid request data",
        fields,
    ))
}
