use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use rw_core::repositories::{ItemRepository, SwapRepository, UserRepository};
use rw_core::services::notification::NotificationService;
use rw_shared::types::response::ApiResponse;

use crate::dto::{ItemResponse, RejectItemRequest};
use crate::handlers::{handle_domain_error, validation_error_response};
use crate::middleware::AuthUser;

use super::super::AppState;
use super::require_admin;

/// Handler for PUT /api/v1/admin/items/{id}/reject
///
/// Rejects a listing with a required reason. The owner is notified
/// best-effort.
pub async fn reject_item<S, I, U, N>(
    auth: AuthUser,
    state: web::Data<AppState<S, I, U, N>>,
    path: web::Path<Uuid>,
    request: web::Json<RejectItemRequest>,
) -> HttpResponse
where
    S: SwapRepository + 'static,
    I: ItemRepository + 'static,
    U: UserRepository + 'static,
    N: NotificationService + ?Sized + 'static,
{
    if let Some(response) = require_admin(&auth.0) {
        return response;
    }

    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state
        .item_service
        .reject_item(path.into_inner(), request.rejection_reason.clone())
        .await
    {
        Ok(item) => HttpResponse::Ok().json(ApiResponse::success(
            "Item rejected successfully",
            ItemResponse::from(item),
        )),
        Err(error) => handle_domain_error(error),
    }
}
