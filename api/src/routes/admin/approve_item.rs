use actix_web::{web, HttpResponse};
use uuid::Uuid;

use rw_core::repositories::{ItemRepository, SwapRepository, UserRepository};
use rw_core::services::notification::NotificationService;
use rw_shared::types::response::ApiResponse;

use crate::dto::ItemResponse;
use crate::handlers::handle_domain_error;
use crate::middleware::AuthUser;

use super::super::AppState;
use super::require_admin;

/// Handler for PUT /api/v1/admin/items/{id}/approve
///
/// Approves a listing, making it visible and swappable. The owner is
/// notified best-effort.
pub async fn approve_item<S, I, U, N>(
    auth: AuthUser,
    state: web::Data<AppState<S, I, U, N>>,
    path: web::Path<Uuid>,
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

    match state.item_service.approve_item(path.into_inner()).await {
        Ok(item) => HttpResponse::Ok().json(ApiResponse::success(
            "Item approved successfully",
            ItemResponse::from(item),
        )),
        Err(error) => handle_domain_error(error),
    }
}
