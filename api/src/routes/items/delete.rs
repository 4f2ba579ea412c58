use actix_web::{web, HttpResponse};
use uuid::Uuid;

use rw_core::repositories::{ItemRepository, SwapRepository, UserRepository};
use rw_core::services::notification::NotificationService;
use rw_shared::types::response::{ApiResponse, Empty};

use crate::handlers::handle_domain_error;
use crate::middleware::AuthUser;

use super::super::AppState;

/// Handler for DELETE /api/v1/items/{id}
///
/// Deletes a listing. The owner may delete their own; admins may delete
/// any listing.
pub async fn delete_item<S, I, U, N>(
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
    match state
        .item_service
        .delete_item(&auth.0, path.into_inner())
        .await
    {
        Ok(()) => HttpResponse::Ok()
            .json(ApiResponse::success("Item deleted successfully", Empty {})),
        Err(error) => handle_domain_error(error),
    }
}
