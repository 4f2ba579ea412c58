use actix_web::{web, HttpResponse};
use uuid::Uuid;

use rw_core::repositories::{ItemRepository, SwapRepository, UserRepository};
use rw_core::services::notification::NotificationService;
use rw_shared::types::response::ApiResponse;

use crate::dto::ItemResponse;
use crate::handlers::handle_domain_error;

use super::super::AppState;

/// Handler for GET /api/v1/items/{id}
///
/// Fetches a single listing. No authentication required.
pub async fn get_item<S, I, U, N>(
    state: web::Data<AppState<S, I, U, N>>,
    path: web::Path<Uuid>,
) -> HttpResponse
where
    S: SwapRepository + 'static,
    I: ItemRepository + 'static,
    U: UserRepository + 'static,
    N: NotificationService + ?Sized + 'static,
{
    match state.item_service.get_item(path.into_inner()).await {
        Ok(item) => HttpResponse::Ok()
            .json(ApiResponse::success("Item retrieved", ItemResponse::from(item))),
        Err(error) => handle_domain_error(error),
    }
}
