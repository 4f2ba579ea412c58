use actix_web::{web, HttpResponse};
use serde::Deserialize;

use rw_core::repositories::{ItemRepository, SwapRepository, UserRepository};
use rw_core::services::notification::NotificationService;
use rw_shared::types::response::ApiResponse;
use rw_shared::types::{PaginatedResponse, Pagination};

use crate::dto::ItemResponse;
use crate::handlers::handle_domain_error;
use crate::middleware::AuthUser;

use super::super::AppState;
use super::require_admin;

/// Query parameters for GET /admin/items/pending
#[derive(Debug, Deserialize)]
pub struct PendingItemsQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Handler for GET /api/v1/admin/items/pending
///
/// The moderation queue: listings awaiting approval, newest first.
pub async fn pending_items<S, I, U, N>(
    auth: AuthUser,
    state: web::Data<AppState<S, I, U, N>>,
    query: web::Query<PendingItemsQuery>,
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

    let pagination = Pagination::new(query.page.unwrap_or(1), query.limit.unwrap_or(20));

    match state.item_service.list_pending(pagination).await {
        Ok((items, total)) => {
            let page = PaginatedResponse::new(
                items.into_iter().map(ItemResponse::from).collect(),
                pagination,
                total,
            );
            HttpResponse::Ok().json(ApiResponse::success("Pending items retrieved", page))
        }
        Err(error) => handle_domain_error(error),
    }
}
