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

/// Query parameters for GET /users/me/items
#[derive(Debug, Deserialize)]
pub struct MyItemsQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Handler for GET /api/v1/users/me/items
///
/// Lists the caller's own items regardless of approval or availability.
pub async fn my_items<S, I, U, N>(
    auth: AuthUser,
    state: web::Data<AppState<S, I, U, N>>,
    query: web::Query<MyItemsQuery>,
) -> HttpResponse
where
    S: SwapRepository + 'static,
    I: ItemRepository + 'static,
    U: UserRepository + 'static,
    N: NotificationService + ?Sized + 'static,
{
    let pagination = Pagination::new(query.page.unwrap_or(1), query.limit.unwrap_or(10));

    match state.item_service.list_user_items(&auth.0, pagination).await {
        Ok((items, total)) => {
            let page = PaginatedResponse::new(
                items.into_iter().map(ItemResponse::from).collect(),
                pagination,
                total,
            );
            HttpResponse::Ok().json(ApiResponse::success("Items retrieved", page))
        }
        Err(error) => handle_domain_error(error),
    }
}
