use actix_web::{web, HttpResponse};

use rw_core::repositories::{ItemRepository, SwapRepository, UserRepository};
use rw_core::services::notification::NotificationService;
use rw_shared::types::response::ApiResponse;
use rw_shared::types::PaginatedResponse;

use crate::dto::{ItemResponse, ListItemsQuery};
use crate::handlers::handle_domain_error;

use super::super::AppState;

/// Handler for GET /api/v1/items
///
/// Public catalog browse: approved, available items with filters and
/// pagination. No authentication required.
pub async fn list_items<S, I, U, N>(
    state: web::Data<AppState<S, I, U, N>>,
    query: web::Query<ListItemsQuery>,
) -> HttpResponse
where
    S: SwapRepository + 'static,
    I: ItemRepository + 'static,
    U: UserRepository + 'static,
    N: NotificationService + ?Sized + 'static,
{
    let filter = match query.filter() {
        Ok(filter) => filter,
        Err(message) => {
            return HttpResponse::BadRequest().json(ApiResponse::<()>::error(message))
        }
    };
    let pagination = query.pagination();

    match state.item_service.list_items(&filter, pagination).await {
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
