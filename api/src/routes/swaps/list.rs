use actix_web::{web, HttpResponse};

use rw_core::repositories::{ItemRepository, SwapRepository, UserRepository};
use rw_core::services::notification::NotificationService;
use rw_shared::types::response::ApiResponse;
use rw_shared::types::PaginatedResponse;

use crate::dto::{ListSwapsQuery, SwapResponse};
use crate::handlers::handle_domain_error;
use crate::middleware::AuthUser;

use super::super::AppState;

/// Handler for GET /api/v1/swaps
///
/// Lists swaps where the caller is requester or owner, newest first,
/// optionally filtered by status.
pub async fn list_swaps<S, I, U, N>(
    auth: AuthUser,
    state: web::Data<AppState<S, I, U, N>>,
    query: web::Query<ListSwapsQuery>,
) -> HttpResponse
where
    S: SwapRepository + 'static,
    I: ItemRepository + 'static,
    U: UserRepository + 'static,
    N: NotificationService + ?Sized + 'static,
{
    let status = match query.status_filter() {
        Ok(status) => status,
        Err(message) => {
            return HttpResponse::BadRequest().json(ApiResponse::<()>::error(message))
        }
    };
    let pagination = query.pagination();

    match state
        .swap_service
        .list_swaps(&auth.0, status, pagination)
        .await
    {
        Ok((swaps, total)) => {
            let page = PaginatedResponse::new(
                swaps.into_iter().map(SwapResponse::from).collect(),
                pagination,
                total,
            );
            HttpResponse::Ok().json(ApiResponse::success("Swaps retrieved", page))
        }
        Err(error) => handle_domain_error(error),
    }
}
