use actix_web::{web, HttpResponse};
use uuid::Uuid;

use rw_core::repositories::{ItemRepository, SwapRepository, UserRepository};
use rw_core::services::notification::NotificationService;
use rw_shared::types::response::ApiResponse;

use crate::dto::SwapResponse;
use crate::handlers::handle_domain_error;
use crate::middleware::AuthUser;

use super::super::AppState;

/// Handler for PUT /api/v1/swaps/{id}/accept
///
/// Only the owner of the requested item may accept, and only while the
/// swap is pending. For points swaps the transfer settles here.
pub async fn accept_swap<S, I, U, N>(
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
    let swap_id = path.into_inner();

    match state.swap_service.accept_swap(&auth.0, swap_id).await {
        Ok(swap) => HttpResponse::Ok().json(ApiResponse::success(
            "Swap request accepted successfully",
            SwapResponse::from(swap),
        )),
        Err(error) => handle_domain_error(error),
    }
}
