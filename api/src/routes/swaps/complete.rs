use actix_web::{web, HttpResponse};
use uuid::Uuid;

use rw_core::repositories::{ItemRepository, SwapRepository, UserRepository};
use rw_core::services::notification::NotificationService;
use rw_shared::types::response::ApiResponse;

use crate::dto::SwapResponse;
use crate::handlers::handle_domain_error;
use crate::middleware::AuthUser;

use super::super::AppState;

/// Handler for PUT /api/v1/swaps/{id}/complete
///
/// Either party may mark an accepted swap as completed; the covered
/// items move to `swapped`.
pub async fn complete_swap<S, I, U, N>(
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

    match state.swap_service.complete_swap(&auth.0, swap_id).await {
        Ok(swap) => HttpResponse::Ok().json(ApiResponse::success(
            "Swap completed successfully",
            SwapResponse::from(swap),
        )),
        Err(error) => handle_domain_error(error),
    }
}
