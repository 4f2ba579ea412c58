use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use rw_core::repositories::{ItemRepository, SwapRepository, UserRepository};
use rw_core::services::notification::NotificationService;
use rw_shared::types::response::ApiResponse;

use crate::dto::{RejectSwapRequest, SwapResponse};
use crate::handlers::{handle_domain_error, validation_error_response};
use crate::middleware::AuthUser;

use super::super::AppState;

/// Handler for PUT /api/v1/swaps/{id}/reject
///
/// Only the owner of the requested item may reject, and only while the
/// swap is pending. A reason is required and stored on the swap.
pub async fn reject_swap<S, I, U, N>(
    auth: AuthUser,
    state: web::Data<AppState<S, I, U, N>>,
    path: web::Path<Uuid>,
    request: web::Json<RejectSwapRequest>,
) -> HttpResponse
where
    S: SwapRepository + 'static,
    I: ItemRepository + 'static,
    U: UserRepository + 'static,
    N: NotificationService + ?Sized + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    let swap_id = path.into_inner();

    match state
        .swap_service
        .reject_swap(&auth.0, swap_id, request.rejection_reason.clone())
        .await
    {
        Ok(swap) => HttpResponse::Ok().json(ApiResponse::success(
            "Swap request rejected successfully",
            SwapResponse::from(swap),
        )),
        Err(error) => handle_domain_error(error),
    }
}
