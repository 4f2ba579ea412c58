use actix_web::{web, HttpResponse};
use validator::Validate;

use rw_core::repositories::{ItemRepository, SwapRepository, UserRepository};
use rw_core::services::notification::NotificationService;
use rw_core::services::CreateSwapInput;
use rw_shared::types::response::ApiResponse;

use crate::dto::{CreateSwapRequest, SwapResponse};
use crate::handlers::{handle_domain_error, validation_error_response};
use crate::middleware::AuthUser;

use super::super::AppState;

/// Handler for POST /api/v1/swaps
///
/// Creates a pending swap request against an available item. The body
/// must offer exactly one of an owned item or a points payment.
pub async fn create_swap<S, I, U, N>(
    auth: AuthUser,
    state: web::Data<AppState<S, I, U, N>>,
    request: web::Json<CreateSwapRequest>,
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

    let offer = match request.offer() {
        Ok(offer) => offer,
        Err(message) => {
            return HttpResponse::BadRequest().json(ApiResponse::<()>::error(message))
        }
    };

    let input = CreateSwapInput {
        requested_item_id: request.requested_item,
        offer,
        message: request.message.clone(),
    };

    match state.swap_service.create_swap(&auth.0, input).await {
        Ok(swap) => HttpResponse::Created().json(ApiResponse::success(
            "Swap request created successfully",
            SwapResponse::from(swap),
        )),
        Err(error) => handle_domain_error(error),
    }
}
