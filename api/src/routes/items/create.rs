use actix_web::{web, HttpResponse};
use validator::Validate;

use rw_core::repositories::{ItemRepository, SwapRepository, UserRepository};
use rw_core::services::notification::NotificationService;
use rw_shared::types::response::ApiResponse;

use crate::dto::{CreateItemRequest, ItemResponse};
use crate::handlers::{handle_domain_error, validation_error_response};
use crate::middleware::AuthUser;

use super::super::AppState;

/// Handler for POST /api/v1/items
///
/// Creates a new listing owned by the caller. The listing is reviewed
/// by moderation before appearing in the catalog.
pub async fn create_item<S, I, U, N>(
    auth: AuthUser,
    state: web::Data<AppState<S, I, U, N>>,
    request: web::Json<CreateItemRequest>,
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

    match state
        .item_service
        .create_item(&auth.0, request.into_inner().into())
        .await
    {
        Ok(item) => HttpResponse::Created().json(ApiResponse::success(
            "Item created successfully. It will be reviewed before appearing on the platform.",
            ItemResponse::from(item),
        )),
        Err(error) => handle_domain_error(error),
    }
}
