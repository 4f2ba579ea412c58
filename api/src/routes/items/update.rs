use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use rw_core::repositories::{ItemRepository, SwapRepository, UserRepository};
use rw_core::services::notification::NotificationService;
use rw_shared::types::response::ApiResponse;

use crate::dto::{CreateItemRequest, ItemResponse};
use crate::handlers::{handle_domain_error, validation_error_response};
use crate::middleware::AuthUser;

use super::super::AppState;

/// Handler for PUT /api/v1/items/{id}
///
/// Edits a listing the caller owns. The edit resets approval, sending
/// the listing back through moderation.
pub async fn update_item<S, I, U, N>(
    auth: AuthUser,
    state: web::Data<AppState<S, I, U, N>>,
    path: web::Path<Uuid>,
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
        .update_item(&auth.0, path.into_inner(), request.into_inner().into())
        .await
    {
        Ok(item) => HttpResponse::Ok().json(ApiResponse::success(
            "Item updated successfully. It will need to be re-approved.",
            ItemResponse::from(item),
        )),
        Err(error) => handle_domain_error(error),
    }
}
