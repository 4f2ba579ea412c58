use actix_web::HttpResponse;

use rw_shared::types::response::ApiResponse;

use crate::dto::UserResponse;
use crate::middleware::AuthUser;

/// Handler for GET /api/v1/users/me
///
/// Returns the authenticated user's profile including the points
/// balance. The user record comes straight from the credential service
/// resolution, so no further lookup is needed.
pub async fn me(auth: AuthUser) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(
        "Profile retrieved",
        UserResponse::from(auth.0),
    ))
}
