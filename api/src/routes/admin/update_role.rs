use actix_web::{web, HttpResponse};
use uuid::Uuid;

use rw_core::repositories::{ItemRepository, SwapRepository, UserRepository};
use rw_core::services::notification::NotificationService;
use rw_shared::types::response::ApiResponse;

use crate::dto::{UpdateRoleRequest, UserResponse};
use crate::handlers::handle_domain_error;
use crate::middleware::AuthUser;

use super::super::AppState;
use super::require_admin;

/// Handler for PUT /api/v1/admin/users/{id}/role
///
/// Changes a user's role between `user` and `admin`.
pub async fn update_role<S, I, U, N>(
    auth: AuthUser,
    state: web::Data<AppState<S, I, U, N>>,
    path: web::Path<Uuid>,
    request: web::Json<UpdateRoleRequest>,
) -> HttpResponse
where
    S: SwapRepository + 'static,
    I: ItemRepository + 'static,
    U: UserRepository + 'static,
    N: NotificationService + ?Sized + 'static,
{
    if let Some(response) = require_admin(&auth.0) {
        return response;
    }

    let role = match request.parsed_role() {
        Ok(role) => role,
        Err(message) => {
            return HttpResponse::BadRequest().json(ApiResponse::<()>::error(message))
        }
    };

    let user_id = path.into_inner();
    let mut user = match state.users.find_by_id(user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => return handle_domain_error(rw_core::errors::DomainError::not_found("User")),
        Err(error) => return handle_domain_error(error),
    };

    user.set_role(role);
    match state.users.update(user).await {
        Ok(updated) => HttpResponse::Ok().json(ApiResponse::success(
            format!("User role updated to {}", role.as_str()),
            UserResponse::from(updated),
        )),
        Err(error) => handle_domain_error(error),
    }
}
