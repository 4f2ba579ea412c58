use actix_web::{web, HttpResponse};

use rw_core::repositories::{ItemRepository, SwapRepository, UserRepository};
use rw_core::services::notification::NotificationService;
use rw_shared::types::response::ApiResponse;

use crate::handlers::handle_domain_error;
use crate::middleware::AuthUser;

use super::super::AppState;
use super::require_admin;

/// Handler for GET /api/v1/admin/stats
///
/// Platform-wide counts for the admin dashboard.
pub async fn stats<S, I, U, N>(
    auth: AuthUser,
    state: web::Data<AppState<S, I, U, N>>,
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

    match state.stats_service.platform_stats().await {
        Ok(stats) => {
            HttpResponse::Ok().json(ApiResponse::success("Statistics retrieved", stats))
        }
        Err(error) => handle_domain_error(error),
    }
}
