use actix_web::{web, HttpResponse};
use serde::Deserialize;

use rw_core::repositories::{ItemRepository, SwapRepository, UserRepository};
use rw_core::services::notification::NotificationService;
use rw_shared::types::response::ApiResponse;
use rw_shared::types::{PaginatedResponse, Pagination};

use crate::dto::UserResponse;
use crate::handlers::handle_domain_error;
use crate::middleware::AuthUser;

use super::super::AppState;
use super::require_admin;

/// Query parameters for GET /admin/users
#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Handler for GET /api/v1/admin/users
///
/// Lists registered users, newest first.
pub async fn list_users<S, I, U, N>(
    auth: AuthUser,
    state: web::Data<AppState<S, I, U, N>>,
    query: web::Query<ListUsersQuery>,
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

    let pagination = Pagination::new(query.page.unwrap_or(1), query.limit.unwrap_or(20));

    match state.users.list(pagination).await {
        Ok((users, total)) => {
            let page = PaginatedResponse::new(
                users.into_iter().map(UserResponse::from).collect(),
                pagination,
                total,
            );
            HttpResponse::Ok().json(ApiResponse::success("Users retrieved", page))
        }
        Err(error) => handle_domain_error(error),
    }
}
