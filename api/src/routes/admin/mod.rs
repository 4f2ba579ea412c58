//! Admin moderation endpoints, all gated on the admin role:
//! - `GET /admin/items/pending` — moderation queue
//! - `PUT /admin/items/{id}/approve` — approve a listing
//! - `PUT /admin/items/{id}/reject` — reject a listing with a reason
//! - `GET /admin/users` — list registered users
//! - `PUT /admin/users/{id}/role` — change a user's role
//! - `GET /admin/stats` — platform statistics

pub mod approve_item;
pub mod pending_items;
pub mod reject_item;
pub mod stats;
pub mod update_role;
pub mod users;

use actix_web::HttpResponse;

use rw_core::domain::entities::user::User;
use rw_shared::types::response::ApiResponse;

/// Reject non-admin callers with a 403
///
/// Returns `None` when the caller may proceed.
pub(crate) fn require_admin(user: &User) -> Option<HttpResponse> {
    if user.is_admin() {
        None
    } else {
        Some(HttpResponse::Forbidden().json(ApiResponse::<()>::error("Admin access required")))
    }
}
