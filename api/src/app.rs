//! Route registration and top-level handlers.
//!
//! `configure_routes` is generic over the repository and notifier
//! implementations, so integration tests can mount the same tree over
//! in-memory mocks.

use actix_web::{web, HttpResponse};

use rw_core::repositories::{ItemRepository, SwapRepository, UserRepository};
use rw_core::services::notification::NotificationService;

use crate::middleware::RequireAuth;
use crate::routes::{admin, items, swaps, users};

/// Register the API v1 route tree
pub fn configure_routes<S, I, U, N>(cfg: &mut web::ServiceConfig)
where
    S: SwapRepository + 'static,
    I: ItemRepository + 'static,
    U: UserRepository + 'static,
    N: NotificationService + ?Sized + 'static,
{
    cfg.service(
        web::scope("/api/v1")
            // Swap workflow (all authenticated)
            .service(
                web::scope("/swaps")
                    .wrap(RequireAuth::new())
                    .service(
                        web::resource("")
                            .route(web::post().to(swaps::create::create_swap::<S, I, U, N>))
                            .route(web::get().to(swaps::list::list_swaps::<S, I, U, N>)),
                    )
                    .route(
                        "/{id}/accept",
                        web::put().to(swaps::accept::accept_swap::<S, I, U, N>),
                    )
                    .route(
                        "/{id}/reject",
                        web::put().to(swaps::reject::reject_swap::<S, I, U, N>),
                    )
                    .route(
                        "/{id}/complete",
                        web::put().to(swaps::complete::complete_swap::<S, I, U, N>),
                    ),
            )
            // Item catalog (browse is public, mutation requires auth)
            .service(
                web::scope("/items")
                    .service(
                        web::resource("")
                            .route(web::get().to(items::list::list_items::<S, I, U, N>))
                            .route(
                                web::post()
                                    .to(items::create::create_item::<S, I, U, N>)
                                    .wrap(RequireAuth::new()),
                            ),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(items::get::get_item::<S, I, U, N>))
                            .route(
                                web::put()
                                    .to(items::update::update_item::<S, I, U, N>)
                                    .wrap(RequireAuth::new()),
                            )
                            .route(
                                web::delete()
                                    .to(items::delete::delete_item::<S, I, U, N>)
                                    .wrap(RequireAuth::new()),
                            ),
                    ),
            )
            // Profile routes
            .service(
                web::scope("/users")
                    .wrap(RequireAuth::new())
                    .route("/me", web::get().to(users::me::me))
                    .route(
                        "/me/items",
                        web::get().to(items::my_items::my_items::<S, I, U, N>),
                    ),
            )
            // Moderation surface (role check inside the handlers)
            .service(
                web::scope("/admin")
                    .wrap(RequireAuth::new())
                    .route(
                        "/items/pending",
                        web::get().to(admin::pending_items::pending_items::<S, I, U, N>),
                    )
                    .route(
                        "/items/{id}/approve",
                        web::put().to(admin::approve_item::approve_item::<S, I, U, N>),
                    )
                    .route(
                        "/items/{id}/reject",
                        web::put().to(admin::reject_item::reject_item::<S, I, U, N>),
                    )
                    .route("/users", web::get().to(admin::users::list_users::<S, I, U, N>))
                    .route(
                        "/users/{id}/role",
                        web::put().to(admin::update_role::update_role::<S, I, U, N>),
                    )
                    .route("/stats", web::get().to(admin::stats::stats::<S, I, U, N>)),
            ),
    );
}

/// Health check endpoint handler
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "rewear-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "success": false,
        "message": "The requested resource was not found"
    }))
}
