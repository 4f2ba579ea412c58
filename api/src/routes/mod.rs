//! Route handlers, one module per resource.

pub mod admin;
pub mod items;
pub mod swaps;
pub mod users;

use std::sync::Arc;

use rw_core::repositories::{ItemRepository, SwapRepository, UserRepository};
use rw_core::services::notification::NotificationService;
use rw_core::services::{ItemService, StatsService, SwapService};

/// Shared application state injected into every handler
///
/// Generic over the repository and notifier implementations so the same
/// handlers run against MySQL in production and the in-memory mocks in
/// tests.
pub struct AppState<S, I, U, N>
where
    S: SwapRepository,
    I: ItemRepository,
    U: UserRepository,
    N: NotificationService + ?Sized,
{
    /// Swap workflow engine
    pub swap_service: SwapService<S, I, U, N>,
    /// Item listing and moderation service
    pub item_service: ItemService<I, U, N>,
    /// Admin dashboard aggregation
    pub stats_service: StatsService<U, I, S>,
    /// User store, for the admin user listing and profile routes
    pub users: Arc<U>,
}
