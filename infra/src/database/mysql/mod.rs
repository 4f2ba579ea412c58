//! MySQL repository implementations using SQLx.

pub mod item_repository_impl;
pub mod swap_repository_impl;
pub mod user_repository_impl;

pub use item_repository_impl::MySqlItemRepository;
pub use swap_repository_impl::MySqlSwapRepository;
pub use user_repository_impl::MySqlUserRepository;
