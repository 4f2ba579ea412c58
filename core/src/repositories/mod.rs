//! Repository interfaces for entity persistence.
//!
//! Traits live here in the domain layer; MySQL implementations live in the
//! infrastructure crate. The in-memory mocks preserve the conditional-update
//! semantics the workflow relies on and back the service tests.

pub mod item;
pub mod swap;
pub mod user;

pub use item::{ItemFilter, ItemRepository, ItemSort, MockItemRepository};
pub use swap::{MockSwapRepository, SwapRepository, SwapTransition};
pub use user::{MockUserRepository, UserRepository};
