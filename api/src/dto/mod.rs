//! Request and response DTOs.
//!
//! Everything crossing the HTTP boundary is a typed, validated struct;
//! handlers validate before any service call. Wire names are camelCase.

pub mod item_dto;
pub mod swap_dto;
pub mod user_dto;

pub use item_dto::{CreateItemRequest, ItemResponse, ListItemsQuery, RejectItemRequest};
pub use swap_dto::{CreateSwapRequest, ListSwapsQuery, RejectSwapRequest, SwapResponse};
pub use user_dto::{UpdateRoleRequest, UserResponse};
