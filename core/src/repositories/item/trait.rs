//! Item repository trait defining the interface for catalog persistence.

use async_trait::async_trait;
use uuid::Uuid;

use rw_shared::types::Pagination;

use crate::domain::entities::item::{Item, ItemCategory, ItemCondition, ItemSize, ItemStatus};
use crate::errors::DomainError;

/// Sort order for catalog browsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemSort {
    #[default]
    Newest,
    Oldest,
    PointsLow,
    PointsHigh,
}

impl ItemSort {
    /// Parse a sort key from its wire form
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "newest" => Some(ItemSort::Newest),
            "oldest" => Some(ItemSort::Oldest),
            "points-low" => Some(ItemSort::PointsLow),
            "points-high" => Some(ItemSort::PointsHigh),
            _ => None,
        }
    }
}

/// Filters for browsing the public catalog
#[derive(Debug, Clone, Default)]
pub struct ItemFilter {
    pub category: Option<ItemCategory>,
    pub size: Option<ItemSize>,
    pub condition: Option<ItemCondition>,
    /// Case-insensitive substring match on color
    pub color: Option<String>,
    /// Case-insensitive substring match on brand
    pub brand: Option<String>,
    /// Text search over title, description and tags
    pub search: Option<String>,
    pub sort: ItemSort,
}

/// Repository trait for Item entity persistence operations
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Find an item by its unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Item>, DomainError>;

    /// Create a new item listing
    async fn create(&self, item: Item) -> Result<Item, DomainError>;

    /// Update an existing item
    async fn update(&self, item: Item) -> Result<Item, DomainError>;

    /// Delete an item; returns false when it did not exist
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Browse approved, available items with filters applied
    async fn list_available(
        &self,
        filter: &ItemFilter,
        pagination: Pagination,
    ) -> Result<(Vec<Item>, u64), DomainError>;

    /// List a user's own items, newest first, regardless of state
    async fn list_by_owner(
        &self,
        owner_id: Uuid,
        pagination: Pagination,
    ) -> Result<(Vec<Item>, u64), DomainError>;

    /// List items awaiting moderation, newest first
    async fn list_unapproved(
        &self,
        pagination: Pagination,
    ) -> Result<(Vec<Item>, u64), DomainError>;

    /// Lock an item out of `Available` into `new_status`
    ///
    /// Conditional update (`WHERE id = ? AND status = 'available'`);
    /// returns `Ok(false)` when the item was already locked by a
    /// concurrent swap. The caller decides whether that is an error.
    async fn lock_if_available(
        &self,
        id: Uuid,
        new_status: ItemStatus,
    ) -> Result<bool, DomainError>;

    /// Unconditionally move an item to a new availability state
    ///
    /// Used for the pending → swapped transition at completion, where the
    /// swap-status CAS has already serialized the callers.
    async fn update_status(&self, id: Uuid, status: ItemStatus) -> Result<(), DomainError>;

    /// Count all items
    async fn count(&self) -> Result<u64, DomainError>;

    /// Count items by approval state
    async fn count_by_approval(&self, approved: bool) -> Result<u64, DomainError>;
}
