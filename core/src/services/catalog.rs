//! Item catalog availability service.
//!
//! The availability subset of the catalog owned by the swap workflow:
//! reading an item as swappable, locking it out of `Available` while it
//! is committed to a swap, and releasing it. The workflow engine is the
//! only writer of item status for items under negotiation; creation,
//! moderation and editing live in `ItemService`.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::item::{Item, ItemStatus};
use crate::errors::{DomainError, DomainResult, SwapError};
use crate::repositories::ItemRepository;

/// Availability state machine over the item store
pub struct CatalogService<I>
where
    I: ItemRepository,
{
    items: Arc<I>,
}

impl<I> CatalogService<I>
where
    I: ItemRepository,
{
    /// Create a new catalog service
    pub fn new(items: Arc<I>) -> Self {
        Self { items }
    }

    /// Fetch an item that must currently be open to swap offers
    ///
    /// Fails with `NotFound` when the item does not exist and
    /// `ItemUnavailable` when it exists but is locked, swapped,
    /// rejected or unapproved.
    pub async fn get_available(&self, id: Uuid) -> DomainResult<Item> {
        let item = self
            .items
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Item"))?;

        if !item.is_swappable() {
            return Err(SwapError::ItemUnavailable.into());
        }

        Ok(item)
    }

    /// Lock an item out of `Available` into `new_status`
    ///
    /// Returns false when a concurrent swap locked the item first.
    pub async fn lock(&self, id: Uuid, new_status: ItemStatus) -> DomainResult<bool> {
        self.items.lock_if_available(id, new_status).await
    }

    /// Return an item to `Available`
    pub async fn release(&self, id: Uuid) -> DomainResult<()> {
        self.items.update_status(id, ItemStatus::Available).await
    }
}
