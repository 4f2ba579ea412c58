//! Mock implementation of ItemRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use rw_shared::types::Pagination;

use crate::domain::entities::item::{Item, ItemStatus};
use crate::errors::DomainError;

use super::trait_::{ItemFilter, ItemRepository, ItemSort};

/// Mock item repository for testing
pub struct MockItemRepository {
    items: Arc<RwLock<HashMap<Uuid, Item>>>,
}

impl MockItemRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            items: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a mock repository pre-seeded with items
    pub async fn with_items(items: Vec<Item>) -> Self {
        let repo = Self::new();
        {
            let mut map = repo.items.write().await;
            for item in items {
                map.insert(item.id, item);
            }
        }
        repo
    }

    /// Read an item's current status, for test assertions
    pub async fn status_of(&self, id: Uuid) -> Option<ItemStatus> {
        self.items.read().await.get(&id).map(|i| i.status)
    }

    fn matches(filter: &ItemFilter, item: &Item) -> bool {
        if let Some(category) = filter.category {
            if item.category != category {
                return false;
            }
        }
        if let Some(size) = filter.size {
            if item.size != size {
                return false;
            }
        }
        if let Some(condition) = filter.condition {
            if item.condition != condition {
                return false;
            }
        }
        if let Some(ref color) = filter.color {
            if !item.color.to_lowercase().contains(&color.to_lowercase()) {
                return false;
            }
        }
        if let Some(ref brand) = filter.brand {
            match &item.brand {
                Some(b) if b.to_lowercase().contains(&brand.to_lowercase()) => {}
                _ => return false,
            }
        }
        if let Some(ref search) = filter.search {
            let needle = search.to_lowercase();
            let in_title = item.title.to_lowercase().contains(&needle);
            let in_description = item.description.to_lowercase().contains(&needle);
            let in_tags = item.tags.iter().any(|t| t.contains(&needle));
            if !in_title && !in_description && !in_tags {
                return false;
            }
        }
        true
    }

    fn paginate(mut items: Vec<Item>, sort: ItemSort, pagination: Pagination) -> (Vec<Item>, u64) {
        match sort {
            ItemSort::Newest => items.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            ItemSort::Oldest => items.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
            ItemSort::PointsLow => items.sort_by_key(|i| i.point_value),
            ItemSort::PointsHigh => {
                items.sort_by_key(|i| i.point_value);
                items.reverse();
            }
        }

        let total = items.len() as u64;
        let page = items
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit as usize)
            .collect();
        (page, total)
    }
}

impl Default for MockItemRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ItemRepository for MockItemRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Item>, DomainError> {
        let items = self.items.read().await;
        Ok(items.get(&id).cloned())
    }

    async fn create(&self, item: Item) -> Result<Item, DomainError> {
        let mut items = self.items.write().await;
        items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn update(&self, item: Item) -> Result<Item, DomainError> {
        let mut items = self.items.write().await;

        if !items.contains_key(&item.id) {
            return Err(DomainError::not_found("Item"));
        }

        items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut items = self.items.write().await;
        Ok(items.remove(&id).is_some())
    }

    async fn list_available(
        &self,
        filter: &ItemFilter,
        pagination: Pagination,
    ) -> Result<(Vec<Item>, u64), DomainError> {
        let items = self.items.read().await;
        let matching: Vec<Item> = items
            .values()
            .filter(|i| i.is_swappable() && Self::matches(filter, i))
            .cloned()
            .collect();
        Ok(Self::paginate(matching, filter.sort, pagination))
    }

    async fn list_by_owner(
        &self,
        owner_id: Uuid,
        pagination: Pagination,
    ) -> Result<(Vec<Item>, u64), DomainError> {
        let items = self.items.read().await;
        let matching: Vec<Item> = items
            .values()
            .filter(|i| i.owner_id == owner_id)
            .cloned()
            .collect();
        Ok(Self::paginate(matching, ItemSort::Newest, pagination))
    }

    async fn list_unapproved(
        &self,
        pagination: Pagination,
    ) -> Result<(Vec<Item>, u64), DomainError> {
        let items = self.items.read().await;
        let matching: Vec<Item> = items
            .values()
            .filter(|i| !i.is_approved && i.status != ItemStatus::Rejected)
            .cloned()
            .collect();
        Ok(Self::paginate(matching, ItemSort::Newest, pagination))
    }

    async fn lock_if_available(
        &self,
        id: Uuid,
        new_status: ItemStatus,
    ) -> Result<bool, DomainError> {
        let mut items = self.items.write().await;

        match items.get_mut(&id) {
            Some(item) if item.status == ItemStatus::Available => {
                item.set_status(new_status);
                Ok(true)
            }
            Some(_) => Ok(false),
            None => Err(DomainError::not_found("Item")),
        }
    }

    async fn update_status(&self, id: Uuid, status: ItemStatus) -> Result<(), DomainError> {
        let mut items = self.items.write().await;

        match items.get_mut(&id) {
            Some(item) => {
                item.set_status(status);
                Ok(())
            }
            None => Err(DomainError::not_found("Item")),
        }
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let items = self.items.read().await;
        Ok(items.len() as u64)
    }

    async fn count_by_approval(&self, approved: bool) -> Result<u64, DomainError> {
        let items = self.items.read().await;
        Ok(items.values().filter(|i| i.is_approved == approved).count() as u64)
    }
}
