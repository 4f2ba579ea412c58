//! Item endpoint DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use rw_core::domain::entities::item::{
    Item, ItemCategory, ItemCondition, ItemSize, ItemStatus, NewItem,
};
use rw_core::repositories::{ItemFilter, ItemSort};
use rw_shared::types::Pagination;

/// Request body for POST /items and PUT /items/{id}
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    #[validate(length(min = 1, max = 100))]
    pub title: String,

    #[validate(length(min = 1, max = 1000))]
    pub description: String,

    pub category: ItemCategory,

    pub size: ItemSize,

    pub condition: ItemCondition,

    #[validate(length(min = 1, max = 64))]
    pub color: String,

    #[validate(length(max = 64))]
    pub brand: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,
}

impl From<CreateItemRequest> for NewItem {
    fn from(request: CreateItemRequest) -> Self {
        NewItem {
            title: request.title,
            description: request.description,
            category: request.category,
            size: request.size,
            condition: request.condition,
            color: request.color,
            brand: request.brand,
            tags: request.tags,
        }
    }
}

/// Query parameters for GET /items
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItemsQuery {
    pub category: Option<String>,
    pub size: Option<String>,
    pub condition: Option<String>,
    pub color: Option<String>,
    pub brand: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ListItemsQuery {
    /// Pagination with the browse default page size
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page.unwrap_or(1), self.limit.unwrap_or(12))
    }

    /// Build the catalog filter, rejecting unknown enum values
    pub fn filter(&self) -> Result<ItemFilter, String> {
        let category = match &self.category {
            None => None,
            Some(raw) => Some(
                ItemCategory::parse(raw).ok_or_else(|| format!("Unknown category: {}", raw))?,
            ),
        };
        let size = match &self.size {
            None => None,
            Some(raw) => {
                Some(ItemSize::parse(raw).ok_or_else(|| format!("Unknown size: {}", raw))?)
            }
        };
        let condition = match &self.condition {
            None => None,
            Some(raw) => Some(
                ItemCondition::parse(raw).ok_or_else(|| format!("Unknown condition: {}", raw))?,
            ),
        };
        let sort = match &self.sort_by {
            None => ItemSort::default(),
            Some(raw) => {
                ItemSort::parse(raw).ok_or_else(|| format!("Unknown sort key: {}", raw))?
            }
        };

        Ok(ItemFilter {
            category,
            size,
            condition,
            color: self.color.clone(),
            brand: self.brand.clone(),
            search: self.search.clone(),
            sort,
        })
    }
}

/// Request body for PUT /admin/items/{id}/reject
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RejectItemRequest {
    #[validate(length(min = 1, max = 300))]
    pub rejection_reason: String,
}

/// Item representation returned by the API
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: ItemCategory,
    pub size: ItemSize,
    pub condition: ItemCondition,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    pub tags: Vec<String>,
    pub point_value: i64,
    pub owner: Uuid,
    pub status: ItemStatus,
    pub is_approved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            title: item.title,
            description: item.description,
            category: item.category,
            size: item.size,
            condition: item.condition,
            color: item.color,
            brand: item.brand,
            tags: item.tags,
            point_value: item.point_value,
            owner: item.owner_id,
            status: item.status,
            is_approved: item.is_approved,
            rejection_reason: item.rejection_reason,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}
