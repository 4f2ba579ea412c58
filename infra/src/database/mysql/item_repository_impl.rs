//! MySQL implementation of the ItemRepository trait.
//!
//! The availability lock is a conditional UPDATE: `WHERE id = ? AND
//! status = 'available'`. Whoever reaches the store first wins; the
//! loser sees zero affected rows.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySql, MySqlPool, QueryBuilder, Row};
use uuid::Uuid;

use rw_core::domain::entities::item::{
    Item, ItemCategory, ItemCondition, ItemSize, ItemStatus,
};
use rw_core::errors::DomainError;
use rw_core::repositories::{ItemFilter, ItemRepository, ItemSort};
use rw_shared::types::Pagination;

/// MySQL implementation of ItemRepository
pub struct MySqlItemRepository {
    /// Database connection pool
    pool: MySqlPool,
}

const ITEM_COLUMNS: &str = "id, title, description, category, size, `condition`, color, brand, \
                            tags, point_value, owner_id, status, is_approved, rejection_reason, \
                            created_at, updated_at";

impl MySqlItemRepository {
    /// Create a new MySQL item repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to Item entity
    fn row_to_item(row: &sqlx::mysql::MySqlRow) -> Result<Item, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::database(format!("Failed to get id: {}", e)))?;
        let owner_id: String = row
            .try_get("owner_id")
            .map_err(|e| DomainError::database(format!("Failed to get owner_id: {}", e)))?;

        let category_str: String = row
            .try_get("category")
            .map_err(|e| DomainError::database(format!("Failed to get category: {}", e)))?;
        let size_str: String = row
            .try_get("size")
            .map_err(|e| DomainError::database(format!("Failed to get size: {}", e)))?;
        let condition_str: String = row
            .try_get("condition")
            .map_err(|e| DomainError::database(format!("Failed to get condition: {}", e)))?;
        let status_str: String = row
            .try_get("status")
            .map_err(|e| DomainError::database(format!("Failed to get status: {}", e)))?;
        let tags_json: String = row
            .try_get("tags")
            .map_err(|e| DomainError::database(format!("Failed to get tags: {}", e)))?;

        Ok(Item {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::database(format!("Invalid UUID: {}", e)))?,
            title: row
                .try_get("title")
                .map_err(|e| DomainError::database(format!("Failed to get title: {}", e)))?,
            description: row
                .try_get("description")
                .map_err(|e| DomainError::database(format!("Failed to get description: {}", e)))?,
            category: ItemCategory::parse(&category_str)
                .ok_or_else(|| DomainError::database(format!("Unknown category: {}", category_str)))?,
            size: ItemSize::parse(&size_str)
                .ok_or_else(|| DomainError::database(format!("Unknown size: {}", size_str)))?,
            condition: ItemCondition::parse(&condition_str)
                .ok_or_else(|| DomainError::database(format!("Unknown condition: {}", condition_str)))?,
            color: row
                .try_get("color")
                .map_err(|e| DomainError::database(format!("Failed to get color: {}", e)))?,
            brand: row
                .try_get("brand")
                .map_err(|e| DomainError::database(format!("Failed to get brand: {}", e)))?,
            tags: serde_json::from_str(&tags_json)
                .map_err(|e| DomainError::database(format!("Invalid tags payload: {}", e)))?,
            point_value: row
                .try_get("point_value")
                .map_err(|e| DomainError::database(format!("Failed to get point_value: {}", e)))?,
            owner_id: Uuid::parse_str(&owner_id)
                .map_err(|e| DomainError::database(format!("Invalid UUID: {}", e)))?,
            status: ItemStatus::parse(&status_str)
                .ok_or_else(|| DomainError::database(format!("Unknown status: {}", status_str)))?,
            is_approved: row
                .try_get("is_approved")
                .map_err(|e| DomainError::database(format!("Failed to get is_approved: {}", e)))?,
            rejection_reason: row.try_get("rejection_reason").map_err(|e| {
                DomainError::database(format!("Failed to get rejection_reason: {}", e))
            })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::database(format!("Failed to get created_at: {}", e)))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::database(format!("Failed to get updated_at: {}", e)))?,
        })
    }

    /// Append the browse filters to a query
    fn push_filters<'a>(builder: &mut QueryBuilder<'a, MySql>, filter: &'a ItemFilter) {
        builder.push(" WHERE is_approved = TRUE AND status = 'available'");

        if let Some(category) = filter.category {
            builder.push(" AND category = ");
            builder.push_bind(category.as_str());
        }
        if let Some(size) = filter.size {
            builder.push(" AND size = ");
            builder.push_bind(size.as_str());
        }
        if let Some(condition) = filter.condition {
            builder.push(" AND `condition` = ");
            builder.push_bind(condition.as_str());
        }
        if let Some(ref color) = filter.color {
            builder.push(" AND LOWER(color) LIKE ");
            builder.push_bind(format!("%{}%", color.to_lowercase()));
        }
        if let Some(ref brand) = filter.brand {
            builder.push(" AND LOWER(brand) LIKE ");
            builder.push_bind(format!("%{}%", brand.to_lowercase()));
        }
        if let Some(ref search) = filter.search {
            let needle = format!("%{}%", search.to_lowercase());
            builder.push(" AND (LOWER(title) LIKE ");
            builder.push_bind(needle.clone());
            builder.push(" OR LOWER(description) LIKE ");
            builder.push_bind(needle.clone());
            builder.push(" OR LOWER(tags) LIKE ");
            builder.push_bind(needle);
            builder.push(")");
        }
    }

    fn order_clause(sort: ItemSort) -> &'static str {
        match sort {
            ItemSort::Newest => " ORDER BY created_at DESC",
            ItemSort::Oldest => " ORDER BY created_at ASC",
            ItemSort::PointsLow => " ORDER BY point_value ASC",
            ItemSort::PointsHigh => " ORDER BY point_value DESC",
        }
    }

    async fn fetch_page(
        &self,
        mut query: QueryBuilder<'_, MySql>,
    ) -> Result<Vec<Item>, DomainError> {
        let rows = query
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Database query failed: {}", e)))?;
        rows.iter().map(Self::row_to_item).collect()
    }

    async fn count_where(
        &self,
        mut query: QueryBuilder<'_, MySql>,
    ) -> Result<u64, DomainError> {
        let row = query
            .build()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Database query failed: {}", e)))?;
        let total: i64 = row
            .try_get("total")
            .map_err(|e| DomainError::database(format!("Failed to get total: {}", e)))?;
        Ok(total as u64)
    }
}

#[async_trait]
impl ItemRepository for MySqlItemRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Item>, DomainError> {
        let query = format!("SELECT {} FROM items WHERE id = ? LIMIT 1", ITEM_COLUMNS);

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Database query failed: {}", e)))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_item(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, item: Item) -> Result<Item, DomainError> {
        let tags_json = serde_json::to_string(&item.tags)
            .map_err(|e| DomainError::database(format!("Failed to encode tags: {}", e)))?;

        let query = r#"
            INSERT INTO items (
                id, title, description, category, size, `condition`, color, brand,
                tags, point_value, owner_id, status, is_approved, rejection_reason,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(item.id.to_string())
            .bind(&item.title)
            .bind(&item.description)
            .bind(item.category.as_str())
            .bind(item.size.as_str())
            .bind(item.condition.as_str())
            .bind(&item.color)
            .bind(&item.brand)
            .bind(tags_json)
            .bind(item.point_value)
            .bind(item.owner_id.to_string())
            .bind(item.status.as_str())
            .bind(item.is_approved)
            .bind(&item.rejection_reason)
            .bind(item.created_at)
            .bind(item.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to create item: {}", e)))?;

        Ok(item)
    }

    async fn update(&self, item: Item) -> Result<Item, DomainError> {
        let tags_json = serde_json::to_string(&item.tags)
            .map_err(|e| DomainError::database(format!("Failed to encode tags: {}", e)))?;

        let query = r#"
            UPDATE items SET
                title = ?,
                description = ?,
                category = ?,
                size = ?,
                `condition` = ?,
                color = ?,
                brand = ?,
                tags = ?,
                point_value = ?,
                status = ?,
                is_approved = ?,
                rejection_reason = ?,
                updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&item.title)
            .bind(&item.description)
            .bind(item.category.as_str())
            .bind(item.size.as_str())
            .bind(item.condition.as_str())
            .bind(&item.color)
            .bind(&item.brand)
            .bind(tags_json)
            .bind(item.point_value)
            .bind(item.status.as_str())
            .bind(item.is_approved)
            .bind(&item.rejection_reason)
            .bind(Utc::now())
            .bind(item.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to update item: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Item"));
        }
        Ok(item)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM items WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to delete item: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_available(
        &self,
        filter: &ItemFilter,
        pagination: Pagination,
    ) -> Result<(Vec<Item>, u64), DomainError> {
        let mut query =
            QueryBuilder::new(format!("SELECT {} FROM items", ITEM_COLUMNS));
        Self::push_filters(&mut query, filter);
        query.push(Self::order_clause(filter.sort));
        query.push(" LIMIT ");
        query.push_bind(pagination.limit_i64());
        query.push(" OFFSET ");
        query.push_bind(pagination.offset_i64());

        let items = self.fetch_page(query).await?;

        let mut count_query = QueryBuilder::new("SELECT COUNT(*) AS total FROM items");
        Self::push_filters(&mut count_query, filter);
        let total = self.count_where(count_query).await?;

        Ok((items, total))
    }

    async fn list_by_owner(
        &self,
        owner_id: Uuid,
        pagination: Pagination,
    ) -> Result<(Vec<Item>, u64), DomainError> {
        let query = format!(
            "SELECT {} FROM items WHERE owner_id = ? ORDER BY created_at DESC LIMIT ? OFFSET ?",
            ITEM_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(owner_id.to_string())
            .bind(pagination.limit_i64())
            .bind(pagination.offset_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Database query failed: {}", e)))?;
        let items = rows
            .iter()
            .map(Self::row_to_item)
            .collect::<Result<Vec<_>, _>>()?;

        let row = sqlx::query("SELECT COUNT(*) AS total FROM items WHERE owner_id = ?")
            .bind(owner_id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Database query failed: {}", e)))?;
        let total: i64 = row
            .try_get("total")
            .map_err(|e| DomainError::database(format!("Failed to get total: {}", e)))?;

        Ok((items, total as u64))
    }

    async fn list_unapproved(
        &self,
        pagination: Pagination,
    ) -> Result<(Vec<Item>, u64), DomainError> {
        let query = format!(
            "SELECT {} FROM items WHERE is_approved = FALSE AND status != 'rejected' \
             ORDER BY created_at DESC LIMIT ? OFFSET ?",
            ITEM_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(pagination.limit_i64())
            .bind(pagination.offset_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Database query failed: {}", e)))?;
        let items = rows
            .iter()
            .map(Self::row_to_item)
            .collect::<Result<Vec<_>, _>>()?;

        let row = sqlx::query(
            "SELECT COUNT(*) AS total FROM items WHERE is_approved = FALSE AND status != 'rejected'",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Database query failed: {}", e)))?;
        let total: i64 = row
            .try_get("total")
            .map_err(|e| DomainError::database(format!("Failed to get total: {}", e)))?;

        Ok((items, total as u64))
    }

    async fn lock_if_available(
        &self,
        id: Uuid,
        new_status: ItemStatus,
    ) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE items
            SET status = ?, updated_at = ?
            WHERE id = ? AND status = 'available'
        "#;

        let result = sqlx::query(query)
            .bind(new_status.as_str())
            .bind(Utc::now())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to lock item: {}", e)))?;

        if result.rows_affected() > 0 {
            return Ok(true);
        }

        // Distinguish a missing item from a lost lock
        if self.find_by_id(id).await?.is_none() {
            return Err(DomainError::not_found("Item"));
        }
        Ok(false)
    }

    async fn update_status(&self, id: Uuid, status: ItemStatus) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE items SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(Utc::now())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to update status: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Item"));
        }
        Ok(())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM items")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Database query failed: {}", e)))?;
        let total: i64 = row
            .try_get("total")
            .map_err(|e| DomainError::database(format!("Failed to get total: {}", e)))?;
        Ok(total as u64)
    }

    async fn count_by_approval(&self, approved: bool) -> Result<u64, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM items WHERE is_approved = ?")
            .bind(approved)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Database query failed: {}", e)))?;
        let total: i64 = row
            .try_get("total")
            .map_err(|e| DomainError::database(format!("Failed to get total: {}", e)))?;
        Ok(total as u64)
    }
}

