//! MySQL implementation of the SwapRepository trait.
//!
//! `transition` is the workflow's serialization point: a conditional
//! UPDATE keyed on the expected status. Racing callers hit the same row
//! and exactly one sees a non-zero affected count.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use rw_core::domain::entities::swap::{Swap, SwapOffer, SwapStatus};
use rw_core::errors::DomainError;
use rw_core::repositories::{SwapRepository, SwapTransition};
use rw_shared::types::Pagination;

/// MySQL implementation of SwapRepository
pub struct MySqlSwapRepository {
    /// Database connection pool
    pool: MySqlPool,
}

const SWAP_COLUMNS: &str = "id, requester_id, owner_id, requested_item_id, offered_item_id, \
                            points_offered, status, message, rejection_reason, completed_at, \
                            created_at, updated_at";

impl MySqlSwapRepository {
    /// Create a new MySQL swap repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to Swap entity
    fn row_to_swap(row: &sqlx::mysql::MySqlRow) -> Result<Swap, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::database(format!("Failed to get id: {}", e)))?;
        let requester_id: String = row
            .try_get("requester_id")
            .map_err(|e| DomainError::database(format!("Failed to get requester_id: {}", e)))?;
        let owner_id: String = row
            .try_get("owner_id")
            .map_err(|e| DomainError::database(format!("Failed to get owner_id: {}", e)))?;
        let requested_item_id: String = row.try_get("requested_item_id").map_err(|e| {
            DomainError::database(format!("Failed to get requested_item_id: {}", e))
        })?;

        let offered_item_id: Option<String> = row.try_get("offered_item_id").map_err(|e| {
            DomainError::database(format!("Failed to get offered_item_id: {}", e))
        })?;
        let points_offered: Option<i64> = row
            .try_get("points_offered")
            .map_err(|e| DomainError::database(format!("Failed to get points_offered: {}", e)))?;

        // Exactly one of the two columns is set; the schema's CHECK
        // constraint guarantees it for new rows.
        let offer = match (offered_item_id, points_offered) {
            (Some(item_id), None) => SwapOffer::Item(
                Uuid::parse_str(&item_id)
                    .map_err(|e| DomainError::database(format!("Invalid UUID: {}", e)))?,
            ),
            (None, Some(points)) => SwapOffer::Points(points),
            _ => {
                return Err(DomainError::database(
                    "Swap row must carry exactly one of offered_item_id and points_offered",
                ))
            }
        };

        let status_str: String = row
            .try_get("status")
            .map_err(|e| DomainError::database(format!("Failed to get status: {}", e)))?;

        Ok(Swap {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::database(format!("Invalid UUID: {}", e)))?,
            requester_id: Uuid::parse_str(&requester_id)
                .map_err(|e| DomainError::database(format!("Invalid UUID: {}", e)))?,
            owner_id: Uuid::parse_str(&owner_id)
                .map_err(|e| DomainError::database(format!("Invalid UUID: {}", e)))?,
            requested_item_id: Uuid::parse_str(&requested_item_id)
                .map_err(|e| DomainError::database(format!("Invalid UUID: {}", e)))?,
            offer,
            status: SwapStatus::parse(&status_str)
                .ok_or_else(|| DomainError::database(format!("Unknown status: {}", status_str)))?,
            message: row
                .try_get("message")
                .map_err(|e| DomainError::database(format!("Failed to get message: {}", e)))?,
            rejection_reason: row.try_get("rejection_reason").map_err(|e| {
                DomainError::database(format!("Failed to get rejection_reason: {}", e))
            })?,
            completed_at: row
                .try_get::<Option<DateTime<Utc>>, _>("completed_at")
                .map_err(|e| DomainError::database(format!("Failed to get completed_at: {}", e)))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::database(format!("Failed to get created_at: {}", e)))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::database(format!("Failed to get updated_at: {}", e)))?,
        })
    }
}

#[async_trait]
impl SwapRepository for MySqlSwapRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Swap>, DomainError> {
        let query = format!("SELECT {} FROM swaps WHERE id = ? LIMIT 1", SWAP_COLUMNS);

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Database query failed: {}", e)))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_swap(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, swap: Swap) -> Result<Swap, DomainError> {
        let query = r#"
            INSERT INTO swaps (
                id, requester_id, owner_id, requested_item_id, offered_item_id,
                points_offered, status, message, rejection_reason, completed_at,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(swap.id.to_string())
            .bind(swap.requester_id.to_string())
            .bind(swap.owner_id.to_string())
            .bind(swap.requested_item_id.to_string())
            .bind(swap.offered_item_id().map(|id| id.to_string()))
            .bind(swap.points_offered())
            .bind(swap.status.as_str())
            .bind(&swap.message)
            .bind(&swap.rejection_reason)
            .bind(swap.completed_at)
            .bind(swap.created_at)
            .bind(swap.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to create swap: {}", e)))?;

        Ok(swap)
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        status: Option<SwapStatus>,
        pagination: Pagination,
    ) -> Result<(Vec<Swap>, u64), DomainError> {
        let user_id = user_id.to_string();

        let (rows, total_row) = match status {
            Some(status) => {
                let query = format!(
                    "SELECT {} FROM swaps \
                     WHERE (requester_id = ? OR owner_id = ?) AND status = ? \
                     ORDER BY created_at DESC LIMIT ? OFFSET ?",
                    SWAP_COLUMNS
                );
                let rows = sqlx::query(&query)
                    .bind(&user_id)
                    .bind(&user_id)
                    .bind(status.as_str())
                    .bind(pagination.limit_i64())
                    .bind(pagination.offset_i64())
                    .fetch_all(&self.pool)
                    .await
                    .map_err(|e| DomainError::database(format!("Database query failed: {}", e)))?;

                let total_row = sqlx::query(
                    "SELECT COUNT(*) AS total FROM swaps \
                     WHERE (requester_id = ? OR owner_id = ?) AND status = ?",
                )
                .bind(&user_id)
                .bind(&user_id)
                .bind(status.as_str())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| DomainError::database(format!("Database query failed: {}", e)))?;

                (rows, total_row)
            }
            None => {
                let query = format!(
                    "SELECT {} FROM swaps \
                     WHERE requester_id = ? OR owner_id = ? \
                     ORDER BY created_at DESC LIMIT ? OFFSET ?",
                    SWAP_COLUMNS
                );
                let rows = sqlx::query(&query)
                    .bind(&user_id)
                    .bind(&user_id)
                    .bind(pagination.limit_i64())
                    .bind(pagination.offset_i64())
                    .fetch_all(&self.pool)
                    .await
                    .map_err(|e| DomainError::database(format!("Database query failed: {}", e)))?;

                let total_row = sqlx::query(
                    "SELECT COUNT(*) AS total FROM swaps WHERE requester_id = ? OR owner_id = ?",
                )
                .bind(&user_id)
                .bind(&user_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| DomainError::database(format!("Database query failed: {}", e)))?;

                (rows, total_row)
            }
        };

        let swaps = rows
            .iter()
            .map(Self::row_to_swap)
            .collect::<Result<Vec<_>, _>>()?;
        let total: i64 = total_row
            .try_get("total")
            .map_err(|e| DomainError::database(format!("Failed to get total: {}", e)))?;

        Ok((swaps, total as u64))
    }

    async fn exists_pending(
        &self,
        requester_id: Uuid,
        requested_item_id: Uuid,
    ) -> Result<bool, DomainError> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS total FROM swaps \
             WHERE requester_id = ? AND requested_item_id = ? AND status = 'pending'",
        )
        .bind(requester_id.to_string())
        .bind(requested_item_id.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Database query failed: {}", e)))?;

        let total: i64 = row
            .try_get("total")
            .map_err(|e| DomainError::database(format!("Failed to get total: {}", e)))?;
        Ok(total > 0)
    }

    async fn transition(
        &self,
        id: Uuid,
        expected: SwapStatus,
        transition: SwapTransition,
    ) -> Result<Option<Swap>, DomainError> {
        let query = r#"
            UPDATE swaps SET
                status = ?,
                rejection_reason = COALESCE(?, rejection_reason),
                completed_at = COALESCE(?, completed_at),
                updated_at = ?
            WHERE id = ? AND status = ?
        "#;

        let result = sqlx::query(query)
            .bind(transition.status.as_str())
            .bind(&transition.rejection_reason)
            .bind(transition.completed_at)
            .bind(Utc::now())
            .bind(id.to_string())
            .bind(expected.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to transition swap: {}", e)))?;

        if result.rows_affected() == 0 {
            // Distinguish a missing swap from a lost race
            return match self.find_by_id(id).await? {
                Some(_) => Ok(None),
                None => Err(DomainError::not_found("Swap request")),
            };
        }

        self.find_by_id(id)
            .await?
            .map(Some)
            .ok_or_else(|| DomainError::not_found("Swap request"))
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM swaps")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Database query failed: {}", e)))?;
        let total: i64 = row
            .try_get("total")
            .map_err(|e| DomainError::database(format!("Failed to get total: {}", e)))?;
        Ok(total as u64)
    }

    async fn count_by_status(&self, status: SwapStatus) -> Result<u64, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM swaps WHERE status = ?")
            .bind(status.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Database query failed: {}", e)))?;
        let total: i64 = row
            .try_get("total")
            .map_err(|e| DomainError::database(format!("Failed to get total: {}", e)))?;
        Ok(total as u64)
    }
}
