//! MySQL implementation of the UserRepository trait.
//!
//! The ledger primitives are implemented as guarded UPDATE statements:
//! the balance check lives in the WHERE clause, so the store itself
//! refuses a debit that would go negative. `transfer_points` wraps the
//! guarded debit and the credit in one transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use rw_core::domain::entities::user::{User, UserRole};
use rw_core::errors::{DomainError, SwapError};
use rw_core::repositories::UserRepository;
use rw_shared::types::Pagination;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::database(format!("Failed to get id: {}", e)))?;

        let role_str: String = row
            .try_get("role")
            .map_err(|e| DomainError::database(format!("Failed to get role: {}", e)))?;
        let role = UserRole::parse(&role_str)
            .ok_or_else(|| DomainError::database(format!("Unknown role: {}", role_str)))?;

        Ok(User {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::database(format!("Invalid UUID: {}", e)))?,
            full_name: row
                .try_get("full_name")
                .map_err(|e| DomainError::database(format!("Failed to get full_name: {}", e)))?,
            email: row
                .try_get("email")
                .map_err(|e| DomainError::database(format!("Failed to get email: {}", e)))?,
            phone: row
                .try_get("phone")
                .map_err(|e| DomainError::database(format!("Failed to get phone: {}", e)))?,
            points: row
                .try_get("points")
                .map_err(|e| DomainError::database(format!("Failed to get points: {}", e)))?,
            role,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::database(format!("Failed to get created_at: {}", e)))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::database(format!("Failed to get updated_at: {}", e)))?,
        })
    }
}

const USER_COLUMNS: &str = "id, full_name, email, phone, points, role, created_at, updated_at";

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = format!(
            "SELECT {} FROM users WHERE id = ? LIMIT 1",
            USER_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Database query failed: {}", e)))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = format!(
            "SELECT {} FROM users WHERE email = ? LIMIT 1",
            USER_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Database query failed: {}", e)))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        if self.find_by_email(&user.email).await?.is_some() {
            return Err(DomainError::validation("Email already registered"));
        }

        let query = r#"
            INSERT INTO users (
                id, full_name, email, phone, points, role,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.full_name)
            .bind(&user.email)
            .bind(&user.phone)
            .bind(user.points)
            .bind(user.role.as_str())
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to create user: {}", e)))?;

        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        // Points are excluded: the balance moves only through the ledger
        // primitives below.
        let query = r#"
            UPDATE users SET
                full_name = ?,
                email = ?,
                phone = ?,
                role = ?,
                updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&user.full_name)
            .bind(&user.email)
            .bind(&user.phone)
            .bind(user.role.as_str())
            .bind(Utc::now())
            .bind(user.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to update user: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("User"));
        }

        self.find_by_id(user.id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))
    }

    async fn list(&self, pagination: Pagination) -> Result<(Vec<User>, u64), DomainError> {
        let query = format!(
            "SELECT {} FROM users ORDER BY created_at DESC LIMIT ? OFFSET ?",
            USER_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(pagination.limit_i64())
            .bind(pagination.offset_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Database query failed: {}", e)))?;

        let users = rows
            .iter()
            .map(Self::row_to_user)
            .collect::<Result<Vec<_>, _>>()?;
        let total = self.count().await?;
        Ok((users, total))
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Database query failed: {}", e)))?;

        let total: i64 = row
            .try_get("total")
            .map_err(|e| DomainError::database(format!("Failed to get total: {}", e)))?;
        Ok(total as u64)
    }

    async fn debit_points(&self, id: Uuid, amount: i64) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE users
            SET points = points - ?, updated_at = ?
            WHERE id = ? AND points >= ?
        "#;

        let result = sqlx::query(query)
            .bind(amount)
            .bind(Utc::now())
            .bind(id.to_string())
            .bind(amount)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to debit points: {}", e)))?;

        if result.rows_affected() > 0 {
            return Ok(true);
        }

        // Distinguish a missing user from a refused debit
        if self.find_by_id(id).await?.is_none() {
            return Err(DomainError::not_found("User"));
        }
        Ok(false)
    }

    async fn credit_points(&self, id: Uuid, amount: i64) -> Result<(), DomainError> {
        let query = r#"
            UPDATE users
            SET points = points + ?, updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(amount)
            .bind(Utc::now())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to credit points: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("User"));
        }
        Ok(())
    }

    async fn transfer_points(
        &self,
        from: Uuid,
        to: Uuid,
        amount: i64,
    ) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database(format!("Failed to begin transaction: {}", e)))?;

        let debit = sqlx::query(
            "UPDATE users SET points = points - ?, updated_at = ? WHERE id = ? AND points >= ?",
        )
        .bind(amount)
        .bind(Utc::now())
        .bind(from.to_string())
        .bind(amount)
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database(format!("Failed to debit points: {}", e)))?;

        if debit.rows_affected() == 0 {
            tx.rollback()
                .await
                .map_err(|e| DomainError::database(format!("Failed to roll back: {}", e)))?;

            let available = self
                .find_by_id(from)
                .await?
                .ok_or_else(|| DomainError::not_found("User"))?
                .points;
            return Err(SwapError::InsufficientPoints {
                required: amount,
                available,
            }
            .into());
        }

        let credit = sqlx::query(
            "UPDATE users SET points = points + ?, updated_at = ? WHERE id = ?",
        )
        .bind(amount)
        .bind(Utc::now())
        .bind(to.to_string())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database(format!("Failed to credit points: {}", e)))?;

        if credit.rows_affected() == 0 {
            tx.rollback()
                .await
                .map_err(|e| DomainError::database(format!("Failed to roll back: {}", e)))?;
            return Err(DomainError::not_found("User"));
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::database(format!("Failed to commit transfer: {}", e)))?;
        Ok(())
    }
}
