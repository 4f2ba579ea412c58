//! User repository trait defining the interface for user data persistence.
//!
//! Besides the usual lookups this trait carries the two ledger primitives
//! the swap workflow settles points through. Both are specified as
//! conditional updates so that no interleaving of transfers can drive a
//! balance negative.

use async_trait::async_trait;
use uuid::Uuid;

use rw_shared::types::Pagination;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique identifier
    ///
    /// Returns `Ok(None)` when no user exists with the given id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find a user by their email address
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Create a new user
    ///
    /// Fails with a validation error when the email is already registered.
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Update an existing user's profile fields and role
    ///
    /// The points balance is excluded: it moves only through the ledger
    /// primitives below.
    async fn update(&self, user: User) -> Result<User, DomainError>;

    /// List users, newest first
    async fn list(&self, pagination: Pagination) -> Result<(Vec<User>, u64), DomainError>;

    /// Count all registered users
    async fn count(&self) -> Result<u64, DomainError>;

    /// Debit points from a user's balance
    ///
    /// The debit applies only when the balance covers `amount`
    /// (`UPDATE .. SET points = points - ? WHERE id = ? AND points >= ?`).
    /// Returns `Ok(false)` when the guard rejects the debit; the balance
    /// is left untouched.
    async fn debit_points(&self, id: Uuid, amount: i64) -> Result<bool, DomainError>;

    /// Credit points to a user's balance
    async fn credit_points(&self, id: Uuid, amount: i64) -> Result<(), DomainError>;

    /// Transfer points between two users as a single unit
    ///
    /// Debit and credit are applied inside one store transaction: either
    /// both land or neither does. Fails with
    /// `SwapError::InsufficientPoints` when the debit guard rejects,
    /// in which case no balance changes.
    async fn transfer_points(
        &self,
        from: Uuid,
        to: Uuid,
        amount: i64,
    ) -> Result<(), DomainError>;
}
