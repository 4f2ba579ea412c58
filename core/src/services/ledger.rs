//! Points ledger service.
//!
//! Balances live on the user rows; every mutation goes through the
//! guarded repository primitives so a balance can never go negative.
//! Amounts are validated here, server-side, regardless of what any
//! client declared.

use std::sync::Arc;

use uuid::Uuid;

use crate::errors::{DomainError, DomainResult, SwapError};
use crate::repositories::UserRepository;

/// Ledger over the user store
pub struct PointsLedger<U>
where
    U: UserRepository,
{
    users: Arc<U>,
}

impl<U> PointsLedger<U>
where
    U: UserRepository,
{
    /// Create a new ledger
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }

    /// Debit points from a user
    ///
    /// Fails with `InsufficientPoints` rather than driving the balance
    /// negative.
    pub async fn debit(&self, user_id: Uuid, amount: i64) -> DomainResult<()> {
        validate_amount(amount)?;

        if self.users.debit_points(user_id, amount).await? {
            return Ok(());
        }

        let available = self
            .users
            .find_by_id(user_id)
            .await?
            .map(|u| u.points)
            .unwrap_or(0);
        Err(SwapError::InsufficientPoints {
            required: amount,
            available,
        }
        .into())
    }

    /// Credit points to a user
    pub async fn credit(&self, user_id: Uuid, amount: i64) -> DomainResult<()> {
        validate_amount(amount)?;
        self.users.credit_points(user_id, amount).await
    }

    /// Move points between two users as one unit
    ///
    /// Both sides land or neither does; a failed debit guard surfaces as
    /// `InsufficientPoints` with no balance changed.
    pub async fn transfer(&self, from: Uuid, to: Uuid, amount: i64) -> DomainResult<()> {
        validate_amount(amount)?;
        self.users.transfer_points(from, to, amount).await
    }
}

fn validate_amount(amount: i64) -> DomainResult<()> {
    if amount <= 0 {
        return Err(DomainError::validation("Points amount must be positive"));
    }
    Ok(())
}
