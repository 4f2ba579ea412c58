//! Mock implementation of UserRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use rw_shared::types::Pagination;

use crate::domain::entities::user::User;
use crate::errors::{DomainError, SwapError};

use super::trait_::UserRepository;

/// Mock user repository for testing
///
/// The ledger primitives run under a single write lock, giving the same
/// all-or-nothing behavior as the SQL transaction in the real store.
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a mock repository pre-seeded with users
    pub async fn with_users(users: Vec<User>) -> Self {
        let repo = Self::new();
        {
            let mut map = repo.users.write().await;
            for user in users {
                map.insert(user.id, user);
            }
        }
        repo
    }

    /// Read a user's current balance, for test assertions
    pub async fn balance_of(&self, id: Uuid) -> Option<i64> {
        self.users.read().await.get(&id).map(|u| u.points)
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        // Check for duplicate email
        if users.values().any(|u| u.email == user.email) {
            return Err(DomainError::Validation {
                message: "Email already registered".to_string(),
            });
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        match users.get_mut(&user.id) {
            Some(existing) => {
                let points = existing.points;
                *existing = user.clone();
                // Balance moves only through the ledger primitives
                existing.points = points;
                Ok(existing.clone())
            }
            None => Err(DomainError::not_found("User")),
        }
    }

    async fn list(&self, pagination: Pagination) -> Result<(Vec<User>, u64), DomainError> {
        let users = self.users.read().await;
        let mut all: Vec<User> = users.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = all.len() as u64;
        let page = all
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit as usize)
            .collect();
        Ok((page, total))
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let users = self.users.read().await;
        Ok(users.len() as u64)
    }

    async fn debit_points(&self, id: Uuid, amount: i64) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;

        match users.get_mut(&id) {
            Some(user) if user.points >= amount => {
                user.points -= amount;
                Ok(true)
            }
            Some(_) => Ok(false),
            None => Err(DomainError::not_found("User")),
        }
    }

    async fn credit_points(&self, id: Uuid, amount: i64) -> Result<(), DomainError> {
        let mut users = self.users.write().await;

        match users.get_mut(&id) {
            Some(user) => {
                user.points += amount;
                Ok(())
            }
            None => Err(DomainError::not_found("User")),
        }
    }

    async fn transfer_points(
        &self,
        from: Uuid,
        to: Uuid,
        amount: i64,
    ) -> Result<(), DomainError> {
        let mut users = self.users.write().await;

        let available = users
            .get(&from)
            .ok_or_else(|| DomainError::not_found("User"))?
            .points;
        if !users.contains_key(&to) {
            return Err(DomainError::not_found("User"));
        }

        if available < amount {
            return Err(SwapError::InsufficientPoints {
                required: amount,
                available,
            }
            .into());
        }

        users.get_mut(&from).expect("checked above").points -= amount;
        users.get_mut(&to).expect("checked above").points += amount;
        Ok(())
    }
}
