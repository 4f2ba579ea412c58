//! User entity representing a registered member of the ReWear platform.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Points granted to every account at registration
pub const STARTING_POINTS: i64 = 100;

/// Represents the role of a user in the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// A regular platform member
    User,
    /// A moderator with access to the admin surface
    Admin,
}

impl UserRole {
    /// Parse a role from its wire form
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "user" => Some(UserRole::User),
            "admin" => Some(UserRole::Admin),
            _ => None,
        }
    }

    /// Wire form of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
        }
    }
}

/// User entity representing a registered member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Display name
    pub full_name: String,

    /// Contact email, unique per account
    pub email: String,

    /// Optional contact phone number
    pub phone: Option<String>,

    /// Points balance, never negative
    pub points: i64,

    /// Role of the user (User or Admin)
    pub role: UserRole,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new User with the registration starting balance
    pub fn new(full_name: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            full_name,
            email,
            phone: None,
            points: STARTING_POINTS,
            role: UserRole::User,
            created_at: now,
            updated_at: now,
        }
    }

    /// Updates the editable profile fields
    pub fn update_profile(&mut self, full_name: String, phone: Option<String>) {
        self.full_name = full_name;
        self.phone = phone;
        self.updated_at = Utc::now();
    }

    /// Changes the user's role
    pub fn set_role(&mut self, role: UserRole) {
        self.role = role;
        self.updated_at = Utc::now();
    }

    /// Checks whether the user can cover a points payment
    pub fn can_afford(&self, amount: i64) -> bool {
        self.points >= amount
    }

    /// Checks if the user is an admin
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_starts_with_welcome_balance() {
        let user = User::new("Ava Chen".to_string(), "ava@example.com".to_string());

        assert_eq!(user.points, STARTING_POINTS);
        assert_eq!(user.role, UserRole::User);
        assert!(user.phone.is_none());
        assert!(!user.is_admin());
    }

    #[test]
    fn test_can_afford() {
        let mut user = User::new("Ava".to_string(), "ava@example.com".to_string());
        user.points = 30;

        assert!(user.can_afford(30));
        assert!(user.can_afford(10));
        assert!(!user.can_afford(31));
    }

    #[test]
    fn test_set_role() {
        let mut user = User::new("Ava".to_string(), "ava@example.com".to_string());

        user.set_role(UserRole::Admin);
        assert!(user.is_admin());
    }

    #[test]
    fn test_role_parse_round_trip() {
        assert_eq!(UserRole::parse("admin"), Some(UserRole::Admin));
        assert_eq!(UserRole::parse("user"), Some(UserRole::User));
        assert_eq!(UserRole::parse("moderator"), None);
        assert_eq!(UserRole::Admin.as_str(), "admin");
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&UserRole::Admin).unwrap();
        assert_eq!(json, "\"admin\"");
    }
}
