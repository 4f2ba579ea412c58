//! User endpoint DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use rw_core::domain::entities::user::{User, UserRole};

/// User representation returned by the API
///
/// The points balance is visible only to the user themselves and to
/// admins; handlers choose which projection to return.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub points: i64,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            phone: user.phone,
            points: user.points,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// Request body for PUT /admin/users/{id}/role
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: String,
}

impl UpdateRoleRequest {
    /// Parse the requested role
    pub fn parsed_role(&self) -> Result<UserRole, String> {
        UserRole::parse(&self.role)
            .ok_or_else(|| "Invalid role. Must be either \"user\" or \"admin\"".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        let request = UpdateRoleRequest {
            role: "admin".to_string(),
        };
        assert_eq!(request.parsed_role().unwrap(), UserRole::Admin);

        let request = UpdateRoleRequest {
            role: "moderator".to_string(),
        };
        assert!(request.parsed_role().is_err());
    }

    #[test]
    fn test_user_response_wire_names() {
        let user = User::new("Ava Chen".to_string(), "ava@example.com".to_string());
        let response = UserResponse::from(user);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["fullName"], "Ava Chen");
        assert_eq!(json["points"], 100);
        assert_eq!(json["role"], "user");
    }
}
