use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::users::models::{User, UserRole};

/// Sanitized user representation; there is deliberately no password field.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponseDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponseDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            role: u.role,
            photo_url: u.photo_url,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

/// Request DTO for changing a user's role (admin only)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateUserRoleDto {
    pub role: UserRole,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_dto_carries_no_password_field() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            password_hash: "$2b$12$secret".to_string(),
            role: UserRole::Citizen,
            photo_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(UserResponseDto::from(user)).unwrap();
        let body = json.as_object().unwrap();

        assert!(!body.contains_key("password"));
        assert!(!body.contains_key("password_hash"));
        assert_eq!(body["email"], "asha@example.com");
    }
}
