use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::users::dtos::UserResponseDto;
use crate::features::users::models::UserRole;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignupRequestDto {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    /// Requested role. Anything other than citizen is rejected.
    pub role: Option<UserRole>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequestDto {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponseDto {
    pub token: String,
    pub user: UserResponseDto,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signup_rejects_short_password_and_bad_email() {
        let dto = SignupRequestDto {
            name: "Asha".to_string(),
            email: "not-an-email".to_string(),
            password: "short".to_string(),
            role: None,
        };

        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn signup_accepts_valid_input() {
        let dto = SignupRequestDto {
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            password: "long-enough-password".to_string(),
            role: None,
        };

        assert!(dto.validate().is_ok());
    }
}
