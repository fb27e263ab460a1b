use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{AuthResponseDto, LoginRequestDto, SignupRequestDto};
use crate::features::auth::services::TokenService;
use crate::features::users::models::{CreateUser, UserRole};
use crate::features::users::services::UserService;

/// Service for signup/login and session token issuance
pub struct AuthService {
    user_service: Arc<UserService>,
    token_service: Arc<TokenService>,
}

impl AuthService {
    pub fn new(user_service: Arc<UserService>, token_service: Arc<TokenService>) -> Self {
        Self {
            user_service,
            token_service,
        }
    }

    /// Register a new citizen account.
    ///
    /// Self-assignment of staff/admin at signup is rejected; elevation goes
    /// through the admin role endpoint or the bootstrap seed.
    pub async fn signup(&self, dto: SignupRequestDto) -> Result<AuthResponseDto> {
        match dto.role {
            None | Some(UserRole::Citizen) => {}
            Some(_) => {
                return Err(AppError::Forbidden(
                    "Role elevation requires an administrator".to_string(),
                ));
            }
        }

        let user = self
            .user_service
            .create(CreateUser {
                name: dto.name,
                email: dto.email,
                password: dto.password,
                role: UserRole::Citizen,
            })
            .await?;

        let token = self.token_service.issue(&user)?;

        Ok(AuthResponseDto {
            token,
            user: user.into(),
        })
    }

    /// Authenticate by email and password.
    ///
    /// Unknown email and wrong password both fail with the same generic
    /// message, so responses do not reveal which accounts exist.
    pub async fn login(&self, dto: LoginRequestDto) -> Result<AuthResponseDto> {
        let user = self
            .user_service
            .find_by_email(&dto.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

        let correct =
            UserService::verify_password(dto.password, user.password_hash.clone()).await?;
        if !correct {
            return Err(AppError::Unauthorized("Invalid credentials".to_string()));
        }

        let token = self.token_service.issue(&user)?;

        Ok(AuthResponseDto {
            token,
            user: user.into(),
        })
    }
}
