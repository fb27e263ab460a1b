use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::dtos::{AuthResponseDto, LoginRequestDto, SignupRequestDto};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::services::AuthService;
use crate::shared::types::ApiResponse;

/// Register a new citizen account
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignupRequestDto,
    responses(
        (status = 201, description = "Account created", body = ApiResponse<AuthResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Requested role is not allowed at signup"),
        (status = 409, description = "Email already in use")
    ),
    tag = "auth"
)]
pub async fn signup(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<SignupRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<AuthResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let auth = service.signup(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(auth), None, None)),
    ))
}

/// Authenticate with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Authenticated", body = ApiResponse<AuthResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<LoginRequestDto>,
) -> Result<Json<ApiResponse<AuthResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let auth = service.login(dto).await?;
    Ok(Json(ApiResponse::success(Some(auth), None, None)))
}

/// Return the profile of the authenticated user
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user", body = ApiResponse<AuthenticatedUser>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "auth"
)]
pub async fn get_me(user: AuthenticatedUser) -> Result<Json<ApiResponse<AuthenticatedUser>>> {
    Ok(Json(ApiResponse::success(Some(user), None, None)))
}

#[cfg(test)]
mod tests {
    use axum_test::TestServer;

    use crate::features::auth::routes;
    use crate::features::users::models::UserRole;
    use crate::shared::test_helpers::{test_user, with_auth_user};

    #[tokio::test]
    async fn me_returns_the_request_identity() {
        let user = test_user(UserRole::Citizen);
        let expected_id = user.id;
        let server =
            TestServer::new(with_auth_user(routes::protected_routes(), user)).unwrap();

        let response = server.get("/api/auth/me").await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["id"], expected_id.to_string());

        // No credential material in any response body
        let data = body["data"].as_object().unwrap();
        assert!(!data.contains_key("password"));
        assert!(!data.contains_key("password_hash"));
    }
}
