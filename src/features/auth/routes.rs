use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::auth::handlers::auth_handler;
use crate::features::auth::services::AuthService;

/// Routes that require no authentication
pub fn public_routes(auth_service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/api/auth/signup", post(auth_handler::signup))
        .route("/api/auth/login", post(auth_handler::login))
        .with_state(auth_service)
}

/// Routes that require the auth middleware applied by the caller
pub fn protected_routes() -> Router {
    Router::new().route("/api/auth/me", get(auth_handler::get_me))
}
