use std::sync::Arc;

use axum::{routing::patch, Router};

use crate::features::users::handlers;
use crate::features::users::services::UserService;

/// Create routes for the users feature (requires auth middleware applied by caller)
pub fn routes(user_service: Arc<UserService>) -> Router {
    Router::new()
        .route(
            "/api/users/{id}/role",
            patch(handlers::update_user_role),
        )
        .with_state(user_service)
}
