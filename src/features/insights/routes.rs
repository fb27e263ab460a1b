use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::insights::handlers::insights_handler;
use crate::features::insights::services::InsightsService;

/// Create routes for the insights feature (requires auth middleware applied by caller)
pub fn routes(insights_service: Arc<InsightsService>) -> Router {
    Router::new()
        .route("/api/insights", get(insights_handler::get_insights))
        .with_state(insights_service)
}
