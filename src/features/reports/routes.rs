use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch},
    Router,
};

use crate::features::reports::handlers::report_handler;
use crate::features::reports::services::ReportService;
use crate::modules::storage::MinIOClient;
use crate::shared::constants::MAX_IMAGE_SIZE;

/// Shared state for report handlers
#[derive(Clone)]
pub struct ReportsState {
    pub report_service: Arc<ReportService>,
    pub storage: Arc<MinIOClient>,
}

/// Create routes for the reports feature (requires auth middleware applied by caller)
pub fn routes(state: ReportsState) -> Router {
    Router::new()
        .route(
            "/api/reports",
            get(report_handler::list_reports)
                .post(report_handler::create_report)
                // Allow body size up to MAX_IMAGE_SIZE + buffer for multipart overhead
                .layer(DefaultBodyLimit::max(MAX_IMAGE_SIZE + 1024 * 1024)),
        )
        .route(
            "/api/reports/{id}",
            get(report_handler::get_report).delete(report_handler::delete_report),
        )
        .route(
            "/api/reports/{id}/status",
            patch(report_handler::update_report_status),
        )
        .with_state(state)
}
