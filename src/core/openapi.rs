use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth::{
    dtos as auth_dtos, handlers::auth_handler, model as auth_model,
};
use crate::features::insights::{dtos as insights_dtos, handlers::insights_handler};
use crate::features::reports::{
    dtos as reports_dtos, handlers::report_handler, models as reports_models,
};
use crate::features::users::{
    dtos as users_dtos, handlers::user_handler, models as users_models,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth_handler::signup,
        auth_handler::login,
        auth_handler::get_me,
        // Users
        user_handler::update_user_role,
        // Reports
        report_handler::create_report,
        report_handler::list_reports,
        report_handler::get_report,
        report_handler::update_report_status,
        report_handler::delete_report,
        // Insights
        insights_handler::get_insights,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Auth
            auth_model::AuthenticatedUser,
            auth_dtos::SignupRequestDto,
            auth_dtos::LoginRequestDto,
            auth_dtos::AuthResponseDto,
            ApiResponse<auth_dtos::AuthResponseDto>,
            ApiResponse<auth_model::AuthenticatedUser>,
            // Users
            users_models::UserRole,
            users_dtos::UserResponseDto,
            users_dtos::UpdateUserRoleDto,
            ApiResponse<users_dtos::UserResponseDto>,
            // Reports
            reports_models::ReportCategory,
            reports_models::ReportPriority,
            reports_models::ReportStatus,
            reports_dtos::CreateReportDto,
            reports_dtos::ReporterDto,
            reports_dtos::ReportResponseDto,
            reports_dtos::UpdateReportStatusDto,
            ApiResponse<reports_dtos::ReportResponseDto>,
            ApiResponse<Vec<reports_dtos::ReportResponseDto>>,
            // Insights
            insights_dtos::CategoryCount,
            insights_dtos::LocationCount,
            insights_dtos::InsightsDto,
            ApiResponse<insights_dtos::InsightsDto>,
        )
    ),
    tags(
        (name = "auth", description = "Authentication endpoints"),
        (name = "users", description = "User role management (admin only)"),
        (name = "reports", description = "Civic issue reports"),
        (name = "insights", description = "Aggregate report statistics (admin only)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "CivicSense API",
        version = "0.1.0",
        description = "API documentation for the civic issue reporting service",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
