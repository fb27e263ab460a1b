use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::features::auth::model::AuthenticatedUser;
use crate::features::reports::models::{
    Report, ReportCategory, ReportPriority, ReportStatus, ReportWithReporter,
};

/// Public identity of the person who filed a report
#[derive(Debug, Serialize, ToSchema)]
pub struct ReporterDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponseDto {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: ReportCategory,
    pub priority: ReportPriority,
    pub status: ReportStatus,
    pub image_url: Option<String>,
    pub lat: f64,
    pub lon: f64,
    pub address: Option<String>,
    pub reporter: ReporterDto,
    pub assigned_department: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ReportWithReporter> for ReportResponseDto {
    fn from(row: ReportWithReporter) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            category: row.category,
            priority: row.priority,
            status: row.status,
            image_url: row.image_url,
            lat: row.lat,
            lon: row.lon,
            address: row.address,
            reporter: ReporterDto {
                id: row.reporter_id,
                name: row.reporter_name,
                email: row.reporter_email,
            },
            assigned_department: row.assigned_department,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl ReportResponseDto {
    /// Build a response for a freshly created report, where the reporter is
    /// the authenticated caller and no join is needed.
    pub fn from_report(report: Report, reporter: &AuthenticatedUser) -> Self {
        Self {
            id: report.id,
            title: report.title,
            description: report.description,
            category: report.category,
            priority: report.priority,
            status: report.status,
            image_url: report.image_url,
            lat: report.lat,
            lon: report.lon,
            address: report.address,
            reporter: ReporterDto {
                id: reporter.id,
                name: reporter.name.clone(),
                email: reporter.email.clone(),
            },
            assigned_department: report.assigned_department,
            created_at: report.created_at,
            updated_at: report.updated_at,
        }
    }
}

/// Schema for the multipart report submission form.
///
/// This is for OpenAPI documentation only; the handler uses axum's
/// Multipart extractor directly.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateReportDto {
    pub title: String,
    pub lat: f64,
    pub lng: f64,
    pub description: Option<String>,
    pub category: Option<ReportCategory>,
    pub priority: Option<ReportPriority>,
    pub address: Option<String>,
    /// Photo of the issue
    #[schema(value_type = Option<String>, format = Binary)]
    pub image: Option<String>,
}

/// Query parameters for listing reports.
///
/// The near query needs all of `nearLat`, `nearLng`; `maxDistance` defaults
/// to 2000 meters when omitted.
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListReportsQuery {
    pub status: Option<ReportStatus>,
    pub category: Option<ReportCategory>,
    pub priority: Option<ReportPriority>,
    pub department: Option<String>,
    pub near_lat: Option<f64>,
    pub near_lng: Option<f64>,
    pub max_distance: Option<f64>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReportStatusDto {
    pub status: Option<ReportStatus>,
    pub assigned_department: Option<String>,
}
