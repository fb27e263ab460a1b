use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// Issue category enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "report_category", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReportCategory {
    Pothole,
    Streetlight,
    Garbage,
    Water,
    Electricity,
    Other,
}

impl std::str::FromStr for ReportCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pothole" => Ok(ReportCategory::Pothole),
            "streetlight" => Ok(ReportCategory::Streetlight),
            "garbage" => Ok(ReportCategory::Garbage),
            "water" => Ok(ReportCategory::Water),
            "electricity" => Ok(ReportCategory::Electricity),
            "other" => Ok(ReportCategory::Other),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "report_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReportPriority {
    Low,
    Medium,
    High,
    Critical,
}

impl std::str::FromStr for ReportPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(ReportPriority::Low),
            "medium" => Ok(ReportPriority::Medium),
            "high" => Ok(ReportPriority::High),
            "critical" => Ok(ReportPriority::Critical),
            _ => Err(format!("Unknown priority: {}", s)),
        }
    }
}

/// Triage lifecycle of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "report_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Pending,
    Acknowledged,
    InProgress,
    Resolved,
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportStatus::Pending => write!(f, "pending"),
            ReportStatus::Acknowledged => write!(f, "acknowledged"),
            ReportStatus::InProgress => write!(f, "in_progress"),
            ReportStatus::Resolved => write!(f, "resolved"),
        }
    }
}

/// Database model for a civic issue report
#[derive(Debug, Clone, FromRow)]
pub struct Report {
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
    pub reporter_id: Uuid,
    pub assigned_department: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A report row joined with the reporter's public identity
#[derive(Debug, Clone, FromRow)]
pub struct ReportWithReporter {
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
    pub reporter_id: Uuid,
    pub reporter_name: String,
    pub reporter_email: String,
    pub assigned_department: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct CreateReport {
    pub title: String,
    pub description: String,
    pub category: ReportCategory,
    pub priority: ReportPriority,
    pub image_url: Option<String>,
    pub lat: f64,
    pub lon: f64,
    pub address: Option<String>,
    pub reporter_id: Uuid,
}

/// Filters for listing reports.
///
/// `reporter_id` is the visibility scope set from the caller's role, not a
/// client-supplied filter. The near triple is all-or-nothing; the handler
/// rejects partial coordinates before this struct is built.
#[derive(Debug, Default)]
pub struct ReportFilter {
    pub reporter_id: Option<Uuid>,
    pub status: Option<ReportStatus>,
    pub category: Option<ReportCategory>,
    pub priority: Option<ReportPriority>,
    pub assigned_department: Option<String>,
    pub near: Option<NearFilter>,
}

#[derive(Debug, Clone, Copy)]
pub struct NearFilter {
    pub lat: f64,
    pub lon: f64,
    pub max_distance_meters: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_in_snake_case() {
        let json = serde_json::to_string(&ReportStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
        let status: ReportStatus = serde_json::from_str("\"acknowledged\"").unwrap();
        assert_eq!(status, ReportStatus::Acknowledged);
    }

    #[test]
    fn category_rejects_unknown_value() {
        assert!(serde_json::from_str::<ReportCategory>("\"sinkhole\"").is_err());
    }
}
