use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::reports::models::{
    CreateReport, Report, ReportFilter, ReportStatus, ReportWithReporter,
};

const REPORT_COLUMNS: &str = "id, title, description, category, priority, status, image_url, \
     lat, lon, address, reporter_id, assigned_department, created_at, updated_at";

const JOINED_COLUMNS: &str = "r.id, r.title, r.description, r.category, r.priority, r.status, \
     r.image_url, r.lat, r.lon, r.address, r.reporter_id, \
     u.name AS reporter_name, u.email AS reporter_email, \
     r.assigned_department, r.created_at, r.updated_at";

/// Great-circle distance in meters between the bound point ($6, $7) and the
/// report's coordinates. The acos argument is clamped against floating point
/// drift just outside [-1, 1].
const DISTANCE_METERS: &str = "6371000.0 * acos(least(1.0, greatest(-1.0, \
     cos(radians($6)) * cos(radians(r.lat)) * cos(radians(r.lon) - radians($7)) \
     + sin(radians($6)) * sin(radians(r.lat)))))";

/// Service for report storage and retrieval
pub struct ReportService {
    pool: PgPool,
}

impl ReportService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, data: CreateReport) -> Result<Report> {
        let sql = format!(
            "INSERT INTO reports \
             (title, description, category, priority, image_url, lat, lon, address, reporter_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {REPORT_COLUMNS}"
        );

        let report = sqlx::query_as::<_, Report>(&sql)
            .bind(&data.title)
            .bind(&data.description)
            .bind(data.category)
            .bind(data.priority)
            .bind(&data.image_url)
            .bind(data.lat)
            .bind(data.lon)
            .bind(&data.address)
            .bind(data.reporter_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create report: {:?}", e);
                AppError::Database(e)
            })?;

        tracing::info!(
            "Created report: {} ({:?} by {})",
            report.id,
            report.category,
            report.reporter_id
        );
        Ok(report)
    }

    /// List reports newest first, applying the visibility scope and any
    /// optional filters. Unset filters are bound as NULL and coalesce away
    /// in the predicate.
    pub async fn list(&self, filter: &ReportFilter) -> Result<Vec<ReportWithReporter>> {
        let sql = format!(
            "SELECT {JOINED_COLUMNS} \
             FROM reports r \
             JOIN users u ON u.id = r.reporter_id \
             WHERE ($1::uuid IS NULL OR r.reporter_id = $1) \
               AND ($2::report_status IS NULL OR r.status = $2) \
               AND ($3::report_category IS NULL OR r.category = $3) \
               AND ($4::report_priority IS NULL OR r.priority = $4) \
               AND ($5::text IS NULL OR r.assigned_department = $5) \
               AND ($6::double precision IS NULL OR {DISTANCE_METERS} <= $8) \
             ORDER BY r.created_at DESC"
        );

        let (near_lat, near_lon, max_distance) = match filter.near {
            Some(near) => (
                Some(near.lat),
                Some(near.lon),
                Some(near.max_distance_meters),
            ),
            None => (None, None, None),
        };

        sqlx::query_as::<_, ReportWithReporter>(&sql)
            .bind(filter.reporter_id)
            .bind(filter.status)
            .bind(filter.category)
            .bind(filter.priority)
            .bind(&filter.assigned_department)
            .bind(near_lat)
            .bind(near_lon)
            .bind(max_distance)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list reports: {:?}", e);
                AppError::Database(e)
            })
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Report> {
        let sql = format!("SELECT {REPORT_COLUMNS} FROM reports WHERE id = $1");

        sqlx::query_as::<_, Report>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch report: {:?}", e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))
    }

    pub async fn find_with_reporter(&self, id: Uuid) -> Result<ReportWithReporter> {
        let sql = format!(
            "SELECT {JOINED_COLUMNS} \
             FROM reports r \
             JOIN users u ON u.id = r.reporter_id \
             WHERE r.id = $1"
        );

        sqlx::query_as::<_, ReportWithReporter>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch report: {:?}", e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))
    }

    /// Apply a partial triage update. Fields left unset keep their current
    /// values via COALESCE.
    pub async fn update_status(
        &self,
        id: Uuid,
        status: Option<ReportStatus>,
        assigned_department: Option<String>,
    ) -> Result<Report> {
        let sql = format!(
            "UPDATE reports \
             SET status = COALESCE($2, status), \
                 assigned_department = COALESCE($3, assigned_department), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {REPORT_COLUMNS}"
        );

        let report = sqlx::query_as::<_, Report>(&sql)
            .bind(id)
            .bind(status)
            .bind(&assigned_department)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update report: {:?}", e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))?;

        tracing::info!("Updated report {}: status {}", report.id, report.status);
        Ok(report)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM reports WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete report: {:?}", e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Report {} not found", id)));
        }

        tracing::info!("Deleted report: {}", id);
        Ok(())
    }
}
