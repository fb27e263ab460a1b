use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::insights::dtos::{CategoryCount, InsightsDto, LocationCount};

/// Service for aggregate report statistics
pub struct InsightsService {
    pool: PgPool,
}

impl InsightsService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Counts of reports per category and per address, largest buckets
    /// first. Reports without an address land in the "Unknown" bucket.
    pub async fn summarize(&self) -> Result<InsightsDto> {
        let by_category = sqlx::query_as::<_, CategoryCount>(
            "SELECT category, COUNT(*) AS count \
             FROM reports \
             GROUP BY category \
             ORDER BY count DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to aggregate by category: {:?}", e);
            AppError::Database(e)
        })?;

        let by_location = sqlx::query_as::<_, LocationCount>(
            "SELECT COALESCE(NULLIF(btrim(address), ''), 'Unknown') AS location, \
                    COUNT(*) AS count \
             FROM reports \
             GROUP BY location \
             ORDER BY count DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to aggregate by location: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(InsightsDto {
            by_category,
            by_location,
        })
    }
}
