use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::features::reports::models::ReportCategory;

#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct CategoryCount {
    pub category: ReportCategory,
    pub count: i64,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct LocationCount {
    pub location: String,
    pub count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsightsDto {
    pub by_category: Vec<CategoryCount>,
    pub by_location: Vec<LocationCount>,
}
