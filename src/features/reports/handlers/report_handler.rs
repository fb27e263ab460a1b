use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::reports::dtos::{
    CreateReportDto, ListReportsQuery, ReportResponseDto, UpdateReportStatusDto,
};
use crate::features::reports::models::{
    CreateReport, NearFilter, ReportCategory, ReportFilter, ReportPriority,
};
use crate::features::reports::policy;
use crate::features::reports::routes::ReportsState;
use crate::shared::constants::{
    is_image_mime_type_allowed, ALLOWED_IMAGE_MIME_TYPES, DEFAULT_NEAR_DISTANCE_METERS,
    MAX_IMAGE_SIZE,
};
use crate::shared::types::{ApiResponse, Meta};

/// Submit a new report
///
/// Accepts multipart/form-data with:
/// - `title`, `lat`, `lng`: required
/// - `description`, `category`, `priority`, `address`: optional
/// - `image`: optional photo, uploaded to object storage
///
/// The reporter is always the authenticated caller; there is no field for
/// filing on someone else's behalf.
#[utoipa::path(
    post,
    path = "/api/reports",
    tag = "reports",
    request_body(
        content = CreateReportDto,
        content_type = "multipart/form-data",
        description = "Report form with required title, lat, lng and an optional image",
    ),
    responses(
        (status = 201, description = "Report created", body = ApiResponse<ReportResponseDto>),
        (status = 400, description = "Missing or invalid fields"),
        (status = 401, description = "Authentication required"),
        (status = 502, description = "Image upload failed")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_report(
    user: AuthenticatedUser,
    State(state): State<ReportsState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<ReportResponseDto>>)> {
    let mut form = ReportForm::default();
    let mut image: Option<(Vec<u8>, String)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "title" => {
                form.title = Some(read_text(field, "title").await?);
            }
            "description" => {
                form.description = read_text(field, "description").await?;
            }
            "category" => {
                let text = read_text(field, "category").await?;
                form.category = text.parse().map_err(AppError::BadRequest)?;
            }
            "priority" => {
                let text = read_text(field, "priority").await?;
                form.priority = text.parse().map_err(AppError::BadRequest)?;
            }
            "lat" => {
                let text = read_text(field, "lat").await?;
                form.lat = Some(text.parse().map_err(|_| {
                    AppError::BadRequest("lat must be a number".to_string())
                })?);
            }
            "lng" => {
                let text = read_text(field, "lng").await?;
                form.lng = Some(text.parse().map_err(|_| {
                    AppError::BadRequest("lng must be a number".to_string())
                })?);
            }
            "address" => {
                let text = read_text(field, "address").await?;
                if !text.is_empty() {
                    form.address = Some(text);
                }
            }
            "image" => {
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());

                if !is_image_mime_type_allowed(&content_type) {
                    return Err(AppError::BadRequest(format!(
                        "Image type '{}' is not allowed. Allowed types: {}",
                        content_type,
                        ALLOWED_IMAGE_MIME_TYPES.join(", ")
                    )));
                }

                let data = field.bytes().await.map_err(|e| {
                    debug!("Failed to read image bytes: {}", e);
                    AppError::BadRequest(format!("Failed to read image data: {}", e))
                })?;

                if data.len() > MAX_IMAGE_SIZE {
                    return Err(AppError::BadRequest(format!(
                        "Image too large. Maximum size is {} MB",
                        MAX_IMAGE_SIZE / 1024 / 1024
                    )));
                }

                image = Some((data.to_vec(), content_type));
            }
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    // Validate before paying for the image upload
    let draft = form.into_create_report(&user)?;

    let image_url = match image {
        Some((data, content_type)) => Some(state.storage.upload_image(data, &content_type).await?),
        None => None,
    };

    let report = state
        .report_service
        .create(CreateReport { image_url, ..draft })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(ReportResponseDto::from_report(report, &user)),
            None,
            None,
        )),
    ))
}

/// List reports visible to the caller
///
/// Citizens get their own reports; staff and admins get all reports and may
/// narrow by status, category, priority, department, or proximity.
#[utoipa::path(
    get,
    path = "/api/reports",
    tag = "reports",
    params(ListReportsQuery),
    responses(
        (status = 200, description = "Reports, newest first", body = ApiResponse<Vec<ReportResponseDto>>),
        (status = 400, description = "Invalid query parameters"),
        (status = 401, description = "Authentication required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_reports(
    user: AuthenticatedUser,
    State(state): State<ReportsState>,
    Query(query): Query<ListReportsQuery>,
) -> Result<Json<ApiResponse<Vec<ReportResponseDto>>>> {
    let filter = build_filter(&user, query)?;

    let rows = state.report_service.list(&filter).await?;
    let total = rows.len() as i64;
    let reports = rows.into_iter().map(ReportResponseDto::from).collect();

    Ok(Json(ApiResponse::success(
        Some(reports),
        None,
        Some(Meta { total }),
    )))
}

/// Fetch a single report
#[utoipa::path(
    get,
    path = "/api/reports/{id}",
    tag = "reports",
    params(("id" = Uuid, Path, description = "Report ID")),
    responses(
        (status = 200, description = "The report", body = ApiResponse<ReportResponseDto>),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Not your report"),
        (status = 404, description = "Report not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_report(
    user: AuthenticatedUser,
    State(state): State<ReportsState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    // Existence is checked first, so a citizen probing someone else's report
    // id still learns whether it exists; the 403 leaks no content.
    let row = state.report_service.find_with_reporter(id).await?;

    if !policy::can_read(&user, row.reporter_id) {
        return Err(AppError::Forbidden(
            "You do not have access to this report".to_string(),
        ));
    }

    Ok(Json(ApiResponse::success(Some(row.into()), None, None)))
}

/// Update a report's triage state
///
/// Reporters may update their own reports; staff and admins may update any.
/// `assignedDepartment` only takes effect for admins and is otherwise
/// ignored.
#[utoipa::path(
    patch,
    path = "/api/reports/{id}/status",
    tag = "reports",
    params(("id" = Uuid, Path, description = "Report ID")),
    request_body = UpdateReportStatusDto,
    responses(
        (status = 200, description = "Updated report", body = ApiResponse<ReportResponseDto>),
        (status = 400, description = "No updatable field supplied"),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Not allowed to update this report"),
        (status = 404, description = "Report not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_report_status(
    user: AuthenticatedUser,
    State(state): State<ReportsState>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateReportStatusDto>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    if dto.status.is_none() && dto.assigned_department.is_none() {
        return Err(AppError::BadRequest(
            "status or assignedDepartment is required.".to_string(),
        ));
    }

    let report = state.report_service.find_by_id(id).await?;

    if !policy::can_update_status(&user, report.reporter_id) {
        return Err(AppError::Forbidden(
            "You are not allowed to update this report".to_string(),
        ));
    }

    let assigned_department = if policy::can_assign_department(&user) {
        dto.assigned_department
    } else {
        if dto.assigned_department.is_some() {
            debug!("Ignoring assignedDepartment from non-admin {}", user.id);
        }
        None
    };

    state
        .report_service
        .update_status(id, dto.status, assigned_department)
        .await?;

    let row = state.report_service.find_with_reporter(id).await?;
    Ok(Json(ApiResponse::success(Some(row.into()), None, None)))
}

/// Delete a report (admin only)
///
/// The stored image is removed best-effort after the row is gone; a storage
/// failure leaves an orphaned object, not a dangling report.
#[utoipa::path(
    delete,
    path = "/api/reports/{id}",
    tag = "reports",
    params(("id" = Uuid, Path, description = "Report ID")),
    responses(
        (status = 200, description = "Report deleted"),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Report not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_report(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<ReportsState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    let report = state.report_service.find_by_id(id).await?;
    state.report_service.delete(id).await?;

    if let Some(url) = report.image_url {
        match state.storage.extract_key_from_url(&url) {
            Some(key) => {
                if let Err(e) = state.storage.delete(&key).await {
                    warn!("Failed to delete image for report {}: {}", id, e);
                }
            }
            None => warn!("Report {} image URL not recognized: {}", id, url),
        }
    }

    Ok(Json(ApiResponse::success(
        None,
        Some("Report deleted".to_string()),
        None,
    )))
}

/// Fields collected from the multipart submission form
struct ReportForm {
    title: Option<String>,
    description: String,
    category: ReportCategory,
    priority: ReportPriority,
    lat: Option<f64>,
    lng: Option<f64>,
    address: Option<String>,
}

impl Default for ReportForm {
    fn default() -> Self {
        Self {
            title: None,
            description: String::new(),
            category: ReportCategory::Other,
            priority: ReportPriority::Low,
            lat: None,
            lng: None,
            address: None,
        }
    }
}

impl ReportForm {
    /// Check required fields and bind the report to the caller. The reporter
    /// is never client-supplied.
    fn into_create_report(self, reporter: &AuthenticatedUser) -> Result<CreateReport> {
        let title = self.title.filter(|t| !t.trim().is_empty());
        let (title, lat, lng) = match (title, self.lat, self.lng) {
            (Some(t), Some(lat), Some(lng)) => (t, lat, lng),
            _ => {
                return Err(AppError::BadRequest(
                    "title, lat, lng are required.".to_string(),
                ));
            }
        };

        validate_coordinates(lat, lng)?;

        Ok(CreateReport {
            title,
            description: self.description,
            category: self.category,
            priority: self.priority,
            image_url: None,
            lat,
            lon: lng,
            address: self.address,
            reporter_id: reporter.id,
        })
    }
}

async fn read_text(field: axum::extract::multipart::Field<'_>, name: &str) -> Result<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read {} field: {}", name, e)))
}

fn validate_coordinates(lat: f64, lng: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
        return Err(AppError::BadRequest(
            "Coordinates out of range".to_string(),
        ));
    }
    Ok(())
}

fn parse_near(query: &ListReportsQuery) -> Result<Option<NearFilter>> {
    match (query.near_lat, query.near_lng) {
        (Some(lat), Some(lng)) => {
            validate_coordinates(lat, lng)?;
            let max_distance_meters = query.max_distance.unwrap_or(DEFAULT_NEAR_DISTANCE_METERS);
            if max_distance_meters <= 0.0 {
                return Err(AppError::BadRequest(
                    "maxDistance must be positive".to_string(),
                ));
            }
            Ok(Some(NearFilter {
                lat,
                lon: lng,
                max_distance_meters,
            }))
        }
        (None, None) => Ok(None),
        _ => Err(AppError::BadRequest(
            "nearLat and nearLng must be provided together.".to_string(),
        )),
    }
}

/// Translate the query string into a storage filter, applying the caller's
/// visibility scope. The proximity filter works for every role; the triage
/// filters (status/category/priority/department) only take effect for staff
/// and admins.
fn build_filter(user: &AuthenticatedUser, query: ListReportsQuery) -> Result<ReportFilter> {
    let near = parse_near(&query)?;

    if let Some(reporter_id) = policy::list_scope(user) {
        return Ok(ReportFilter {
            reporter_id: Some(reporter_id),
            near,
            ..ReportFilter::default()
        });
    }

    Ok(ReportFilter {
        reporter_id: None,
        status: query.status,
        category: query.category,
        priority: query.priority,
        assigned_department: query.department,
        near,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reports::dtos::ListReportsQuery;
    use crate::features::users::models::UserRole;
    use crate::shared::test_helpers::test_user;

    fn filled_form() -> ReportForm {
        ReportForm {
            title: Some("Leaking hydrant".to_string()),
            lat: Some(12.97),
            lng: Some(77.59),
            ..ReportForm::default()
        }
    }

    #[test]
    fn created_reports_are_bound_to_the_caller() {
        let user = test_user(UserRole::Citizen);
        let draft = filled_form().into_create_report(&user).unwrap();

        assert_eq!(draft.reporter_id, user.id);
        assert_eq!(draft.title, "Leaking hydrant");
    }

    #[test]
    fn report_form_requires_title_and_coordinates() {
        let user = test_user(UserRole::Citizen);

        let mut form = filled_form();
        form.title = None;
        assert!(matches!(
            form.into_create_report(&user),
            Err(AppError::BadRequest(_))
        ));

        let mut form = filled_form();
        form.title = Some("   ".to_string());
        assert!(matches!(
            form.into_create_report(&user),
            Err(AppError::BadRequest(_))
        ));

        let mut form = filled_form();
        form.lng = None;
        assert!(matches!(
            form.into_create_report(&user),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn citizen_filter_is_scoped_and_ignores_triage_filters() {
        let citizen = test_user(UserRole::Citizen);
        let query = ListReportsQuery {
            status: Some(crate::features::reports::models::ReportStatus::Resolved),
            department: Some("roads".to_string()),
            ..ListReportsQuery::default()
        };

        let filter = build_filter(&citizen, query).unwrap();
        assert_eq!(filter.reporter_id, Some(citizen.id));
        assert!(filter.status.is_none());
        assert!(filter.assigned_department.is_none());
    }

    #[test]
    fn near_filter_applies_to_citizens_within_their_scope() {
        let citizen = test_user(UserRole::Citizen);
        let query = ListReportsQuery {
            near_lat: Some(12.9),
            near_lng: Some(77.6),
            max_distance: Some(500.0),
            ..ListReportsQuery::default()
        };

        let filter = build_filter(&citizen, query).unwrap();
        assert_eq!(filter.reporter_id, Some(citizen.id));
        let near = filter.near.unwrap();
        assert_eq!(near.max_distance_meters, 500.0);
    }

    #[test]
    fn near_filter_requires_both_coordinates() {
        let staff = test_user(UserRole::Staff);
        let query = ListReportsQuery {
            near_lat: Some(12.9),
            ..ListReportsQuery::default()
        };

        assert!(matches!(
            build_filter(&staff, query),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn near_filter_defaults_to_two_kilometers() {
        let admin = test_user(UserRole::Admin);
        let query = ListReportsQuery {
            near_lat: Some(12.9),
            near_lng: Some(77.6),
            ..ListReportsQuery::default()
        };

        let filter = build_filter(&admin, query).unwrap();
        let near = filter.near.unwrap();
        assert_eq!(near.max_distance_meters, DEFAULT_NEAR_DISTANCE_METERS);
    }

    #[test]
    fn out_of_range_coordinates_are_rejected() {
        assert!(validate_coordinates(91.0, 0.0).is_err());
        assert!(validate_coordinates(0.0, -181.0).is_err());
        assert!(validate_coordinates(-90.0, 180.0).is_ok());
    }
}
