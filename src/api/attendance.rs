use actix_web::{HttpResponse, web};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;
use crate::model::attendance::{Attendance, AttendanceRecord, AttendanceStatus};
use crate::service::AttendanceService;

#[derive(Deserialize, Serialize, ToSchema)]
pub struct MarkAttendance {
    #[schema(example = "EMP001")]
    pub employee_id: String,
    #[schema(example = "2025-02-06", format = "date")]
    pub date: String,
    /// One of `Present`, `Absent`, `Half Day`, `Leave`
    #[schema(example = "Present")]
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AttendanceResponse {
    #[schema(example = "EMP001")]
    pub employee_id: String,
    #[schema(example = "2025-02-06", format = "date", value_type = String)]
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    #[schema(example = "2025-02-06T10:00:00Z", format = "date-time", value_type = String)]
    pub created_at: DateTime<Utc>,
}

impl From<Attendance> for AttendanceResponse {
    fn from(a: Attendance) -> Self {
        AttendanceResponse {
            employee_id: a.employee_id,
            date: a.date,
            status: a.status,
            created_at: a.created_at,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct AttendanceListResponse {
    pub records: Vec<AttendanceRecord>,
    #[schema(example = 1)]
    pub total: usize,
}

/// Mark attendance (one mark per employee per day; re-marking overwrites the status)
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = MarkAttendance,
    responses(
        (status = 201, description = "Attendance recorded", body = AttendanceResponse),
        (status = 400, description = "Invalid date or status", body = crate::error::ErrorBody, example = json!({
            "error": "validation_error",
            "message": "Invalid date format. Use YYYY-MM-DD"
        })),
        (status = 404, description = "Employee not found", body = crate::error::ErrorBody, example = json!({
            "error": "not_found",
            "message": "Employee EMP001 not found"
        })),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    tag = "Attendance"
)]
pub async fn mark_attendance(
    service: web::Data<AttendanceService>,
    payload: web::Json<MarkAttendance>,
) -> Result<HttpResponse, AppError> {
    let stored = service
        .mark(&payload.employee_id, &payload.date, &payload.status)
        .await?;
    Ok(HttpResponse::Created().json(AttendanceResponse::from(stored)))
}

/// List all attendance, joined with employee names
#[utoipa::path(
    get,
    path = "/api/attendance",
    responses(
        (status = 200, description = "Records sorted by date, newest first", body = AttendanceListResponse),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(
    service: web::Data<AttendanceService>,
) -> Result<HttpResponse, AppError> {
    let records = service.list_all().await?;
    Ok(HttpResponse::Ok().json(AttendanceListResponse {
        total: records.len(),
        records,
    }))
}

/// List one employee's attendance
#[utoipa::path(
    get,
    path = "/api/attendance/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID", example = "EMP001")
    ),
    responses(
        (status = 200, description = "Records sorted by date, newest first", body = [AttendanceResponse]),
        (status = 404, description = "Employee not found", body = crate::error::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    tag = "Attendance"
)]
pub async fn list_employee_attendance(
    service: web::Data<AttendanceService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let rows: Vec<AttendanceResponse> = service
        .list_by_employee(&path.into_inner())
        .await?
        .into_iter()
        .map(AttendanceResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(rows))
}
