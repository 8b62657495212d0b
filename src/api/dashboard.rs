use actix_web::{HttpResponse, web};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::AppError;
use crate::service::attendance::invalid_date;
use crate::service::{AttendanceService, EmployeeService};
use crate::utils::validators::parse_date;

#[derive(Deserialize, IntoParams)]
pub struct SummaryQuery {
    /// Day to count presence for, `YYYY-MM-DD`. Defaults to today (UTC).
    pub date: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DashboardSummary {
    #[schema(example = "2025-02-06", format = "date", value_type = String)]
    pub date: NaiveDate,
    #[schema(example = 12)]
    pub total_employees: u64,
    #[schema(example = 240)]
    pub total_attendance_records: u64,
    #[schema(example = 9)]
    pub present_on_date: u64,
}

/// Headline counts for a dashboard
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    params(SummaryQuery),
    responses(
        (status = 200, description = "Counts", body = DashboardSummary),
        (status = 400, description = "Invalid date", body = crate::error::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    tag = "Dashboard"
)]
pub async fn summary(
    employees: web::Data<EmployeeService>,
    attendance: web::Data<AttendanceService>,
    query: web::Query<SummaryQuery>,
) -> Result<HttpResponse, AppError> {
    let date = match query.date.as_deref() {
        Some(raw) => parse_date(raw).ok_or_else(invalid_date)?,
        None => Utc::now().date_naive(),
    };

    Ok(HttpResponse::Ok().json(DashboardSummary {
        date,
        total_employees: employees.count_total().await?,
        total_attendance_records: attendance.count_total().await?,
        present_on_date: attendance.count_present_on_date(date).await?,
    }))
}
