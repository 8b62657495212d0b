use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Hash,
    Serialize,
    Deserialize,
    ToSchema,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum AttendanceStatus {
    Present,
    Absent,
    #[serde(rename = "Half Day")]
    #[strum(serialize = "Half Day")]
    HalfDay,
    Leave,
}

/// A stored attendance mark. `(employee_id, date)` is unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attendance {
    pub employee_id: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub created_at: DateTime<Utc>,
}

/// Attendance joined with the owning employee's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AttendanceRecord {
    #[schema(example = "EMP001")]
    pub employee_id: String,
    #[schema(example = "Aarav Sharma")]
    pub employee_name: String,
    #[schema(example = "2025-02-06", format = "date", value_type = String)]
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    #[schema(example = "2025-02-06T10:00:00Z", format = "date-time", value_type = String)]
    pub created_at: DateTime<Utc>,
}

/// Name reported for attendance rows whose employee no longer exists.
pub const UNKNOWN_EMPLOYEE_NAME: &str = "Unknown";

/// What an attendance upsert did to the stored row.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}
