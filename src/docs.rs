use crate::api::attendance::{AttendanceListResponse, AttendanceResponse, MarkAttendance};
use crate::api::dashboard::DashboardSummary;
use crate::api::employee::CreateEmployee;
use crate::error::ErrorBody;
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::employee::Employee;
use crate::models::MessageResponse;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRMS Lite API",
        version = "1.0.0",
        description = r#"
## HRMS Lite

A small Human Resource Management API for **employee records** and **daily attendance**.

### 🔹 Key Features
- **Employee Management**
  - Create, list, view, and delete employees (deleting removes their attendance)
- **Attendance Management**
  - One mark per employee per day: `Present`, `Absent`, `Half Day`, or `Leave`
  - Marking the same day again overwrites the status
- **Dashboard**
  - Headcount, attendance totals, and presence for a given day

### 📦 Response Format
- JSON responses
- Errors are `{"error": "<kind>", "message": "<text>"}`

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::employee::create_employee,
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::delete_employee,

        crate::api::attendance::mark_attendance,
        crate::api::attendance::list_attendance,
        crate::api::attendance::list_employee_attendance,

        crate::api::dashboard::summary
    ),
    components(
        schemas(
            CreateEmployee,
            Employee,
            MessageResponse,
            MarkAttendance,
            AttendanceStatus,
            AttendanceResponse,
            AttendanceRecord,
            AttendanceListResponse,
            DashboardSummary,
            ErrorBody
        )
    ),
    tags(
        (name = "Employee", description = "Employee management APIs"),
        (name = "Attendance", description = "Attendance management APIs"),
        (name = "Dashboard", description = "Reporting APIs"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in [
            "/api/employees",
            "/api/employees/{employee_id}",
            "/api/attendance",
            "/api/attendance/{employee_id}",
            "/api/dashboard/summary",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing {expected}"
            );
        }
    }
}
