use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{info, instrument};

use super::employee::employee_not_found;
use crate::error::{AppError, StoreError};
use crate::model::attendance::{Attendance, AttendanceRecord, AttendanceStatus};
use crate::store::HrStore;
use crate::utils::validators::{parse_attendance_status, parse_date, validate_employee_id_format};

pub(crate) fn invalid_date() -> AppError {
    AppError::Validation("Invalid date format. Use YYYY-MM-DD".to_string())
}

fn invalid_status() -> AppError {
    AppError::Validation(
        "Invalid attendance status. Must be: Present, Absent, Half Day, or Leave".to_string(),
    )
}

#[derive(Clone)]
pub struct AttendanceService {
    store: Arc<dyn HrStore>,
}

impl AttendanceService {
    pub fn new(store: Arc<dyn HrStore>) -> Self {
        Self { store }
    }

    /// Records `status` for the employee on `date`, replacing any earlier mark
    /// for the same day. Returns the row as persisted: on an overwrite its
    /// `created_at` is the one from the first mark.
    #[instrument(name = "attendance_mark", skip(self))]
    pub async fn mark(
        &self,
        employee_id: &str,
        date: &str,
        status: &str,
    ) -> Result<Attendance, AppError> {
        let date = parse_date(date).ok_or_else(invalid_date)?;
        let status = parse_attendance_status(status).ok_or_else(invalid_status)?;

        if !validate_employee_id_format(employee_id)
            || self.store.find_employee(employee_id).await?.is_none()
        {
            return Err(employee_not_found(employee_id));
        }

        match self
            .store
            .upsert_attendance(employee_id, date, status, Utc::now())
            .await
        {
            Ok((stored, outcome)) => {
                info!(?outcome, "Attendance marked");
                Ok(stored)
            }
            // The employee was deleted between the lookup and the write.
            Err(StoreError::MissingEmployee) => Err(employee_not_found(employee_id)),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn list_all(&self) -> Result<Vec<AttendanceRecord>, AppError> {
        Ok(self.store.list_attendance().await?)
    }

    pub async fn list_by_employee(&self, employee_id: &str) -> Result<Vec<Attendance>, AppError> {
        if !validate_employee_id_format(employee_id)
            || self.store.find_employee(employee_id).await?.is_none()
        {
            return Err(employee_not_found(employee_id));
        }
        Ok(self.store.list_attendance_for(employee_id).await?)
    }

    pub async fn count_present_on_date(&self, date: NaiveDate) -> Result<u64, AppError> {
        Ok(self
            .store
            .count_attendance_with_status(date, AttendanceStatus::Present)
            .await?)
    }

    pub async fn count_total(&self) -> Result<u64, AppError> {
        Ok(self.store.count_attendance().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::employee::NewEmployee;
    use crate::service::employee::EmployeeService;
    use crate::store::InMemoryStore;
    use crate::store::memory::tests::{at, day, employee, open_store};
    use futures::future::join_all;

    async fn services() -> (Arc<InMemoryStore>, EmployeeService, AttendanceService) {
        let store = open_store().await;
        (
            store.clone(),
            EmployeeService::new(store.clone()),
            AttendanceService::new(store),
        )
    }

    async fn hire(employees: &EmployeeService, name: &str, email: &str) -> String {
        employees
            .create(NewEmployee {
                full_name: name.to_string(),
                email: email.to_string(),
                department: "IT".to_string(),
            })
            .await
            .unwrap()
            .employee_id
    }

    #[actix_web::test]
    async fn end_to_end_mark_overwrite_and_delete() {
        let (_, employees, attendance) = services().await;
        let id = hire(&employees, "Aarav Sharma", "aarav@company.com").await;
        assert_eq!(id, "EMP001");

        let first = attendance
            .mark("EMP001", "2025-02-06", "Present")
            .await
            .unwrap();
        assert_eq!(first.status, AttendanceStatus::Present);

        let second = attendance
            .mark("EMP001", "2025-02-06", "Absent")
            .await
            .unwrap();
        assert_eq!(second.status, AttendanceStatus::Absent);
        assert_eq!(second.created_at, first.created_at);

        let rows = attendance.list_by_employee("EMP001").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status, AttendanceStatus::Absent);

        employees.delete("EMP001").await.unwrap();
        assert!(matches!(
            attendance.list_by_employee("EMP001").await,
            Err(AppError::NotFound(_))
        ));
        assert!(attendance.list_all().await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn bad_date_or_status_is_rejected_first() {
        let (_, _, attendance) = services().await;
        // Validation happens before the employee lookup.
        for (date, status) in [
            ("2025-02-30", "Present"),
            ("06/02/2025", "Present"),
            ("2025-02-06", "Sick"),
            ("2025-02-06", "present"),
        ] {
            let err = attendance.mark("EMP404", date, status).await.unwrap_err();
            assert!(matches!(err, AppError::Validation(_)), "{date} {status}");
        }
    }

    #[actix_web::test]
    async fn marking_unknown_employee_changes_nothing() {
        let (_, _, attendance) = services().await;
        let err = attendance
            .mark("EMP404", "2025-02-06", "Present")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == "Employee EMP404 not found"));
        assert_eq!(attendance.count_total().await.unwrap(), 0);
    }

    #[actix_web::test]
    async fn half_day_is_accepted() {
        let (_, employees, attendance) = services().await;
        let id = hire(&employees, "Aarav Sharma", "aarav@company.com").await;
        let row = attendance.mark(&id, "2025-02-06", "Half Day").await.unwrap();
        assert_eq!(row.status, AttendanceStatus::HalfDay);
    }

    #[actix_web::test]
    async fn concurrent_marks_converge_to_one_row() {
        let (_, employees, attendance) = services().await;
        let id = hire(&employees, "Aarav Sharma", "aarav@company.com").await;

        let statuses = ["Present", "Absent", "Half Day", "Leave"];
        let marks = (0..32).map(|i| attendance.mark(&id, "2025-02-06", statuses[i % 4]));
        for result in join_all(marks).await {
            result.unwrap();
        }

        let rows = attendance.list_by_employee(&id).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(attendance.count_total().await.unwrap(), 1);
    }

    #[actix_web::test]
    async fn list_all_orders_by_date_then_creation() {
        let (store, _, attendance) = services().await;
        for (id, email) in [("EMP001", "a@x.io"), ("EMP002", "b@x.io")] {
            store.insert_employee(&employee(id, email, at(1))).await.unwrap();
        }
        store
            .upsert_attendance("EMP002", day(4), AttendanceStatus::Leave, at(15))
            .await
            .unwrap();
        store
            .upsert_attendance("EMP001", day(6), AttendanceStatus::Present, at(8))
            .await
            .unwrap();
        store
            .upsert_attendance("EMP002", day(6), AttendanceStatus::Present, at(9))
            .await
            .unwrap();

        let records = attendance.list_all().await.unwrap();
        let order: Vec<(&str, NaiveDate)> = records
            .iter()
            .map(|r| (r.employee_id.as_str(), r.date))
            .collect();
        assert_eq!(
            order,
            vec![("EMP002", day(6)), ("EMP001", day(6)), ("EMP002", day(4))]
        );
        assert_eq!(records[0].employee_name, "Name EMP002");
    }

    #[actix_web::test]
    async fn list_by_employee_is_date_descending() {
        let (_, employees, attendance) = services().await;
        let id = hire(&employees, "Aarav Sharma", "aarav@company.com").await;
        for date in ["2025-02-04", "2025-02-06", "2025-02-05"] {
            attendance.mark(&id, date, "Present").await.unwrap();
        }
        let dates: Vec<NaiveDate> = attendance
            .list_by_employee(&id)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.date)
            .collect();
        assert_eq!(dates, vec![day(6), day(5), day(4)]);
    }

    #[actix_web::test]
    async fn present_count_only_counts_that_day() {
        let (_, employees, attendance) = services().await;
        let a = hire(&employees, "A", "a@company.com").await;
        let b = hire(&employees, "B", "b@company.com").await;
        attendance.mark(&a, "2025-02-06", "Present").await.unwrap();
        attendance.mark(&b, "2025-02-06", "Leave").await.unwrap();
        attendance.mark(&b, "2025-02-05", "Present").await.unwrap();

        assert_eq!(attendance.count_present_on_date(day(6)).await.unwrap(), 1);
        assert_eq!(attendance.count_present_on_date(day(5)).await.unwrap(), 1);
        assert_eq!(attendance.count_total().await.unwrap(), 3);
    }
}
