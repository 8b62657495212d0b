//! Storage boundary for employees and attendance.
//!
//! Services only ever talk to an [`HrStore`]. A store is an explicitly
//! constructed client with an `open`/`close` lifecycle; every data operation on
//! a store that is not open fails with [`StoreError::NotConnected`].
//!
//! Backends must enforce uniqueness of the employee id, the employee email, and
//! the attendance `(employee_id, date)` pair, and must make
//! [`HrStore::upsert_attendance`] atomic.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::error::StoreError;
use crate::model::attendance::{Attendance, AttendanceRecord, AttendanceStatus, UpsertOutcome};
use crate::model::employee::Employee;

pub mod memory;
pub mod mysql;

pub use memory::InMemoryStore;
pub use mysql::MySqlStore;

#[async_trait]
pub trait HrStore: Send + Sync {
    /// Opens the backend. Calling it on an open store is a no-op.
    async fn open(&self) -> Result<(), StoreError>;

    /// Releases the backend. Later operations fail with `NotConnected`.
    async fn close(&self);

    fn is_open(&self) -> bool;

    async fn count_employees(&self) -> Result<u64, StoreError>;

    /// Inserts a new employee.
    ///
    /// # Returns
    /// * `Err(StoreError::Duplicate(UniqueKey::EmployeeId))` - the id is taken
    /// * `Err(StoreError::Duplicate(UniqueKey::Email))` - the email is taken
    async fn insert_employee(&self, employee: &Employee) -> Result<(), StoreError>;

    async fn find_employee(&self, employee_id: &str) -> Result<Option<Employee>, StoreError>;

    async fn find_employee_by_email(&self, email: &str) -> Result<Option<Employee>, StoreError>;

    /// All employees, newest first.
    async fn list_employees(&self) -> Result<Vec<Employee>, StoreError>;

    /// Deletes an employee together with all of its attendance rows.
    ///
    /// # Returns
    /// * `Ok(None)` - no such employee, nothing changed
    /// * `Ok(Some(n))` - employee deleted along with `n` attendance rows
    async fn delete_employee(&self, employee_id: &str) -> Result<Option<u64>, StoreError>;

    /// Inserts or overwrites the status of the mark for `(employee_id, date)`.
    ///
    /// A new row gets `created_at = now`; an existing row keeps its
    /// `created_at` and only has `status` replaced. Returns the row as stored.
    ///
    /// # Returns
    /// * `Err(StoreError::MissingEmployee)` - the employee does not exist
    async fn upsert_attendance(
        &self,
        employee_id: &str,
        date: NaiveDate,
        status: AttendanceStatus,
        now: DateTime<Utc>,
    ) -> Result<(Attendance, UpsertOutcome), StoreError>;

    /// Every attendance row joined with its employee's name, ordered by date
    /// descending then `created_at` descending.
    async fn list_attendance(&self) -> Result<Vec<AttendanceRecord>, StoreError>;

    /// Rows for one employee, ordered by date descending.
    async fn list_attendance_for(&self, employee_id: &str) -> Result<Vec<Attendance>, StoreError>;

    async fn count_attendance(&self) -> Result<u64, StoreError>;

    async fn count_attendance_with_status(
        &self,
        date: NaiveDate,
        status: AttendanceStatus,
    ) -> Result<u64, StoreError>;
}
