use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use super::HrStore;
use crate::error::{StoreError, UniqueKey};
use crate::model::attendance::{
    Attendance, AttendanceRecord, AttendanceStatus, UNKNOWN_EMPLOYEE_NAME, UpsertOutcome,
};
use crate::model::employee::Employee;

#[derive(Default)]
struct State {
    open: bool,
    employees: HashMap<String, Employee>,
    attendance: HashMap<(String, NaiveDate), Attendance>,
}

/// Process-local store. Every operation takes one lock, so the attendance
/// upsert and the cascade delete are atomic.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, StoreError> {
        let guard = self.state.lock().map_err(|_| StoreError::Poisoned)?;
        if !guard.open {
            return Err(StoreError::NotConnected);
        }
        Ok(guard)
    }
}

#[async_trait]
impl HrStore for InMemoryStore {
    async fn open(&self) -> Result<(), StoreError> {
        let mut state = self.state.lock().map_err(|_| StoreError::Poisoned)?;
        state.open = true;
        Ok(())
    }

    async fn close(&self) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.open = false;
    }

    fn is_open(&self) -> bool {
        self.state.lock().map(|s| s.open).unwrap_or(false)
    }

    async fn count_employees(&self) -> Result<u64, StoreError> {
        Ok(self.lock()?.employees.len() as u64)
    }

    async fn insert_employee(&self, employee: &Employee) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        if state.employees.contains_key(&employee.employee_id) {
            return Err(StoreError::Duplicate(UniqueKey::EmployeeId));
        }
        if state.employees.values().any(|e| e.email == employee.email) {
            return Err(StoreError::Duplicate(UniqueKey::Email));
        }
        state
            .employees
            .insert(employee.employee_id.clone(), employee.clone());
        Ok(())
    }

    async fn find_employee(&self, employee_id: &str) -> Result<Option<Employee>, StoreError> {
        Ok(self.lock()?.employees.get(employee_id).cloned())
    }

    async fn find_employee_by_email(&self, email: &str) -> Result<Option<Employee>, StoreError> {
        Ok(self
            .lock()?
            .employees
            .values()
            .find(|e| e.email == email)
            .cloned())
    }

    async fn list_employees(&self) -> Result<Vec<Employee>, StoreError> {
        let mut employees: Vec<Employee> = self.lock()?.employees.values().cloned().collect();
        employees.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.employee_id.cmp(&a.employee_id))
        });
        Ok(employees)
    }

    async fn delete_employee(&self, employee_id: &str) -> Result<Option<u64>, StoreError> {
        let mut state = self.lock()?;
        if state.employees.remove(employee_id).is_none() {
            return Ok(None);
        }
        let before = state.attendance.len();
        state.attendance.retain(|(owner, _), _| owner != employee_id);
        Ok(Some((before - state.attendance.len()) as u64))
    }

    async fn upsert_attendance(
        &self,
        employee_id: &str,
        date: NaiveDate,
        status: AttendanceStatus,
        now: DateTime<Utc>,
    ) -> Result<(Attendance, UpsertOutcome), StoreError> {
        let mut state = self.lock()?;
        if !state.employees.contains_key(employee_id) {
            return Err(StoreError::MissingEmployee);
        }
        match state.attendance.entry((employee_id.to_string(), date)) {
            Entry::Occupied(mut slot) => {
                slot.get_mut().status = status;
                Ok((slot.get().clone(), UpsertOutcome::Updated))
            }
            Entry::Vacant(slot) => {
                let row = slot.insert(Attendance {
                    employee_id: employee_id.to_string(),
                    date,
                    status,
                    created_at: now,
                });
                Ok((row.clone(), UpsertOutcome::Inserted))
            }
        }
    }

    async fn list_attendance(&self) -> Result<Vec<AttendanceRecord>, StoreError> {
        let state = self.lock()?;
        let mut records: Vec<AttendanceRecord> = state
            .attendance
            .values()
            .map(|a| AttendanceRecord {
                employee_id: a.employee_id.clone(),
                employee_name: state
                    .employees
                    .get(&a.employee_id)
                    .map(|e| e.full_name.clone())
                    .unwrap_or_else(|| UNKNOWN_EMPLOYEE_NAME.to_string()),
                date: a.date,
                status: a.status,
                created_at: a.created_at,
            })
            .collect();
        records.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        Ok(records)
    }

    async fn list_attendance_for(&self, employee_id: &str) -> Result<Vec<Attendance>, StoreError> {
        let mut rows: Vec<Attendance> = self
            .lock()?
            .attendance
            .values()
            .filter(|a| a.employee_id == employee_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(rows)
    }

    async fn count_attendance(&self) -> Result<u64, StoreError> {
        Ok(self.lock()?.attendance.len() as u64)
    }

    async fn count_attendance_with_status(
        &self,
        date: NaiveDate,
        status: AttendanceStatus,
    ) -> Result<u64, StoreError> {
        Ok(self
            .lock()?
            .attendance
            .values()
            .filter(|a| a.date == date && a.status == status)
            .count() as u64)
    }
}
