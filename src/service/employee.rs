use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument, warn};

use crate::error::{AppError, StoreError, UniqueKey};
use crate::model::employee::{Employee, NewEmployee};
use crate::store::HrStore;
use crate::utils::employee_id::generate_employee_id;
use crate::utils::validators::{
    DEPARTMENT_MAX_LEN, FULL_NAME_MAX_LEN, validate_email, validate_employee_id_format,
    validate_length,
};

/// Extra sequence numbers create tries beyond `count + 1`, for ids claimed by
/// concurrent creates.
const ID_ATTEMPT_SLACK: u64 = 16;

pub(crate) fn employee_not_found(employee_id: &str) -> AppError {
    AppError::NotFound(format!("Employee {employee_id} not found"))
}

fn email_conflict() -> AppError {
    AppError::Conflict("Email already exists".to_string())
}

#[derive(Clone)]
pub struct EmployeeService {
    store: Arc<dyn HrStore>,
}

impl EmployeeService {
    pub fn new(store: Arc<dyn HrStore>) -> Self {
        Self { store }
    }

    #[instrument(name = "employee_create", skip(self, new), fields(email = %new.email))]
    pub async fn create(&self, new: NewEmployee) -> Result<Employee, AppError> {
        if !validate_length(&new.full_name, FULL_NAME_MAX_LEN) {
            return Err(AppError::Validation(format!(
                "full_name must be between 1 and {FULL_NAME_MAX_LEN} characters"
            )));
        }
        if !validate_length(&new.department, DEPARTMENT_MAX_LEN) {
            return Err(AppError::Validation(format!(
                "department must be between 1 and {DEPARTMENT_MAX_LEN} characters"
            )));
        }
        if !validate_email(&new.email) {
            return Err(AppError::Validation("Invalid email format".to_string()));
        }

        if self.store.find_employee_by_email(&new.email).await?.is_some() {
            info!("Rejected create: email already registered");
            return Err(email_conflict());
        }

        let count = self.store.count_employees().await?;
        let created_at = Utc::now();

        // At most `count` employees hold ids above `count`, so one of the next
        // `count + 1` sequence numbers is free.
        let attempts = count + 1 + ID_ATTEMPT_SLACK;
        for attempt in 0..attempts {
            let employee_id = generate_employee_id(count + attempt);
            let employee = new.clone().into_employee(employee_id, created_at);

            match self.store.insert_employee(&employee).await {
                Ok(()) => {
                    info!(employee_id = %employee.employee_id, "Employee created");
                    return Ok(employee);
                }
                Err(StoreError::Duplicate(UniqueKey::EmployeeId)) => {
                    debug!(employee_id = %employee.employee_id, "Generated id taken, trying next");
                }
                Err(StoreError::Duplicate(UniqueKey::Email)) => return Err(email_conflict()),
                Err(e) => return Err(e.into()),
            }
        }

        warn!(count, "Could not find a free employee id");
        Err(AppError::Internal(StoreError::Duplicate(UniqueKey::EmployeeId)))
    }

    pub async fn list(&self) -> Result<Vec<Employee>, AppError> {
        Ok(self.store.list_employees().await?)
    }

    pub async fn get(&self, employee_id: &str) -> Result<Employee, AppError> {
        if !validate_employee_id_format(employee_id) {
            return Err(employee_not_found(employee_id));
        }
        self.store
            .find_employee(employee_id)
            .await?
            .ok_or_else(|| employee_not_found(employee_id))
    }

    /// Removes the employee and every attendance row that references it.
    #[instrument(name = "employee_delete", skip(self))]
    pub async fn delete(&self, employee_id: &str) -> Result<String, AppError> {
        if !validate_employee_id_format(employee_id) {
            return Err(employee_not_found(employee_id));
        }
        match self.store.delete_employee(employee_id).await? {
            Some(removed) => {
                info!(removed_attendance = removed, "Employee deleted");
                Ok(format!("Employee {employee_id} deleted successfully"))
            }
            None => Err(employee_not_found(employee_id)),
        }
    }

    pub async fn count_total(&self) -> Result<u64, AppError> {
        Ok(self.store.count_employees().await?)
    }
}
