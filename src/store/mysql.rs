use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, SubsecRound, Utc};
use sqlx::FromRow;
use tracing::debug;

use super::HrStore;
use crate::db::Database;
use crate::error::{StoreError, UniqueKey};
use crate::model::attendance::{
    Attendance, AttendanceRecord, AttendanceStatus, UNKNOWN_EMPLOYEE_NAME, UpsertOutcome,
};
use crate::model::employee::Employee;

#[derive(FromRow)]
struct AttendanceRow {
    employee_id: String,
    date: NaiveDate,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<AttendanceRow> for Attendance {
    type Error = StoreError;

    fn try_from(row: AttendanceRow) -> Result<Self, Self::Error> {
        Ok(Attendance {
            status: decode_status(&row.status)?,
            employee_id: row.employee_id,
            date: row.date,
            created_at: row.created_at,
        })
    }
}

#[derive(FromRow)]
struct AttendanceRecordRow {
    employee_id: String,
    employee_name: String,
    date: NaiveDate,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<AttendanceRecordRow> for AttendanceRecord {
    type Error = StoreError;

    fn try_from(row: AttendanceRecordRow) -> Result<Self, Self::Error> {
        Ok(AttendanceRecord {
            status: decode_status(&row.status)?,
            employee_id: row.employee_id,
            employee_name: row.employee_name,
            date: row.date,
            created_at: row.created_at,
        })
    }
}

fn decode_status(raw: &str) -> Result<AttendanceStatus, StoreError> {
    raw.parse()
        .map_err(|_| StoreError::Corrupt(format!("unknown attendance status {raw:?}")))
}

fn to_count(n: i64) -> u64 {
    u64::try_from(n).unwrap_or(0)
}

/// Unique violations name the key that fired, which tells us the column.
fn classify_employee_insert_error(e: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &e
        && db_err.is_unique_violation()
    {
        let key = if db_err.message().contains("uq_employees_email") {
            UniqueKey::Email
        } else {
            UniqueKey::EmployeeId
        };
        return StoreError::Duplicate(key);
    }
    e.into()
}

fn classify_attendance_upsert_error(e: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &e
        && db_err.is_foreign_key_violation()
    {
        return StoreError::MissingEmployee;
    }
    e.into()
}

/// `HrStore` over a MySQL database via sqlx.
pub struct MySqlStore {
    db: Database,
}

impl MySqlStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl HrStore for MySqlStore {
    async fn open(&self) -> Result<(), StoreError> {
        self.db.open().await
    }

    async fn close(&self) {
        self.db.close().await
    }

    fn is_open(&self) -> bool {
        self.db.is_open()
    }

    async fn count_employees(&self) -> Result<u64, StoreError> {
        let pool = self.db.pool()?;
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees")
            .fetch_one(&pool)
            .await?;
        Ok(to_count(total))
    }

    async fn insert_employee(&self, employee: &Employee) -> Result<(), StoreError> {
        let pool = self.db.pool()?;
        sqlx::query(
            r#"
            INSERT INTO employees (employee_id, full_name, email, department, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&employee.employee_id)
        .bind(&employee.full_name)
        .bind(&employee.email)
        .bind(&employee.department)
        .bind(employee.created_at)
        .execute(&pool)
        .await
        .map_err(classify_employee_insert_error)?;
        Ok(())
    }

    async fn find_employee(&self, employee_id: &str) -> Result<Option<Employee>, StoreError> {
        let pool = self.db.pool()?;
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            SELECT employee_id, full_name, email, department, created_at
            FROM employees
            WHERE employee_id = ?
            "#,
        )
        .bind(employee_id)
        .fetch_optional(&pool)
        .await?;
        Ok(employee)
    }

    async fn find_employee_by_email(&self, email: &str) -> Result<Option<Employee>, StoreError> {
        let pool = self.db.pool()?;
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            SELECT employee_id, full_name, email, department, created_at
            FROM employees
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&pool)
        .await?;
        Ok(employee)
    }

    async fn list_employees(&self) -> Result<Vec<Employee>, StoreError> {
        let pool = self.db.pool()?;
        let employees = sqlx::query_as::<_, Employee>(
            r#"
            SELECT employee_id, full_name, email, department, created_at
            FROM employees
            ORDER BY created_at DESC, employee_id DESC
            "#,
        )
        .fetch_all(&pool)
        .await?;
        Ok(employees)
    }

    async fn delete_employee(&self, employee_id: &str) -> Result<Option<u64>, StoreError> {
        let pool = self.db.pool()?;
        let mut tx = pool.begin().await?;

        let removed = sqlx::query("DELETE FROM attendance WHERE employee_id = ?")
            .bind(employee_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let deleted = sqlx::query("DELETE FROM employees WHERE employee_id = ?")
            .bind(employee_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        tx.commit().await?;
        debug!(employee_id, removed, "Deleted employee with attendance");
        Ok(Some(removed))
    }

    async fn upsert_attendance(
        &self,
        employee_id: &str,
        date: NaiveDate,
        status: AttendanceStatus,
        now: DateTime<Utc>,
    ) -> Result<(Attendance, UpsertOutcome), StoreError> {
        let pool = self.db.pool()?;
        // DATETIME(6) keeps microseconds; truncate so the read-back compares equal.
        let now = now.trunc_subsecs(6);

        sqlx::query(
            r#"
            INSERT INTO attendance (employee_id, `date`, status, created_at)
            VALUES (?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE status = VALUES(status)
            "#,
        )
        .bind(employee_id)
        .bind(date)
        .bind(status.as_ref())
        .bind(now)
        .execute(&pool)
        .await
        .map_err(classify_attendance_upsert_error)?;

        let row = sqlx::query_as::<_, AttendanceRow>(
            r#"
            SELECT employee_id, `date`, status, created_at
            FROM attendance
            WHERE employee_id = ? AND `date` = ?
            "#,
        )
        .bind(employee_id)
        .bind(date)
        .fetch_optional(&pool)
        .await?
        // A concurrent cascade delete can remove the row between the two statements.
        .ok_or(StoreError::MissingEmployee)?;

        let stored = Attendance::try_from(row)?;
        let outcome = if stored.created_at == now {
            UpsertOutcome::Inserted
        } else {
            UpsertOutcome::Updated
        };
        Ok((stored, outcome))
    }

    async fn list_attendance(&self) -> Result<Vec<AttendanceRecord>, StoreError> {
        let pool = self.db.pool()?;
        let rows = sqlx::query_as::<_, AttendanceRecordRow>(
            r#"
            SELECT
                a.employee_id,
                COALESCE(e.full_name, ?) AS employee_name,
                a.`date`,
                a.status,
                a.created_at
            FROM attendance a
            LEFT JOIN employees e ON e.employee_id = a.employee_id
            ORDER BY a.`date` DESC, a.created_at DESC
            "#,
        )
        .bind(UNKNOWN_EMPLOYEE_NAME)
        .fetch_all(&pool)
        .await?;

        rows.into_iter().map(AttendanceRecord::try_from).collect()
    }

    async fn list_attendance_for(&self, employee_id: &str) -> Result<Vec<Attendance>, StoreError> {
        let pool = self.db.pool()?;
        let rows = sqlx::query_as::<_, AttendanceRow>(
            r#"
            SELECT employee_id, `date`, status, created_at
            FROM attendance
            WHERE employee_id = ?
            ORDER BY `date` DESC
            "#,
        )
        .bind(employee_id)
        .fetch_all(&pool)
        .await?;

        rows.into_iter().map(Attendance::try_from).collect()
    }

    async fn count_attendance(&self) -> Result<u64, StoreError> {
        let pool = self.db.pool()?;
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM attendance")
            .fetch_one(&pool)
            .await?;
        Ok(to_count(total))
    }

    async fn count_attendance_with_status(
        &self,
        date: NaiveDate,
        status: AttendanceStatus,
    ) -> Result<u64, StoreError> {
        let pool = self.db.pool()?;
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM attendance WHERE `date` = ? AND status = ?",
        )
        .bind(date)
        .bind(status.as_ref())
        .fetch_one(&pool)
        .await?;
        Ok(to_count(total))
    }
}
