use std::sync::RwLock;

use sqlx::MySqlPool;
use sqlx::mysql::MySqlPoolOptions;
use tracing::info;

use crate::error::StoreError;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS employees (
        id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
        employee_id VARCHAR(32) NOT NULL,
        full_name VARCHAR(100) NOT NULL,
        email VARCHAR(255) CHARACTER SET utf8mb4 COLLATE utf8mb4_bin NOT NULL,
        department VARCHAR(50) NOT NULL,
        created_at DATETIME(6) NOT NULL,
        UNIQUE KEY uq_employees_employee_id (employee_id),
        UNIQUE KEY uq_employees_email (email)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS attendance (
        id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
        employee_id VARCHAR(32) NOT NULL,
        `date` DATE NOT NULL,
        status VARCHAR(20) NOT NULL,
        created_at DATETIME(6) NOT NULL,
        UNIQUE KEY uq_attendance_employee_date (employee_id, `date`),
        CONSTRAINT fk_attendance_employee FOREIGN KEY (employee_id)
            REFERENCES employees (employee_id) ON DELETE CASCADE
    )
    "#,
];

/// Owns the MySQL pool between `open` and `close`.
pub struct Database {
    url: String,
    max_connections: u32,
    pool: RwLock<Option<MySqlPool>>,
}

impl Database {
    pub fn new(url: impl Into<String>, max_connections: u32) -> Self {
        Self {
            url: url.into(),
            max_connections,
            pool: RwLock::new(None),
        }
    }

    /// Connects and creates the tables and unique keys if they are missing.
    pub async fn open(&self) -> Result<(), StoreError> {
        if self.is_open() {
            return Ok(());
        }

        let pool = MySqlPoolOptions::new()
            .max_connections(self.max_connections)
            .connect(&self.url)
            .await?;

        for statement in SCHEMA {
            sqlx::query(statement).execute(&pool).await?;
        }

        let replaced = {
            let mut slot = self.pool.write().unwrap_or_else(|e| e.into_inner());
            slot.replace(pool)
        };
        if let Some(old) = replaced {
            old.close().await;
        }

        info!(max_connections = self.max_connections, "Connected to MySQL");
        Ok(())
    }

    pub async fn close(&self) {
        let taken = {
            let mut slot = self.pool.write().unwrap_or_else(|e| e.into_inner());
            slot.take()
        };
        if let Some(pool) = taken {
            pool.close().await;
            info!("Disconnected from MySQL");
        }
    }

    pub fn is_open(&self) -> bool {
        self.pool
            .read()
            .map(|slot| slot.is_some())
            .unwrap_or(false)
    }

    /// Handle to the live pool, or `NotConnected` before `open`/after `close`.
    pub fn pool(&self) -> Result<MySqlPool, StoreError> {
        self.pool
            .read()
            .map_err(|_| StoreError::Poisoned)?
            .clone()
            .ok_or(StoreError::NotConnected)
    }
}
