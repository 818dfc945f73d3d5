//! Employee repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use till_core::error::{AppError, ErrorKind};
use till_core::result::AppResult;
use till_core::types::EmployeeId;
use till_entity::employee::{CreateEmployee, Employee};

use super::EmployeeRepository;

const EMPLOYEE_COLUMNS: &str =
    "employee_id, username, password_hash, name, trust_level, active, hired_at";

/// PostgreSQL-backed employee repository.
#[derive(Debug, Clone)]
pub struct PgEmployeeRepository {
    pool: PgPool,
}

impl PgEmployeeRepository {
    /// Create a new employee repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeRepository for PgEmployeeRepository {
    async fn find_by_id(&self, id: EmployeeId) -> AppResult<Option<Employee>> {
        sqlx::query_as::<_, Employee>(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE employee_id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find employee by id", e))
    }

    async fn find_active_by_username(&self, username: &str) -> AppResult<Option<Employee>> {
        sqlx::query_as::<_, Employee>(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE username = $1 AND active = TRUE LIMIT 1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                "Failed to find active employee by username",
                e,
            )
        })
    }

    async fn username_exists(&self, username: &str) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM employees WHERE username = $1)")
            .bind(username)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to check username", e)
            })
    }

    async fn create(&self, data: &CreateEmployee) -> AppResult<Employee> {
        sqlx::query_as::<_, Employee>(&format!(
            "INSERT INTO employees (employee_id, username, password_hash, name, trust_level) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {EMPLOYEE_COLUMNS}"
        ))
        .bind(EmployeeId::new())
        .bind(&data.username)
        .bind(&data.password_hash)
        .bind(&data.name)
        .bind(data.trust_level)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("employees_username_key") =>
            {
                AppError::conflict(format!("Username '{}' already exists", data.username))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create employee", e),
        })
    }

    async fn update_password(&self, id: EmployeeId, password_hash: &str) -> AppResult<bool> {
        let result = sqlx::query("UPDATE employees SET password_hash = $2 WHERE employee_id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update password", e)
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn deactivate(&self, id: EmployeeId) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE employees SET active = FALSE WHERE employee_id = $1 AND active = TRUE",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to deactivate employee", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_active(&self) -> AppResult<Vec<Employee>> {
        sqlx::query_as::<_, Employee>(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE active = TRUE ORDER BY username ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list employees", e))
    }
}
