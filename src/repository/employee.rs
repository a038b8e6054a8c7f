//! Employee records keyed by their business `employee_id`.

use super::{RepoError, RepoResult};
use crate::model::employee::{Employee, NewEmployee};
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

/// Oldest first. `id` breaks ties between rows created within the same instant.
pub async fn list_all(pool: &SqlitePool) -> RepoResult<Vec<Employee>> {
    let employees = sqlx::query_as::<_, Employee>(
        r#"
        SELECT id, employee_id, full_name, email, department, created_at
        FROM employees
        ORDER BY created_at ASC, id ASC
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(employees)
}

/// Insert relies on the unique indexes, a duplicate `employee_id` or email comes back as
/// [`RepoError::Conflict`].
pub async fn create(pool: &SqlitePool, data: NewEmployee) -> RepoResult<Employee> {
    let email = data.email.to_lowercase();

    let employee = sqlx::query_as::<_, Employee>(
        r#"
        INSERT INTO employees (employee_id, full_name, email, department, created_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, employee_id, full_name, email, department, created_at
        "#,
    )
    .bind(&data.employee_id)
    .bind(&data.full_name)
    .bind(&email)
    .bind(&data.department)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    debug!(id = employee.id, employee_id = %employee.employee_id, "Employee inserted");
    Ok(employee)
}

pub async fn find_by_business_id(pool: &SqlitePool, employee_id: &str) -> RepoResult<Employee> {
    sqlx::query_as::<_, Employee>(
        r#"
        SELECT id, employee_id, full_name, email, department, created_at
        FROM employees
        WHERE employee_id = ?
        "#,
    )
    .bind(employee_id)
    .fetch_optional(pool)
    .await?
    .ok_or(RepoError::NotFound)
}

/// Attendance rows for the employee are left in place.
pub async fn delete_by_business_id(pool: &SqlitePool, employee_id: &str) -> RepoResult<()> {
    let result = sqlx::query("DELETE FROM employees WHERE employee_id = ?")
        .bind(employee_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound);
    }
    Ok(())
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees")
        .fetch_one(pool)
        .await?;
    Ok(total)
}
