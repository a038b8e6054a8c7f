//! Attendance marks, one per employee per day.
//!
//! Rows reference employees by business id only. Nothing here checks that the employee
//! still exists; callers resolve the employee first when they need to.

use super::RepoResult;
use crate::model::attendance::{Attendance, AttendanceStatus, DateRange, NewAttendance};
use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::debug;

/// Predicates shared by listing and counting. `None` fields do not constrain.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttendanceFilter<'a> {
    pub employee_id: Option<&'a str>,
    pub status: Option<AttendanceStatus>,
    pub range: DateRange,
}

// Typed values for SQLx binding
#[derive(Debug, PartialEq)]
enum FilterValue<'a> {
    Str(&'a str),
    Date(NaiveDate),
}

impl<'a> AttendanceFilter<'a> {
    fn where_clause(&self) -> (String, Vec<FilterValue<'a>>) {
        let mut conditions = Vec::new();
        let mut bindings = Vec::new();

        if let Some(employee_id) = self.employee_id {
            conditions.push("employee_id = ?");
            bindings.push(FilterValue::Str(employee_id));
        }

        if let Some(status) = self.status {
            conditions.push("status = ?");
            bindings.push(FilterValue::Str(status.as_str()));
        }

        if let Some(from) = self.range.from {
            conditions.push("date >= ?");
            bindings.push(FilterValue::Date(from));
        }

        if let Some(to) = self.range.to {
            conditions.push("date <= ?");
            bindings.push(FilterValue::Date(to));
        }

        let clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        (clause, bindings)
    }
}

/// Most recent first: `date` descending, then creation descending.
pub async fn list_for_employee(
    pool: &SqlitePool,
    employee_id: &str,
    range: &DateRange,
) -> RepoResult<Vec<Attendance>> {
    let filter = AttendanceFilter {
        employee_id: Some(employee_id),
        status: None,
        range: *range,
    };
    let (where_clause, bindings) = filter.where_clause();

    let sql = format!(
        "SELECT id, employee_id, date, status, created_at FROM attendance {} ORDER BY date DESC, created_at DESC, id DESC",
        where_clause
    );
    debug!(sql = %sql, bindings = ?bindings, "Fetching attendance");

    let mut query = sqlx::query_as::<_, Attendance>(&sql);
    for value in bindings {
        query = match value {
            FilterValue::Str(v) => query.bind(v),
            FilterValue::Date(v) => query.bind(v),
        };
    }

    Ok(query.fetch_all(pool).await?)
}

/// A second mark for the same `(employee_id, date)` is rejected by the store as a conflict.
pub async fn create(
    pool: &SqlitePool,
    employee_id: &str,
    data: NewAttendance,
) -> RepoResult<Attendance> {
    let attendance = sqlx::query_as::<_, Attendance>(
        r#"
        INSERT INTO attendance (employee_id, date, status, created_at)
        VALUES (?, ?, ?, ?)
        RETURNING id, employee_id, date, status, created_at
        "#,
    )
    .bind(employee_id)
    .bind(data.date)
    .bind(data.status)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    debug!(id = attendance.id, employee_id, date = %attendance.date, "Attendance inserted");
    Ok(attendance)
}

pub async fn count(pool: &SqlitePool, filter: &AttendanceFilter<'_>) -> RepoResult<i64> {
    let (where_clause, bindings) = filter.where_clause();
    let sql = format!("SELECT COUNT(*) FROM attendance {}", where_clause);

    let mut query = sqlx::query_scalar::<_, i64>(&sql);
    for value in bindings {
        query = match value {
            FilterValue::Str(v) => query.bind(v),
            FilterValue::Date(v) => query.bind(v),
        };
    }

    Ok(query.fetch_one(pool).await?)
}

pub async fn count_for_employee(
    pool: &SqlitePool,
    employee_id: &str,
    range: &DateRange,
) -> RepoResult<i64> {
    count(
        pool,
        &AttendanceFilter {
            employee_id: Some(employee_id),
            status: None,
            range: *range,
        },
    )
    .await
}

/// `employee_id: None` counts across every employee, orphaned rows included.
pub async fn count_by_status(
    pool: &SqlitePool,
    employee_id: Option<&str>,
    status: AttendanceStatus,
    range: &DateRange,
) -> RepoResult<i64> {
    count(
        pool,
        &AttendanceFilter {
            employee_id,
            status: Some(status),
            range: *range,
        },
    )
    .await
}
