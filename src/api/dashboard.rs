use crate::{
    error::ApiError,
    model::attendance::{AttendanceStatus, DateRange},
    repository::{
        attendance::{self as attendance_repo, AttendanceFilter},
        employee as employee_repo,
    },
};
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DashboardSummary {
    #[schema(example = 12)]
    pub employees: i64,
    #[schema(example = 240)]
    pub attendance_records: i64,
    #[schema(example = 221)]
    pub present_days: i64,
    #[schema(example = 19)]
    pub absent_days: i64,
}

/// Global counts across all employees
///
/// Attendance rows left behind by deleted employees are still counted.
#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "Dashboard summary", body = DashboardSummary)
    ),
    tag = "Dashboard"
)]
pub async fn dashboard_summary(pool: web::Data<SqlitePool>) -> Result<HttpResponse, ApiError> {
    let pool = pool.get_ref();
    let all_time = DateRange::default();

    let summary = DashboardSummary {
        employees: employee_repo::count(pool).await?,
        attendance_records: attendance_repo::count(pool, &AttendanceFilter::default()).await?,
        present_days: attendance_repo::count_by_status(
            pool,
            None,
            AttendanceStatus::Present,
            &all_time,
        )
        .await?,
        absent_days: attendance_repo::count_by_status(
            pool,
            None,
            AttendanceStatus::Absent,
            &all_time,
        )
        .await?,
    };

    Ok(HttpResponse::Ok().json(summary))
}
