use crate::api::attendance::{
    AttendanceListResponse, AttendanceResponse, AttendanceSummary, CreateAttendance,
};
use crate::api::dashboard::DashboardSummary;
use crate::api::employee::{CreateEmployee, EmployeeResponse};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRMS Lite API",
        version = "0.1.0",
        description = r#"
## HRMS Lite

Employee records and daily attendance marks.

- **Employees**: list, create, delete. `employee_id` and `email` are unique, email is stored lowercase.
- **Attendance**: one `present`/`absent` mark per employee per day, with optional `from`/`to` filtering.
- **Dashboard**: global counts.

Validation errors come back as a map of field name to messages, conflicts and missing
records as `{"detail": "..."}`.
"#,
    ),
    paths(
        crate::api::health::health,

        crate::api::employee::list_employees,
        crate::api::employee::create_employee,
        crate::api::employee::delete_employee,

        crate::api::attendance::list_attendance,
        crate::api::attendance::mark_attendance,

        crate::api::dashboard::dashboard_summary
    ),
    components(
        schemas(
            CreateEmployee,
            EmployeeResponse,
            CreateAttendance,
            AttendanceResponse,
            AttendanceSummary,
            AttendanceListResponse,
            DashboardSummary
        )
    ),
    tags(
        (name = "Employee", description = "Employee management APIs"),
        (name = "Attendance", description = "Attendance management APIs"),
        (name = "Dashboard", description = "Summary counts"),
        (name = "Health", description = "Liveness check"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_endpoint_is_documented() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        for expected in [
            "/health",
            "/api/employees",
            "/api/employees/{employee_id}",
            "/api/employees/{employee_id}/attendance",
            "/api/dashboard",
        ] {
            assert!(paths.contains(&expected), "missing {expected}");
        }
    }
}
