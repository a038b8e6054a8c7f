use crate::{
    api::employee::EmployeeResponse,
    error::ApiError,
    model::attendance::{Attendance, AttendanceStatus, DateRange},
    repository::{RepoError, attendance as attendance_repo, employee as employee_repo},
    validation::{parse_date_param, validate_new_attendance},
};
use actix_web::{HttpResponse, web};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::SqlitePool;
use tracing::{debug, info, instrument};
use utoipa::{IntoParams, ToSchema};

pub const ATTENDANCE_CONFLICT: &str = "Attendance already marked for this date.";

#[derive(Deserialize, Serialize, ToSchema)]
pub struct CreateAttendance {
    #[schema(example = "2024-02-01", format = "date", value_type = String)]
    pub date: String,
    /// `present` or `absent`, any letter case
    #[schema(example = "present")]
    pub status: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AttendanceQuery {
    /// Earliest date to include (YYYY-MM-DD). Ignored when it does not parse.
    pub from: Option<String>,
    /// Latest date to include (YYYY-MM-DD). Ignored when it does not parse.
    pub to: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AttendanceResponse {
    #[schema(example = "1")]
    pub id: String,
    #[schema(example = "EMP-001")]
    pub employee_id: String,
    #[schema(example = "2024-02-01", format = "date", value_type = String)]
    pub date: NaiveDate,
    #[schema(example = "Present")]
    pub status: String,
    #[schema(example = "2024-02-01T09:00:00Z", format = "date-time", value_type = String)]
    pub created_at: DateTime<Utc>,
}

impl From<Attendance> for AttendanceResponse {
    fn from(attendance: Attendance) -> Self {
        Self {
            id: attendance.id.to_string(),
            employee_id: attendance.employee_id,
            date: attendance.date,
            status: attendance.status.label().to_string(),
            created_at: attendance.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AttendanceSummary {
    #[schema(example = 20)]
    pub total_records: i64,
    #[schema(example = 18)]
    pub present_days: i64,
    #[schema(example = 2)]
    pub absent_days: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AttendanceListResponse {
    pub employee: EmployeeResponse,
    pub attendance: Vec<AttendanceResponse>,
    pub summary: AttendanceSummary,
}

/// Attendance history for one employee
#[utoipa::path(
    get,
    path = "/api/employees/{employee_id}/attendance",
    params(
        ("employee_id" = String, Path, description = "Business employee ID"),
        AttendanceQuery
    ),
    responses(
        (status = 200, description = "Attendance records with summary", body = AttendanceListResponse),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "detail": "Not found."
        }))
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
    query: web::Query<AttendanceQuery>,
) -> Result<HttpResponse, ApiError> {
    let pool = pool.get_ref();
    let employee = employee_repo::find_by_business_id(pool, &path.into_inner()).await?;

    let range = DateRange::new(
        parse_date_param(query.from.as_deref()),
        parse_date_param(query.to.as_deref()),
    );
    debug!(employee_id = %employee.employee_id, range = ?range, "Listing attendance");

    let employee_id = employee.employee_id.as_str();
    let records = attendance_repo::list_for_employee(pool, employee_id, &range).await?;
    let summary = AttendanceSummary {
        total_records: attendance_repo::count_for_employee(pool, employee_id, &range).await?,
        present_days: attendance_repo::count_by_status(
            pool,
            Some(employee_id),
            AttendanceStatus::Present,
            &range,
        )
        .await?,
        absent_days: attendance_repo::count_by_status(
            pool,
            Some(employee_id),
            AttendanceStatus::Absent,
            &range,
        )
        .await?,
    };

    let attendance = records.into_iter().map(AttendanceResponse::from).collect();
    Ok(HttpResponse::Ok().json(AttendanceListResponse {
        employee: employee.into(),
        attendance,
        summary,
    }))
}

/// Mark attendance for a day
#[utoipa::path(
    post,
    path = "/api/employees/{employee_id}/attendance",
    params(
        ("employee_id" = String, Path, description = "Business employee ID")
    ),
    request_body = CreateAttendance,
    responses(
        (status = 201, description = "Attendance recorded", body = AttendanceResponse),
        (status = 400, description = "Invalid fields or already marked", body = Object, example = json!({
            "detail": "Attendance already marked for this date."
        })),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "detail": "Not found."
        }))
    ),
    tag = "Attendance"
)]
#[instrument(name = "mark_attendance", skip(pool, body))]
pub async fn mark_attendance(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let employee = employee_repo::find_by_business_id(pool.get_ref(), &path.into_inner()).await?;
    let data = validate_new_attendance(&body)?;

    let attendance = attendance_repo::create(pool.get_ref(), &employee.employee_id, data)
        .await
        .map_err(|e| match e {
            RepoError::Conflict => ApiError::Conflict(ATTENDANCE_CONFLICT),
            other => other.into(),
        })?;

    info!(
        employee_id = %attendance.employee_id,
        date = %attendance.date,
        status = %attendance.status,
        "Attendance marked"
    );
    Ok(HttpResponse::Created().json(AttendanceResponse::from(attendance)))
}

#[cfg(test)]
mod tests {
    use crate::testing::{test_app, test_config};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::{Value, json};

    macro_rules! post_json {
        ($app:expr, $uri:expr, $body:expr) => {
            test::call_service(
                &$app,
                test::TestRequest::post()
                    .uri($uri)
                    .set_json($body)
                    .to_request(),
            )
            .await
        };
    }

    fn employee(employee_id: &str, email: &str) -> Value {
        json!({
            "employee_id": employee_id,
            "full_name": "Grace Hopper",
            "email": email,
            "department": "Research"
        })
    }

    #[actix_web::test]
    async fn mark_returns_capitalized_status() {
        let app = test_app!(test_config());
        post_json!(app, "/api/employees/", employee("E1", "e1@x.com"));

        let resp = post_json!(
            app,
            "/api/employees/E1/attendance/",
            json!({"date": "2024-02-01", "status": "present"})
        );
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["employee_id"], "E1");
        assert_eq!(body["date"], "2024-02-01");
        assert_eq!(body["status"], "Present");
        assert!(body["id"].is_string());
    }

    #[actix_web::test]
    async fn mixed_case_status_is_accepted_and_unknown_rejected() {
        let app = test_app!(test_config());
        post_json!(app, "/api/employees/", employee("E1", "e1@x.com"));

        let resp = post_json!(
            app,
            "/api/employees/E1/attendance/",
            json!({"date": "2024-02-01", "status": "Present"})
        );
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "Present");

        let resp = post_json!(
            app,
            "/api/employees/E1/attendance/",
            json!({"date": "2024-02-02", "status": "on-leave"})
        );
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"status": ["Status must be 'present' or 'absent'."]}));
    }

    #[actix_web::test]
    async fn second_mark_for_same_day_conflicts() {
        let app = test_app!(test_config());
        post_json!(app, "/api/employees/", employee("E1", "e1@x.com"));
        post_json!(
            app,
            "/api/employees/E1/attendance/",
            json!({"date": "2024-02-01", "status": "present"})
        );

        let resp = post_json!(
            app,
            "/api/employees/E1/attendance/",
            json!({"date": "2024-02-01", "status": "absent"})
        );
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"detail": "Attendance already marked for this date."}));
    }

    #[actix_web::test]
    async fn unknown_employee_is_not_found() {
        let app = test_app!(test_config());

        let resp = post_json!(
            app,
            "/api/employees/ghost/attendance/",
            json!({"date": "2024-02-01", "status": "present"})
        );
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get()
            .uri("/api/employees/ghost/attendance/")
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn date_range_filters_listing_and_summary() {
        let app = test_app!(test_config());
        post_json!(app, "/api/employees/", employee("E1", "e1@x.com"));
        for (date, status) in [
            ("2024-01-01", "present"),
            ("2024-01-05", "absent"),
            ("2024-01-10", "present"),
        ] {
            post_json!(
                app,
                "/api/employees/E1/attendance/",
                json!({"date": date, "status": status})
            );
        }

        let req = test::TestRequest::get()
            .uri("/api/employees/E1/attendance/?from=2024-01-02&to=2024-01-09")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let dates: Vec<&str> = body["attendance"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["date"].as_str().unwrap())
            .collect();
        assert_eq!(dates, vec!["2024-01-05"]);
        assert_eq!(
            body["summary"],
            json!({"total_records": 1, "present_days": 0, "absent_days": 1})
        );
        assert_eq!(body["employee"]["employee_id"], "E1");
    }

    #[actix_web::test]
    async fn unparsable_dates_do_not_constrain() {
        let app = test_app!(test_config());
        post_json!(app, "/api/employees/", employee("E1", "e1@x.com"));
        for date in ["2024-01-01", "2024-01-05", "2024-01-10"] {
            post_json!(
                app,
                "/api/employees/E1/attendance/",
                json!({"date": date, "status": "present"})
            );
        }

        let req = test::TestRequest::get()
            .uri("/api/employees/E1/attendance/?from=yesterday&to=2024-01-05")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let dates: Vec<&str> = body["attendance"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["date"].as_str().unwrap())
            .collect();
        assert_eq!(dates, vec!["2024-01-05", "2024-01-01"]);
        assert_eq!(body["summary"]["total_records"], 2);
    }

    #[actix_web::test]
    async fn invalid_attendance_fields() {
        let app = test_app!(test_config());
        post_json!(app, "/api/employees/", employee("E1", "e1@x.com"));

        let resp = post_json!(app, "/api/employees/E1/attendance/", json!({"date": "2024-13-01"}));
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body["date"],
            json!(["Date has wrong format. Use one of these formats instead: YYYY-MM-DD."])
        );
        assert_eq!(body["status"], json!(["This field is required."]));
    }
}
