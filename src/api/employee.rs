use crate::{
    error::ApiError,
    model::employee::Employee,
    repository::{RepoError, employee as employee_repo},
    validation::validate_new_employee,
};
use actix_web::{HttpResponse, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::SqlitePool;
use tracing::{info, instrument};
use utoipa::ToSchema;

pub const EMPLOYEE_CONFLICT: &str = "Employee ID or email already exists.";

#[derive(Deserialize, Serialize, ToSchema)]
pub struct CreateEmployee {
    #[schema(example = "EMP-001", max_length = 32)]
    pub employee_id: String,
    #[schema(example = "John Doe", max_length = 120)]
    pub full_name: String,
    #[schema(example = "john.doe@company.com", format = "email")]
    pub email: String,
    #[schema(example = "Engineering", max_length = 80)]
    pub department: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": "1",
        "employee_id": "EMP-001",
        "full_name": "John Doe",
        "email": "john.doe@company.com",
        "department": "Engineering",
        "created_at": "2024-01-01T09:00:00Z"
    })
)]
pub struct EmployeeResponse {
    pub id: String,
    pub employee_id: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
    #[schema(example = "2024-01-01T09:00:00Z", format = "date-time", value_type = String)]
    pub created_at: DateTime<Utc>,
}

impl From<Employee> for EmployeeResponse {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id.to_string(),
            employee_id: employee.employee_id,
            full_name: employee.full_name,
            email: employee.email,
            department: employee.department,
            created_at: employee.created_at,
        }
    }
}

/// List employees, oldest first
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "All employees in creation order", body = [EmployeeResponse])
    ),
    tag = "Employee"
)]
pub async fn list_employees(pool: web::Data<SqlitePool>) -> Result<HttpResponse, ApiError> {
    let employees: Vec<EmployeeResponse> = employee_repo::list_all(pool.get_ref())
        .await?
        .into_iter()
        .map(EmployeeResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(employees))
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created", body = EmployeeResponse),
        (status = 400, description = "Invalid fields or duplicate employee", body = Object, example = json!({
            "detail": "Employee ID or email already exists."
        }))
    ),
    tag = "Employee"
)]
#[instrument(name = "create_employee", skip(pool, body))]
pub async fn create_employee(
    pool: web::Data<SqlitePool>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let data = validate_new_employee(&body)?;

    let employee = employee_repo::create(pool.get_ref(), data)
        .await
        .map_err(|e| match e {
            RepoError::Conflict => ApiError::Conflict(EMPLOYEE_CONFLICT),
            other => other.into(),
        })?;

    info!(employee_id = %employee.employee_id, "Employee created");
    Ok(HttpResponse::Created().json(EmployeeResponse::from(employee)))
}

/// Delete Employee
///
/// Attendance already recorded for the employee is kept.
#[utoipa::path(
    delete,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id" = String, Path, description = "Business employee ID")
    ),
    responses(
        (status = 204, description = "Employee deleted"),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "detail": "Not found."
        }))
    ),
    tag = "Employee"
)]
#[instrument(name = "delete_employee", skip(pool))]
pub async fn delete_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();

    employee_repo::delete_by_business_id(pool.get_ref(), &employee_id).await?;

    info!(employee_id = %employee_id, "Employee deleted");
    Ok(HttpResponse::NoContent().finish())
}
