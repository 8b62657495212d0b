use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;
use crate::model::employee::NewEmployee;
use crate::models::MessageResponse;
use crate::service::EmployeeService;

#[derive(Deserialize, Serialize, ToSchema)]
pub struct CreateEmployee {
    #[schema(example = "Aarav Sharma", min_length = 1, max_length = 100)]
    pub full_name: String,
    #[schema(example = "aarav@company.com", format = "email")]
    pub email: String,
    #[schema(example = "IT", min_length = 1, max_length = 50)]
    pub department: String,
}

impl From<CreateEmployee> for NewEmployee {
    fn from(req: CreateEmployee) -> Self {
        NewEmployee {
            full_name: req.full_name,
            email: req.email,
            department: req.department,
        }
    }
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created successfully", body = crate::model::employee::Employee),
        (status = 400, description = "Invalid input", body = crate::error::ErrorBody, example = json!({
            "error": "validation_error",
            "message": "Invalid email format"
        })),
        (status = 409, description = "Email already registered", body = crate::error::ErrorBody, example = json!({
            "error": "conflict",
            "message": "Email already exists"
        })),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    service: web::Data<EmployeeService>,
    payload: web::Json<CreateEmployee>,
) -> Result<HttpResponse, AppError> {
    let employee = service.create(payload.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(employee))
}

/// List Employees
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "All employees, newest first", body = [crate::model::employee::Employee]),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    tag = "Employee"
)]
pub async fn list_employees(
    service: web::Data<EmployeeService>,
) -> Result<HttpResponse, AppError> {
    let employees = service.list().await?;
    Ok(HttpResponse::Ok().json(employees))
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID", example = "EMP001")
    ),
    responses(
        (status = 200, description = "Employee found", body = crate::model::employee::Employee),
        (status = 404, description = "Employee not found", body = crate::error::ErrorBody, example = json!({
            "error": "not_found",
            "message": "Employee EMP001 not found"
        })),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    service: web::Data<EmployeeService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let employee = service.get(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(employee))
}

/// Delete Employee and their attendance
#[utoipa::path(
    delete,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID", example = "EMP001")
    ),
    responses(
        (status = 200, description = "Successfully deleted", body = MessageResponse, example = json!({
            "message": "Employee EMP001 deleted successfully"
        })),
        (status = 404, description = "Employee not found", body = crate::error::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    service: web::Data<EmployeeService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let message = service.delete(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(MessageResponse { message }))
}
