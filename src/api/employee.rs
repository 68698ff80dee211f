use crate::{
    error::ApiError,
    model::employee::{CreateEmployee, Employee, UpdateEmployee},
    store::EmployeeStore,
};
use actix_web::{HttpRequest, HttpResponse, http::Method, web};
use serde_json::json;
use tracing::{debug, info};

/// Parses the path segment that follows `/employee/`.
pub fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::InvalidId(raw.to_string()))
}

/// List employees of a company
#[utoipa::path(
    get,
    path = "/employee/{id}",
    params(
        ("id", Path, description = "Company ID")
    ),
    responses(
        (status = 200, description = "Employees of the company, possibly empty", body = [Employee]),
        (status = 400, description = "Invalid company id", body = Object, example = json!({
            "message": "Invalid id: \"abc\""
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn list_employees(
    store: web::Data<dyn EmployeeStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let company_id = parse_id(&path)?;

    let employees = store.list_by_company(company_id).await?;
    debug!(company_id, count = employees.len(), "Listing employees");

    Ok(HttpResponse::Ok().json(employees))
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/employee/",
    request_body = CreateEmployee,
    responses(
        (status = 200, description = "Employee created successfully", body = Object, example = json!({
            "id": 4,
            "message": "Success! Id of new employee is 4"
        })),
        (status = 400, description = "Malformed JSON body"),
        (status = 500, description = "Internal server error", body = Object, example = json!({
            "message": "Something went wrong, Contact with system admin"
        }))
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    store: web::Data<dyn EmployeeStore>,
    payload: web::Json<CreateEmployee>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = store.insert(payload.into_inner()).await?;
    info!(employee_id, "Employee created");

    Ok(HttpResponse::Ok().json(json!({
        "id": employee_id,
        "message": format!("Success! Id of new employee is {}", employee_id)
    })))
}

/// Update Employee
///
/// The id is checked before the body is decoded, so an unknown id is a 404
/// whatever the body holds. Absent fields, empty strings and a zero company
/// id leave the stored value untouched. An empty body changes nothing.
#[utoipa::path(
    put,
    path = "/employee/{id}",
    params(
        ("id", Path, description = "Employee ID")
    ),
    request_body = UpdateEmployee,
    responses(
        (status = 200, description = "Employee updated successfully", body = Object, example = json!({
            "message": "Success!"
        })),
        (status = 400, description = "Invalid id or malformed JSON body"),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee 9 not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn update_employee(
    store: web::Data<dyn EmployeeStore>,
    path: web::Path<String>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let employee_id = parse_id(&path)?;

    if !store.exists(employee_id).await? {
        return Err(ApiError::NotFound(employee_id));
    }

    let changes = if body.iter().all(u8::is_ascii_whitespace) {
        UpdateEmployee::default()
    } else {
        serde_json::from_slice::<UpdateEmployee>(&body)
            .map_err(|e| ApiError::InvalidBody(e.to_string()))?
    };

    store.update(employee_id, changes).await?;
    info!(employee_id, "Employee updated");

    Ok(HttpResponse::Ok().json(json!({ "message": "Success!" })))
}

/// Delete Employee
///
/// The employee's passport row is kept. Unknown ids succeed as well.
#[utoipa::path(
    delete,
    path = "/employee/{id}",
    params(
        ("id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Successfully deleted", body = Object, example = json!({
            "message": "Success!"
        })),
        (status = 400, description = "Invalid employee id"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    store: web::Data<dyn EmployeeStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = parse_id(&path)?;

    store.delete(employee_id).await?;
    info!(employee_id, "Employee deleted");

    Ok(HttpResponse::Ok().json(json!({ "message": "Success!" })))
}

/// `/employee/` without an id: only POST is routed, the id-taking verbs
/// fail on the missing id.
pub async fn collection_fallback(req: HttpRequest) -> Result<HttpResponse, ApiError> {
    let method = req.method();
    if [Method::GET, Method::PUT, Method::DELETE].contains(method) {
        return Err(ApiError::InvalidId(String::new()));
    }
    Err(ApiError::MethodNotAllowed(method.to_string()))
}

pub async fn method_not_allowed(req: HttpRequest) -> Result<HttpResponse, ApiError> {
    Err(ApiError::MethodNotAllowed(req.method().to_string()))
}
