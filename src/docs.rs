use crate::model::employee::{CreateEmployee, Employee, UpdateEmployee};
use crate::model::passport::{CreatePassport, Passport, UpdatePassport};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Employee Registry API",
        version = "0.1.0",
        description = r#"
## Employee Registry

Keeps employee records together with the passport each employee owns.

### 🔹 Endpoints
- `GET /employee/{id}`: employees of company `id`, with passports
- `POST /employee/`: create an employee and its passport
- `PUT /employee/{id}`: change the supplied, non-empty fields of employee `id`
- `DELETE /employee/{id}`: remove employee `id` (the passport row stays)

### 📦 Response Format
- JSON bodies on every response, errors as `{"message": "..."}`
- Unsupported methods are answered with `400 Method <METHOD> not allowed`

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::employee::list_employees,
        crate::api::employee::create_employee,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee
    ),
    components(
        schemas(
            Employee,
            Passport,
            CreateEmployee,
            CreatePassport,
            UpdateEmployee,
            UpdatePassport
        )
    ),
    tags(
        (name = "Employee", description = "Employee management APIs"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_employee_paths() {
        let doc = ApiDoc::openapi();

        assert_eq!(doc.paths.paths.len(), 2);
        assert!(doc.paths.paths.contains_key("/employee/"));
        assert!(doc.paths.paths.contains_key("/employee/{id}"));
    }
}
