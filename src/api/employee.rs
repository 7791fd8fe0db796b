use actix_web::{HttpResponse, Responder, error::ErrorInternalServerError, web};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;
use tracing::{debug, error, info, warn};
use utoipa::{IntoParams, ToSchema};

use crate::api::PageQuery;
use crate::model::employee::Employee;
use crate::utils::db_utils::{UpdateBuilder, execute_update, row_exists};
use crate::utils::serde_utils::double_option;

#[derive(Deserialize, ToSchema)]
pub struct CreateEmployee {
    #[schema(example = "Ada Lovelace")]
    pub name: String,

    #[schema(example = "123.456.789-00")]
    pub cpf: String,

    #[schema(example = "Engineer")]
    pub position: String,

    #[schema(example = "2024-01-01", value_type = String, format = "date")]
    pub admission_date: NaiveDate,

    #[schema(example = 1, nullable = true)]
    pub department_id: Option<i64>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateEmployee {
    pub name: Option<String>,
    pub cpf: Option<String>,
    pub position: Option<String>,

    #[schema(example = "2024-01-01", value_type = Option<String>, format = "date")]
    pub admission_date: Option<NaiveDate>,

    /// Explicit `null` detaches the employee from its department.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i64>, nullable = true)]
    pub department_id: Option<Option<i64>>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct EmployeeSearchQuery {
    pub name: Option<String>,
    pub position: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct AdmissionRangeQuery {
    #[param(example = "2024-01-01")]
    pub start_date: NaiveDate,
    #[param(example = "2024-12-31")]
    pub end_date: NaiveDate,
}

async fn fetch_employee(pool: &SqlitePool, id: i64) -> Result<Option<Employee>, sqlx::Error> {
    sqlx::query_as::<_, Employee>("SELECT * FROM employee WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({ "message": "Employee not found" }))
}

/// List all employees
#[utoipa::path(
    get,
    path = "/employees",
    responses(
        (status = 200, description = "All employees", body = [Employee]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn list_employees(pool: web::Data<SqlitePool>) -> actix_web::Result<impl Responder> {
    debug!("Listing all employees");

    let employees = sqlx::query_as::<_, Employee>("SELECT * FROM employee ORDER BY id")
        .fetch_all(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to list employees");
            ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Ok().json(employees))
}

/// Create an employee
#[utoipa::path(
    post,
    path = "/employees",
    request_body = CreateEmployee,
    responses(
        (status = 200, description = "Employee created", body = Employee),
        (status = 404, description = "Referenced department not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateEmployee>,
) -> actix_web::Result<impl Responder> {
    debug!(name = %payload.name, "Creating employee");

    if let Some(department_id) = payload.department_id {
        let exists = row_exists(pool.get_ref(), "department", department_id)
            .await
            .map_err(|e| {
                error!(error = %e, department_id, "Failed to check department");
                ErrorInternalServerError("Internal Server Error")
            })?;
        if !exists {
            warn!(department_id, "Department not found while creating employee");
            return Ok(HttpResponse::NotFound().json(json!({ "message": "Department not found" })));
        }
    }

    let result = sqlx::query(
        "INSERT INTO employee (name, cpf, position, admission_date, department_id)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&payload.name)
    .bind(&payload.cpf)
    .bind(&payload.position)
    .bind(payload.admission_date)
    .bind(payload.department_id)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to create employee");
        ErrorInternalServerError("Internal Server Error")
    })?;

    let id = result.last_insert_rowid();
    let employee = fetch_employee(pool.get_ref(), id).await.map_err(|e| {
        error!(error = %e, id, "Failed to fetch created employee");
        ErrorInternalServerError("Internal Server Error")
    })?;

    info!(id, "Employee created");
    Ok(HttpResponse::Ok().json(employee))
}

/// Get an employee by id
#[utoipa::path(
    get,
    path = "/employees/{id}",
    params(("id", description = "Employee ID")),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();
    debug!(id, "Fetching employee");

    let employee = fetch_employee(pool.get_ref(), id).await.map_err(|e| {
        error!(error = %e, id, "Failed to fetch employee");
        ErrorInternalServerError("Internal Server Error")
    })?;

    match employee {
        Some(employee) => Ok(HttpResponse::Ok().json(employee)),
        None => {
            warn!(id, "Employee not found");
            Ok(not_found())
        }
    }
}

/// Update an employee (partial)
#[utoipa::path(
    put,
    path = "/employees/{id}",
    params(("id", description = "Employee ID")),
    request_body = UpdateEmployee,
    responses(
        (status = 200, description = "Employee updated", body = Employee),
        (status = 404, description = "Employee or referenced department not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn update_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    body: web::Json<UpdateEmployee>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();
    debug!(id, "Updating employee");

    let mut builder = UpdateBuilder::new("employee");
    if let Some(name) = &body.name {
        builder.set("name", name.clone());
    }
    if let Some(cpf) = &body.cpf {
        builder.set("cpf", cpf.clone());
    }
    if let Some(position) = &body.position {
        builder.set("position", position.clone());
    }
    if let Some(admission_date) = body.admission_date {
        builder.set("admission_date", admission_date);
    }
    if let Some(department_id) = &body.department_id {
        if let Some(department_id) = department_id {
            let exists = row_exists(pool.get_ref(), "department", *department_id)
                .await
                .map_err(|e| {
                    error!(error = %e, department_id, "Failed to check department");
                    ErrorInternalServerError("Internal Server Error")
                })?;
            if !exists {
                warn!(department_id, "Department not found while updating employee");
                return Ok(
                    HttpResponse::NotFound().json(json!({ "message": "Department not found" }))
                );
            }
        }
        builder.set("department_id", *department_id);
    }

    let update = builder.build(id)?;
    let affected = execute_update(pool.get_ref(), update).await.map_err(|e| {
        error!(error = %e, id, "Failed to update employee");
        ErrorInternalServerError("Internal Server Error")
    })?;

    if affected == 0 {
        warn!(id, "Employee not found for update");
        return Ok(not_found());
    }

    let employee = fetch_employee(pool.get_ref(), id).await.map_err(|e| {
        error!(error = %e, id, "Failed to fetch updated employee");
        ErrorInternalServerError("Internal Server Error")
    })?;

    info!(id, "Employee updated");
    Ok(HttpResponse::Ok().json(employee))
}

/// Delete an employee
#[utoipa::path(
    delete,
    path = "/employees/{id}",
    params(("id", description = "Employee ID")),
    responses(
        (status = 200, description = "Employee deleted"),
        (status = 404, description = "Employee not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();
    debug!(id, "Deleting employee");

    let result = sqlx::query("DELETE FROM employee WHERE id = ?")
        .bind(id)
        .execute(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, id, "Failed to delete employee");
            ErrorInternalServerError("Internal Server Error")
        })?;

    if result.rows_affected() == 0 {
        warn!(id, "Employee not found for delete");
        return Ok(not_found());
    }

    info!(id, "Employee deleted");
    Ok(HttpResponse::Ok().json(json!({ "message": "Employee deleted successfully" })))
}

/// Search employees by partial name
#[utoipa::path(
    get,
    path = "/employees/search/{name}",
    params(("name", description = "Partial name, case-insensitive")),
    responses(
        (status = 200, description = "Matching employees", body = [Employee]),
        (status = 404, description = "No employee matched"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn search_employees_by_name(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let name = path.into_inner();
    debug!(%name, "Searching employees by name");

    let employees = sqlx::query_as::<_, Employee>(
        "SELECT * FROM employee WHERE name LIKE ? ORDER BY id",
    )
    .bind(format!("%{}%", name))
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, %name, "Failed to search employees by name");
        ErrorInternalServerError("Internal Server Error")
    })?;

    if employees.is_empty() {
        warn!(%name, "No employee matched name");
        return Ok(not_found());
    }

    Ok(HttpResponse::Ok().json(employees))
}

/// Search employees by partial position
#[utoipa::path(
    get,
    path = "/employees/position/{position}",
    params(("position", description = "Partial position, case-insensitive")),
    responses(
        (status = 200, description = "Matching employees", body = [Employee]),
        (status = 404, description = "No employee matched"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn search_employees_by_position(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let position = path.into_inner();
    debug!(%position, "Searching employees by position");

    let employees = sqlx::query_as::<_, Employee>(
        "SELECT * FROM employee WHERE position LIKE ? ORDER BY id",
    )
    .bind(format!("%{}%", position))
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, %position, "Failed to search employees by position");
        ErrorInternalServerError("Internal Server Error")
    })?;

    if employees.is_empty() {
        warn!(%position, "No employee matched position");
        return Ok(not_found());
    }

    Ok(HttpResponse::Ok().json(employees))
}

/// Search employees by name and/or position
#[utoipa::path(
    get,
    path = "/employees/search",
    params(EmployeeSearchQuery),
    responses(
        (status = 200, description = "Matching employees", body = [Employee]),
        (status = 404, description = "No employee matched"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn search_employees(
    pool: web::Data<SqlitePool>,
    query: web::Query<EmployeeSearchQuery>,
) -> actix_web::Result<impl Responder> {
    debug!(?query, "Searching employees");

    // Build the WHERE clause from whichever filters were supplied
    let mut conditions = Vec::new();
    let mut bindings = Vec::new();

    if let Some(name) = &query.name {
        conditions.push("name LIKE ?");
        bindings.push(format!("%{}%", name));
    }
    if let Some(position) = &query.position {
        conditions.push("position LIKE ?");
        bindings.push(format!("%{}%", position));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    let sql = format!("SELECT * FROM employee {} ORDER BY id", where_clause);
    let mut data_query = sqlx::query_as::<_, Employee>(&sql);
    for binding in &bindings {
        data_query = data_query.bind(binding.clone());
    }

    let employees = data_query.fetch_all(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, sql = %sql, "Failed to search employees");
        ErrorInternalServerError("Internal Server Error")
    })?;

    if employees.is_empty() {
        warn!(?query, "No employee matched search");
        return Ok(not_found());
    }

    Ok(HttpResponse::Ok().json(employees))
}

/// List employees of a department
#[utoipa::path(
    get,
    path = "/employees/department/{department_id}",
    params(("department_id", description = "Department ID")),
    responses(
        (status = 200, description = "Employees of the department", body = [Employee]),
        (status = 404, description = "No employee in the department"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn get_employees_by_department(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let department_id = path.into_inner();
    debug!(department_id, "Fetching employees by department");

    let employees = sqlx::query_as::<_, Employee>(
        "SELECT * FROM employee WHERE department_id = ? ORDER BY id",
    )
    .bind(department_id)
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, department_id, "Failed to fetch employees by department");
        ErrorInternalServerError("Internal Server Error")
    })?;

    if employees.is_empty() {
        warn!(department_id, "No employee in department");
        return Ok(not_found());
    }

    Ok(HttpResponse::Ok().json(employees))
}

/// List employees admitted within a date range (inclusive)
#[utoipa::path(
    get,
    path = "/employees/admission-date-range",
    params(AdmissionRangeQuery),
    responses(
        (status = 200, description = "Employees admitted in the range", body = [Employee]),
        (status = 404, description = "No employee admitted in the range"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn get_employees_by_admission_range(
    pool: web::Data<SqlitePool>,
    query: web::Query<AdmissionRangeQuery>,
) -> actix_web::Result<impl Responder> {
    debug!(?query, "Fetching employees by admission date range");

    let employees = sqlx::query_as::<_, Employee>(
        "SELECT * FROM employee WHERE admission_date BETWEEN ? AND ? ORDER BY id",
    )
    .bind(query.start_date)
    .bind(query.end_date)
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to fetch employees by admission range");
        ErrorInternalServerError("Internal Server Error")
    })?;

    if employees.is_empty() {
        warn!(?query, "No employee admitted in range");
        return Ok(not_found());
    }

    Ok(HttpResponse::Ok().json(employees))
}

/// Count employees
#[utoipa::path(
    get,
    path = "/employees/count",
    responses(
        (status = 200, description = "Employee count"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn count_employees(pool: web::Data<SqlitePool>) -> actix_web::Result<impl Responder> {
    debug!("Counting employees");

    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employee")
        .fetch_one(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to count employees");
            ErrorInternalServerError("Internal Server Error")
        })?;

    info!(count, "Employees counted");
    Ok(HttpResponse::Ok().json(json!({ "count": count })))
}

/// Paginated employee listing
#[utoipa::path(
    get,
    path = "/employees/paginated",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of employees", body = [Employee]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn get_employees_paginated(
    pool: web::Data<SqlitePool>,
    query: web::Query<PageQuery>,
) -> actix_web::Result<impl Responder> {
    debug!(page = query.page(), limit = query.limit(), "Paginating employees");

    let employees = sqlx::query_as::<_, Employee>(
        "SELECT * FROM employee ORDER BY id LIMIT ? OFFSET ?",
    )
    .bind(query.limit() as i64)
    .bind(query.offset())
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to paginate employees");
        ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(employees))
}
