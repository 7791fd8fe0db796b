use actix_web::{
    HttpResponse, Responder,
    error::{ErrorBadRequest, ErrorInternalServerError},
    web,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::SqlitePool;
use tracing::{debug, error, info, warn};
use utoipa::{IntoParams, ToSchema};

use crate::api::PageQuery;
use crate::model::{department::Department, employee::Employee};
use crate::utils::db_utils::{UpdateBuilder, execute_update, row_exists};
use crate::utils::serde_utils::double_option;

#[derive(Deserialize, ToSchema)]
pub struct CreateDepartment {
    #[schema(example = "Engineering")]
    pub name: String,

    #[schema(example = "HQ")]
    pub location: String,

    #[schema(example = "Product engineering", nullable = true)]
    pub description: Option<String>,

    #[schema(example = "4002", nullable = true)]
    pub extension: Option<String>,

    /// Optional manager to attach; must reference an existing employee.
    #[schema(example = 1, nullable = true)]
    pub manager_id: Option<i64>,

    /// Optional employees to attach; every id must reference an existing
    /// employee or the whole creation fails.
    #[schema(example = json!([1, 2]), nullable = true)]
    pub employee_ids: Option<Vec<i64>>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateDepartment {
    pub name: Option<String>,
    pub location: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable = true)]
    pub description: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable = true)]
    pub extension: Option<Option<String>>,

    /// Explicit `null` clears the manager.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i64>, nullable = true)]
    pub manager_id: Option<Option<i64>>,

    /// Replaces the department's employee set wholesale when supplied.
    #[schema(value_type = Option<Vec<i64>>, nullable = true)]
    pub employee_ids: Option<Vec<i64>>,
}

/// Eager-loaded read shape: manager and employees resolved per row.
#[derive(Serialize, ToSchema)]
pub struct DepartmentRead {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub description: Option<String>,
    pub extension: Option<String>,
    pub manager: Option<Employee>,
    pub employees: Vec<Employee>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct EmployeeIdsQuery {
    /// Comma-separated employee ids, e.g. `1,2,3`
    pub employee_ids: String,
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({ "message": "Department not found" }))
}

fn employee_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({ "message": "Employee not found" }))
}

async fn fetch_department(pool: &SqlitePool, id: i64) -> Result<Option<Department>, sqlx::Error> {
    sqlx::query_as::<_, Department>("SELECT * FROM department WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

async fn load_read(pool: &SqlitePool, row: Department) -> Result<DepartmentRead, sqlx::Error> {
    let manager = match row.manager_id {
        Some(manager_id) => {
            sqlx::query_as::<_, Employee>("SELECT * FROM employee WHERE id = ?")
                .bind(manager_id)
                .fetch_optional(pool)
                .await?
        }
        None => None,
    };

    let employees = sqlx::query_as::<_, Employee>(
        "SELECT * FROM employee WHERE department_id = ? ORDER BY id",
    )
    .bind(row.id)
    .fetch_all(pool)
    .await?;

    Ok(DepartmentRead {
        id: row.id,
        name: row.name,
        location: row.location,
        description: row.description,
        extension: row.extension,
        manager,
        employees,
    })
}

async fn load_read_all(
    pool: &SqlitePool,
    rows: Vec<Department>,
) -> Result<Vec<DepartmentRead>, sqlx::Error> {
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        out.push(load_read(pool, row).await?);
    }
    Ok(out)
}

/// List all departments with manager and employees eagerly loaded
#[utoipa::path(
    get,
    path = "/departments",
    responses(
        (status = 200, description = "All departments", body = [DepartmentRead]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Department"
)]
pub async fn list_departments(pool: web::Data<SqlitePool>) -> actix_web::Result<impl Responder> {
    debug!("Listing all departments");

    let rows = sqlx::query_as::<_, Department>("SELECT * FROM department ORDER BY id")
        .fetch_all(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to list departments");
            ErrorInternalServerError("Internal Server Error")
        })?;

    let departments = load_read_all(pool.get_ref(), rows).await.map_err(|e| {
        error!(error = %e, "Failed to load department relations");
        ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(departments))
}

/// Create a department, optionally attaching a manager and employees
#[utoipa::path(
    post,
    path = "/departments",
    request_body = CreateDepartment,
    responses(
        (status = 200, description = "Department created", body = DepartmentRead),
        (status = 404, description = "Referenced employee not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Department"
)]
pub async fn create_department(
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateDepartment>,
) -> actix_web::Result<impl Responder> {
    debug!(name = %payload.name, "Creating department");

    let mut tx = pool.begin().await.map_err(|e| {
        error!(error = %e, "Failed to open transaction");
        ErrorInternalServerError("Internal Server Error")
    })?;

    // Every referenced employee must exist before anything is written;
    // an early return drops the transaction and rolls everything back.
    if let Some(manager_id) = payload.manager_id {
        let exists = row_exists(&mut *tx, "employee", manager_id).await.map_err(|e| {
            error!(error = %e, manager_id, "Failed to check manager");
            ErrorInternalServerError("Internal Server Error")
        })?;
        if !exists {
            warn!(manager_id, "Manager not found while creating department");
            return Ok(employee_not_found());
        }
    }

    if let Some(employee_ids) = &payload.employee_ids {
        for employee_id in employee_ids {
            let exists = row_exists(&mut *tx, "employee", *employee_id).await.map_err(|e| {
                error!(error = %e, employee_id, "Failed to check employee");
                ErrorInternalServerError("Internal Server Error")
            })?;
            if !exists {
                warn!(employee_id, "Employee not found while creating department");
                return Ok(employee_not_found());
            }
        }
    }

    let result = sqlx::query(
        "INSERT INTO department (name, location, description, extension, manager_id)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&payload.name)
    .bind(&payload.location)
    .bind(&payload.description)
    .bind(&payload.extension)
    .bind(payload.manager_id)
    .execute(&mut *tx)
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to create department");
        ErrorInternalServerError("Internal Server Error")
    })?;

    let id = result.last_insert_rowid();

    if let Some(employee_ids) = &payload.employee_ids {
        if !employee_ids.is_empty() {
            assign_employees(&mut tx, id, employee_ids).await.map_err(|e| {
                error!(error = %e, id, "Failed to attach employees");
                ErrorInternalServerError("Internal Server Error")
            })?;
        }
    }

    tx.commit().await.map_err(|e| {
        error!(error = %e, "Failed to commit department creation");
        ErrorInternalServerError("Internal Server Error")
    })?;

    let department = read_by_id(pool.get_ref(), id).await?;
    info!(id, "Department created");
    Ok(HttpResponse::Ok().json(department))
}

async fn assign_employees(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    department_id: i64,
    employee_ids: &[i64],
) -> Result<(), sqlx::Error> {
    let placeholders = vec!["?"; employee_ids.len()].join(", ");
    let sql = format!(
        "UPDATE employee SET department_id = ? WHERE id IN ({})",
        placeholders
    );

    let mut query = sqlx::query(&sql).bind(department_id);
    for employee_id in employee_ids {
        query = query.bind(*employee_id);
    }
    query.execute(&mut **tx).await?;
    Ok(())
}

async fn read_by_id(pool: &SqlitePool, id: i64) -> actix_web::Result<DepartmentRead> {
    let row = fetch_department(pool, id)
        .await
        .map_err(|e| {
            error!(error = %e, id, "Failed to fetch department");
            ErrorInternalServerError("Internal Server Error")
        })?
        .ok_or_else(|| actix_web::error::ErrorNotFound("Department not found"))?;

    load_read(pool, row).await.map_err(|e| {
        error!(error = %e, id, "Failed to load department relations");
        ErrorInternalServerError("Internal Server Error")
    })
}

/// Get a department by id, eagerly loaded
#[utoipa::path(
    get,
    path = "/departments/{id}",
    params(("id", description = "Department ID")),
    responses(
        (status = 200, description = "Department found", body = DepartmentRead),
        (status = 404, description = "Department not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Department"
)]
pub async fn get_department(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();
    debug!(id, "Fetching department");

    let row = fetch_department(pool.get_ref(), id).await.map_err(|e| {
        error!(error = %e, id, "Failed to fetch department");
        ErrorInternalServerError("Internal Server Error")
    })?;

    match row {
        Some(row) => {
            let department = load_read(pool.get_ref(), row).await.map_err(|e| {
                error!(error = %e, id, "Failed to load department relations");
                ErrorInternalServerError("Internal Server Error")
            })?;
            Ok(HttpResponse::Ok().json(department))
        }
        None => {
            warn!(id, "Department not found");
            Ok(not_found())
        }
    }
}

/// Update a department (partial); employee set replaced wholesale when supplied
#[utoipa::path(
    put,
    path = "/departments/{id}",
    params(("id", description = "Department ID")),
    request_body = UpdateDepartment,
    responses(
        (status = 200, description = "Department updated", body = DepartmentRead),
        (status = 404, description = "Department or referenced employee not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Department"
)]
pub async fn update_department(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    body: web::Json<UpdateDepartment>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();
    debug!(id, "Updating department");

    let mut tx = pool.begin().await.map_err(|e| {
        error!(error = %e, "Failed to open transaction");
        ErrorInternalServerError("Internal Server Error")
    })?;

    let exists = row_exists(&mut *tx, "department", id).await.map_err(|e| {
        error!(error = %e, id, "Failed to check department");
        ErrorInternalServerError("Internal Server Error")
    })?;
    if !exists {
        warn!(id, "Department not found for update");
        return Ok(not_found());
    }

    let mut builder = UpdateBuilder::new("department");
    if let Some(name) = &body.name {
        builder.set("name", name.clone());
    }
    if let Some(location) = &body.location {
        builder.set("location", location.clone());
    }
    if let Some(description) = &body.description {
        builder.set("description", description.clone());
    }
    if let Some(extension) = &body.extension {
        builder.set("extension", extension.clone());
    }
    if let Some(manager_id) = &body.manager_id {
        if let Some(manager_id) = manager_id {
            let exists = row_exists(&mut *tx, "employee", *manager_id).await.map_err(|e| {
                error!(error = %e, manager_id, "Failed to check manager");
                ErrorInternalServerError("Internal Server Error")
            })?;
            if !exists {
                warn!(manager_id, "Manager not found while updating department");
                return Ok(employee_not_found());
            }
        }
        builder.set("manager_id", *manager_id);
    }

    if builder.is_empty() && body.employee_ids.is_none() {
        return Err(ErrorBadRequest("No fields provided for update"));
    }

    if !builder.is_empty() {
        let update = builder.build(id)?;
        execute_update(&mut *tx, update).await.map_err(|e| {
            error!(error = %e, id, "Failed to update department");
            ErrorInternalServerError("Internal Server Error")
        })?;
    }

    if let Some(employee_ids) = &body.employee_ids {
        for employee_id in employee_ids {
            let exists = row_exists(&mut *tx, "employee", *employee_id).await.map_err(|e| {
                error!(error = %e, employee_id, "Failed to check employee");
                ErrorInternalServerError("Internal Server Error")
            })?;
            if !exists {
                warn!(employee_id, "Employee not found while updating department");
                return Ok(employee_not_found());
            }
        }

        sqlx::query("UPDATE employee SET department_id = NULL WHERE department_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                error!(error = %e, id, "Failed to detach employees");
                ErrorInternalServerError("Internal Server Error")
            })?;

        if !employee_ids.is_empty() {
            assign_employees(&mut tx, id, employee_ids).await.map_err(|e| {
                error!(error = %e, id, "Failed to attach employees");
                ErrorInternalServerError("Internal Server Error")
            })?;
        }
    }

    tx.commit().await.map_err(|e| {
        error!(error = %e, "Failed to commit department update");
        ErrorInternalServerError("Internal Server Error")
    })?;

    let department = read_by_id(pool.get_ref(), id).await?;
    info!(id, "Department updated");
    Ok(HttpResponse::Ok().json(department))
}

/// Delete a department
#[utoipa::path(
    delete,
    path = "/departments/{id}",
    params(("id", description = "Department ID")),
    responses(
        (status = 200, description = "Department deleted"),
        (status = 404, description = "Department not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Department"
)]
pub async fn delete_department(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();
    debug!(id, "Deleting department");

    let result = sqlx::query("DELETE FROM department WHERE id = ?")
        .bind(id)
        .execute(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, id, "Failed to delete department");
            ErrorInternalServerError("Internal Server Error")
        })?;

    if result.rows_affected() == 0 {
        warn!(id, "Department not found for delete");
        return Ok(not_found());
    }

    info!(id, "Department deleted");
    Ok(HttpResponse::Ok().json(json!({ "message": "Department deleted successfully" })))
}

/// Get a department by exact name
#[utoipa::path(
    get,
    path = "/departments/name/{name}",
    params(("name", description = "Exact department name")),
    responses(
        (status = 200, description = "Department found", body = DepartmentRead),
        (status = 404, description = "Department not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Department"
)]
pub async fn get_department_by_name(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let name = path.into_inner();
    debug!(%name, "Fetching department by name");

    let row = sqlx::query_as::<_, Department>("SELECT * FROM department WHERE name = ?")
        .bind(&name)
        .fetch_optional(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, %name, "Failed to fetch department by name");
            ErrorInternalServerError("Internal Server Error")
        })?;

    match row {
        Some(row) => {
            let department = load_read(pool.get_ref(), row).await.map_err(|e| {
                error!(error = %e, "Failed to load department relations");
                ErrorInternalServerError("Internal Server Error")
            })?;
            Ok(HttpResponse::Ok().json(department))
        }
        None => {
            warn!(%name, "Department not found by name");
            Ok(not_found())
        }
    }
}

async fn search_departments(
    pool: &SqlitePool,
    column: &str,
    term: &str,
) -> actix_web::Result<Vec<DepartmentRead>> {
    let sql = format!(
        "SELECT * FROM department WHERE {} LIKE ? ORDER BY id",
        column
    );

    let rows = sqlx::query_as::<_, Department>(&sql)
        .bind(format!("%{}%", term))
        .fetch_all(pool)
        .await
        .map_err(|e| {
            error!(error = %e, column, term, "Failed to search departments");
            ErrorInternalServerError("Internal Server Error")
        })?;

    load_read_all(pool, rows).await.map_err(|e| {
        error!(error = %e, "Failed to load department relations");
        ErrorInternalServerError("Internal Server Error")
    })
}

/// Search departments by partial name
#[utoipa::path(
    get,
    path = "/departments/search/name/{name}",
    params(("name", description = "Partial name")),
    responses(
        (status = 200, description = "Matching departments", body = [DepartmentRead]),
        (status = 404, description = "No department matched"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Department"
)]
pub async fn search_departments_by_name(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let name = path.into_inner();
    debug!(%name, "Searching departments by name");

    let departments = search_departments(pool.get_ref(), "name", &name).await?;
    if departments.is_empty() {
        warn!(%name, "No department matched name");
        return Ok(not_found());
    }
    Ok(HttpResponse::Ok().json(departments))
}

/// Search departments by partial location
#[utoipa::path(
    get,
    path = "/departments/search/location/{location}",
    params(("location", description = "Partial location")),
    responses(
        (status = 200, description = "Matching departments", body = [DepartmentRead]),
        (status = 404, description = "No department matched"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Department"
)]
pub async fn search_departments_by_location(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let location = path.into_inner();
    debug!(%location, "Searching departments by location");

    let departments = search_departments(pool.get_ref(), "location", &location).await?;
    if departments.is_empty() {
        warn!(%location, "No department matched location");
        return Ok(not_found());
    }
    Ok(HttpResponse::Ok().json(departments))
}

/// Search departments by partial description
#[utoipa::path(
    get,
    path = "/departments/search/description/{description}",
    params(("description", description = "Partial description")),
    responses(
        (status = 200, description = "Matching departments", body = [DepartmentRead]),
        (status = 404, description = "No department matched"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Department"
)]
pub async fn search_departments_by_description(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let description = path.into_inner();
    debug!(%description, "Searching departments by description");

    let departments = search_departments(pool.get_ref(), "description", &description).await?;
    if departments.is_empty() {
        warn!(%description, "No department matched description");
        return Ok(not_found());
    }
    Ok(HttpResponse::Ok().json(departments))
}

/// Get a department by exact extension
#[utoipa::path(
    get,
    path = "/departments/extension/{extension}",
    params(("extension", description = "Exact phone extension")),
    responses(
        (status = 200, description = "Department found", body = DepartmentRead),
        (status = 404, description = "Department not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Department"
)]
pub async fn get_department_by_extension(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let extension = path.into_inner();
    debug!(%extension, "Fetching department by extension");

    let row = sqlx::query_as::<_, Department>("SELECT * FROM department WHERE extension = ?")
        .bind(&extension)
        .fetch_optional(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, %extension, "Failed to fetch department by extension");
            ErrorInternalServerError("Internal Server Error")
        })?;

    match row {
        Some(row) => {
            let department = load_read(pool.get_ref(), row).await.map_err(|e| {
                error!(error = %e, "Failed to load department relations");
                ErrorInternalServerError("Internal Server Error")
            })?;
            Ok(HttpResponse::Ok().json(department))
        }
        None => {
            warn!(%extension, "Department not found by extension");
            Ok(not_found())
        }
    }
}

/// Get the department managed by an employee
#[utoipa::path(
    get,
    path = "/departments/manager/{manager_id}",
    params(("manager_id", description = "Managing employee ID")),
    responses(
        (status = 200, description = "Department found", body = DepartmentRead),
        (status = 404, description = "Department not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Department"
)]
pub async fn get_department_by_manager(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let manager_id = path.into_inner();
    debug!(manager_id, "Fetching department by manager");

    let row = sqlx::query_as::<_, Department>("SELECT * FROM department WHERE manager_id = ?")
        .bind(manager_id)
        .fetch_optional(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, manager_id, "Failed to fetch department by manager");
            ErrorInternalServerError("Internal Server Error")
        })?;

    match row {
        Some(row) => {
            let department = load_read(pool.get_ref(), row).await.map_err(|e| {
                error!(error = %e, "Failed to load department relations");
                ErrorInternalServerError("Internal Server Error")
            })?;
            Ok(HttpResponse::Ok().json(department))
        }
        None => {
            warn!(manager_id, "Department not found by manager");
            Ok(not_found())
        }
    }
}

/// Get departments containing any of the listed employees
#[utoipa::path(
    get,
    path = "/departments/by-employees",
    params(EmployeeIdsQuery),
    responses(
        (status = 200, description = "Matching departments", body = [DepartmentRead]),
        (status = 404, description = "Employee or department not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Department"
)]
pub async fn get_departments_by_employees(
    pool: web::Data<SqlitePool>,
    query: web::Query<EmployeeIdsQuery>,
) -> actix_web::Result<impl Responder> {
    debug!(employee_ids = %query.employee_ids, "Fetching departments by employees");

    let employee_ids = query
        .employee_ids
        .split(',')
        .map(|part| part.trim().parse::<i64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| ErrorBadRequest("employee_ids must be a comma-separated list of ids"))?;

    if employee_ids.is_empty() {
        return Err(ErrorBadRequest("employee_ids must not be empty"));
    }

    for employee_id in &employee_ids {
        let exists = row_exists(pool.get_ref(), "employee", *employee_id)
            .await
            .map_err(|e| {
                error!(error = %e, employee_id, "Failed to check employee");
                ErrorInternalServerError("Internal Server Error")
            })?;
        if !exists {
            warn!(employee_id, "Employee not found in by-employees lookup");
            return Ok(employee_not_found());
        }
    }

    let placeholders = vec!["?"; employee_ids.len()].join(", ");
    let sql = format!(
        "SELECT DISTINCT d.* FROM department d
         JOIN employee e ON e.department_id = d.id
         WHERE e.id IN ({}) ORDER BY d.id",
        placeholders
    );

    let mut rows_query = sqlx::query_as::<_, Department>(&sql);
    for employee_id in &employee_ids {
        rows_query = rows_query.bind(*employee_id);
    }

    let rows = rows_query.fetch_all(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, "Failed to fetch departments by employees");
        ErrorInternalServerError("Internal Server Error")
    })?;

    if rows.is_empty() {
        warn!("No department matched employee list");
        return Ok(not_found());
    }

    let departments = load_read_all(pool.get_ref(), rows).await.map_err(|e| {
        error!(error = %e, "Failed to load department relations");
        ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(departments))
}

/// Count departments
#[utoipa::path(
    get,
    path = "/departments/count",
    responses(
        (status = 200, description = "Department count"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Department"
)]
pub async fn count_departments(pool: web::Data<SqlitePool>) -> actix_web::Result<impl Responder> {
    debug!("Counting departments");

    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM department")
        .fetch_one(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to count departments");
            ErrorInternalServerError("Internal Server Error")
        })?;

    info!(count, "Departments counted");
    Ok(HttpResponse::Ok().json(json!({ "count": count })))
}

/// Paginated department listing, eagerly loaded
#[utoipa::path(
    get,
    path = "/departments/paginated",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of departments", body = [DepartmentRead]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Department"
)]
pub async fn get_departments_paginated(
    pool: web::Data<SqlitePool>,
    query: web::Query<PageQuery>,
) -> actix_web::Result<impl Responder> {
    debug!(page = query.page(), limit = query.limit(), "Paginating departments");

    let rows = sqlx::query_as::<_, Department>(
        "SELECT * FROM department ORDER BY id LIMIT ? OFFSET ?",
    )
    .bind(query.limit() as i64)
    .bind(query.offset())
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to paginate departments");
        ErrorInternalServerError("Internal Server Error")
    })?;

    let departments = load_read_all(pool.get_ref(), rows).await.map_err(|e| {
        error!(error = %e, "Failed to load department relations");
        ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(departments))
}
