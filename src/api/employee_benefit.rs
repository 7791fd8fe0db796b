use actix_web::{HttpResponse, Responder, error::ErrorInternalServerError, web};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;
use tracing::{debug, error, info, warn};
use utoipa::ToSchema;

use crate::api::PageQuery;
use crate::model::employee_benefit::EmployeeBenefit;
use crate::utils::db_utils::{UpdateBuilder, execute_update, row_exists};
use crate::utils::serde_utils::double_option;

#[derive(Deserialize, ToSchema)]
pub struct CreateEmployeeBenefit {
    #[schema(example = 1)]
    pub employee_id: i64,

    #[schema(example = 1)]
    pub benefit_id: i64,

    #[schema(example = "2024-02-01", value_type = String, format = "date")]
    pub start_date: NaiveDate,

    #[schema(example = "2024-12-31", value_type = Option<String>, format = "date", nullable = true)]
    pub end_date: Option<NaiveDate>,

    #[schema(example = 99.9, nullable = true)]
    pub custom_amount: Option<f64>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateEmployeeBenefit {
    pub employee_id: Option<i64>,
    pub benefit_id: Option<i64>,

    #[schema(example = "2024-02-01", value_type = Option<String>, format = "date")]
    pub start_date: Option<NaiveDate>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, format = "date", nullable = true)]
    pub end_date: Option<Option<NaiveDate>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<f64>, nullable = true)]
    pub custom_amount: Option<Option<f64>>,
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({ "message": "Employee benefit not found" }))
}

async fn fetch_employee_benefit(
    pool: &SqlitePool,
    id: i64,
) -> Result<Option<EmployeeBenefit>, sqlx::Error> {
    sqlx::query_as::<_, EmployeeBenefit>("SELECT * FROM employee_benefit WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Checks the referenced employee, then the referenced benefit; the first
/// missing reference determines the response.
async fn validate_references(
    pool: &SqlitePool,
    employee_id: Option<i64>,
    benefit_id: Option<i64>,
) -> actix_web::Result<Option<HttpResponse>> {
    if let Some(employee_id) = employee_id {
        let exists = row_exists(pool, "employee", employee_id).await.map_err(|e| {
            error!(error = %e, employee_id, "Failed to check employee");
            ErrorInternalServerError("Internal Server Error")
        })?;
        if !exists {
            warn!(employee_id, "Employee not found");
            return Ok(Some(
                HttpResponse::NotFound().json(json!({ "message": "Employee not found" })),
            ));
        }
    }

    if let Some(benefit_id) = benefit_id {
        let exists = row_exists(pool, "benefit", benefit_id).await.map_err(|e| {
            error!(error = %e, benefit_id, "Failed to check benefit");
            ErrorInternalServerError("Internal Server Error")
        })?;
        if !exists {
            warn!(benefit_id, "Benefit not found");
            return Ok(Some(
                HttpResponse::NotFound().json(json!({ "message": "Benefit not found" })),
            ));
        }
    }

    Ok(None)
}

/// Assign a benefit to an employee
#[utoipa::path(
    post,
    path = "/employee-benefits",
    request_body = CreateEmployeeBenefit,
    responses(
        (status = 200, description = "Assignment created", body = EmployeeBenefit),
        (status = 404, description = "Referenced employee or benefit not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "EmployeeBenefit"
)]
pub async fn create_employee_benefit(
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateEmployeeBenefit>,
) -> actix_web::Result<impl Responder> {
    debug!(
        employee_id = payload.employee_id,
        benefit_id = payload.benefit_id,
        "Creating employee benefit"
    );

    if let Some(response) = validate_references(
        pool.get_ref(),
        Some(payload.employee_id),
        Some(payload.benefit_id),
    )
    .await?
    {
        return Ok(response);
    }

    let result = sqlx::query(
        "INSERT INTO employee_benefit (employee_id, benefit_id, start_date, end_date, custom_amount)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(payload.employee_id)
    .bind(payload.benefit_id)
    .bind(payload.start_date)
    .bind(payload.end_date)
    .bind(payload.custom_amount)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to create employee benefit");
        ErrorInternalServerError("Internal Server Error")
    })?;

    let id = result.last_insert_rowid();
    let employee_benefit = fetch_employee_benefit(pool.get_ref(), id).await.map_err(|e| {
        error!(error = %e, id, "Failed to fetch created employee benefit");
        ErrorInternalServerError("Internal Server Error")
    })?;

    info!(id, "Employee benefit created");
    Ok(HttpResponse::Ok().json(employee_benefit))
}

/// List all employee benefits
#[utoipa::path(
    get,
    path = "/employee-benefits",
    responses(
        (status = 200, description = "All assignments", body = [EmployeeBenefit]),
        (status = 500, description = "Internal server error")
    ),
    tag = "EmployeeBenefit"
)]
pub async fn list_employee_benefits(
    pool: web::Data<SqlitePool>,
) -> actix_web::Result<impl Responder> {
    debug!("Listing all employee benefits");

    let employee_benefits =
        sqlx::query_as::<_, EmployeeBenefit>("SELECT * FROM employee_benefit ORDER BY id")
            .fetch_all(pool.get_ref())
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to list employee benefits");
                ErrorInternalServerError("Internal Server Error")
            })?;

    Ok(HttpResponse::Ok().json(employee_benefits))
}

/// Get an employee benefit by id
#[utoipa::path(
    get,
    path = "/employee-benefits/{id}",
    params(("id", description = "Employee benefit ID")),
    responses(
        (status = 200, description = "Assignment found", body = EmployeeBenefit),
        (status = 404, description = "Employee benefit not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "EmployeeBenefit"
)]
pub async fn get_employee_benefit(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();
    debug!(id, "Fetching employee benefit");

    let employee_benefit = fetch_employee_benefit(pool.get_ref(), id).await.map_err(|e| {
        error!(error = %e, id, "Failed to fetch employee benefit");
        ErrorInternalServerError("Internal Server Error")
    })?;

    match employee_benefit {
        Some(employee_benefit) => Ok(HttpResponse::Ok().json(employee_benefit)),
        None => {
            warn!(id, "Employee benefit not found");
            Ok(not_found())
        }
    }
}

/// Update an employee benefit (partial)
#[utoipa::path(
    put,
    path = "/employee-benefits/{id}",
    params(("id", description = "Employee benefit ID")),
    request_body = UpdateEmployeeBenefit,
    responses(
        (status = 200, description = "Assignment updated", body = EmployeeBenefit),
        (status = 404, description = "Assignment, employee or benefit not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "EmployeeBenefit"
)]
pub async fn update_employee_benefit(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    body: web::Json<UpdateEmployeeBenefit>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();
    debug!(id, "Updating employee benefit");

    let exists = row_exists(pool.get_ref(), "employee_benefit", id).await.map_err(|e| {
        error!(error = %e, id, "Failed to check employee benefit");
        ErrorInternalServerError("Internal Server Error")
    })?;
    if !exists {
        warn!(id, "Employee benefit not found for update");
        return Ok(not_found());
    }

    // Re-validate only the references that are part of this update
    if let Some(response) =
        validate_references(pool.get_ref(), body.employee_id, body.benefit_id).await?
    {
        return Ok(response);
    }

    let mut builder = UpdateBuilder::new("employee_benefit");
    if let Some(employee_id) = body.employee_id {
        builder.set("employee_id", employee_id);
    }
    if let Some(benefit_id) = body.benefit_id {
        builder.set("benefit_id", benefit_id);
    }
    if let Some(start_date) = body.start_date {
        builder.set("start_date", start_date);
    }
    if let Some(end_date) = body.end_date {
        builder.set("end_date", end_date);
    }
    if let Some(custom_amount) = body.custom_amount {
        builder.set("custom_amount", custom_amount);
    }

    let update = builder.build(id)?;
    execute_update(pool.get_ref(), update).await.map_err(|e| {
        error!(error = %e, id, "Failed to update employee benefit");
        ErrorInternalServerError("Internal Server Error")
    })?;

    let employee_benefit = fetch_employee_benefit(pool.get_ref(), id).await.map_err(|e| {
        error!(error = %e, id, "Failed to fetch updated employee benefit");
        ErrorInternalServerError("Internal Server Error")
    })?;

    info!(id, "Employee benefit updated");
    Ok(HttpResponse::Ok().json(employee_benefit))
}

/// Delete an employee benefit
#[utoipa::path(
    delete,
    path = "/employee-benefits/{id}",
    params(("id", description = "Employee benefit ID")),
    responses(
        (status = 200, description = "Assignment deleted"),
        (status = 404, description = "Employee benefit not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "EmployeeBenefit"
)]
pub async fn delete_employee_benefit(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();
    debug!(id, "Deleting employee benefit");

    let result = sqlx::query("DELETE FROM employee_benefit WHERE id = ?")
        .bind(id)
        .execute(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, id, "Failed to delete employee benefit");
            ErrorInternalServerError("Internal Server Error")
        })?;

    if result.rows_affected() == 0 {
        warn!(id, "Employee benefit not found for delete");
        return Ok(not_found());
    }

    info!(id, "Employee benefit deleted");
    Ok(HttpResponse::Ok().json(json!({ "message": "Employee benefit deleted successfully" })))
}

/// Count employee benefits
#[utoipa::path(
    get,
    path = "/employee-benefits/count",
    responses(
        (status = 200, description = "Assignment count"),
        (status = 500, description = "Internal server error")
    ),
    tag = "EmployeeBenefit"
)]
pub async fn count_employee_benefits(
    pool: web::Data<SqlitePool>,
) -> actix_web::Result<impl Responder> {
    debug!("Counting employee benefits");

    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employee_benefit")
        .fetch_one(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to count employee benefits");
            ErrorInternalServerError("Internal Server Error")
        })?;

    info!(count, "Employee benefits counted");
    Ok(HttpResponse::Ok().json(json!({ "count": count })))
}

/// Paginated employee benefit listing
#[utoipa::path(
    get,
    path = "/employee-benefits/paginated",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of assignments", body = [EmployeeBenefit]),
        (status = 500, description = "Internal server error")
    ),
    tag = "EmployeeBenefit"
)]
pub async fn get_employee_benefits_paginated(
    pool: web::Data<SqlitePool>,
    query: web::Query<PageQuery>,
) -> actix_web::Result<impl Responder> {
    debug!(
        page = query.page(),
        limit = query.limit(),
        "Paginating employee benefits"
    );

    let employee_benefits = sqlx::query_as::<_, EmployeeBenefit>(
        "SELECT * FROM employee_benefit ORDER BY id LIMIT ? OFFSET ?",
    )
    .bind(query.limit() as i64)
    .bind(query.offset())
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to paginate employee benefits");
        ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(employee_benefits))
}
