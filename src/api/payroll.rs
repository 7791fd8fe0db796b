use actix_web::{HttpResponse, Responder, error::ErrorInternalServerError, web};
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;
use tracing::{debug, error, info, warn};
use utoipa::ToSchema;

use crate::api::PageQuery;
use crate::model::payroll::Payroll;
use crate::utils::db_utils::{UpdateBuilder, execute_update, row_exists};

#[derive(Deserialize, ToSchema)]
pub struct CreatePayroll {
    #[schema(example = 1)]
    pub employee_id: i64,

    #[schema(example = 5000.0)]
    pub gross_salary: f64,

    #[schema(example = 800.0)]
    pub deductions: f64,

    /// Accepted as given; never derived from gross and deductions.
    #[schema(example = 4200.0)]
    pub net_salary: f64,

    #[schema(example = "2025-03")]
    pub reference_month: String,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdatePayroll {
    pub employee_id: Option<i64>,
    pub gross_salary: Option<f64>,
    pub deductions: Option<f64>,
    pub net_salary: Option<f64>,
    pub reference_month: Option<String>,
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({ "message": "Payroll not found" }))
}

async fn fetch_payroll(pool: &SqlitePool, id: i64) -> Result<Option<Payroll>, sqlx::Error> {
    sqlx::query_as::<_, Payroll>("SELECT * FROM payroll WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

async fn check_employee(pool: &SqlitePool, employee_id: i64) -> actix_web::Result<bool> {
    row_exists(pool, "employee", employee_id).await.map_err(|e| {
        error!(error = %e, employee_id, "Failed to check employee");
        ErrorInternalServerError("Internal Server Error").into()
    })
}

/// Create a payroll entry
#[utoipa::path(
    post,
    path = "/pay_rolls",
    request_body = CreatePayroll,
    responses(
        (status = 200, description = "Payroll created", body = Payroll),
        (status = 404, description = "Referenced employee not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Payroll"
)]
pub async fn create_payroll(
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreatePayroll>,
) -> actix_web::Result<impl Responder> {
    debug!(employee_id = payload.employee_id, "Creating payroll");

    if !check_employee(pool.get_ref(), payload.employee_id).await? {
        warn!(employee_id = payload.employee_id, "Employee not found while creating payroll");
        return Ok(HttpResponse::NotFound().json(json!({ "message": "Employee not found" })));
    }

    let result = sqlx::query(
        "INSERT INTO payroll (employee_id, gross_salary, deductions, net_salary, reference_month)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(payload.employee_id)
    .bind(payload.gross_salary)
    .bind(payload.deductions)
    .bind(payload.net_salary)
    .bind(&payload.reference_month)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to create payroll");
        ErrorInternalServerError("Internal Server Error")
    })?;

    let id = result.last_insert_rowid();
    let payroll = fetch_payroll(pool.get_ref(), id).await.map_err(|e| {
        error!(error = %e, id, "Failed to fetch created payroll");
        ErrorInternalServerError("Internal Server Error")
    })?;

    info!(id, "Payroll created");
    Ok(HttpResponse::Ok().json(payroll))
}

/// List all payroll entries
#[utoipa::path(
    get,
    path = "/pay_rolls",
    responses(
        (status = 200, description = "All payroll entries", body = [Payroll]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Payroll"
)]
pub async fn list_payrolls(pool: web::Data<SqlitePool>) -> actix_web::Result<impl Responder> {
    debug!("Listing all payrolls");

    let payrolls = sqlx::query_as::<_, Payroll>("SELECT * FROM payroll ORDER BY id")
        .fetch_all(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to list payrolls");
            ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Ok().json(payrolls))
}

/// Get a payroll entry by id
#[utoipa::path(
    get,
    path = "/pay_rolls/{id}",
    params(("id", description = "Payroll ID")),
    responses(
        (status = 200, description = "Payroll found", body = Payroll),
        (status = 404, description = "Payroll not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Payroll"
)]
pub async fn get_payroll(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();
    debug!(id, "Fetching payroll");

    let payroll = fetch_payroll(pool.get_ref(), id).await.map_err(|e| {
        error!(error = %e, id, "Failed to fetch payroll");
        ErrorInternalServerError("Internal Server Error")
    })?;

    match payroll {
        Some(payroll) => Ok(HttpResponse::Ok().json(payroll)),
        None => {
            warn!(id, "Payroll not found");
            Ok(not_found())
        }
    }
}

/// Update a payroll entry (partial)
#[utoipa::path(
    put,
    path = "/pay_rolls/{id}",
    params(("id", description = "Payroll ID")),
    request_body = UpdatePayroll,
    responses(
        (status = 200, description = "Payroll updated", body = Payroll),
        (status = 404, description = "Payroll or referenced employee not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Payroll"
)]
pub async fn update_payroll(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    body: web::Json<UpdatePayroll>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();
    debug!(id, "Updating payroll");

    let exists = row_exists(pool.get_ref(), "payroll", id).await.map_err(|e| {
        error!(error = %e, id, "Failed to check payroll");
        ErrorInternalServerError("Internal Server Error")
    })?;
    if !exists {
        warn!(id, "Payroll not found for update");
        return Ok(not_found());
    }

    if let Some(employee_id) = body.employee_id {
        if !check_employee(pool.get_ref(), employee_id).await? {
            warn!(employee_id, "Employee not found while updating payroll");
            return Ok(HttpResponse::NotFound().json(json!({ "message": "Employee not found" })));
        }
    }

    let mut builder = UpdateBuilder::new("payroll");
    if let Some(employee_id) = body.employee_id {
        builder.set("employee_id", employee_id);
    }
    if let Some(gross_salary) = body.gross_salary {
        builder.set("gross_salary", gross_salary);
    }
    if let Some(deductions) = body.deductions {
        builder.set("deductions", deductions);
    }
    if let Some(net_salary) = body.net_salary {
        builder.set("net_salary", net_salary);
    }
    if let Some(reference_month) = &body.reference_month {
        builder.set("reference_month", reference_month.clone());
    }

    let update = builder.build(id)?;
    execute_update(pool.get_ref(), update).await.map_err(|e| {
        error!(error = %e, id, "Failed to update payroll");
        ErrorInternalServerError("Internal Server Error")
    })?;

    let payroll = fetch_payroll(pool.get_ref(), id).await.map_err(|e| {
        error!(error = %e, id, "Failed to fetch updated payroll");
        ErrorInternalServerError("Internal Server Error")
    })?;

    info!(id, "Payroll updated");
    Ok(HttpResponse::Ok().json(payroll))
}

/// Delete a payroll entry
#[utoipa::path(
    delete,
    path = "/pay_rolls/{id}",
    params(("id", description = "Payroll ID")),
    responses(
        (status = 200, description = "Payroll deleted"),
        (status = 404, description = "Payroll not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Payroll"
)]
pub async fn delete_payroll(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();
    debug!(id, "Deleting payroll");

    let result = sqlx::query("DELETE FROM payroll WHERE id = ?")
        .bind(id)
        .execute(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, id, "Failed to delete payroll");
            ErrorInternalServerError("Internal Server Error")
        })?;

    if result.rows_affected() == 0 {
        warn!(id, "Payroll not found for delete");
        return Ok(not_found());
    }

    info!(id, "Payroll deleted");
    Ok(HttpResponse::Ok().json(json!({ "message": "Payroll deleted successfully" })))
}

/// Count payroll entries
#[utoipa::path(
    get,
    path = "/pay_rolls/count",
    responses(
        (status = 200, description = "Payroll count"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Payroll"
)]
pub async fn count_payrolls(pool: web::Data<SqlitePool>) -> actix_web::Result<impl Responder> {
    debug!("Counting payrolls");

    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM payroll")
        .fetch_one(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to count payrolls");
            ErrorInternalServerError("Internal Server Error")
        })?;

    info!(count, "Payrolls counted");
    Ok(HttpResponse::Ok().json(json!({ "count": count })))
}

/// Paginated payroll listing
#[utoipa::path(
    get,
    path = "/pay_rolls/paginated",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of payroll entries", body = [Payroll]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Payroll"
)]
pub async fn get_payrolls_paginated(
    pool: web::Data<SqlitePool>,
    query: web::Query<PageQuery>,
) -> actix_web::Result<impl Responder> {
    debug!(page = query.page(), limit = query.limit(), "Paginating payrolls");

    let payrolls = sqlx::query_as::<_, Payroll>(
        "SELECT * FROM payroll ORDER BY id LIMIT ? OFFSET ?",
    )
    .bind(query.limit() as i64)
    .bind(query.offset())
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to paginate payrolls");
        ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(payrolls))
}
