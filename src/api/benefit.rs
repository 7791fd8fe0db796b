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
use crate::model::benefit::Benefit;
use crate::utils::db_utils::{SqlValue, UpdateBuilder, bind_values, execute_update};
use crate::utils::serde_utils::double_option;

#[derive(Deserialize, ToSchema)]
pub struct CreateBenefit {
    #[schema(example = "Meal voucher")]
    pub name: String,

    #[schema(example = "Monthly meal allowance", nullable = true)]
    pub description: Option<String>,

    #[schema(example = 150.0)]
    pub amount: f64,

    #[schema(example = "Food")]
    pub r#type: String,

    /// Defaults to true when omitted.
    #[serde(default = "default_active")]
    #[schema(example = true)]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateBenefit {
    pub name: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable = true)]
    pub description: Option<Option<String>>,

    pub amount: Option<f64>,
    pub r#type: Option<String>,
    pub active: Option<bool>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct AmountRangeQuery {
    #[param(example = 100.0)]
    pub min_amount: f64,
    #[param(example = 200.0)]
    pub max_amount: f64,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SortQuery {
    /// `asc` (default) or `desc`
    pub order: Option<String>,
}

/// Combined filter; every present field narrows the result.
#[derive(Debug, Deserialize, IntoParams)]
pub struct BenefitFilter {
    pub name: Option<String>,
    pub description: Option<String>,
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
    pub r#type: Option<String>,
    pub active: Option<bool>,
}

#[derive(Serialize, sqlx::FromRow, ToSchema)]
pub struct BenefitTypeCount {
    #[schema(example = "Food")]
    pub r#type: String,
    #[schema(example = 3)]
    pub count: i64,
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({ "message": "Benefit not found" }))
}

async fn fetch_benefit(pool: &SqlitePool, id: i64) -> Result<Option<Benefit>, sqlx::Error> {
    sqlx::query_as::<_, Benefit>("SELECT * FROM benefit WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Create a benefit
#[utoipa::path(
    post,
    path = "/benefits",
    request_body = CreateBenefit,
    responses(
        (status = 200, description = "Benefit created", body = Benefit),
        (status = 500, description = "Internal server error")
    ),
    tag = "Benefit"
)]
pub async fn create_benefit(
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateBenefit>,
) -> actix_web::Result<impl Responder> {
    debug!(name = %payload.name, "Creating benefit");

    let result = sqlx::query(
        "INSERT INTO benefit (name, description, amount, type, active)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&payload.name)
    .bind(&payload.description)
    .bind(payload.amount)
    .bind(&payload.r#type)
    .bind(payload.active)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to create benefit");
        ErrorInternalServerError("Internal Server Error")
    })?;

    let id = result.last_insert_rowid();
    let benefit = fetch_benefit(pool.get_ref(), id).await.map_err(|e| {
        error!(error = %e, id, "Failed to fetch created benefit");
        ErrorInternalServerError("Internal Server Error")
    })?;

    info!(id, "Benefit created");
    Ok(HttpResponse::Ok().json(benefit))
}

/// List all benefits
#[utoipa::path(
    get,
    path = "/benefits",
    responses(
        (status = 200, description = "All benefits", body = [Benefit]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Benefit"
)]
pub async fn list_benefits(pool: web::Data<SqlitePool>) -> actix_web::Result<impl Responder> {
    debug!("Listing all benefits");

    let benefits = sqlx::query_as::<_, Benefit>("SELECT * FROM benefit ORDER BY id")
        .fetch_all(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to list benefits");
            ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Ok().json(benefits))
}

/// Get a benefit by id
#[utoipa::path(
    get,
    path = "/benefits/{id}",
    params(("id", description = "Benefit ID")),
    responses(
        (status = 200, description = "Benefit found", body = Benefit),
        (status = 404, description = "Benefit not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Benefit"
)]
pub async fn get_benefit(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();
    debug!(id, "Fetching benefit");

    let benefit = fetch_benefit(pool.get_ref(), id).await.map_err(|e| {
        error!(error = %e, id, "Failed to fetch benefit");
        ErrorInternalServerError("Internal Server Error")
    })?;

    match benefit {
        Some(benefit) => Ok(HttpResponse::Ok().json(benefit)),
        None => {
            warn!(id, "Benefit not found");
            Ok(not_found())
        }
    }
}

/// Update a benefit (partial)
#[utoipa::path(
    put,
    path = "/benefits/{id}",
    params(("id", description = "Benefit ID")),
    request_body = UpdateBenefit,
    responses(
        (status = 200, description = "Benefit updated", body = Benefit),
        (status = 404, description = "Benefit not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Benefit"
)]
pub async fn update_benefit(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    body: web::Json<UpdateBenefit>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();
    debug!(id, "Updating benefit");

    let mut builder = UpdateBuilder::new("benefit");
    if let Some(name) = &body.name {
        builder.set("name", name.clone());
    }
    if let Some(description) = &body.description {
        builder.set("description", description.clone());
    }
    if let Some(amount) = body.amount {
        builder.set("amount", amount);
    }
    if let Some(r#type) = &body.r#type {
        builder.set("type", r#type.clone());
    }
    if let Some(active) = body.active {
        builder.set("active", active);
    }

    let update = builder.build(id)?;
    let affected = execute_update(pool.get_ref(), update).await.map_err(|e| {
        error!(error = %e, id, "Failed to update benefit");
        ErrorInternalServerError("Internal Server Error")
    })?;

    if affected == 0 {
        warn!(id, "Benefit not found for update");
        return Ok(not_found());
    }

    let benefit = fetch_benefit(pool.get_ref(), id).await.map_err(|e| {
        error!(error = %e, id, "Failed to fetch updated benefit");
        ErrorInternalServerError("Internal Server Error")
    })?;

    info!(id, "Benefit updated");
    Ok(HttpResponse::Ok().json(benefit))
}

/// Delete a benefit
#[utoipa::path(
    delete,
    path = "/benefits/{id}",
    params(("id", description = "Benefit ID")),
    responses(
        (status = 200, description = "Benefit deleted"),
        (status = 404, description = "Benefit not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Benefit"
)]
pub async fn delete_benefit(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();
    debug!(id, "Deleting benefit");

    let result = sqlx::query("DELETE FROM benefit WHERE id = ?")
        .bind(id)
        .execute(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, id, "Failed to delete benefit");
            ErrorInternalServerError("Internal Server Error")
        })?;

    if result.rows_affected() == 0 {
        warn!(id, "Benefit not found for delete");
        return Ok(not_found());
    }

    info!(id, "Benefit deleted");
    Ok(HttpResponse::Ok().json(json!({ "message": "Benefit deleted successfully" })))
}

async fn list_where(
    pool: &SqlitePool,
    sql: &str,
    values: Vec<SqlValue>,
) -> actix_web::Result<Vec<Benefit>> {
    let query = bind_values(sqlx::query_as::<_, Benefit>(sql), &values);
    let benefits = query.fetch_all(pool).await.map_err(|e| {
        error!(error = %e, sql = %sql, "Failed to query benefits");
        ErrorInternalServerError("Internal Server Error")
    })?;
    Ok(benefits)
}

/// Search benefits by partial name
#[utoipa::path(
    get,
    path = "/benefits/name/{name}",
    params(("name", description = "Partial name")),
    responses(
        (status = 200, description = "Matching benefits", body = [Benefit]),
        (status = 404, description = "No benefit matched"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Benefit"
)]
pub async fn search_benefits_by_name(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let name = path.into_inner();
    debug!(%name, "Searching benefits by name");

    let benefits = list_where(
        pool.get_ref(),
        "SELECT * FROM benefit WHERE name LIKE ? ORDER BY id",
        vec![SqlValue::String(format!("%{}%", name))],
    )
    .await?;

    if benefits.is_empty() {
        warn!(%name, "No benefit matched name");
        return Ok(not_found());
    }
    Ok(HttpResponse::Ok().json(benefits))
}

/// Search benefits by partial description
#[utoipa::path(
    get,
    path = "/benefits/description/{description}",
    params(("description", description = "Partial description")),
    responses(
        (status = 200, description = "Matching benefits", body = [Benefit]),
        (status = 404, description = "No benefit matched"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Benefit"
)]
pub async fn search_benefits_by_description(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let description = path.into_inner();
    debug!(%description, "Searching benefits by description");

    let benefits = list_where(
        pool.get_ref(),
        "SELECT * FROM benefit WHERE description LIKE ? ORDER BY id",
        vec![SqlValue::String(format!("%{}%", description))],
    )
    .await?;

    if benefits.is_empty() {
        warn!(%description, "No benefit matched description");
        return Ok(not_found());
    }
    Ok(HttpResponse::Ok().json(benefits))
}

/// List benefits of an exact type
#[utoipa::path(
    get,
    path = "/benefits/type/{type}",
    params(("type", description = "Exact benefit type")),
    responses(
        (status = 200, description = "Matching benefits", body = [Benefit]),
        (status = 404, description = "No benefit matched"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Benefit"
)]
pub async fn get_benefits_by_type(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let benefit_type = path.into_inner();
    debug!(%benefit_type, "Fetching benefits by type");

    let benefits = list_where(
        pool.get_ref(),
        "SELECT * FROM benefit WHERE type = ? ORDER BY id",
        vec![SqlValue::String(benefit_type.clone())],
    )
    .await?;

    if benefits.is_empty() {
        warn!(%benefit_type, "No benefit matched type");
        return Ok(not_found());
    }
    Ok(HttpResponse::Ok().json(benefits))
}

/// List benefits with an exact amount
#[utoipa::path(
    get,
    path = "/benefits/amount/{amount}",
    params(("amount", description = "Exact amount")),
    responses(
        (status = 200, description = "Matching benefits", body = [Benefit]),
        (status = 404, description = "No benefit matched"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Benefit"
)]
pub async fn get_benefits_by_amount(
    pool: web::Data<SqlitePool>,
    path: web::Path<f64>,
) -> actix_web::Result<impl Responder> {
    let amount = path.into_inner();
    debug!(amount, "Fetching benefits by amount");

    let benefits = list_where(
        pool.get_ref(),
        "SELECT * FROM benefit WHERE amount = ? ORDER BY id",
        vec![SqlValue::F64(amount)],
    )
    .await?;

    if benefits.is_empty() {
        warn!(amount, "No benefit matched amount");
        return Ok(not_found());
    }
    Ok(HttpResponse::Ok().json(benefits))
}

/// List benefits by active status
#[utoipa::path(
    get,
    path = "/benefits/active/{active}",
    params(("active", description = "true or false")),
    responses(
        (status = 200, description = "Matching benefits", body = [Benefit]),
        (status = 404, description = "No benefit matched"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Benefit"
)]
pub async fn get_benefits_by_active(
    pool: web::Data<SqlitePool>,
    path: web::Path<bool>,
) -> actix_web::Result<impl Responder> {
    let active = path.into_inner();
    debug!(active, "Fetching benefits by active status");

    let benefits = list_where(
        pool.get_ref(),
        "SELECT * FROM benefit WHERE active = ? ORDER BY id",
        vec![SqlValue::Bool(active)],
    )
    .await?;

    if benefits.is_empty() {
        warn!(active, "No benefit matched active status");
        return Ok(not_found());
    }
    Ok(HttpResponse::Ok().json(benefits))
}

/// List benefits with amount in an inclusive range
#[utoipa::path(
    get,
    path = "/benefits/by-amount-range",
    params(AmountRangeQuery),
    responses(
        (status = 200, description = "Matching benefits", body = [Benefit]),
        (status = 404, description = "No benefit in range"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Benefit"
)]
pub async fn get_benefits_by_amount_range(
    pool: web::Data<SqlitePool>,
    query: web::Query<AmountRangeQuery>,
) -> actix_web::Result<impl Responder> {
    debug!(?query, "Fetching benefits by amount range");

    let benefits = list_where(
        pool.get_ref(),
        "SELECT * FROM benefit WHERE amount >= ? AND amount <= ? ORDER BY id",
        vec![
            SqlValue::F64(query.min_amount),
            SqlValue::F64(query.max_amount),
        ],
    )
    .await?;

    if benefits.is_empty() {
        warn!(?query, "No benefit in amount range");
        return Ok(not_found());
    }
    Ok(HttpResponse::Ok().json(benefits))
}

/// List benefits sorted by amount
#[utoipa::path(
    get,
    path = "/benefits/sorted",
    params(SortQuery),
    responses(
        (status = 200, description = "Benefits sorted by amount", body = [Benefit]),
        (status = 400, description = "Invalid order"),
        (status = 404, description = "No benefit found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Benefit"
)]
pub async fn get_benefits_sorted(
    pool: web::Data<SqlitePool>,
    query: web::Query<SortQuery>,
) -> actix_web::Result<impl Responder> {
    let order = query.order.as_deref().unwrap_or("asc");
    debug!(order, "Fetching benefits sorted by amount");

    let sql = match order {
        "asc" => "SELECT * FROM benefit ORDER BY amount ASC, id",
        "desc" => "SELECT * FROM benefit ORDER BY amount DESC, id",
        _ => return Err(ErrorBadRequest("order must be 'asc' or 'desc'")),
    };

    let benefits = list_where(pool.get_ref(), sql, Vec::new()).await?;

    if benefits.is_empty() {
        warn!("No benefit to sort");
        return Ok(not_found());
    }
    Ok(HttpResponse::Ok().json(benefits))
}

/// Count benefits
#[utoipa::path(
    get,
    path = "/benefits/count",
    responses(
        (status = 200, description = "Benefit count"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Benefit"
)]
pub async fn count_benefits(pool: web::Data<SqlitePool>) -> actix_web::Result<impl Responder> {
    debug!("Counting benefits");

    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM benefit")
        .fetch_one(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to count benefits");
            ErrorInternalServerError("Internal Server Error")
        })?;

    info!(count, "Benefits counted");
    Ok(HttpResponse::Ok().json(json!({ "count": count })))
}

/// Count benefits grouped by type; empty list when no rows exist
#[utoipa::path(
    get,
    path = "/benefits/count-by-type",
    responses(
        (status = 200, description = "Counts per type", body = [BenefitTypeCount]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Benefit"
)]
pub async fn count_benefits_by_type(
    pool: web::Data<SqlitePool>,
) -> actix_web::Result<impl Responder> {
    debug!("Counting benefits by type");

    let counts = sqlx::query_as::<_, BenefitTypeCount>(
        "SELECT type, COUNT(*) AS count FROM benefit GROUP BY type ORDER BY type",
    )
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to count benefits by type");
        ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(counts))
}

/// Paginated benefit listing
#[utoipa::path(
    get,
    path = "/benefits/paginated",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of benefits", body = [Benefit]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Benefit"
)]
pub async fn get_benefits_paginated(
    pool: web::Data<SqlitePool>,
    query: web::Query<PageQuery>,
) -> actix_web::Result<impl Responder> {
    debug!(page = query.page(), limit = query.limit(), "Paginating benefits");

    let benefits = sqlx::query_as::<_, Benefit>(
        "SELECT * FROM benefit ORDER BY id LIMIT ? OFFSET ?",
    )
    .bind(query.limit() as i64)
    .bind(query.offset())
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to paginate benefits");
        ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(benefits))
}

/// Combined filter over name, description, amount range, type and status
#[utoipa::path(
    get,
    path = "/benefits/filter",
    params(BenefitFilter),
    responses(
        (status = 200, description = "Matching benefits", body = [Benefit]),
        (status = 404, description = "No benefit matched"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Benefit"
)]
pub async fn filter_benefits(
    pool: web::Data<SqlitePool>,
    query: web::Query<BenefitFilter>,
) -> actix_web::Result<impl Responder> {
    debug!(?query, "Filtering benefits");

    // Build the WHERE clause from whichever filters were supplied
    let mut conditions = Vec::new();
    let mut values = Vec::new();

    if let Some(name) = &query.name {
        conditions.push("name LIKE ?");
        values.push(SqlValue::String(format!("%{}%", name)));
    }
    if let Some(description) = &query.description {
        conditions.push("description LIKE ?");
        values.push(SqlValue::String(format!("%{}%", description)));
    }
    if let Some(min_amount) = query.min_amount {
        conditions.push("amount >= ?");
        values.push(SqlValue::F64(min_amount));
    }
    if let Some(max_amount) = query.max_amount {
        conditions.push("amount <= ?");
        values.push(SqlValue::F64(max_amount));
    }
    if let Some(benefit_type) = &query.r#type {
        conditions.push("type = ?");
        values.push(SqlValue::String(benefit_type.clone()));
    }
    if let Some(active) = query.active {
        conditions.push("active = ?");
        values.push(SqlValue::Bool(active));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };
    let sql = format!("SELECT * FROM benefit {} ORDER BY id", where_clause);

    let benefits = list_where(pool.get_ref(), &sql, values).await?;

    if benefits.is_empty() {
        warn!(?query, "No benefit matched filter");
        return Ok(not_found());
    }
    Ok(HttpResponse::Ok().json(benefits))
}
