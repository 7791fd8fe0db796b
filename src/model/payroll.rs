use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Payroll {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = 1)]
    pub employee_id: i64,

    #[schema(example = 5000.0)]
    pub gross_salary: f64,

    #[schema(example = 800.0)]
    pub deductions: f64,

    #[schema(example = 4200.0)]
    pub net_salary: f64,

    #[schema(example = "2025-03")]
    pub reference_month: String,
}
