use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct EmployeeBenefit {
    #[schema(example = 1)]
    pub id: i64,

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
