use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "name": "Ada Lovelace",
        "cpf": "123.456.789-00",
        "position": "Engineer",
        "admission_date": "2024-01-01",
        "department_id": 1
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: i64,

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
