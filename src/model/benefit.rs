use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "name": "Meal voucher",
        "description": "Monthly meal allowance",
        "amount": 150.0,
        "type": "Food",
        "active": true
    })
)]
pub struct Benefit {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = "Meal voucher")]
    pub name: String,

    #[schema(example = "Monthly meal allowance", nullable = true)]
    pub description: Option<String>,

    #[schema(example = 150.0)]
    pub amount: f64,

    #[schema(example = "Food")]
    pub r#type: String,

    #[schema(example = true)]
    pub active: bool,
}
