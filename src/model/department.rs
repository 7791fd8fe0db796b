use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Raw department row; the eager-loaded read shape lives in `api::department`.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Department {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = "Engineering")]
    pub name: String,

    #[schema(example = "HQ")]
    pub location: String,

    #[schema(example = "Product engineering", nullable = true)]
    pub description: Option<String>,

    #[schema(example = "4002", nullable = true)]
    pub extension: Option<String>,

    #[schema(example = 1, nullable = true)]
    pub manager_id: Option<i64>,
}
