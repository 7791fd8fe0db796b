use hr_records::db::create_schema;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

/// One-connection in-memory pool so every query sees the same database.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");

    create_schema(&pool).await.expect("failed to create schema");
    pool
}
