use std::str::FromStr;

use anyhow::Context;
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS department (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        location TEXT NOT NULL,
        description TEXT,
        extension TEXT,
        manager_id INTEGER REFERENCES employee(id)
    )",
    "CREATE TABLE IF NOT EXISTS employee (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        cpf TEXT NOT NULL,
        position TEXT NOT NULL,
        admission_date TEXT NOT NULL,
        department_id INTEGER REFERENCES department(id)
    )",
    "CREATE TABLE IF NOT EXISTS benefit (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        description TEXT,
        amount REAL NOT NULL,
        type TEXT NOT NULL,
        active INTEGER NOT NULL DEFAULT 1
    )",
    "CREATE TABLE IF NOT EXISTS employee_benefit (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        employee_id INTEGER NOT NULL REFERENCES employee(id),
        benefit_id INTEGER NOT NULL REFERENCES benefit(id),
        start_date TEXT NOT NULL,
        end_date TEXT,
        custom_amount REAL
    )",
    "CREATE TABLE IF NOT EXISTS payroll (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        employee_id INTEGER NOT NULL REFERENCES employee(id),
        gross_salary REAL NOT NULL,
        deductions REAL NOT NULL,
        net_salary REAL NOT NULL,
        reference_month TEXT NOT NULL
    )",
];

pub async fn init_db(database_url: &str) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .context("invalid DATABASE_URL")?
        .create_if_missing(true);

    let pool = SqlitePool::connect_with(options)
        .await
        .context("failed to connect to database")?;

    create_schema(&pool).await?;
    Ok(pool)
}

/// Tables are created at startup if they do not exist yet.
pub async fn create_schema(pool: &SqlitePool) -> anyhow::Result<()> {
    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(pool)
            .await
            .context("failed to create schema")?;
    }
    Ok(())
}
