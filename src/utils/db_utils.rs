use actix_web::error::ErrorBadRequest;
use chrono::NaiveDate;
use sqlx::Sqlite;

/// ===============================
/// SQL bindable value enum
/// ===============================
#[derive(Debug)]
pub enum SqlValue {
    String(String),
    I64(i64),
    F64(f64),
    Bool(bool),
    Date(NaiveDate),
    Null,
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::String(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::String(v.to_owned())
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::I64(v)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::F64(v)
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        SqlValue::Bool(v)
    }
}

impl From<NaiveDate> for SqlValue {
    fn from(v: NaiveDate) -> Self {
        SqlValue::Date(v)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => SqlValue::Null,
        }
    }
}

/// ===============================
/// SQL update container
/// ===============================
#[derive(Debug)]
pub struct SqlUpdate {
    pub sql: String,
    pub values: Vec<SqlValue>,
}

/// ===============================
/// Typed dynamic UPDATE builder
/// ===============================
///
/// Handlers enumerate the fields present in the update payload explicitly;
/// only pushed columns end up in the SET clause.
#[derive(Debug)]
pub struct UpdateBuilder {
    table: &'static str,
    columns: Vec<&'static str>,
    values: Vec<SqlValue>,
}

impl UpdateBuilder {
    pub fn new(table: &'static str) -> Self {
        Self {
            table,
            columns: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn set(&mut self, column: &'static str, value: impl Into<SqlValue>) {
        self.columns.push(column);
        self.values.push(value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn build(mut self, id: i64) -> Result<SqlUpdate, actix_web::Error> {
        if self.is_empty() {
            return Err(ErrorBadRequest("No fields provided for update"));
        }

        let set_clause = self
            .columns
            .iter()
            .map(|c| format!("{} = ?", c))
            .collect::<Vec<_>>()
            .join(", ");

        let sql = format!("UPDATE {} SET {} WHERE id = ?", self.table, set_clause);
        self.values.push(SqlValue::I64(id));

        Ok(SqlUpdate {
            sql,
            values: self.values,
        })
    }
}

/// ===============================
/// Execute the update
/// ===============================
pub async fn execute_update<'e, E>(executor: E, update: SqlUpdate) -> Result<u64, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let mut query = sqlx::query(&update.sql);

    for value in &update.values {
        query = match value {
            SqlValue::String(v) => query.bind(v.clone()),
            SqlValue::I64(v) => query.bind(*v),
            SqlValue::F64(v) => query.bind(*v),
            SqlValue::Bool(v) => query.bind(*v),
            SqlValue::Date(v) => query.bind(*v),
            SqlValue::Null => query.bind(None::<String>),
        };
    }

    let result = query.execute(executor).await?;
    Ok(result.rows_affected())
}

/// Bind a list of `SqlValue`s onto a runtime query, in order.
pub fn bind_values<'q, O>(
    mut query: sqlx::query::QueryAs<'q, Sqlite, O, sqlx::sqlite::SqliteArguments<'q>>,
    values: &[SqlValue],
) -> sqlx::query::QueryAs<'q, Sqlite, O, sqlx::sqlite::SqliteArguments<'q>> {
    for value in values {
        query = match value {
            SqlValue::String(v) => query.bind(v.clone()),
            SqlValue::I64(v) => query.bind(*v),
            SqlValue::F64(v) => query.bind(*v),
            SqlValue::Bool(v) => query.bind(*v),
            SqlValue::Date(v) => query.bind(*v),
            SqlValue::Null => query.bind(None::<String>),
        };
    }
    query
}

/// Existence check used by the handlers' referential validations.
pub async fn row_exists<'e, E>(executor: E, table: &str, id: i64) -> Result<bool, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let sql = format!("SELECT COUNT(*) FROM {} WHERE id = ?", table);
    let count: i64 = sqlx::query_scalar(&sql).bind(id).fetch_one(executor).await?;
    Ok(count > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_set_clause_from_pushed_fields_only() {
        let mut builder = UpdateBuilder::new("benefit");
        builder.set("name", "Meal voucher");
        builder.set("amount", 150.0);

        let update = builder.build(7).expect("non-empty update");
        assert_eq!(update.sql, "UPDATE benefit SET name = ?, amount = ? WHERE id = ?");
        assert_eq!(update.values.len(), 3);
        assert!(matches!(update.values[2], SqlValue::I64(7)));
    }

    #[test]
    fn rejects_empty_update() {
        let builder = UpdateBuilder::new("employee");
        assert!(builder.build(1).is_err());
    }

    #[test]
    fn option_none_binds_null() {
        let mut builder = UpdateBuilder::new("department");
        builder.set("manager_id", None::<i64>);

        let update = builder.build(3).expect("non-empty update");
        assert!(matches!(update.values[0], SqlValue::Null));
    }
}
