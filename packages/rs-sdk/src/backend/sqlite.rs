use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use iseries_engine::{backend_error, IseriesBackend, IseriesError, QueryResult, Value};
use rusqlite::{params_from_iter, Connection, Row};

/// Local SQLite engine behind the driver boundary. Booleans are bound as 0/1,
/// the same representation Db2 for i uses.
pub struct SqliteBackend {
    conn: Mutex<Connection>,
}

impl SqliteBackend {
    pub fn in_memory() -> Result<Self, IseriesError> {
        let conn = Connection::open_in_memory().map_err(backend_error)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self, IseriesError> {
        let conn = Connection::open(path).map_err(backend_error)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Runs parameterless statements separated by `;`, bypassing the rewrite pipeline.
    pub fn execute_batch(&self, sql: &str) -> Result<(), IseriesError> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| backend_error("sqlite mutex poisoned"))?;
        conn.execute_batch(sql).map_err(backend_error)
    }
}

#[async_trait(?Send)]
impl IseriesBackend for SqliteBackend {
    async fn execute(&self, sql: &str, params: &[Value]) -> Result<QueryResult, IseriesError> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| backend_error("sqlite mutex poisoned"))?;

        tracing::trace!(params = params.len(), "sqlite execute");
        let mut stmt = conn.prepare(sql).map_err(backend_error)?;
        let columns = stmt
            .column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect::<Vec<_>>();
        let bound_params = params.iter().cloned().map(to_sql_value);
        let mut rows = stmt
            .query(params_from_iter(bound_params))
            .map_err(backend_error)?;
        let mut result_rows = Vec::new();
        while let Some(row) = rows.next().map_err(backend_error)? {
            result_rows.push(map_row(row)?);
        }
        Ok(QueryResult {
            columns,
            rows: result_rows,
        })
    }
}

fn map_row(row: &Row<'_>) -> Result<Vec<Value>, IseriesError> {
    let mut values = Vec::new();
    for idx in 0..row.as_ref().column_count() {
        let value = row.get_ref(idx).map_err(backend_error)?;
        values.push(match value {
            rusqlite::types::ValueRef::Null => Value::Null,
            rusqlite::types::ValueRef::Integer(value) => Value::Integer(value),
            rusqlite::types::ValueRef::Real(value) => Value::Real(value),
            rusqlite::types::ValueRef::Text(value) => {
                Value::Text(String::from_utf8_lossy(value).to_string())
            }
            rusqlite::types::ValueRef::Blob(value) => Value::Blob(value.to_vec()),
        });
    }
    Ok(values)
}

fn to_sql_value(value: Value) -> rusqlite::types::Value {
    match value {
        Value::Null => rusqlite::types::Value::Null,
        Value::Boolean(value) => rusqlite::types::Value::Integer(i64::from(value)),
        Value::Integer(value) => rusqlite::types::Value::Integer(value),
        Value::Real(value) => rusqlite::types::Value::Real(value),
        Value::Text(value) => rusqlite::types::Value::Text(value),
        Value::Blob(value) => rusqlite::types::Value::Blob(value),
    }
}
