use crate::config::RewriteOptions;
use crate::errors::invalid_options_error;
use crate::sql::{emulate_exists_statement, rewrite_statement};
use crate::{IseriesBackend, IseriesError, QueryResult, Statement, Value};

pub struct OpenConnectionConfig {
    pub backend: Box<dyn IseriesBackend>,
    pub options: RewriteOptions,
}

impl OpenConnectionConfig {
    pub fn new(backend: Box<dyn IseriesBackend>) -> Self {
        Self {
            backend,
            options: RewriteOptions::default(),
        }
    }
}

pub struct Connection {
    backend: Box<dyn IseriesBackend>,
    options: RewriteOptions,
}

pub async fn open_connection(config: OpenConnectionConfig) -> Result<Connection, IseriesError> {
    if config.options.dummy_table.trim().is_empty() {
        return Err(invalid_options_error(
            "dummy_table must name a one-row table",
        ));
    }
    Ok(Connection {
        backend: config.backend,
        options: config.options,
    })
}

impl Connection {
    pub fn options(&self) -> &RewriteOptions {
        &self.options
    }

    pub async fn execute(&self, sql: &str, params: &[Value]) -> Result<QueryResult, IseriesError> {
        let statement = rewrite_statement(&Statement::new(sql, params.to_vec()), &self.options)?;
        self.backend.execute(&statement.sql, &statement.params).await
    }

    /// Wraps a compiled subquery into a 0/1 column expression for this connection's dummy table.
    pub fn exists_expression(&self, subquery_sql: &str, params: &[Value]) -> Statement {
        emulate_exists_statement(&Statement::new(subquery_sql, params.to_vec()), &self.options)
    }
}
