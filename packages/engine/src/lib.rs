mod backend;
mod config;
mod connection;
mod error;
pub mod errors;
pub mod sql;
mod types;

pub use backend::IseriesBackend;
pub use config::{RewriteOptions, DEFAULT_DUMMY_TABLE};
pub use connection::{open_connection, Connection, OpenConnectionConfig};
pub use error::IseriesError;
pub use errors::{backend_error, ErrorCode};
pub use sql::{emulate_exists, quote_value, rewrite_sql, rewrite_statement};
pub use types::{QueryResult, Statement, Value};
