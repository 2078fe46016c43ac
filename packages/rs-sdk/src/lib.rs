mod backend;

pub use backend::sqlite::SqliteBackend;
pub use iseries_engine::{
    emulate_exists, open_connection, quote_value, rewrite_sql, Connection, ErrorCode,
    IseriesBackend, IseriesError, OpenConnectionConfig, QueryResult, RewriteOptions, Statement,
    Value,
};
