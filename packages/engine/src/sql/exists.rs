use crate::config::{RewriteOptions, DEFAULT_DUMMY_TABLE};
use crate::{Statement, Value};

/// Turns `subquery` into a scalar 0/1 expression.
///
/// Db2 for i cannot select `EXISTS(...)` as a value, so the test is spelled as
/// a UNION over a one-row table where exactly one branch survives. The
/// subquery text appears twice, so its parameters are repeated: first run for
/// the `EXISTS` branch, second run for the `NOT EXISTS` branch.
pub fn emulate_exists(subquery_sql: &str, subquery_params: &[Value]) -> (String, Vec<Value>) {
    emulate_exists_over(DEFAULT_DUMMY_TABLE, subquery_sql, subquery_params)
}

pub fn emulate_exists_statement(subquery: &Statement, options: &RewriteOptions) -> Statement {
    let (sql, params) = emulate_exists_over(&options.dummy_table, &subquery.sql, &subquery.params);
    Statement { sql, params }
}

fn emulate_exists_over(
    dummy_table: &str,
    subquery_sql: &str,
    subquery_params: &[Value],
) -> (String, Vec<Value>) {
    let sql = format!(
        "(SELECT 1 FROM {dummy_table} WHERE EXISTS({subquery_sql}) \
         UNION \
         SELECT 0 FROM {dummy_table} WHERE NOT EXISTS({subquery_sql}))"
    );
    let mut params = Vec::with_capacity(subquery_params.len() * 2);
    params.extend_from_slice(subquery_params);
    params.extend_from_slice(subquery_params);
    (sql, params)
}
