use crate::config::RewriteOptions;
use crate::errors::marker_count_mismatch_error;
use crate::sql::classifier::classify;
use crate::sql::rewriter::rewrite;
use crate::sql::scanner::{scan, SpanKind};
use crate::{IseriesError, Statement, Value};

/// Prepares a statement for the driver: every projection marker becomes a
/// literal, every predicate marker stays bound.
///
/// The call is atomic. Either the whole statement is rewritten or an error is
/// returned and nothing should be sent to the driver.
pub fn rewrite_statement(
    statement: &Statement,
    options: &RewriteOptions,
) -> Result<Statement, IseriesError> {
    match rewrite_checked(statement, options) {
        Ok(rewritten) => Ok(rewritten),
        Err(error) => {
            tracing::warn!(
                code = error.code.as_str(),
                offset = ?error.offset,
                sql = %statement.sql,
                "rejected statement before dispatch"
            );
            Err(error)
        }
    }
}

pub fn rewrite_sql(sql: &str, params: &[Value]) -> Result<Statement, IseriesError> {
    rewrite_statement(
        &Statement::new(sql, params.to_vec()),
        &RewriteOptions::default(),
    )
}

fn rewrite_checked(
    statement: &Statement,
    options: &RewriteOptions,
) -> Result<Statement, IseriesError> {
    let spans = scan(&statement.sql)?;
    let found = spans
        .iter()
        .filter(|span| span.kind == SpanKind::Marker)
        .count();
    if found != statement.params.len() {
        return Err(marker_count_mismatch_error(found, statement.params.len()));
    }

    let classification = classify(&statement.sql, &spans)?;
    classification.ensure_uniform_branches()?;

    if !options.inline_projection_markers || classification.projection_count() == 0 {
        return Ok(statement.clone());
    }

    let rewritten = rewrite(&statement.sql, &statement.params, &classification.markers);
    tracing::debug!(
        inlined = rewritten.inlined,
        bound = rewritten.params.len(),
        branches = classification.branches,
        "inlined projection markers"
    );
    tracing::trace!(sql = %rewritten.sql, "rewritten statement");

    Ok(Statement {
        sql: rewritten.sql,
        params: rewritten.params,
    })
}
