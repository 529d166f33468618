//! DELETE assembly.

use crate::error::BuildResult;
use crate::predicate::{connect, where_clauses};
use crate::spec::Spec;
use crate::value::Value;

/// Assemble a DELETE statement: `DELETE FROM <table> [WHERE (..)] [LIMIT ?]`.
pub fn build_delete(table: &str, where_spec: &Spec) -> BuildResult<(String, Vec<Value>)> {
    let mut where_spec = where_spec.clone();
    let limit = super::take_limit(&mut where_spec)?;
    let (where_sql, mut args) = connect("AND", &where_clauses(&where_spec)?);

    let mut sql = format!("DELETE FROM {table}");
    if !where_sql.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&where_sql);
    }
    if let Some(n) = limit
        && n > 0
    {
        sql.push_str(" LIMIT ?");
        args.push(Value::Uint(n));
    }

    tracing::debug!(%sql, args = args.len(), "built delete statement");
    Ok((sql, args))
}
