//! UPDATE assembly and SET-clause resolution.

use crate::error::{BuildError, BuildResult};
use crate::predicate::{connect, where_clauses};
use crate::spec::{self, Spec, SpecValue};
use crate::value::Value;

/// Render the SET clause: `k=?,k2=?` with keys sorted. A raw value embeds
/// its literal, a `_custom_*` entry splices a fragment's own text and args.
pub(crate) fn resolve_set(update: &Spec) -> BuildResult<(String, Vec<Value>)> {
    if update.is_empty() {
        return Err(BuildError::EmptyUpdateData);
    }
    let mut sets = Vec::with_capacity(update.len());
    let mut args = Vec::new();
    for (key, value) in update.iter() {
        if spec::is_custom_key(key) {
            let SpecValue::Fragment(fragment) = value else {
                return Err(BuildError::value_shape(key, "a raw fragment"));
            };
            sets.push(fragment.sql.clone());
            args.extend(fragment.args.iter().cloned());
            continue;
        }
        match value {
            SpecValue::Scalar(v) => {
                sets.push(format!("{key}=?"));
                args.push(v.clone());
            }
            SpecValue::Raw(literal) => sets.push(format!("{key}={literal}")),
            _ => return Err(BuildError::value_shape(key, "a scalar")),
        }
    }
    Ok((sets.join(","), args))
}

/// Assemble an UPDATE statement.
///
/// `UPDATE <table> SET k=?,.. [WHERE (..)] [LIMIT ?]`, argument order SET,
/// WHERE, LIMIT.
pub fn build_update(
    table: &str,
    where_spec: &Spec,
    update: &Spec,
) -> BuildResult<(String, Vec<Value>)> {
    let mut where_spec = where_spec.clone();
    let limit = super::take_limit(&mut where_spec)?;
    let (where_sql, where_args) = connect("AND", &where_clauses(&where_spec)?);
    let (set_sql, mut args) = resolve_set(update)?;

    let mut sql = format!("UPDATE {table} SET {set_sql}");
    if !where_sql.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&where_sql);
    }
    args.extend(where_args);
    if let Some(n) = limit
        && n > 0
    {
        sql.push_str(" LIMIT ?");
        args.push(Value::Uint(n));
    }

    tracing::debug!(%sql, args = args.len(), "built update statement");
    Ok((sql, args))
}
