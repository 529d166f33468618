//! SELECT assembly and the reserved `_` modifiers.

use crate::error::{BuildError, BuildResult};
use crate::predicate::{Clause, connect, split_key, where_clauses};
use crate::spec::{self, Spec, SpecValue};
use crate::value::Value;

/// Row lock requested through `_lockMode`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LockMode {
    /// `LOCK IN SHARE MODE`
    Share,
    /// `FOR UPDATE`
    Exclusive,
}

impl LockMode {
    fn parse(s: &str) -> Option<LockMode> {
        match s {
            "share" => Some(LockMode::Share),
            "exclusive" => Some(LockMode::Exclusive),
            _ => None,
        }
    }

    fn clause(self) -> &'static str {
        match self {
            LockMode::Share => " LOCK IN SHARE MODE",
            LockMode::Exclusive => " FOR UPDATE",
        }
    }
}

#[derive(Default)]
struct Modifiers {
    order_by: Vec<String>,
    group_by: Option<String>,
    limit: Option<(u64, u64)>,
    having: Option<Spec>,
    lock: Option<LockMode>,
}

/// Strip and validate the reserved modifiers, leaving a pure condition map.
/// The caller's spec is untouched; all work happens on a copy.
fn extract(where_spec: &Spec) -> BuildResult<(Spec, Modifiers)> {
    let mut stripped = where_spec.clone();
    let mut modifiers = Modifiers::default();

    if let Some(value) = stripped.remove(spec::KEY_ORDER_BY) {
        modifiers.order_by = parse_order_by(&value)?;
    }
    if let Some(value) = stripped.remove(spec::KEY_GROUP_BY) {
        let SpecValue::Scalar(Value::Str(group)) = value else {
            return Err(BuildError::GroupByType);
        };
        if !group.trim().is_empty() {
            modifiers.group_by = Some(group);
        }
    }
    // _having rides along only when grouping; otherwise it is dropped
    // without validation, same as leaving it out.
    let having = stripped.remove(spec::KEY_HAVING);
    if modifiers.group_by.is_some()
        && let Some(value) = having
    {
        modifiers.having = Some(resolve_having(value)?);
    }
    if let Some(value) = stripped.remove(spec::KEY_LIMIT) {
        modifiers.limit = Some(parse_limit(&value)?);
    }
    if let Some(value) = stripped.remove(spec::KEY_LOCK_MODE) {
        let SpecValue::Scalar(Value::Str(mode)) = value else {
            return Err(BuildError::value_shape(spec::KEY_LOCK_MODE, "a string"));
        };
        let Some(lock) = LockMode::parse(&mode) else {
            return Err(BuildError::LockMode(mode));
        };
        modifiers.lock = Some(lock);
    }

    Ok((stripped, modifiers))
}

fn parse_order_by(value: &SpecValue) -> BuildResult<Vec<String>> {
    let SpecValue::Scalar(Value::Str(raw)) = value else {
        return Err(BuildError::OrderBySpec);
    };
    let mut items = Vec::new();
    for item in raw.split(',') {
        let item = item.trim();
        if item.is_empty() {
            continue;
        }
        match item.split_once(char::is_whitespace) {
            // No direction: a literal expression such as RAND().
            None => items.push(item.to_owned()),
            Some((field, direction)) => {
                let direction = direction.trim();
                let normalized = if direction.eq_ignore_ascii_case("asc") {
                    "ASC"
                } else if direction.eq_ignore_ascii_case("desc") {
                    "DESC"
                } else {
                    return Err(BuildError::OrderDirection(direction.to_owned()));
                };
                items.push(format!("{field} {normalized}"));
            }
        }
    }
    Ok(items)
}

fn parse_limit(value: &SpecValue) -> BuildResult<(u64, u64)> {
    let SpecValue::List(values) = value else {
        return Err(BuildError::LimitType);
    };
    let mut bounds = Vec::with_capacity(values.len());
    for v in values {
        match v.as_limit() {
            Some(n) => bounds.push(n),
            None => return Err(BuildError::LimitType),
        }
    }
    match bounds[..] {
        [count] => Ok((0, count)),
        [offset, count] => Ok((offset, count)),
        _ => Err(BuildError::LimitSpec),
    }
}

/// Check a `_having` specification: only plain comparison and set-membership
/// entries are allowed, nothing structural and no modifiers.
fn resolve_having(value: SpecValue) -> BuildResult<Spec> {
    let SpecValue::Nested(having) = value else {
        return Err(BuildError::HavingShape);
    };
    for (key, value) in having.iter() {
        if key.starts_with('_') {
            return Err(BuildError::HavingOperator);
        }
        let (_, op) = split_key(key, value)?;
        if !op.allowed_in_having() {
            return Err(BuildError::HavingOperator);
        }
    }
    Ok(having)
}

/// Assemble a SELECT statement.
///
/// `SELECT <fields|*> FROM <table> [WHERE (..)] [GROUP BY ..] [HAVING (..)]
/// [ORDER BY ..] [LIMIT ?,?] [lock]`, argument order WHERE, HAVING,
/// LIMIT(offset, count).
pub fn build_select(
    table: &str,
    where_spec: &Spec,
    fields: &[&str],
) -> BuildResult<(String, Vec<Value>)> {
    let (stripped, modifiers) = extract(where_spec)?;

    let mut conditions = where_clauses(&stripped)?;
    if let Some(having) = &modifiers.having {
        conditions.push(Clause::Separator);
        conditions.extend(where_clauses(having)?);
    }
    let split = conditions
        .iter()
        .rposition(|c| matches!(c, Clause::Separator));
    let (where_part, having_part) = match split {
        Some(i) => (&conditions[..i], &conditions[i + 1..]),
        None => (&conditions[..], &[][..]),
    };
    let (where_sql, mut args) = connect("AND", where_part);
    let (having_sql, having_args) = connect("AND", having_part);

    let columns = if fields.is_empty() {
        "*".to_owned()
    } else {
        fields.join(",")
    };
    let mut sql = format!("SELECT {columns} FROM {table}");
    if !where_sql.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&where_sql);
    }
    if let Some(group) = &modifiers.group_by {
        sql.push_str(" GROUP BY ");
        sql.push_str(group);
    }
    if !having_sql.is_empty() {
        sql.push_str(" HAVING ");
        sql.push_str(&having_sql);
        args.extend(having_args);
    }
    if !modifiers.order_by.is_empty() {
        sql.push_str(" ORDER BY ");
        sql.push_str(&modifiers.order_by.join(","));
    }
    if let Some((offset, count)) = modifiers.limit {
        sql.push_str(" LIMIT ?,?");
        args.push(Value::Uint(offset));
        args.push(Value::Uint(count));
    }
    if let Some(lock) = modifiers.lock {
        sql.push_str(lock.clause());
    }

    tracing::debug!(%sql, args = args.len(), "built select statement");
    Ok((sql, args))
}
