//! INSERT family assembly.

use crate::error::{BuildError, BuildResult};
use crate::predicate::placeholders;
use crate::spec::{Record, Spec};
use crate::value::Value;

#[derive(Clone, Copy)]
enum InsertKind {
    Insert,
    Ignore,
    Replace,
}

impl InsertKind {
    fn keyword(self) -> &'static str {
        match self {
            InsertKind::Insert => "INSERT INTO",
            InsertKind::Ignore => "INSERT IGNORE INTO",
            InsertKind::Replace => "REPLACE INTO",
        }
    }
}

fn assemble(kind: InsertKind, table: &str, data: &[Record]) -> BuildResult<(String, Vec<Value>)> {
    let Some(first) = data.first() else {
        return Err(BuildError::EmptyInsertData);
    };
    // Records are sorted maps, so the field list from the first record is
    // already in lexicographic order.
    let fields: Vec<&str> = first.keys().map(String::as_str).collect();
    let mut args = Vec::with_capacity(data.len() * fields.len());
    let mut groups = Vec::with_capacity(data.len());
    let group = format!("({})", placeholders(fields.len()));
    for record in data {
        if record.len() != fields.len() {
            return Err(BuildError::DataShapeMismatch);
        }
        for &field in &fields {
            let Some(value) = record.get(field) else {
                return Err(BuildError::DataShapeMismatch);
            };
            args.push(value.clone());
        }
        groups.push(group.clone());
    }

    let sql = format!(
        "{} {} ({}) VALUES {}",
        kind.keyword(),
        table,
        fields.join(","),
        groups.join(",")
    );
    tracing::debug!(%sql, args = args.len(), "built insert statement");
    Ok((sql, args))
}

/// Assemble a multi-row `INSERT INTO` statement. Every record must carry
/// exactly the first record's field set.
pub fn build_insert(table: &str, data: &[Record]) -> BuildResult<(String, Vec<Value>)> {
    assemble(InsertKind::Insert, table, data)
}

/// Assemble an `INSERT IGNORE INTO` statement.
pub fn build_insert_ignore(table: &str, data: &[Record]) -> BuildResult<(String, Vec<Value>)> {
    assemble(InsertKind::Ignore, table, data)
}

/// Assemble a `REPLACE INTO` statement.
pub fn build_replace_insert(table: &str, data: &[Record]) -> BuildResult<(String, Vec<Value>)> {
    assemble(InsertKind::Replace, table, data)
}

/// Assemble `INSERT .. ON DUPLICATE KEY UPDATE ..`, with the update map
/// resolved exactly like an UPDATE SET clause.
pub fn build_insert_on_duplicate(
    table: &str,
    data: &[Record],
    update: &Spec,
) -> BuildResult<(String, Vec<Value>)> {
    let (insert_sql, mut args) = assemble(InsertKind::Insert, table, data)?;
    let (set_sql, set_args) = super::update::resolve_set(update)?;
    let sql = format!("{insert_sql} ON DUPLICATE KEY UPDATE {set_sql}");
    args.extend(set_args);
    Ok((sql, args))
}
