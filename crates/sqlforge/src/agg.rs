//! Aggregate query helper.

use crate::build::build_select;
use crate::client::Executor;
use crate::error::BuildResult;
use crate::spec::Spec;
use crate::value::Value;

/// An aggregate function over one column (or `*` for count).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Aggregate {
    Count(String),
    Sum(String),
    Avg(String),
    Max(String),
    Min(String),
}

impl Aggregate {
    pub fn count(column: impl Into<String>) -> Self {
        Aggregate::Count(column.into())
    }

    pub fn sum(column: impl Into<String>) -> Self {
        Aggregate::Sum(column.into())
    }

    pub fn avg(column: impl Into<String>) -> Self {
        Aggregate::Avg(column.into())
    }

    pub fn max(column: impl Into<String>) -> Self {
        Aggregate::Max(column.into())
    }

    pub fn min(column: impl Into<String>) -> Self {
        Aggregate::Min(column.into())
    }

    fn symbol(&self) -> String {
        match self {
            Aggregate::Count(c) => format!("count({c})"),
            Aggregate::Sum(c) => format!("sum({c})"),
            Aggregate::Avg(c) => format!("avg({c})"),
            Aggregate::Max(c) => format!("max({c})"),
            Aggregate::Min(c) => format!("min({c})"),
        }
    }
}

/// The single value an aggregate query returns.
///
/// Drivers hand aggregates back in whatever shape they like (integers,
/// floats, byte strings), so access goes through lenient coercions. A query
/// with no rows coerces to zero.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AggregateResult(Option<Value>);

impl AggregateResult {
    pub fn as_i64(&self) -> i64 {
        self.0.as_ref().map(Value::coerce_i64).unwrap_or(0)
    }

    pub fn as_f64(&self) -> f64 {
        self.0.as_ref().map(Value::coerce_f64).unwrap_or(0.0)
    }
}

/// Compile and run `SELECT <aggregate> FROM <table> [WHERE ..]`, returning
/// the first value of the first row.
pub async fn aggregate_query<E: Executor>(
    executor: &E,
    table: &str,
    where_spec: &Spec,
    aggregate: &Aggregate,
) -> BuildResult<AggregateResult> {
    let symbol = aggregate.symbol();
    let (sql, args) = build_select(table, where_spec, &[symbol.as_str()])?;
    let rows = executor.query(&sql, &args).await?;
    let value = rows
        .into_iter()
        .next()
        .and_then(|row| row.into_values().into_iter().next());
    Ok(AggregateResult(value))
}
