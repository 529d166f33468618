//! Row mapping traits and utilities.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::{BuildError, BuildResult};
use crate::value::Value;

/// One result row: a shared column header plus this row's values.
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    columns: Arc<[String]>,
    values: Vec<Value>,
}

impl Row {
    pub fn new(columns: Arc<[String]>, values: Vec<Value>) -> Self {
        Self { columns, values }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Raw access by column name.
    pub fn get(&self, column: &str) -> Option<&Value> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.values.get(idx)
    }

    /// Typed access by column name, with driver-style coercions.
    pub fn try_get<T: FromValue>(&self, column: &str) -> BuildResult<T> {
        let Some(value) = self.get(column) else {
            return Err(BuildError::decode(column, "no such column"));
        };
        T::from_value(value).map_err(|message| BuildError::decode(column, message))
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

/// Conversion from one row value into a field type.
///
/// Coercions mirror what a text-protocol MySQL driver hands back: numbers
/// may arrive as byte strings and parse on demand, integers widen into
/// floats and strings, and a positive integer reads as `true`.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Result<Self, String>;
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Result<Self, String> {
        match value {
            Value::Int(i) => Ok(*i),
            Value::Uint(u) => i64::try_from(*u).map_err(|_| format!("{u} overflows i64")),
            Value::Str(s) => parse_num(s),
            Value::Bytes(b) => parse_bytes(b),
            other => Err(mismatch(other, "an integer")),
        }
    }
}

impl FromValue for i32 {
    fn from_value(value: &Value) -> Result<Self, String> {
        let wide = i64::from_value(value)?;
        i32::try_from(wide).map_err(|_| format!("{wide} overflows i32"))
    }
}

impl FromValue for u64 {
    fn from_value(value: &Value) -> Result<Self, String> {
        match value {
            Value::Int(i) => u64::try_from(*i).map_err(|_| format!("{i} is negative")),
            Value::Uint(u) => Ok(*u),
            Value::Str(s) => parse_num(s),
            Value::Bytes(b) => parse_bytes(b),
            other => Err(mismatch(other, "an unsigned integer")),
        }
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Result<Self, String> {
        match value {
            Value::Float(f) => Ok(*f),
            Value::Int(i) => Ok(*i as f64),
            Value::Uint(u) => Ok(*u as f64),
            Value::Str(s) => parse_num(s),
            Value::Bytes(b) => parse_bytes(b),
            other => Err(mismatch(other, "a float")),
        }
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self, String> {
        match value {
            Value::Bool(b) => Ok(*b),
            Value::Int(i) => Ok(*i > 0),
            Value::Uint(u) => Ok(*u > 0),
            Value::Str(s) => parse_bool(s),
            Value::Bytes(b) => {
                let s = std::str::from_utf8(b).map_err(|e| e.to_string())?;
                parse_bool(s)
            }
            other => Err(mismatch(other, "a bool")),
        }
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self, String> {
        match value {
            Value::Str(s) => Ok(s.clone()),
            Value::Bytes(b) => String::from_utf8(b.clone()).map_err(|e| e.to_string()),
            Value::Int(i) => Ok(i.to_string()),
            Value::Uint(u) => Ok(u.to_string()),
            Value::Float(f) => Ok(f.to_string()),
            other => Err(mismatch(other, "a string")),
        }
    }
}

impl FromValue for Vec<u8> {
    fn from_value(value: &Value) -> Result<Self, String> {
        match value {
            Value::Bytes(b) => Ok(b.clone()),
            Value::Str(s) => Ok(s.clone().into_bytes()),
            other => Err(mismatch(other, "a byte string")),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Result<Self, String> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

fn parse_num<T: std::str::FromStr>(s: &str) -> Result<T, String> {
    s.trim()
        .parse()
        .map_err(|_| format!("cannot parse {s:?} as a number"))
}

fn parse_bytes<T: std::str::FromStr>(b: &[u8]) -> Result<T, String> {
    let s = std::str::from_utf8(b).map_err(|e| e.to_string())?;
    parse_num(s)
}

fn parse_bool(s: &str) -> Result<bool, String> {
    match s.trim() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(format!("cannot parse {other:?} as a bool")),
    }
}

fn mismatch(value: &Value, expected: &str) -> String {
    format!("expected {expected}, got {value:?}")
}

/// Trait for converting a result row into a Rust struct.
///
/// Column-to-field mapping lives in each impl; there is no process-global
/// naming configuration.
pub trait FromRow: Sized {
    fn from_row(row: &Row) -> BuildResult<Self>;
}

/// Map every row.
pub fn scan_all<T: FromRow>(rows: &[Row]) -> BuildResult<Vec<T>> {
    rows.iter().map(T::from_row).collect()
}

/// Map the first row, failing when there is none.
pub fn scan_one<T: FromRow>(rows: &[Row]) -> BuildResult<T> {
    let Some(first) = rows.first() else {
        return Err(BuildError::EmptyResult);
    };
    T::from_row(first)
}

/// Turn rows into plain column-to-value maps.
pub fn scan_maps(rows: Vec<Row>) -> Vec<BTreeMap<String, Value>> {
    rows.into_iter()
        .map(|row| {
            let columns = Arc::clone(&row.columns);
            columns
                .iter()
                .cloned()
                .zip(row.into_values())
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct User {
        id: i64,
        name: String,
        age: Option<i32>,
    }

    impl FromRow for User {
        fn from_row(row: &Row) -> BuildResult<Self> {
            Ok(User {
                id: row.try_get("id")?,
                name: row.try_get("name")?,
                age: row.try_get("age")?,
            })
        }
    }

    fn sample_rows() -> Vec<Row> {
        let columns: Arc<[String]> = vec!["id".to_owned(), "name".to_owned(), "age".to_owned()].into();
        vec![
            Row::new(
                Arc::clone(&columns),
                vec![Value::Int(1), Value::Bytes(b"deen".to_vec()), Value::Int(23)],
            ),
            Row::new(
                Arc::clone(&columns),
                vec![Value::Bytes(b"2".to_vec()), Value::Str("caibirdme".into()), Value::Null],
            ),
        ]
    }

    #[test]
    fn scan_all_coerces_driver_values() {
        let users: Vec<User> = scan_all(&sample_rows()).unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].id, 1);
        assert_eq!(users[0].name, "deen");
        assert_eq!(users[0].age, Some(23));
        assert_eq!(users[1].id, 2);
        assert_eq!(users[1].age, None);
    }

    #[test]
    fn scan_one_requires_a_row() {
        let user: User = scan_one(&sample_rows()).unwrap();
        assert_eq!(user.name, "deen");
        assert_eq!(
            scan_one::<User>(&[]).err(),
            Some(BuildError::EmptyResult)
        );
    }

    #[test]
    fn scan_maps_preserves_values() {
        let maps = scan_maps(sample_rows());
        assert_eq!(maps[0].get("id"), Some(&Value::Int(1)));
        assert_eq!(maps[1].get("age"), Some(&Value::Null));
    }

    #[test]
    fn positive_int_reads_as_true() {
        assert_eq!(bool::from_value(&Value::Int(5)), Ok(true));
        assert_eq!(bool::from_value(&Value::Int(0)), Ok(false));
        assert_eq!(bool::from_value(&Value::Str("true".into())), Ok(true));
    }

    #[test]
    fn numeric_widening_and_errors() {
        assert_eq!(f64::from_value(&Value::Int(3)), Ok(3.0));
        assert_eq!(String::from_value(&Value::Int(3)), Ok("3".to_owned()));
        assert!(i64::from_value(&Value::Float(1.5)).is_err());
        assert!(i32::from_value(&Value::Int(i64::MAX)).is_err());
    }

    #[test]
    fn missing_column_is_a_decode_error() {
        let row = Row::new(vec!["id".to_owned()].into(), vec![Value::Int(1)]);
        let err = row.try_get::<i64>("nope").unwrap_err();
        assert!(matches!(err, BuildError::Decode { .. }));
    }
}
