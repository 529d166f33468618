//! Scalar argument values bound to statement placeholders.
//!
//! Every `?` a compiled statement emits is backed by exactly one [`Value`] in
//! the argument vector. The variant set is closed: callers pick a variant at
//! the edge instead of the compiler inspecting arbitrary types at run time.

/// A single bound argument.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// SQL NULL
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
}

impl Value {
    /// True for the values `omit_empty` treats as absent: NULL, false,
    /// numeric zero, the empty string and the empty byte string.
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Bool(b) => !b,
            Value::Int(i) => *i == 0,
            Value::Uint(u) => *u == 0,
            Value::Float(f) => *f == 0.0,
            Value::Str(s) => s.is_empty(),
            Value::Bytes(b) => b.is_empty(),
        }
    }

    /// Interpret the value as a LIMIT operand. Only non-negative integers
    /// qualify; everything else is rejected by the caller.
    pub fn as_limit(&self) -> Option<u64> {
        match self {
            Value::Int(i) if *i >= 0 => Some(*i as u64),
            Value::Uint(u) => Some(*u),
            _ => None,
        }
    }

    /// Lenient signed-integer coercion. Floats truncate, strings and byte
    /// strings parse (integer first, then float), everything else is zero.
    pub fn coerce_i64(&self) -> i64 {
        match self {
            Value::Int(i) => *i,
            Value::Uint(u) => *u as i64,
            Value::Float(f) => *f as i64,
            Value::Bool(b) => *b as i64,
            Value::Str(s) => parse_i64(s),
            Value::Bytes(b) => std::str::from_utf8(b).map(parse_i64).unwrap_or(0),
            Value::Null => 0,
        }
    }

    /// Lenient float coercion, same rules as [`Value::coerce_i64`].
    pub fn coerce_f64(&self) -> f64 {
        match self {
            Value::Int(i) => *i as f64,
            Value::Uint(u) => *u as f64,
            Value::Float(f) => *f,
            Value::Bool(b) => *b as i64 as f64,
            Value::Str(s) => s.trim().parse().unwrap_or(0.0),
            Value::Bytes(b) => std::str::from_utf8(b)
                .ok()
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(0.0),
            Value::Null => 0.0,
        }
    }

    /// Convert a JSON scalar. Arrays and objects have no scalar form and
    /// yield `None`.
    pub fn from_json(v: &serde_json::Value) -> Option<Value> {
        match v {
            serde_json::Value::Null => Some(Value::Null),
            serde_json::Value::Bool(b) => Some(Value::Bool(*b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(Value::Int(i))
                } else if let Some(u) = n.as_u64() {
                    Some(Value::Uint(u))
                } else {
                    n.as_f64().map(Value::Float)
                }
            }
            serde_json::Value::String(s) => Some(Value::Str(s.clone())),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => None,
        }
    }
}

fn parse_i64(s: &str) -> i64 {
    let s = s.trim();
    s.parse::<i64>()
        .or_else(|_| s.parse::<f64>().map(|f| f as i64))
        .unwrap_or(0)
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Uint(v as u64)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Uint(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

impl From<&Value> for serde_json::Value {
    fn from(v: &Value) -> Self {
        match v {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::from(*i),
            Value::Uint(u) => serde_json::Value::from(*u),
            Value::Float(f) => serde_json::Value::from(*f),
            Value::Str(s) => serde_json::Value::String(s.clone()),
            Value::Bytes(b) => serde_json::Value::String(String::from_utf8_lossy(b).into_owned()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_values() {
        assert!(Value::Null.is_zero());
        assert!(Value::Int(0).is_zero());
        assert!(Value::Str(String::new()).is_zero());
        assert!(!Value::Int(1).is_zero());
        assert!(!Value::Str(" ".into()).is_zero());
    }

    #[test]
    fn limit_operands() {
        assert_eq!(Value::Int(5).as_limit(), Some(5));
        assert_eq!(Value::Uint(0).as_limit(), Some(0));
        assert_eq!(Value::Int(-1).as_limit(), None);
        assert_eq!(Value::Str("5".into()).as_limit(), None);
    }

    #[test]
    fn coerce_numeric_strings() {
        assert_eq!(Value::Str("42".into()).coerce_i64(), 42);
        assert_eq!(Value::Str("3.9".into()).coerce_i64(), 3);
        assert_eq!(Value::Bytes(b"7".to_vec()).coerce_i64(), 7);
        assert_eq!(Value::Str("nope".into()).coerce_i64(), 0);
        assert_eq!(Value::Float(2.5).coerce_i64(), 2);
        assert_eq!(Value::Str("2.5".into()).coerce_f64(), 2.5);
    }

    #[test]
    fn from_json_scalars_only() {
        assert_eq!(
            Value::from_json(&serde_json::json!(3)),
            Some(Value::Int(3))
        );
        assert_eq!(
            Value::from_json(&serde_json::json!("a")),
            Some(Value::Str("a".into()))
        );
        assert_eq!(Value::from_json(&serde_json::json!([1])), None);
    }
}
