//! Composite-key parsing and the operator registry.

use crate::error::{BuildError, BuildResult};
use crate::spec::SpecValue;

/// Condition operator.
///
/// Variant order is the output precedence order: when a specification holds
/// several operator groups, they render in this order. `!=` and `<>` both
/// parse to [`Operator::Ne`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Operator {
    Eq,
    In,
    Ne,
    NotIn,
    Gt,
    Gte,
    Lt,
    Lte,
    Like,
    NotLike,
    Between,
    NotBetween,
    /// Null check, forced by a marker value rather than a key suffix.
    Null,
}

impl Operator {
    /// Match a normalized operator token (lowercase, single inner spaces).
    pub(crate) fn parse(token: &str) -> Option<Operator> {
        let op = match token {
            "=" => Operator::Eq,
            "in" => Operator::In,
            "!=" | "<>" => Operator::Ne,
            "not in" => Operator::NotIn,
            ">" => Operator::Gt,
            ">=" => Operator::Gte,
            "<" => Operator::Lt,
            "<=" => Operator::Lte,
            "like" => Operator::Like,
            "not like" => Operator::NotLike,
            "between" => Operator::Between,
            "not between" => Operator::NotBetween,
            _ => return None,
        };
        Some(op)
    }

    /// The comparison symbol for the binary comparison operators.
    pub(crate) fn symbol(self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Ne => "!=",
            Operator::Gt => ">",
            Operator::Gte => ">=",
            Operator::Lt => "<",
            Operator::Lte => "<=",
            _ => "",
        }
    }

    /// Operators allowed inside a `_having` specification: comparisons and
    /// set membership, nothing structural.
    pub(crate) fn allowed_in_having(self) -> bool {
        matches!(
            self,
            Operator::Eq
                | Operator::In
                | Operator::Ne
                | Operator::NotIn
                | Operator::Gt
                | Operator::Gte
                | Operator::Lt
                | Operator::Lte
        )
    }
}

/// Split a composite key into field name and operator.
///
/// The key is trimmed, then split at the first whitespace. Without a suffix
/// the operator is inferred from the value shape: lists mean `IN`, anything
/// else `=`. Suffix matching is case-insensitive and inner whitespace runs
/// collapse to one space, so `"age NOT   IN"` parses. A null-marker value
/// forces the null-check operator no matter what the suffix says.
pub fn split_key(key: &str, value: &SpecValue) -> BuildResult<(String, Operator)> {
    let key = key.trim();
    if key.is_empty() {
        return Err(BuildError::EmptyKey);
    }
    let (field, suffix) = match key.split_once(char::is_whitespace) {
        None => (key, None),
        Some((field, suffix)) => (field, Some(suffix)),
    };
    if let SpecValue::Null(_) = value {
        return Ok((field.to_owned(), Operator::Null));
    }
    let op = match suffix {
        None => {
            if matches!(value, SpecValue::List(_)) {
                Operator::In
            } else {
                Operator::Eq
            }
        }
        Some(suffix) => {
            let token = suffix
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
                .to_lowercase();
            Operator::parse(&token).ok_or(BuildError::UnsupportedOperator(token))?
        }
    };
    Ok((field.to_owned(), op))
}
