//! Condition fragment producers.

use std::collections::BTreeMap;

use crate::spec::{Fragment, NullMarker};
use crate::value::Value;

/// Right-hand side of a comparison condition.
#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    /// A placeholder-bound value: `field=?`.
    Bound(Value),
    /// A literal embedded as-is: `modified=UNIX_TIMESTAMP()`.
    Literal(String),
}

/// One shape-checked condition group, ready to render.
///
/// Fields inside a group live in a `BTreeMap`, so every group renders its
/// conditions in lexicographic field order.
#[derive(Clone, Debug, PartialEq)]
pub enum Clause {
    /// Binary comparisons sharing one symbol: `field=?`, `field>=?`.
    Compare {
        symbol: &'static str,
        fields: BTreeMap<String, Operand>,
    },

    /// Set membership: `field IN (?,?)` / `field NOT IN (?,?)`.
    Set {
        negated: bool,
        fields: BTreeMap<String, Vec<Value>>,
    },

    /// Range: `(field BETWEEN ? AND ?)` / `(field NOT BETWEEN ? AND ?)`.
    Between {
        negated: bool,
        fields: BTreeMap<String, (Value, Value)>,
    },

    /// Pattern match: `field LIKE ?` / `field NOT LIKE ?`.
    Match {
        negated: bool,
        fields: BTreeMap<String, Value>,
    },

    /// `field IS NULL` / `field IS NOT NULL`, no bound args.
    NullCheck { fields: BTreeMap<String, NullMarker> },

    /// Caller-supplied SQL spliced verbatim with its own args.
    Raw(Fragment),

    /// OR group: each element is one compiled sub-specification (its clauses
    /// AND-join), elements OR-join, the whole group takes one paren pair.
    /// A compound element is parenthesized, a single condition is not.
    Or(Vec<Vec<Clause>>),

    /// Sentinel splitting WHERE-level from HAVING-level conditions in one
    /// compiled list. Renders nothing.
    Separator,
}

impl Clause {
    /// Append this clause's condition strings and bound args.
    pub fn build(&self, conds: &mut Vec<String>, args: &mut Vec<Value>) {
        match self {
            Clause::Compare { symbol, fields } => {
                for (field, operand) in fields {
                    match operand {
                        Operand::Bound(v) => {
                            conds.push(format!("{field}{symbol}?"));
                            args.push(v.clone());
                        }
                        Operand::Literal(s) => conds.push(format!("{field}{symbol}{s}")),
                    }
                }
            }
            Clause::Set { negated, fields } => {
                let op = if *negated { "NOT IN" } else { "IN" };
                for (field, values) in fields {
                    conds.push(format!("{field} {op} ({})", placeholders(values.len())));
                    args.extend(values.iter().cloned());
                }
            }
            Clause::Between { negated, fields } => {
                let op = if *negated { "NOT BETWEEN" } else { "BETWEEN" };
                for (field, (low, high)) in fields {
                    conds.push(format!("({field} {op} ? AND ?)"));
                    args.push(low.clone());
                    args.push(high.clone());
                }
            }
            Clause::Match { negated, fields } => {
                let op = if *negated { "NOT LIKE" } else { "LIKE" };
                for (field, pattern) in fields {
                    conds.push(format!("{field} {op} ?"));
                    args.push(pattern.clone());
                }
            }
            Clause::NullCheck { fields } => {
                for (field, marker) in fields {
                    conds.push(format!("{field} {}", marker.as_sql()));
                }
            }
            Clause::Raw(fragment) => {
                conds.push(fragment.sql.clone());
                args.extend(fragment.args.iter().cloned());
            }
            Clause::Or(elements) => {
                let mut parts = Vec::with_capacity(elements.len());
                for element in elements {
                    let mut inner = Vec::new();
                    for clause in element {
                        clause.build(&mut inner, args);
                    }
                    match inner.len() {
                        0 => {}
                        1 => parts.push(inner.remove(0)),
                        _ => parts.push(format!("({})", inner.join(" AND "))),
                    }
                }
                if !parts.is_empty() {
                    conds.push(format!("({})", parts.join(" OR ")));
                }
            }
            Clause::Separator => {}
        }
    }
}

/// Render and join clauses with the given connective, wrapping the whole in
/// one paren pair. Empty input yields an empty string.
pub fn connect(connective: &str, clauses: &[Clause]) -> (String, Vec<Value>) {
    let mut conds = Vec::new();
    let mut args = Vec::new();
    for clause in clauses {
        clause.build(&mut conds, &mut args);
    }
    if conds.is_empty() {
        return (String::new(), args);
    }
    let joined = conds.join(&format!(" {connective} "));
    (format!("({joined})"), args)
}

/// `?,?,?` with no spaces, one per value.
pub(crate) fn placeholders(n: usize) -> String {
    let mut s = String::with_capacity(n.saturating_mul(2));
    for i in 0..n {
        if i > 0 {
            s.push(',');
        }
        s.push('?');
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compare(symbol: &'static str, field: &str, v: i64) -> Clause {
        Clause::Compare {
            symbol,
            fields: BTreeMap::from([(field.to_owned(), Operand::Bound(Value::Int(v)))]),
        }
    }

    #[test]
    fn comparison_renders_without_spaces() {
        let (sql, args) = connect("AND", &[compare(">=", "age", 21)]);
        assert_eq!(sql, "(age>=?)");
        assert_eq!(args, vec![Value::Int(21)]);
    }

    #[test]
    fn literal_operand_binds_nothing() {
        let clause = Clause::Compare {
            symbol: "=",
            fields: BTreeMap::from([(
                "modified".to_owned(),
                Operand::Literal("UNIX_TIMESTAMP()".to_owned()),
            )]),
        };
        let (sql, args) = connect("AND", &[clause]);
        assert_eq!(sql, "(modified=UNIX_TIMESTAMP())");
        assert!(args.is_empty());
    }

    #[test]
    fn set_and_between_texture() {
        let set = Clause::Set {
            negated: false,
            fields: BTreeMap::from([(
                "age".to_owned(),
                vec![Value::Int(1), Value::Int(2), Value::Int(3)],
            )]),
        };
        let between = Clause::Between {
            negated: true,
            fields: BTreeMap::from([(
                "score".to_owned(),
                (Value::Int(10), Value::Int(20)),
            )]),
        };
        let (sql, args) = connect("AND", &[set, between]);
        assert_eq!(sql, "(age IN (?,?,?) AND (score NOT BETWEEN ? AND ?))");
        assert_eq!(args.len(), 5);
    }

    #[test]
    fn or_group_parenthesizes_compound_elements_only() {
        let single = vec![compare("=", "x", 1)];
        let compound = vec![compare("=", "a", 2), compare("=", "b", 3)];
        let (sql, args) = connect("AND", &[Clause::Or(vec![single, compound])]);
        assert_eq!(sql, "((x=? OR (a=? AND b=?)))");
        assert_eq!(args, vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
    }

    #[test]
    fn separator_renders_nothing() {
        let (sql, args) = connect("AND", &[Clause::Separator]);
        assert_eq!(sql, "");
        assert!(args.is_empty());
    }

    #[test]
    fn placeholder_counts() {
        assert_eq!(placeholders(0), "");
        assert_eq!(placeholders(1), "?");
        assert_eq!(placeholders(4), "?,?,?,?");
    }
}
