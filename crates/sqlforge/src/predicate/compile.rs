//! Partitioning a specification map into shape-checked clauses.

use std::collections::BTreeMap;

use crate::error::{BuildError, BuildResult};
use crate::spec::{self, Spec, SpecValue};
use crate::value::Value;

use super::clause::{Clause, Operand, connect};
use super::operator::{Operator, split_key};

/// Compile a specification into one parenthesized AND-joined fragment plus
/// its argument vector. An empty specification compiles to an empty string.
pub fn compile(spec: &Spec) -> BuildResult<(String, Vec<Value>)> {
    Ok(connect("AND", &where_clauses(spec)?))
}

/// Partition a specification into clauses, in output order: `_custom_*` raw
/// fragments (key-sorted), then `_or`/`_or_*` groups (key-sorted), then one
/// clause per operator in registry order. Reserved `_`-modifiers must be
/// stripped by the caller first; any other `_`-key is rejected here.
pub fn where_clauses(spec: &Spec) -> BuildResult<Vec<Clause>> {
    let mut clauses = Vec::new();
    let mut or_clauses = Vec::new();
    let mut grouped: BTreeMap<Operator, BTreeMap<String, SpecValue>> = BTreeMap::new();

    for (key, value) in spec.iter() {
        if spec::is_custom_key(key) {
            let SpecValue::Fragment(fragment) = value else {
                return Err(BuildError::value_shape(key, "a raw fragment"));
            };
            clauses.push(Clause::Raw(fragment.clone()));
        } else if spec::is_or_key(key) {
            let SpecValue::Groups(groups) = value else {
                return Err(BuildError::value_shape(
                    key,
                    "a list of nested specifications",
                ));
            };
            let mut elements = Vec::with_capacity(groups.len());
            for sub in groups {
                elements.push(where_clauses(sub)?);
            }
            or_clauses.push(Clause::Or(elements));
        } else if key.starts_with('_') {
            return Err(BuildError::UnknownModifier(key.clone()));
        } else {
            let (field, op) = split_key(key, value)?;
            grouped.entry(op).or_default().insert(field, value.clone());
        }
    }

    clauses.extend(or_clauses);
    for (op, fields) in grouped {
        clauses.push(clause_for(op, fields)?);
    }
    Ok(clauses)
}

fn clause_for(op: Operator, fields: BTreeMap<String, SpecValue>) -> BuildResult<Clause> {
    match op {
        Operator::Eq
        | Operator::Ne
        | Operator::Gt
        | Operator::Gte
        | Operator::Lt
        | Operator::Lte => {
            let mut out = BTreeMap::new();
            for (field, value) in fields {
                let operand = match value {
                    SpecValue::Scalar(v) => Operand::Bound(v),
                    SpecValue::Raw(s) => Operand::Literal(s),
                    _ => return Err(BuildError::value_shape(field, "a scalar")),
                };
                out.insert(field, operand);
            }
            Ok(Clause::Compare {
                symbol: op.symbol(),
                fields: out,
            })
        }
        Operator::In | Operator::NotIn => {
            let mut out = BTreeMap::new();
            for (field, value) in fields {
                let SpecValue::List(values) = value else {
                    return Err(BuildError::NotASequence(field));
                };
                if values.is_empty() {
                    return Err(BuildError::EmptySetCondition);
                }
                out.insert(field, values);
            }
            Ok(Clause::Set {
                negated: op == Operator::NotIn,
                fields: out,
            })
        }
        Operator::Between | Operator::NotBetween => {
            let mut out = BTreeMap::new();
            for (field, value) in fields {
                let SpecValue::List(values) = value else {
                    return Err(BuildError::NotASequence(field));
                };
                let Ok([low, high]) = <[Value; 2]>::try_from(values) else {
                    return Err(BuildError::BetweenValues(field));
                };
                out.insert(field, (low, high));
            }
            Ok(Clause::Between {
                negated: op == Operator::NotBetween,
                fields: out,
            })
        }
        Operator::Like | Operator::NotLike => {
            let mut out = BTreeMap::new();
            for (field, value) in fields {
                let SpecValue::Scalar(pattern) = value else {
                    return Err(BuildError::value_shape(field, "a scalar pattern"));
                };
                out.insert(field, pattern);
            }
            Ok(Clause::Match {
                negated: op == Operator::NotLike,
                fields: out,
            })
        }
        Operator::Null => {
            let mut out = BTreeMap::new();
            for (field, value) in fields {
                let SpecValue::Null(marker) = value else {
                    return Err(BuildError::value_shape(field, "a null marker"));
                };
                out.insert(field, marker);
            }
            Ok(Clause::NullCheck { fields: out })
        }
    }
}
