//! The specification mapping: the input side of every compiled statement.
//!
//! A [`Spec`] maps composite keys (`"age >"`, `"name in"`, `"_orderby"`) to
//! [`SpecValue`]s. Keys sort lexicographically, which is what makes compiled
//! output deterministic without an explicit sort pass.

use std::collections::BTreeMap;

use crate::value::Value;

/// One INSERT row: column name to bound value.
pub type Record = BTreeMap<String, Value>;

pub(crate) const KEY_ORDER_BY: &str = "_orderby";
pub(crate) const KEY_GROUP_BY: &str = "_groupby";
pub(crate) const KEY_LIMIT: &str = "_limit";
pub(crate) const KEY_HAVING: &str = "_having";
pub(crate) const KEY_LOCK_MODE: &str = "_lockMode";
pub(crate) const KEY_OR: &str = "_or";
pub(crate) const PREFIX_OR: &str = "_or_";
pub(crate) const PREFIX_CUSTOM: &str = "_custom_";

/// True for `_or` and any `_or_<name>` key.
pub(crate) fn is_or_key(key: &str) -> bool {
    key == KEY_OR || key.starts_with(PREFIX_OR)
}

/// True for any `_custom_<name>` key.
pub(crate) fn is_custom_key(key: &str) -> bool {
    key.starts_with(PREFIX_CUSTOM)
}

/// Null-check marker value: forces `IS NULL` / `IS NOT NULL` regardless of
/// the key's operator suffix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NullMarker {
    IsNull,
    IsNotNull,
}

impl NullMarker {
    pub(crate) fn as_sql(self) -> &'static str {
        match self {
            NullMarker::IsNull => "IS NULL",
            NullMarker::IsNotNull => "IS NOT NULL",
        }
    }
}

/// Caller-supplied literal SQL plus its own bound arguments.
///
/// Spliced verbatim by `_custom_*` WHERE keys and `_custom_*` SET entries.
#[derive(Clone, Debug, PartialEq)]
pub struct Fragment {
    pub sql: String,
    pub args: Vec<Value>,
}

/// Create a raw fragment value for a `_custom_*` key.
pub fn custom(sql: impl Into<String>, args: Vec<Value>) -> SpecValue {
    SpecValue::Fragment(Fragment {
        sql: sql.into(),
        args,
    })
}

/// A specification value.
#[derive(Clone, Debug, PartialEq)]
pub enum SpecValue {
    /// One bound scalar: `field=?`.
    Scalar(Value),

    /// A bound list: `field IN (?,?)`, or a BETWEEN pair.
    List(Vec<Value>),

    /// A literal embedded with no placeholder: `modified=UNIX_TIMESTAMP()`.
    Raw(String),

    /// Null-check marker.
    Null(NullMarker),

    /// Raw SQL with its own args, for `_custom_*` keys.
    Fragment(Fragment),

    /// OR-group: each inner spec compiles AND-joined, the specs OR-join.
    Groups(Vec<Spec>),

    /// A nested specification, used by `_having`.
    Nested(Spec),
}

impl SpecValue {
    /// Build a list value from anything convertible to [`Value`].
    pub fn list<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        SpecValue::List(values.into_iter().map(Into::into).collect())
    }

    /// True for the values `omit_empty` drops: zero scalars, empty lists.
    fn is_zero(&self) -> bool {
        match self {
            SpecValue::Scalar(v) => v.is_zero(),
            SpecValue::List(vs) => vs.is_empty(),
            _ => false,
        }
    }
}

impl From<Value> for SpecValue {
    fn from(v: Value) -> Self {
        SpecValue::Scalar(v)
    }
}

impl From<bool> for SpecValue {
    fn from(v: bool) -> Self {
        SpecValue::Scalar(v.into())
    }
}

impl From<i32> for SpecValue {
    fn from(v: i32) -> Self {
        SpecValue::Scalar(v.into())
    }
}

impl From<i64> for SpecValue {
    fn from(v: i64) -> Self {
        SpecValue::Scalar(v.into())
    }
}

impl From<u32> for SpecValue {
    fn from(v: u32) -> Self {
        SpecValue::Scalar(v.into())
    }
}

impl From<u64> for SpecValue {
    fn from(v: u64) -> Self {
        SpecValue::Scalar(v.into())
    }
}

impl From<f64> for SpecValue {
    fn from(v: f64) -> Self {
        SpecValue::Scalar(v.into())
    }
}

impl From<&str> for SpecValue {
    fn from(v: &str) -> Self {
        SpecValue::Scalar(v.into())
    }
}

impl From<String> for SpecValue {
    fn from(v: String) -> Self {
        SpecValue::Scalar(v.into())
    }
}

impl From<Vec<Value>> for SpecValue {
    fn from(v: Vec<Value>) -> Self {
        SpecValue::List(v)
    }
}

impl From<NullMarker> for SpecValue {
    fn from(v: NullMarker) -> Self {
        SpecValue::Null(v)
    }
}

impl From<Fragment> for SpecValue {
    fn from(v: Fragment) -> Self {
        SpecValue::Fragment(v)
    }
}

impl From<Spec> for SpecValue {
    fn from(v: Spec) -> Self {
        SpecValue::Nested(v)
    }
}

impl From<Vec<Spec>> for SpecValue {
    fn from(v: Vec<Spec>) -> Self {
        SpecValue::Groups(v)
    }
}

/// The specification mapping.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Spec(BTreeMap<String, SpecValue>);

impl Spec {
    /// Create an empty specification.
    pub fn new() -> Self {
        Self::default()
    }

    /// Chainable insert.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<SpecValue>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Insert an entry, returning the previous value if any.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<SpecValue>,
    ) -> Option<SpecValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Remove an entry.
    pub fn remove(&mut self, key: &str) -> Option<SpecValue> {
        self.0.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&SpecValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &SpecValue)> {
        self.0.iter()
    }

    /// Drop the named keys whose values are zero (empty string or list, zero
    /// numerics, false, null). With no keys given, every key is a candidate.
    pub fn omit_empty(mut self, keys: &[&str]) -> Self {
        if keys.is_empty() {
            self.0.retain(|_, v| !v.is_zero());
        } else {
            for key in keys {
                if self.0.get(*key).is_some_and(SpecValue::is_zero) {
                    self.0.remove(*key);
                }
            }
        }
        self
    }
}

impl FromIterator<(String, SpecValue)> for Spec {
    fn from_iter<I: IntoIterator<Item = (String, SpecValue)>>(iter: I) -> Self {
        Spec(iter.into_iter().collect())
    }
}

impl IntoIterator for Spec {
    type Item = (String, SpecValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, SpecValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
