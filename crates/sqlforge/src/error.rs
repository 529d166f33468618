//! Error types for sqlforge

use thiserror::Error;

/// Result type alias for statement compilation
pub type BuildResult<T> = Result<T, BuildError>;

/// Error types for specification compilation and execution boundaries
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    /// A specification key was empty after trimming
    #[error("key must not be empty")]
    EmptyKey,

    /// The operator suffix of a key did not match any known operator
    #[error("unsupported operator: {0}")]
    UnsupportedOperator(String),

    /// A set-shaped operator (in / not in / between) received a non-list value
    #[error("the value of \"{0}\" must be a list")]
    NotASequence(String),

    /// An IN / NOT IN condition received an empty list
    #[error("empty value list for IN condition")]
    EmptySetCondition,

    /// A BETWEEN / NOT BETWEEN list did not hold exactly two values
    #[error("the value of \"{0}\" must be a list of exactly two values")]
    BetweenValues(String),

    /// A value had the wrong shape for its position
    #[error("the value of \"{key}\" must be {expected}")]
    ValueShape { key: String, expected: &'static str },

    /// An underscore-prefixed key did not match any reserved modifier
    #[error("unknown modifier: {0}")]
    UnknownModifier(String),

    /// `_orderby` was not a string
    #[error("the value of \"_orderby\" must be a string")]
    OrderBySpec,

    /// An ORDER BY item carried a direction other than ASC / DESC
    #[error("unsupported order direction: {0}")]
    OrderDirection(String),

    /// `_groupby` was not a string
    #[error("the value of \"_groupby\" must be a string")]
    GroupByType,

    /// A `_limit` element was not a non-negative integer
    #[error("limit values must be non-negative integers")]
    LimitType,

    /// `_limit` held zero or more than two elements
    #[error("_limit must hold one or two values")]
    LimitSpec,

    /// `_having` was not a nested specification
    #[error("the value of \"_having\" must be a nested specification")]
    HavingShape,

    /// A `_having` entry used an operator not allowed in HAVING
    #[error("operator not allowed in HAVING")]
    HavingOperator,

    /// `_lockMode` was not `share` or `exclusive`
    #[error("unknown lock mode: {0}")]
    LockMode(String),

    /// An UPDATE was requested with an empty SET map
    #[error("update map must not be empty")]
    EmptyUpdateData,

    /// An INSERT was requested with zero records
    #[error("insert data must not be empty")]
    EmptyInsertData,

    /// An INSERT record did not carry the first record's field set
    #[error("insert records must share one field set")]
    DataShapeMismatch,

    /// A named-query marker had no matching parameter
    #[error("missing parameter: {0}")]
    MissingParameter(String),

    /// Row decode/mapping error
    #[error("decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// A single record was required and none was returned
    #[error("empty result")]
    EmptyResult,

    /// Executor-side failure, reported by the caller's driver
    #[error("execution error: {0}")]
    Execution(String),
}

impl BuildError {
    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create an execution error from any driver-side failure
    pub fn execution(message: impl Into<String>) -> Self {
        Self::Execution(message.into())
    }

    /// Create a value-shape error for a specific key
    pub fn value_shape(key: impl Into<String>, expected: &'static str) -> Self {
        Self::ValueShape {
            key: key.into(),
            expected,
        }
    }

    /// Check if this is a shape/type error in the specification itself
    pub fn is_spec_error(&self) -> bool {
        !matches!(
            self,
            Self::Decode { .. } | Self::EmptyResult | Self::Execution(_)
        )
    }

    /// Check if this is an empty-result error
    pub fn is_empty_result(&self) -> bool {
        matches!(self, Self::EmptyResult)
    }
}
