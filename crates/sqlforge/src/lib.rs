//! # sqlforge
//!
//! Compile plain specification maps into parameterized MySQL statements.
//!
//! ## Features
//!
//! - **Map in, SQL out**: a `Spec` of `"field operator"` keys compiles to one
//!   statement string plus its argument vector, placeholders aligned
//! - **Deterministic**: fields sort lexicographically, operator groups render
//!   in a fixed order, the same map always compiles to the same bytes
//! - **Fail loudly**: every shape problem is a typed `BuildError` before any
//!   SQL is produced; nothing half-compiles
//! - **Escape hatches**: `_custom_*` raw fragments, `_or` groups, named
//!   `{{marker}}` templates for queries the map grammar cannot express
//! - **Driver-agnostic**: execution goes through the `Executor` trait; row
//!   mapping via `FromRow`, aggregates and a DSN builder included
//!
//! ## Example
//!
//! ```
//! use sqlforge::{Spec, SpecValue, build_select};
//!
//! let where_spec = Spec::new()
//!     .field("age in", SpecValue::list([20, 21, 22]))
//!     .field("name like", "dee%")
//!     .field("_orderby", "age desc")
//!     .field("_limit", SpecValue::list([0, 10]));
//! let (sql, args) = build_select("users", &where_spec, &["id", "name"]).unwrap();
//! assert_eq!(
//!     sql,
//!     "SELECT id,name FROM users WHERE (age IN (?,?,?) AND name LIKE ?) \
//!      ORDER BY age DESC LIMIT ?,?"
//! );
//! assert_eq!(args.len(), 6);
//! ```

pub mod agg;
pub mod build;
pub mod client;
pub mod dsn;
pub mod error;
pub mod json;
pub mod predicate;
pub mod row;
pub mod spec;
pub mod value;

pub use agg::{Aggregate, AggregateResult, aggregate_query};
pub use build::{
    LockMode, build_delete, build_insert, build_insert_ignore, build_insert_on_duplicate,
    build_replace_insert, build_select, build_update, named_query,
};
pub use client::Executor;
pub use dsn::DsnBuilder;
pub use error::{BuildError, BuildResult};
pub use json::{json_array_append, json_array_insert, json_contains, json_remove, json_set};
pub use predicate::{Clause, Operand, Operator, compile, connect, split_key, where_clauses};
pub use row::{FromRow, FromValue, Row, scan_all, scan_maps, scan_one};
pub use spec::{Fragment, NullMarker, Record, Spec, SpecValue, custom};
pub use value::Value;
