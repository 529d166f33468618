//! Predicate compilation: specification map in, WHERE fragment plus bound
//! argument vector out.
//!
//! The pipeline is [`split_key`] (composite key to field + [`Operator`]),
//! [`where_clauses`] (partition and shape-check the map into [`Clause`]s) and
//! [`connect`] (render and join). Rendering itself is infallible; every shape
//! error is raised before a single byte of SQL is produced.

mod clause;
mod compile;
mod operator;

pub use clause::{Clause, Operand, connect};
pub(crate) use clause::placeholders;
pub use compile::{compile, where_clauses};
pub use operator::{Operator, split_key};

#[cfg(test)]
mod tests;
