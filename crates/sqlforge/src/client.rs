//! The executor seam between compiled statements and a real MySQL driver.

use std::future::Future;

use crate::error::BuildResult;
use crate::row::Row;
use crate::value::Value;

/// Something that can run a compiled statement.
///
/// Implemented by callers over whatever driver or pool they use; everything
/// in this crate that touches a database goes through this trait.
pub trait Executor: Send + Sync {
    /// Run a statement that returns rows.
    fn query(
        &self,
        sql: &str,
        args: &[Value],
    ) -> impl Future<Output = BuildResult<Vec<Row>>> + Send;

    /// Run a statement that returns an affected-row count.
    fn execute(&self, sql: &str, args: &[Value]) -> impl Future<Output = BuildResult<u64>> + Send;
}

impl<E: Executor> Executor for &E {
    fn query(
        &self,
        sql: &str,
        args: &[Value],
    ) -> impl Future<Output = BuildResult<Vec<Row>>> + Send {
        (**self).query(sql, args)
    }

    fn execute(&self, sql: &str, args: &[Value]) -> impl Future<Output = BuildResult<u64>> + Send {
        (**self).execute(sql, args)
    }
}
