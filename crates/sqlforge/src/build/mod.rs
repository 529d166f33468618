//! Statement assemblers: one function per statement family, each returning
//! the final SQL string plus its argument vector. Placeholder count always
//! equals argument count and both run left to right.

mod delete;
mod insert;
mod named;
mod select;
mod update;

pub use delete::build_delete;
pub use insert::{
    build_insert, build_insert_ignore, build_insert_on_duplicate, build_replace_insert,
};
pub use named::named_query;
pub use select::{LockMode, build_select};
pub use update::build_update;

use crate::error::{BuildError, BuildResult};
use crate::spec::{self, Spec, SpecValue};

/// Strip `_limit` from an UPDATE/DELETE condition map. Only a non-negative
/// integer scalar qualifies here, unlike the two-element SELECT form.
pub(crate) fn take_limit(where_spec: &mut Spec) -> BuildResult<Option<u64>> {
    match where_spec.remove(spec::KEY_LIMIT) {
        None => Ok(None),
        Some(SpecValue::Scalar(v)) => match v.as_limit() {
            Some(n) => Ok(Some(n)),
            None => Err(BuildError::LimitType),
        },
        Some(_) => Err(BuildError::LimitType),
    }
}
