//! Named-parameter substitution for hand-written SQL templates.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{BuildError, BuildResult};
use crate::predicate::placeholders;
use crate::spec::{Spec, SpecValue};
use crate::value::Value;

static MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\S+?\}\}").expect("marker pattern"));

/// Replace `{{name}}` markers with `?` placeholders, expanding list-valued
/// parameters into `(?,..,?)` groups. Arguments collect in marker order. An
/// empty parameter map returns the template untouched; a marker with no
/// matching parameter is an error.
pub fn named_query(template: &str, params: &Spec) -> BuildResult<(String, Vec<Value>)> {
    if params.is_empty() {
        return Ok((template.to_owned(), Vec::new()));
    }
    let mut sql = String::with_capacity(template.len());
    let mut args = Vec::with_capacity(params.len());
    let mut last = 0;
    for marker in MARKER.find_iter(template) {
        sql.push_str(&template[last..marker.start()]);
        let name = marker
            .as_str()
            .trim_start_matches('{')
            .trim_end_matches('}');
        let Some(value) = params.get(name) else {
            return Err(BuildError::MissingParameter(name.to_owned()));
        };
        match value {
            SpecValue::Scalar(v) => {
                sql.push('?');
                args.push(v.clone());
            }
            // An empty list expands to nothing at all.
            SpecValue::List(values) if values.is_empty() => {}
            SpecValue::List(values) => {
                sql.push('(');
                sql.push_str(&placeholders(values.len()));
                sql.push(')');
                args.extend(values.iter().cloned());
            }
            _ => return Err(BuildError::value_shape(name, "a scalar or a list")),
        }
        last = marker.end();
    }
    sql.push_str(&template[last..]);
    Ok((sql, args))
}
