//! JSON condition and update fragment helpers.
//!
//! Every helper returns a raw fragment meant for a `_custom_*` key, either in
//! a condition map (`json_contains`) or an UPDATE set map (the rest). Paths
//! must be hard-coded; they are embedded as quoted literals, not bound.

use crate::spec::{SpecValue, custom};
use crate::value::Value;

/// Check that a JSON document at `full_json_path` contains `json_like`.
///
/// Scalars render through `MEMBER OF` (`JSON_CONTAINS` cannot match a bare
/// scalar), arrays and objects through `JSON_CONTAINS` with a generated
/// `JSON_ARRAY`/`JSON_OBJECT` expression.
pub fn json_contains(full_json_path: &str, json_like: &serde_json::Value) -> SpecValue {
    // MEMBER OF cannot deal with null in a json array.
    if json_like.is_null() {
        return custom(format!("JSON_CONTAINS({full_json_path},'null')"), Vec::new());
    }
    let mut args = Vec::new();
    let rendered = gen_json_obj(json_like, &mut args);
    if rendered.starts_with("JSON") {
        custom(format!("JSON_CONTAINS({full_json_path},{rendered})"), args)
    } else {
        custom(format!("({rendered} MEMBER OF({full_json_path}))"), args)
    }
}

/// SET entry calling `JSON_SET(field, path, value, ..)`.
pub fn json_set(field: &str, pairs: &[(&str, serde_json::Value)]) -> SpecValue {
    json_update_call("JSON_SET", field, pairs)
}

/// SET entry calling `JSON_ARRAY_APPEND(field, path, value, ..)`.
pub fn json_array_append(field: &str, pairs: &[(&str, serde_json::Value)]) -> SpecValue {
    json_update_call("JSON_ARRAY_APPEND", field, pairs)
}

/// SET entry calling `JSON_ARRAY_INSERT(field, path, value, ..)`.
pub fn json_array_insert(field: &str, pairs: &[(&str, serde_json::Value)]) -> SpecValue {
    json_update_call("JSON_ARRAY_INSERT", field, pairs)
}

/// SET entry calling `JSON_REMOVE(field, path, ..)`. Paths apply in order,
/// so an earlier removal can shift what a later array path addresses. With
/// no paths the entry degenerates to `field=field`.
pub fn json_remove(field: &str, paths: &[&str]) -> SpecValue {
    if paths.is_empty() {
        return custom(format!("{field}={field}"), Vec::new());
    }
    custom(
        format!("{field}=JSON_REMOVE({field},'{}')", paths.join("','")),
        Vec::new(),
    )
}

fn json_update_call(
    function: &str,
    field: &str,
    pairs: &[(&str, serde_json::Value)],
) -> SpecValue {
    if pairs.is_empty() {
        return custom(field, Vec::new());
    }
    let mut args = Vec::new();
    let mut sql = format!("{field}={function}({field}");
    for (path, value) in pairs {
        sql.push_str(",'");
        sql.push_str(path);
        sql.push_str("',");
        sql.push_str(&gen_json_obj(value, &mut args));
    }
    sql.push(')');
    custom(sql, args)
}

/// Render a JSON value as a MySQL JSON expression, binding scalars as `?`.
/// Object keys render in sorted order, so output is deterministic.
fn gen_json_obj(obj: &serde_json::Value, args: &mut Vec<Value>) -> String {
    match obj {
        serde_json::Value::Null => "null".to_owned(),
        serde_json::Value::Bool(true) => "true".to_owned(),
        serde_json::Value::Bool(false) => "false".to_owned(),
        serde_json::Value::Number(_) | serde_json::Value::String(_) => {
            if let Some(v) = Value::from_json(obj) {
                args.push(v);
            }
            "?".to_owned()
        }
        serde_json::Value::Array(items) => {
            let parts: Vec<String> = items.iter().map(|v| gen_json_obj(v, args)).collect();
            format!("JSON_ARRAY({})", parts.join(","))
        }
        serde_json::Value::Object(map) => {
            let mut parts = Vec::with_capacity(map.len());
            for (key, value) in map {
                args.push(Value::Str(key.clone()));
                let rendered = gen_json_obj(value, args);
                parts.push(format!("?,{rendered}"));
            }
            format!("JSON_OBJECT({})", parts.join(","))
        }
    }
}
