use crate::error::BuildError;
use crate::predicate::compile;
use crate::spec::{NullMarker, Spec, SpecValue, custom};
use crate::value::Value;

#[test]
fn empty_spec_compiles_to_nothing() {
    let (sql, args) = compile(&Spec::new()).unwrap();
    assert_eq!(sql, "");
    assert!(args.is_empty());
}

#[test]
fn operator_groups_render_in_registry_order() {
    let spec = Spec::new()
        .field("foo", "bar")
        .field("qq", "tt")
        .field("age in", SpecValue::list([1, 3, 5, 7, 9]))
        .field("faith <>", "Muslim");
    let (sql, args) = compile(&spec).unwrap();
    assert_eq!(sql, "(foo=? AND qq=? AND age IN (?,?,?,?,?) AND faith!=?)");
    assert_eq!(
        args,
        vec![
            Value::Str("bar".into()),
            Value::Str("tt".into()),
            Value::Int(1),
            Value::Int(3),
            Value::Int(5),
            Value::Int(7),
            Value::Int(9),
            Value::Str("Muslim".into()),
        ]
    );
}

#[test]
fn bare_list_key_infers_in() {
    let spec = Spec::new().field("age", SpecValue::list([1, 2, 3]));
    let (sql, args) = compile(&spec).unwrap();
    assert_eq!(sql, "(age IN (?,?,?))");
    assert_eq!(args.len(), 3);
}

#[test]
fn customs_then_ors_then_operator_groups() {
    let spec = Spec::new()
        .field("_custom_price", custom("(x=? OR y=?)", vec![Value::Int(5), Value::Int(6)]))
        .field(
            "_or",
            vec![
                Spec::new().field("aa", 1).field("bb", 2),
                Spec::new().field("cc", 3),
            ],
        )
        .field("foo", "bar");
    let (sql, args) = compile(&spec).unwrap();
    assert_eq!(sql, "((x=? OR y=?) AND ((aa=? AND bb=?) OR cc=?) AND foo=?)");
    assert_eq!(
        args,
        vec![
            Value::Int(5),
            Value::Int(6),
            Value::Int(1),
            Value::Int(2),
            Value::Int(3),
            Value::Str("bar".into()),
        ]
    );
}

#[test]
fn named_or_groups_sort_by_key() {
    let spec = Spec::new()
        .field("_or_b", vec![Spec::new().field("n", 2), Spec::new().field("m", 3)])
        .field("_or_a", vec![Spec::new().field("x", 0), Spec::new().field("y", 1)]);
    let (sql, args) = compile(&spec).unwrap();
    assert_eq!(sql, "((x=? OR y=?) AND (n=? OR m=?))");
    assert_eq!(args.len(), 4);
}

#[test]
fn or_elements_recurse() {
    let inner = Spec::new()
        .field(
            "_or",
            vec![
                Spec::new()
                    .field("ff in", SpecValue::list([1, 2]))
                    .field("ee !=", 3),
                Spec::new().field("gg", 4),
            ],
        )
        .field("cc", 5)
        .field("dd in", SpecValue::list([7, 8]));
    let spec = Spec::new().field("_or", vec![Spec::new().field("zz", 0), inner]);
    let (sql, args) = compile(&spec).unwrap();
    assert_eq!(
        sql,
        "((zz=? OR (((ff IN (?,?) AND ee!=?) OR gg=?) AND cc=? AND dd IN (?,?))))"
    );
    assert_eq!(args.len(), 9);
}

#[test]
fn null_markers_render_last_without_args() {
    let spec = Spec::new()
        .field("foo", 1)
        .field("aa", NullMarker::IsNull)
        .field("bb", NullMarker::IsNotNull);
    let (sql, args) = compile(&spec).unwrap();
    assert_eq!(sql, "(foo=? AND aa IS NULL AND bb IS NOT NULL)");
    assert_eq!(args, vec![Value::Int(1)]);
}

#[test]
fn raw_value_embeds_literally() {
    let spec = Spec::new()
        .field("modified", SpecValue::Raw("UNIX_TIMESTAMP()".into()))
        .field("id", 7);
    let (sql, args) = compile(&spec).unwrap();
    assert_eq!(sql, "(id=? AND modified=UNIX_TIMESTAMP())");
    assert_eq!(args, vec![Value::Int(7)]);
}

#[test]
fn compilation_is_deterministic() {
    let spec = Spec::new()
        .field("b >", 2)
        .field("a", 1)
        .field("c in", SpecValue::list([4, 5]));
    let first = compile(&spec).unwrap();
    let second = compile(&spec).unwrap();
    assert_eq!(first, second);
}

#[test]
fn empty_in_list_is_rejected() {
    let spec = Spec::new().field("age in", SpecValue::List(vec![]));
    assert_eq!(compile(&spec).err(), Some(BuildError::EmptySetCondition));
}

#[test]
fn scalar_under_in_is_rejected() {
    let spec = Spec::new().field("age in", 1);
    assert_eq!(compile(&spec).err(), Some(BuildError::NotASequence("age".into())));
}

#[test]
fn between_requires_exactly_two_values() {
    let spec = Spec::new().field("age between", SpecValue::list([1]));
    assert_eq!(compile(&spec).err(), Some(BuildError::BetweenValues("age".into())));

    let spec = Spec::new().field("age between", SpecValue::list([1, 2, 3]));
    assert_eq!(compile(&spec).err(), Some(BuildError::BetweenValues("age".into())));

    let spec = Spec::new().field("age between", SpecValue::list([10, 20])).field("foo", 1);
    let (sql, args) = compile(&spec).unwrap();
    assert_eq!(sql, "(foo=? AND (age BETWEEN ? AND ?))");
    assert_eq!(args, vec![Value::Int(1), Value::Int(10), Value::Int(20)]);
}

#[test]
fn unknown_modifier_fails_loudly() {
    let spec = Spec::new().field("_orderBy", "age desc");
    assert_eq!(
        compile(&spec).err(),
        Some(BuildError::UnknownModifier("_orderBy".into()))
    );
}

#[test]
fn unsupported_operator_reports_token() {
    let spec = Spec::new().field("age ~~", 1);
    assert_eq!(
        compile(&spec).err(),
        Some(BuildError::UnsupportedOperator("~~".into()))
    );
}

#[test]
fn pattern_family_renders_like() {
    let spec = Spec::new()
        .field("name like", "%Jack%")
        .field("addr not like", "%berlin%");
    let (sql, args) = compile(&spec).unwrap();
    assert_eq!(sql, "(name LIKE ? AND addr NOT LIKE ?)");
    assert_eq!(args.len(), 2);
}
