use super::*;
use std::collections::HashSet;

#[test]
fn test_variants_never_cross_compare_equal() {
    assert_ne!(Value::Int(1), Value::Float(1.0));
    assert_ne!(Value::Null, Value::Str(String::new()));
}

#[test]
fn test_floats_hash_consistently() {
    let mut set = HashSet::new();
    set.insert(Value::Float(0.5));
    set.insert(Value::Float(0.5));
    set.insert(Value::Float(f64::NAN));
    set.insert(Value::Float(f64::NAN));
    assert_eq!(set.len(), 2);
}

#[test]
fn test_ordering_groups_by_variant() {
    let mut values = vec![
        Value::from("b"),
        Value::Int(3),
        Value::Null,
        Value::from("a"),
        Value::Int(-1),
    ];
    values.sort();
    assert_eq!(
        values,
        vec![
            Value::Null,
            Value::Int(-1),
            Value::Int(3),
            Value::from("a"),
            Value::from("b"),
        ]
    );
}

#[test]
fn test_untagged_yaml_parsing() {
    let values: Vec<Value> = serde_yaml::from_str("[null, true, 7, 2.5, Pixel]").unwrap();
    assert_eq!(
        values,
        vec![
            Value::Null,
            Value::Bool(true),
            Value::Int(7),
            Value::Float(2.5),
            Value::from("Pixel"),
        ]
    );
}

#[test]
fn test_option_conversion() {
    assert_eq!(Value::from(None::<i64>), Value::Null);
    assert_eq!(Value::from(Some(4)), Value::Int(4));
}
