use super::*;
use crate::aggregate::{AggFunc, Aggregation};
use arrow::datatypes::DataType;

fn ads() -> Table {
    Table::from_rows(
        ["Device", "Browser", "Clicks", "Cost"],
        vec![
            vec!["Pixel".into(), "Chrome".into(), 100.into(), 10.into()],
            vec!["Pixel".into(), "Firefox".into(), 50.into(), 8.into()],
            vec!["iPhone".into(), "Safari".into(), 200.into(), 25.into()],
            vec!["Surface".into(), "Edge".into(), 150.into(), 22.into()],
            vec!["iPhone".into(), "Chrome".into(), 300.into(), 40.into()],
        ],
    )
    .unwrap()
}

#[test]
fn test_new_rejects_duplicate_columns() {
    let err = Table::new(["a", "b", "a"]).unwrap_err();
    assert_eq!(
        err,
        TableError::DuplicateColumn {
            column: "a".to_string()
        }
    );
}

#[test]
fn test_from_rows_checks_arity() {
    let err = Table::from_rows(["a", "b"], vec![vec![Value::Int(1)]]).unwrap_err();
    assert_eq!(
        err,
        TableError::RowArity {
            expected: 2,
            found: 1
        }
    );
}

#[test]
fn test_from_rows_rejects_mixed_column() {
    let err = Table::from_rows(["a"], vec![vec![Value::Int(1)], vec!["x".into()]]).unwrap_err();
    assert_eq!(
        err,
        TableError::MixedTypes {
            column: "a".to_string(),
            first: "int",
            second: "string"
        }
    );
}

#[test]
fn test_column_types_follow_cells() {
    let t = Table::from_rows(
        ["Device", "Clicks", "Rate", "Empty"],
        vec![
            vec!["Pixel".into(), 1.into(), 1.into(), Value::Null],
            vec!["iPhone".into(), Value::Null, 0.5.into(), Value::Null],
        ],
    )
    .unwrap();
    let schema = t.record_batch().schema();
    let types: Vec<_> = schema.fields().iter().map(|f| f.data_type().clone()).collect();
    assert_eq!(
        types,
        vec![
            DataType::Utf8,
            DataType::Int64,
            DataType::Float64,
            DataType::Null
        ]
    );
    assert_eq!(t.value(0, "Rate"), Some(Value::Float(1.0)));
    assert_eq!(t.value(1, "Clicks"), Some(Value::Null));
    assert_eq!(t.value(2, "Clicks"), None);
}

#[test]
fn test_project() {
    let t = ads().project(&["Cost", "Device"]).unwrap();
    assert_eq!(t.columns(), vec!["Cost".to_string(), "Device".to_string()]);
    assert_eq!(t.num_rows(), 5);
    assert_eq!(t.value(0, "Device"), Some(Value::from("Pixel")));
    assert!(ads().project(&["Revenue"]).is_err());
}

#[test]
fn test_group_by_sorted_keys() {
    let groups = ads().group_by(&["Device"]).unwrap();
    let keys: Vec<_> = groups.iter().map(|(k, _)| k[0].clone()).collect();
    assert_eq!(
        keys,
        vec![
            Value::from("Pixel"),
            Value::from("Surface"),
            Value::from("iPhone"),
        ]
    );
    let (_, pixel) = &groups[0];
    assert_eq!(pixel.num_rows(), 2);
    assert_eq!(pixel.num_columns(), 4);
    assert_eq!(
        pixel.column_values("Browser").unwrap(),
        vec![Value::from("Chrome"), Value::from("Firefox")]
    );
}

#[test]
fn test_group_by_skips_null_keys() {
    let t = Table::from_rows(
        ["Device", "Cost"],
        vec![
            vec!["Pixel".into(), 10.into()],
            vec![Value::Null, 7.into()],
            vec!["Pixel".into(), 8.into()],
        ],
    )
    .unwrap();
    let groups = t.group_by(&["Device"]).unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].1.num_rows(), 2);

    let totals = t
        .group_aggregate(&["Device"], &[Aggregation::sum("Cost")])
        .unwrap();
    assert_eq!(totals.rows(), vec![vec![Value::from("Pixel"), Value::Int(18)]]);
}

#[test]
fn test_group_by_all_null_key_column() {
    let t = Table::from_rows(["k", "v"], vec![vec![Value::Null, 1.into()]]).unwrap();
    assert!(t.group_by(&["k"]).unwrap().is_empty());
}

#[test]
fn test_group_by_no_keys_is_one_group() {
    let groups = ads().group_by::<&str>(&[]).unwrap();
    assert_eq!(groups.len(), 1);
    assert!(groups[0].0.is_empty());
    assert_eq!(groups[0].1, ads());
}

#[test]
fn test_group_by_unknown_column() {
    assert!(matches!(
        ads().group_by(&["Region"]),
        Err(TableError::UnknownColumn { .. })
    ));
}

#[test]
fn test_aggregate_grand_total() {
    let total = ads()
        .aggregate(&[Aggregation::sum("Cost"), Aggregation::sum("Clicks")])
        .unwrap();
    assert_eq!(total.columns(), vec!["Cost".to_string(), "Clicks".to_string()]);
    assert_eq!(total.num_rows(), 1);
    assert_eq!(total.value(0, "Cost"), Some(Value::Int(105)));
    assert_eq!(total.value(0, "Clicks"), Some(Value::Int(800)));
}

#[test]
fn test_aggregate_empty_table_yields_one_row() {
    let empty = Table::new(["Cost"]).unwrap();
    let total = empty.aggregate(&[Aggregation::sum("Cost")]).unwrap();
    assert_eq!(total.num_rows(), 1);
    assert_eq!(total.value(0, "Cost"), Some(Value::Int(0)));
}

#[test]
fn test_group_aggregate() {
    let t = ads()
        .group_aggregate(
            &["Device"],
            &[Aggregation::new("TotalCost", "Cost", AggFunc::Sum)],
        )
        .unwrap();
    assert_eq!(
        t.columns(),
        vec!["Device".to_string(), "TotalCost".to_string()]
    );
    assert_eq!(t.num_rows(), 3);
    assert_eq!(t.value(2, "Device"), Some(Value::from("iPhone")));
    assert_eq!(t.value(2, "TotalCost"), Some(Value::Int(65)));
}

#[test]
fn test_cross_join() {
    let region = Table::from_rows(["Device"], vec![vec!["Pixel".into()]]).unwrap();
    let feature = Table::from_rows(
        ["Cost", "Clicks"],
        vec![vec![10.into(), 100.into()], vec![8.into(), 50.into()]],
    )
    .unwrap();
    let joined = region.cross_join(&feature).unwrap();
    assert_eq!(joined.num_columns(), 3);
    assert_eq!(joined.num_rows(), 2);
    assert_eq!(joined.value(1, "Device"), Some(Value::from("Pixel")));
    assert_eq!(joined.value(1, "Clicks"), Some(Value::Int(50)));
}

#[test]
fn test_cross_join_rejects_shared_columns() {
    let err = ads().cross_join(&ads().project(&["Cost"]).unwrap()).unwrap_err();
    assert_eq!(
        err,
        TableError::SharedColumns {
            columns: "Cost".to_string()
        }
    );
}

#[test]
fn test_concat_unions_columns() {
    let a = Table::from_rows(["x", "y"], vec![vec![1.into(), 2.into()]]).unwrap();
    let b = Table::from_rows(["y", "z"], vec![vec![3.into(), 4.into()]]).unwrap();
    let c = Table::concat([&a, &b]).unwrap();
    assert_eq!(
        c.columns(),
        vec!["x".to_string(), "y".to_string(), "z".to_string()]
    );
    assert_eq!(c.rows()[0], vec![Value::Int(1), Value::Int(2), Value::Null]);
    assert_eq!(c.rows()[1], vec![Value::Null, Value::Int(3), Value::Int(4)]);
}

#[test]
fn test_concat_widens_and_rejects_types() {
    let ints = Table::from_rows(["x"], vec![vec![1.into()]]).unwrap();
    let floats = Table::from_rows(["x"], vec![vec![0.5.into()]]).unwrap();
    let strings = Table::from_rows(["x"], vec![vec!["a".into()]]).unwrap();
    let c = Table::concat([&ints, &floats]).unwrap();
    assert_eq!(
        c.column_values("x").unwrap(),
        vec![Value::Float(1.0), Value::Float(0.5)]
    );
    assert!(matches!(
        Table::concat([&ints, &strings]),
        Err(TableError::MixedTypes { .. })
    ));
    assert_eq!(Table::concat(Vec::<&Table>::new()).unwrap().num_columns(), 0);
}

#[test]
fn test_with_column_appends_and_replaces() {
    let t = Table::from_rows(["x"], vec![vec![1.into()], vec![2.into()]]).unwrap();
    let appended = t
        .with_column("double", vec![Value::Int(2), Value::Int(4)])
        .unwrap();
    assert_eq!(appended.num_columns(), 2);
    let replaced = appended
        .with_column("x", vec![Value::Int(0), Value::Int(0)])
        .unwrap();
    assert_eq!(replaced.num_columns(), 2);
    assert_eq!(replaced.value(1, "x"), Some(Value::Int(0)));
    assert!(t.with_column("bad", vec![Value::Null]).is_err());
}

#[test]
fn test_canonical_ignores_column_and_row_order() {
    let a = Table::from_rows(
        ["Device", "Cost"],
        vec![vec!["b".into(), 2.into()], vec!["a".into(), 1.into()]],
    )
    .unwrap();
    let b = Table::from_rows(
        ["Cost", "Device"],
        vec![vec![1.into(), "a".into()], vec![2.into(), "b".into()]],
    )
    .unwrap();
    assert_ne!(a, b);
    assert_eq!(a.canonical().unwrap(), b.canonical().unwrap());
    assert_eq!(
        a.canonical().unwrap().rows(),
        vec![
            vec![Value::Int(1), Value::from("a")],
            vec![Value::Int(2), Value::from("b")],
        ]
    );
}
