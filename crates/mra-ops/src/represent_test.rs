use super::*;
use crate::cube::CreateRelationSpaceByCube;
use mra_core::test_utils::{ads_table, region, rs};
use mra_core::{Aggregation, Table, Value};

fn space() -> RelationSpace {
    CreateRelationSpaceByCube::new(
        ["Device", "Browser"],
        vec![Aggregation::sum("Cost"), Aggregation::sum("Clicks")],
    )
    .apply(&ads_table())
    .unwrap()
}

#[test]
fn test_represent_one_slice_per_region_value() {
    let slices = Represent::new(vec![rs(&["Device"])], vec![rs(&["Cost"])])
        .apply(&space())
        .unwrap();
    assert_eq!(slices.len(), 3);
    assert_eq!(slices.dimensions(), &rs(&["Browser", "Device"]));

    let pixel = slices.get(&region(&[("Device", "Pixel")])).unwrap();
    let cost = pixel.get(&rs(&["Cost"])).unwrap();
    assert_eq!(
        cost,
        &Table::from_rows(["Cost"], vec![vec![Value::Int(18)]]).unwrap()
    );
}

#[test]
fn test_represent_two_attribute_regions() {
    let slices = Represent::new(vec![rs(&["Device", "Browser"])], vec![rs(&["Clicks"])])
        .apply(&space())
        .unwrap();
    assert_eq!(slices.len(), 5);
    let features = slices
        .get(&region(&[("Browser", "Chrome"), ("Device", "iPhone")]))
        .unwrap();
    let clicks = features.get(&rs(&["Clicks"])).unwrap();
    assert_eq!(clicks.value(0, "Clicks"), Some(Value::Int(300)));
}

#[test]
fn test_represent_empty_region_schema_is_global_slice() {
    let slices = Represent::new(vec![rs(&[])], vec![rs(&["Cost"])])
        .apply(&space())
        .unwrap();
    assert_eq!(slices.len(), 1);
    let global = slices.global_features().unwrap();
    let cost = global.get(&rs(&["Cost"])).unwrap();
    assert_eq!(cost.value(0, "Cost"), Some(Value::Int(105)));
}

#[test]
fn test_represent_multiple_feature_schemas_per_region() {
    let slices = Represent::new(
        vec![rs(&["Browser"])],
        vec![rs(&["Cost"]), rs(&["Clicks"])],
    )
    .apply(&space())
    .unwrap();
    let chrome = slices.get(&region(&[("Browser", "Chrome")])).unwrap();
    assert_eq!(chrome.len(), 2);
    assert_eq!(
        chrome.get(&rs(&["Clicks"])).unwrap().value(0, "Clicks"),
        Some(Value::Int(400))
    );
}

#[test]
fn test_represent_feature_with_dimension_selects_finer_relation() {
    // Region {Device}, feature {Browser, Cost}: the source is the {Browser, Device} relation.
    let slices = Represent::new(vec![rs(&["Device"])], vec![rs(&["Browser", "Cost"])])
        .apply(&space())
        .unwrap();
    let iphone = slices.get(&region(&[("Device", "iPhone")])).unwrap();
    let table = iphone.get(&rs(&["Browser", "Cost"])).unwrap();
    assert_eq!(table.num_rows(), 2);
}

#[test]
fn test_represent_skips_missing_source_relation() {
    let mut space = RelationSpace::new(rs(&["Device", "Browser"]));
    let by_device = Table::from_rows(
        ["Device", "Cost"],
        vec![vec![Value::from("Pixel"), Value::Int(18)]],
    )
    .unwrap();
    space.add_relation(by_device, rs(&["Device"])).unwrap();

    let slices = Represent::new(
        vec![rs(&["Device"]), rs(&["Browser"])],
        vec![rs(&["Cost"])],
    )
    .apply(&space)
    .unwrap();
    assert_eq!(slices.len(), 1);
    assert!(slices.contains_region(&region(&[("Device", "Pixel")])));
}

#[test]
fn test_represent_skips_source_missing_feature_column() {
    let slices = Represent::new(vec![rs(&["Device"])], vec![rs(&["Revenue"])])
        .apply(&space())
        .unwrap();
    assert!(slices.is_empty());
}

#[test]
fn test_represent_rejects_table_input() {
    let op = Represent::new(vec![rs(&["Device"])], vec![rs(&["Cost"])]);
    let err = op.execute(ads_table().into()).unwrap_err();
    assert!(matches!(err, crate::error::OperatorError::TypeMismatch { .. }));
}
