//! Shared test utilities for mra-core and the crates built on it

use crate::schema::RelationSchema;
use crate::tuple::{create_relation_tuple, RelationTuple};
use mra_table::{Table, Value};

/// Shorthand for a schema from attribute names
pub fn rs(attributes: &[&str]) -> RelationSchema {
    RelationSchema::new(attributes.iter().copied())
}

/// Shorthand for a region with string values
pub fn region(pairs: &[(&str, &str)]) -> RelationTuple {
    create_relation_tuple(pairs.iter().copied())
}

/// A one-column integer table
pub fn single_column(name: &str, values: &[i64]) -> Table {
    let rows = values.iter().map(|v| vec![Value::Int(*v)]).collect();
    Table::from_rows([name], rows).unwrap()
}

/// The five-row ad performance sample over `Device, Browser, Clicks, Cost`
pub fn ads_table() -> Table {
    let rows = [
        ("Pixel", "Chrome", 100, 10),
        ("Pixel", "Firefox", 50, 8),
        ("iPhone", "Safari", 200, 25),
        ("Surface", "Edge", 150, 22),
        ("iPhone", "Chrome", 300, 40),
    ];
    Table::from_rows(
        ["Device", "Browser", "Clicks", "Cost"],
        rows.iter()
            .map(|(d, b, clicks, cost)| {
                vec![
                    Value::from(*d),
                    Value::from(*b),
                    Value::Int(*clicks),
                    Value::Int(*cost),
                ]
            })
            .collect(),
    )
    .unwrap()
}
