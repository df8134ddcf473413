use super::*;
use crate::table::Table;

fn eval(agg: &Aggregation, cells: Vec<Value>) -> TableResult<Value> {
    let rows = cells.into_iter().map(|c| vec![c]).collect();
    let table = Table::from_rows([agg.source.as_str()], rows).unwrap();
    agg.evaluate(table.array(&agg.source).unwrap())
}

#[test]
fn test_integer_sum_stays_integer() {
    let vals = vec![Value::Int(100), Value::Null, Value::Int(200)];
    let out = eval(&Aggregation::sum("Cost"), vals).unwrap();
    assert_eq!(out, Value::Int(300));
}

#[test]
fn test_mixed_sum_widens_to_float() {
    let vals = vec![Value::Int(1), Value::Float(0.5), Value::Int(2)];
    let out = eval(&Aggregation::sum("x"), vals).unwrap();
    assert_eq!(out, Value::Float(3.5));
}

#[test]
fn test_empty_inputs() {
    assert_eq!(eval(&Aggregation::sum("x"), vec![]).unwrap(), Value::Int(0));
    assert_eq!(eval(&Aggregation::count("x"), vec![]).unwrap(), Value::Int(0));
    assert_eq!(eval(&Aggregation::mean("x"), vec![]).unwrap(), Value::Null);
    assert_eq!(eval(&Aggregation::max("x"), vec![]).unwrap(), Value::Null);
}

#[test]
fn test_all_null_column() {
    let vals = vec![Value::Null, Value::Null];
    assert_eq!(eval(&Aggregation::sum("x"), vals.clone()).unwrap(), Value::Int(0));
    assert_eq!(eval(&Aggregation::count("x"), vals.clone()).unwrap(), Value::Int(0));
    assert_eq!(eval(&Aggregation::min("x"), vals).unwrap(), Value::Null);
}

#[test]
fn test_count_skips_nulls() {
    let vals = vec![Value::from("a"), Value::Null, Value::from("b")];
    assert_eq!(eval(&Aggregation::count("x"), vals).unwrap(), Value::Int(2));
}

#[test]
fn test_min_max_over_strings() {
    let vals = vec![Value::from("Safari"), Value::from("Chrome")];
    assert_eq!(
        eval(&Aggregation::min("b"), vals.clone()).unwrap(),
        Value::from("Chrome")
    );
    assert_eq!(
        eval(&Aggregation::max("b"), vals).unwrap(),
        Value::from("Safari")
    );
}

#[test]
fn test_min_max_over_dates() {
    let d = |day| Value::Date(chrono::NaiveDate::from_ymd_opt(2024, 3, day).unwrap());
    let vals = vec![d(9), Value::Null, d(2), d(30)];
    assert_eq!(eval(&Aggregation::min("day"), vals.clone()).unwrap(), d(2));
    assert_eq!(eval(&Aggregation::max("day"), vals).unwrap(), d(30));
}

#[test]
fn test_sum_rejects_strings() {
    let vals = vec![Value::from("one"), Value::from("oops")];
    let err = eval(&Aggregation::sum("Cost"), vals).unwrap_err();
    assert!(matches!(err, TableError::NonNumeric { found: "string", .. }));
}

#[test]
fn test_sum_overflow() {
    let vals = vec![Value::Int(i64::MAX), Value::Int(1)];
    let err = eval(&Aggregation::sum("Cost"), vals).unwrap_err();
    assert_eq!(
        err,
        TableError::Overflow {
            column: "Cost".to_string()
        }
    );
}

#[test]
fn test_mean() {
    let vals = vec![Value::Int(10), Value::Int(20), Value::Null];
    assert_eq!(
        eval(&Aggregation::mean("c"), vals).unwrap(),
        Value::Float(15.0)
    );
}

#[test]
fn test_parse_from_yaml() {
    let agg: Aggregation =
        serde_yaml::from_str("{output: TotalCost, source: Cost, func: sum}").unwrap();
    assert_eq!(agg, Aggregation::new("TotalCost", "Cost", AggFunc::Sum));
}
