//! Conversions between cells and arrow columns

use crate::error::{TableError, TableResult};
use crate::value::Value;
use arrow::array::{
    Array, ArrayRef, AsArray, BooleanArray, Date32Array, Float64Array, Int64Array, NullArray,
    StringArray,
};
use arrow::datatypes::{DataType, Date32Type, Float64Type, Int64Type};
use chrono::{Datelike, NaiveDate};
use std::sync::Arc;

/// `NaiveDate::num_days_from_ce` of 1970-01-01
const EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Days since the Unix epoch, as stored in a `Date32` column
pub(crate) fn date_to_days(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - EPOCH_DAYS_FROM_CE
}

/// Inverse of [`date_to_days`]; `None` outside chrono's range
pub(crate) fn days_to_date(days: i32) -> Option<NaiveDate> {
    days.checked_add(EPOCH_DAYS_FROM_CE)
        .and_then(NaiveDate::from_num_days_from_ce_opt)
}

/// Short type name matching [`Value::type_name`]
pub(crate) fn type_name(data_type: &DataType) -> &'static str {
    match data_type {
        DataType::Null => "null",
        DataType::Boolean => "bool",
        DataType::Int64 => "int",
        DataType::Float64 => "float",
        DataType::Date32 => "date",
        DataType::Utf8 => "string",
        _ => "unsupported",
    }
}

fn value_type(value: &Value) -> DataType {
    match value {
        Value::Null => DataType::Null,
        Value::Bool(_) => DataType::Boolean,
        Value::Int(_) => DataType::Int64,
        Value::Float(_) => DataType::Float64,
        Value::Date(_) => DataType::Date32,
        Value::Str(_) => DataType::Utf8,
    }
}

/// Common column type of two types; integers widen to float
pub(crate) fn unify(column: &str, a: &DataType, b: &DataType) -> TableResult<DataType> {
    match (a, b) {
        _ if a == b => Ok(a.clone()),
        (DataType::Null, other) | (other, DataType::Null) => Ok(other.clone()),
        (DataType::Int64, DataType::Float64) | (DataType::Float64, DataType::Int64) => {
            Ok(DataType::Float64)
        }
        _ => Err(TableError::MixedTypes {
            column: column.to_string(),
            first: type_name(a),
            second: type_name(b),
        }),
    }
}

/// Column type able to hold every value; `Null` when every value is null
pub(crate) fn infer_type<'a>(
    column: &str,
    values: impl IntoIterator<Item = &'a Value>,
) -> TableResult<DataType> {
    values
        .into_iter()
        .try_fold(DataType::Null, |acc, v| unify(column, &acc, &value_type(v)))
}

/// Build a `data_type` column from cells
pub(crate) fn build_array(
    column: &str,
    data_type: &DataType,
    values: &[Value],
) -> TableResult<ArrayRef> {
    let mismatch = |v: &Value| TableError::MixedTypes {
        column: column.to_string(),
        first: type_name(data_type),
        second: v.type_name(),
    };
    let array: ArrayRef = match data_type {
        DataType::Null => {
            if let Some(v) = values.iter().find(|v| !v.is_null()) {
                return Err(mismatch(v));
            }
            Arc::new(NullArray::new(values.len()))
        }
        DataType::Boolean => {
            let cells = values
                .iter()
                .map(|v| match v {
                    Value::Null => Ok(None),
                    Value::Bool(b) => Ok(Some(*b)),
                    other => Err(mismatch(other)),
                })
                .collect::<TableResult<Vec<_>>>()?;
            Arc::new(BooleanArray::from(cells))
        }
        DataType::Int64 => {
            let cells = values
                .iter()
                .map(|v| match v {
                    Value::Null => Ok(None),
                    Value::Int(i) => Ok(Some(*i)),
                    other => Err(mismatch(other)),
                })
                .collect::<TableResult<Vec<_>>>()?;
            Arc::new(Int64Array::from(cells))
        }
        DataType::Float64 => {
            let cells = values
                .iter()
                .map(|v| match v {
                    Value::Null => Ok(None),
                    Value::Int(_) | Value::Float(_) => Ok(v.as_f64()),
                    other => Err(mismatch(other)),
                })
                .collect::<TableResult<Vec<_>>>()?;
            Arc::new(Float64Array::from(cells))
        }
        DataType::Date32 => {
            let cells = values
                .iter()
                .map(|v| match v {
                    Value::Null => Ok(None),
                    Value::Date(d) => Ok(Some(date_to_days(*d))),
                    other => Err(mismatch(other)),
                })
                .collect::<TableResult<Vec<_>>>()?;
            Arc::new(Date32Array::from(cells))
        }
        DataType::Utf8 => {
            let cells = values
                .iter()
                .map(|v| match v {
                    Value::Null => Ok(None),
                    Value::Str(s) => Ok(Some(s.clone())),
                    other => Err(mismatch(other)),
                })
                .collect::<TableResult<Vec<_>>>()?;
            Arc::new(StringArray::from(cells))
        }
        other => {
            return Err(TableError::MixedTypes {
                column: column.to_string(),
                first: type_name(other),
                second: values.first().map_or("null", Value::type_name),
            })
        }
    };
    Ok(array)
}

/// Cell `row` of `array`
pub(crate) fn value_at(array: &ArrayRef, row: usize) -> Value {
    if array.data_type() == &DataType::Null || array.is_null(row) {
        return Value::Null;
    }
    match array.data_type() {
        DataType::Boolean => Value::Bool(array.as_boolean().value(row)),
        DataType::Int64 => Value::Int(array.as_primitive::<Int64Type>().value(row)),
        DataType::Float64 => Value::Float(array.as_primitive::<Float64Type>().value(row)),
        DataType::Date32 => days_to_date(array.as_primitive::<Date32Type>().value(row))
            .map_or(Value::Null, Value::Date),
        DataType::Utf8 => Value::Str(array.as_string::<i32>().value(row).to_string()),
        _ => Value::Null,
    }
}
