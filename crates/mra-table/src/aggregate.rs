//! Aggregation specifications and their evaluation

use crate::column::{days_to_date, type_name};
use crate::error::{TableError, TableResult};
use crate::value::Value;
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute;
use arrow::datatypes::{DataType, Date32Type, Float64Type, Int64Type};
use serde::{Deserialize, Serialize};

/// Aggregate function applied to one source column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggFunc {
    /// Sum of non-null values (integer over an integer column)
    Sum,
    /// Number of non-null values
    Count,
    /// Arithmetic mean of non-null values
    Mean,
    /// Smallest non-null value
    Min,
    /// Largest non-null value
    Max,
}

impl std::fmt::Display for AggFunc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AggFunc::Sum => write!(f, "sum"),
            AggFunc::Count => write!(f, "count"),
            AggFunc::Mean => write!(f, "mean"),
            AggFunc::Min => write!(f, "min"),
            AggFunc::Max => write!(f, "max"),
        }
    }
}

/// One aggregated output column: `output = func(source)`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Aggregation {
    /// Name of the produced column
    pub output: String,
    /// Column the function reads
    pub source: String,
    /// Function to apply
    pub func: AggFunc,
}

impl Aggregation {
    /// Create an aggregation with an explicit output name
    pub fn new(output: impl Into<String>, source: impl Into<String>, func: AggFunc) -> Self {
        Self {
            output: output.into(),
            source: source.into(),
            func,
        }
    }

    /// `column = sum(column)`
    pub fn sum(column: impl Into<String>) -> Self {
        Self::same_name(column, AggFunc::Sum)
    }

    /// `column = count(column)`
    pub fn count(column: impl Into<String>) -> Self {
        Self::same_name(column, AggFunc::Count)
    }

    /// `column = mean(column)`
    pub fn mean(column: impl Into<String>) -> Self {
        Self::same_name(column, AggFunc::Mean)
    }

    /// `column = min(column)`
    pub fn min(column: impl Into<String>) -> Self {
        Self::same_name(column, AggFunc::Min)
    }

    /// `column = max(column)`
    pub fn max(column: impl Into<String>) -> Self {
        Self::same_name(column, AggFunc::Max)
    }

    fn same_name(column: impl Into<String>, func: AggFunc) -> Self {
        let column = column.into();
        Self {
            output: column.clone(),
            source: column,
            func,
        }
    }

    /// Fold one column into a single cell, skipping nulls
    pub(crate) fn evaluate(&self, array: &ArrayRef) -> TableResult<Value> {
        if array.data_type() == &DataType::Null {
            return Ok(match self.func {
                AggFunc::Sum | AggFunc::Count => Value::Int(0),
                AggFunc::Mean | AggFunc::Min | AggFunc::Max => Value::Null,
            });
        }
        match self.func {
            AggFunc::Count => Ok(Value::Int((array.len() - array.null_count()) as i64)),
            AggFunc::Sum => self.sum_values(array),
            AggFunc::Mean => self.mean_value(array),
            AggFunc::Min => self.extreme(array, false),
            AggFunc::Max => self.extreme(array, true),
        }
    }

    fn sum_values(&self, array: &ArrayRef) -> TableResult<Value> {
        match array.data_type() {
            DataType::Int64 => compute::sum_checked(array.as_primitive::<Int64Type>())
                .map(|total| Value::Int(total.unwrap_or(0)))
                .map_err(|_| TableError::Overflow {
                    column: self.source.clone(),
                }),
            DataType::Float64 => Ok(Value::Float(
                compute::sum(array.as_primitive::<Float64Type>()).unwrap_or(0.0),
            )),
            other => Err(self.unsupported(other)),
        }
    }

    fn mean_value(&self, array: &ArrayRef) -> TableResult<Value> {
        if !matches!(array.data_type(), DataType::Int64 | DataType::Float64) {
            return Err(self.unsupported(array.data_type()));
        }
        let floats = compute::cast(array, &DataType::Float64)?;
        let floats = floats.as_primitive::<Float64Type>();
        let present = floats.len() - floats.null_count();
        Ok(match compute::sum(floats) {
            Some(total) if present > 0 => Value::Float(total / present as f64),
            _ => Value::Null,
        })
    }

    fn extreme(&self, array: &ArrayRef, largest: bool) -> TableResult<Value> {
        let value = match array.data_type() {
            DataType::Int64 => {
                let a = array.as_primitive::<Int64Type>();
                let extreme = if largest { compute::max(a) } else { compute::min(a) };
                extreme.map(Value::Int)
            }
            DataType::Float64 => {
                let a = array.as_primitive::<Float64Type>();
                let extreme = if largest { compute::max(a) } else { compute::min(a) };
                extreme.map(Value::Float)
            }
            DataType::Date32 => {
                let a = array.as_primitive::<Date32Type>();
                let extreme = if largest { compute::max(a) } else { compute::min(a) };
                extreme.and_then(days_to_date).map(Value::Date)
            }
            DataType::Utf8 => {
                let a = array.as_string::<i32>();
                let extreme = if largest {
                    compute::max_string(a)
                } else {
                    compute::min_string(a)
                };
                extreme.map(|s| Value::Str(s.to_string()))
            }
            DataType::Boolean => {
                let a = array.as_boolean();
                let extreme = if largest {
                    compute::max_boolean(a)
                } else {
                    compute::min_boolean(a)
                };
                extreme.map(Value::Bool)
            }
            other => return Err(self.unsupported(other)),
        };
        Ok(value.unwrap_or(Value::Null))
    }

    fn unsupported(&self, data_type: &DataType) -> TableError {
        TableError::NonNumeric {
            column: self.source.clone(),
            func: self.func.to_string(),
            found: type_name(data_type),
        }
    }
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod tests;
