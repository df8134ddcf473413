//! Ratio of two columns

use crate::error::OperatorResult;
use crate::transformation::SliceTransformation;
use mra_core::{RelationSchema, Table, TableError, Value};

/// Appends `output = numerator / denominator` to each row.
///
/// A zero or null denominator, or a null numerator, yields `0.0`.
#[derive(Debug, Clone)]
pub struct RatioTransformation {
    numerator: String,
    denominator: String,
    output: String,
    feature_schema: RelationSchema,
}

impl RatioTransformation {
    /// Ratio over the `{numerator, denominator}` feature schema
    pub fn new(
        numerator: impl Into<String>,
        denominator: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        let numerator = numerator.into();
        let denominator = denominator.into();
        let feature_schema = RelationSchema::new([numerator.clone(), denominator.clone()]);
        Self {
            numerator,
            denominator,
            output: output.into(),
            feature_schema,
        }
    }

    fn cell(&self, column: &str, value: &Value) -> Result<Option<f64>, TableError> {
        if value.is_null() {
            return Ok(None);
        }
        value
            .as_f64()
            .map(Some)
            .ok_or_else(|| TableError::NonNumeric {
                column: column.to_string(),
                func: "ratio".to_string(),
                found: value.type_name(),
            })
    }
}

impl SliceTransformation for RatioTransformation {
    fn name(&self) -> &str {
        &self.output
    }

    fn feature_schema(&self) -> &RelationSchema {
        &self.feature_schema
    }

    fn apply(&self, feature: &Table, _reference: Option<&Table>) -> OperatorResult<Table> {
        let numerators = feature.column_values(&self.numerator)?;
        let denominators = feature.column_values(&self.denominator)?;
        let mut ratios = Vec::with_capacity(feature.num_rows());
        for (n, d) in numerators.iter().zip(&denominators) {
            let n = self.cell(&self.numerator, n)?;
            let d = self.cell(&self.denominator, d)?;
            let ratio = match (n, d) {
                (Some(n), Some(d)) if d != 0.0 => n / d,
                _ => 0.0,
            };
            ratios.push(Value::Float(ratio));
        }
        Ok(feature.with_column(&self.output, ratios)?)
    }
}

#[cfg(test)]
#[path = "ratio_test.rs"]
mod tests;
