//! Support of a region relative to the global total

use crate::error::OperatorResult;
use crate::transformation::SliceTransformation;
use mra_core::{Aggregation, RelationSchema, Table, Value};

/// Output column produced by [`SupportTransformation`]
pub const SUPPORT_COLUMN: &str = "support";

/// Share of the global mass that falls in a region.
///
/// Produces a one-row `support` table:
/// `sum(mass in region) / sum(mass in reference)`, or `0.0` when the
/// reference mass is zero.
#[derive(Debug, Clone)]
pub struct SupportTransformation {
    mass_column: String,
    feature_schema: RelationSchema,
}

impl SupportTransformation {
    /// Support over the `{mass_column}` feature schema
    pub fn new(mass_column: impl Into<String>) -> Self {
        let mass_column = mass_column.into();
        let feature_schema = RelationSchema::new([mass_column.clone()]);
        Self {
            mass_column,
            feature_schema,
        }
    }

    fn mass(&self, table: &Table) -> OperatorResult<f64> {
        let total = table.aggregate(&[Aggregation::sum(self.mass_column.as_str())])?;
        Ok(total
            .value(0, &self.mass_column)
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0))
    }
}

impl SliceTransformation for SupportTransformation {
    fn name(&self) -> &str {
        "support"
    }

    fn feature_schema(&self) -> &RelationSchema {
        &self.feature_schema
    }

    fn requires_reference_data(&self) -> bool {
        true
    }

    fn apply(&self, feature: &Table, reference: Option<&Table>) -> OperatorResult<Table> {
        let region_mass = self.mass(feature)?;
        let global_mass = match reference {
            Some(reference) => self.mass(reference)?,
            None => 0.0,
        };
        let support = if global_mass == 0.0 {
            0.0
        } else {
            region_mass / global_mass
        };
        Ok(Table::from_rows(
            [SUPPORT_COLUMN],
            vec![vec![Value::Float(support)]],
        )?)
    }
}

#[cfg(test)]
#[path = "support_test.rs"]
mod tests;
