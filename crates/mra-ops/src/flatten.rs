//! Flatten: reassemble a relation space from slice tuples

use crate::data::{DataKind, MraData};
use crate::error::OperatorResult;
use crate::operator::MraOperator;
use mra_core::{RelationSchema, RelationSpace, SliceRelation, Table};
use std::collections::BTreeMap;

/// `SliceRelation → RelationSpace`.
///
/// Each non-global region becomes its one-row attribute table cross-joined
/// with every feature table; regions sharing an attribute set are stacked
/// into one relation keyed by that set.
#[derive(Debug, Clone)]
pub struct Flatten {
    dimensions: RelationSchema,
}

impl Flatten {
    /// Create the operator; `dimensions` bounds the produced space
    pub fn new(dimensions: RelationSchema) -> Self {
        Self { dimensions }
    }

    /// Flatten `input` into a new relation space
    pub fn apply(&self, input: &SliceRelation) -> OperatorResult<RelationSpace> {
        let mut by_schema: BTreeMap<RelationSchema, Vec<Table>> = BTreeMap::new();
        for (region, features) in input.iter() {
            if region.is_empty() {
                continue;
            }
            let mut wide = region.to_row_table()?;
            for feature in features.values() {
                wide = wide.cross_join(feature)?;
            }
            by_schema.entry(region.schema()).or_default().push(wide);
        }

        let mut space = RelationSpace::new(self.dimensions.clone());
        for (schema, tables) in by_schema {
            space.add_relation(Table::concat(&tables)?, schema)?;
        }
        Ok(space)
    }
}

impl MraOperator for Flatten {
    fn name(&self) -> &'static str {
        "Flatten"
    }

    fn input_kind(&self) -> DataKind {
        DataKind::SliceRelation
    }

    fn output_kind(&self) -> DataKind {
        DataKind::RelationSpace
    }

    fn execute(&self, data: MraData) -> OperatorResult<MraData> {
        let slices = data.expect_slices(self.name())?;
        Ok(self.apply(&slices)?.into())
    }
}

#[cfg(test)]
#[path = "flatten_test.rs"]
mod tests;
