//! Represent: slice a relation space into per-region feature tables

use crate::data::{DataKind, MraData};
use crate::error::OperatorResult;
use crate::operator::MraOperator;
use mra_core::{create_relation_tuple, RelationSchema, RelationSpace, RelationTuple, SliceRelation};

/// `RelationSpace → SliceRelation`.
///
/// For every (region schema `R`, feature schema `F`) pair the source table is
/// the one stored at `(R ∪ F) ∩ dimensions`. Pairs without a source table, or
/// whose source lacks a column of `R ∪ F`, contribute nothing. An empty `R`
/// yields the global slice carrying the `F`-projection of the whole source.
#[derive(Debug, Clone)]
pub struct Represent {
    region_schemas: Vec<RelationSchema>,
    feature_schemas: Vec<RelationSchema>,
}

impl Represent {
    /// Create the operator
    pub fn new(region_schemas: Vec<RelationSchema>, feature_schemas: Vec<RelationSchema>) -> Self {
        Self {
            region_schemas,
            feature_schemas,
        }
    }

    /// Slice `space` into a new slice relation
    pub fn apply(&self, space: &RelationSpace) -> OperatorResult<SliceRelation> {
        let mut slices = SliceRelation::new(space.dimensions().clone());
        for region_schema in &self.region_schemas {
            for feature_schema in &self.feature_schemas {
                let required = region_schema.union(feature_schema);
                let key = required.intersection(space.dimensions());
                let Some(source) = space.get_relation(&key) else {
                    log::debug!(
                        "No relation at {key} for region {region_schema} / feature {feature_schema}; skipping"
                    );
                    continue;
                };
                if let Some(missing) = required.iter().find(|c| !source.has_column(c)) {
                    log::debug!(
                        "Relation at {key} lacks column '{missing}' for feature {feature_schema}; skipping"
                    );
                    continue;
                }

                if region_schema.is_empty() {
                    let feature = source.project(feature_schema.attributes())?;
                    slices.add_slice_tuple(RelationTuple::empty(), feature_schema.clone(), feature)?;
                    continue;
                }

                for (key_values, group) in source.group_by(region_schema.attributes())? {
                    let region = create_relation_tuple(
                        region_schema.attributes().iter().cloned().zip(key_values),
                    );
                    let feature = group.project(feature_schema.attributes())?;
                    slices.add_slice_tuple(region, feature_schema.clone(), feature)?;
                }
            }
        }
        Ok(slices)
    }
}

impl MraOperator for Represent {
    fn name(&self) -> &'static str {
        "Represent"
    }

    fn input_kind(&self) -> DataKind {
        DataKind::RelationSpace
    }

    fn output_kind(&self) -> DataKind {
        DataKind::SliceRelation
    }

    fn execute(&self, data: MraData) -> OperatorResult<MraData> {
        let space = data.expect_space(self.name())?;
        Ok(self.apply(&space)?.into())
    }
}

#[cfg(test)]
#[path = "represent_test.rs"]
mod tests;
