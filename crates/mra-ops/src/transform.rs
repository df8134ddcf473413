//! SliceTransform: per-region feature transformations with drill-down pruning

use crate::data::{DataKind, MraData};
use crate::drill_down::DrillDown;
use crate::error::{OperatorError, OperatorResult};
use crate::operator::MraOperator;
use crate::transformation::SliceTransformation;
use mra_core::{FeatureMap, RelationSchema, SliceRelation, Table};
use std::collections::HashSet;
use std::sync::Arc;

/// `SliceRelation → SliceRelation`.
///
/// Each region's feature table whose schema matches a transformation is
/// replaced by the transformation's output, stored under the output's own
/// column schema; other feature tables pass through. The global region is
/// copied unmodified. With a drill-down frontier, regions that fail the
/// descendant check are dropped.
#[derive(Clone)]
pub struct SliceTransform {
    transformations: Vec<Arc<dyn SliceTransformation>>,
    dimensions: RelationSchema,
    drill_down: Option<DrillDown>,
}

impl SliceTransform {
    /// Create the operator; at most one transformation per feature schema
    pub fn new(
        transformations: Vec<Arc<dyn SliceTransformation>>,
        dimensions: RelationSchema,
    ) -> OperatorResult<Self> {
        let mut seen = HashSet::new();
        for t in &transformations {
            if !seen.insert(t.feature_schema()) {
                return Err(OperatorError::DuplicateTransformation {
                    schema: t.feature_schema().to_string(),
                });
            }
        }
        Ok(Self {
            transformations,
            dimensions,
            drill_down: None,
        })
    }

    /// Only transform regions descending from `drill_down`
    pub fn with_drill_down(mut self, drill_down: DrillDown) -> Self {
        self.drill_down = Some(drill_down);
        self
    }

    /// Whether any transformation consumes reference data
    pub fn requires_reference_data(&self) -> bool {
        self.transformations
            .iter()
            .any(|t| t.requires_reference_data())
    }

    /// Transform `input` into a new slice relation.
    ///
    /// Reference data is bound before any region is processed; a missing
    /// reference table fails the whole call.
    pub fn apply(&self, input: &SliceRelation) -> OperatorResult<SliceRelation> {
        let bound = self.bind_references(input)?;

        let mut output = SliceRelation::new(self.dimensions.clone());
        for (region, features) in input.iter() {
            if region.is_empty() {
                output.insert_region(region.clone(), features.clone())?;
                continue;
            }
            if let Some(drill_down) = &self.drill_down {
                if !drill_down.is_descendant(region) {
                    log::trace!("Region ({region}) is not a drill-down descendant; skipping");
                    continue;
                }
            }
            if features.is_empty() {
                output.insert_region(region.clone(), FeatureMap::new())?;
                continue;
            }

            for (schema, feature) in features {
                let matched = bound
                    .iter()
                    .find(|(t, _)| t.feature_schema() == schema);
                let table = match matched {
                    Some((t, reference)) => t.apply(feature, *reference).map_err(|e| {
                        OperatorError::TransformationFailed {
                            transformation: t.name().to_string(),
                            region: region.to_string(),
                            source: Box::new(e),
                        }
                    })?,
                    None => feature.clone(),
                };
                let out_schema = RelationSchema::of_table(&table);
                output.add_slice_tuple(region.clone(), out_schema, table)?;
            }
        }
        Ok(output)
    }

    fn bind_references<'a>(
        &'a self,
        input: &'a SliceRelation,
    ) -> OperatorResult<Vec<(&'a dyn SliceTransformation, Option<&'a Table>)>> {
        let global = input.global_features();
        self.transformations
            .iter()
            .map(|t| {
                if !t.requires_reference_data() {
                    return Ok((t.as_ref(), None));
                }
                let reference = global
                    .and_then(|features| features.get(t.feature_schema()))
                    .ok_or_else(|| OperatorError::MissingReferenceData {
                        transformation: t.name().to_string(),
                        schema: t.feature_schema().to_string(),
                    })?;
                Ok((t.as_ref(), Some(reference)))
            })
            .collect()
    }
}

impl std::fmt::Debug for SliceTransform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.transformations.iter().map(|t| t.name()).collect();
        f.debug_struct("SliceTransform")
            .field("transformations", &names)
            .field("dimensions", &self.dimensions)
            .field("drill_down", &self.drill_down)
            .finish()
    }
}

impl MraOperator for SliceTransform {
    fn name(&self) -> &'static str {
        "SliceTransform"
    }

    fn input_kind(&self) -> DataKind {
        DataKind::SliceRelation
    }

    fn output_kind(&self) -> DataKind {
        DataKind::SliceRelation
    }

    fn execute(&self, data: MraData) -> OperatorResult<MraData> {
        let slices = data.expect_slices(self.name())?;
        Ok(self.apply(&slices)?.into())
    }
}

#[cfg(test)]
#[path = "transform_test.rs"]
mod tests;
