//! SliceProject: restrict slice tuples by region schema and feature schema

use crate::data::{DataKind, MraData};
use crate::error::OperatorResult;
use crate::operator::MraOperator;
use mra_core::{FeatureMap, RelationSchema, SliceRelation};
use std::collections::HashSet;

/// `SliceRelation → SliceRelation`.
///
/// Keeps regions whose attribute set (not values) is in the region
/// allow-list and, when a feature allow-list is set, only those features.
#[derive(Debug, Clone)]
pub struct SliceProject {
    region_schemas: HashSet<RelationSchema>,
    feature_schemas: Option<HashSet<RelationSchema>>,
}

impl SliceProject {
    /// Create the operator with a region allow-list
    pub fn new(region_schemas: impl IntoIterator<Item = RelationSchema>) -> Self {
        Self {
            region_schemas: region_schemas.into_iter().collect(),
            feature_schemas: None,
        }
    }

    /// Also restrict feature tables to `feature_schemas`
    pub fn with_feature_schemas(
        mut self,
        feature_schemas: impl IntoIterator<Item = RelationSchema>,
    ) -> Self {
        self.feature_schemas = Some(feature_schemas.into_iter().collect());
        self
    }

    /// Project `input` into a new slice relation
    pub fn apply(&self, input: &SliceRelation) -> OperatorResult<SliceRelation> {
        let mut output = SliceRelation::new(input.dimensions().clone());
        for (region, features) in input.iter() {
            if !self.region_schemas.contains(&region.schema()) {
                continue;
            }
            let kept: FeatureMap = match &self.feature_schemas {
                Some(allowed) => features
                    .iter()
                    .filter(|(schema, _)| allowed.contains(*schema))
                    .map(|(schema, table)| (schema.clone(), table.clone()))
                    .collect(),
                None => features.clone(),
            };
            output.insert_region(region.clone(), kept)?;
        }
        Ok(output)
    }
}

impl MraOperator for SliceProject {
    fn name(&self) -> &'static str {
        "SliceProject"
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
#[path = "project_test.rs"]
mod tests;
