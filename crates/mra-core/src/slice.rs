//! Slice relation: the entity-centric view mapping regions to feature tables

use crate::error::{CoreError, CoreResult};
use crate::schema::RelationSchema;
use crate::tuple::RelationTuple;
use mra_table::Table;
use std::collections::BTreeMap;

/// Feature tables of one region, keyed by feature schema
pub type FeatureMap = BTreeMap<RelationSchema, Table>;

/// A collection of slice tuples: each region maps to its feature tables.
///
/// Within one region, every feature table's columns equal its feature schema
/// and distinct feature schemas are column-disjoint, so a region can always
/// be widened into one row set by cross-joining its features.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceRelation {
    dimensions: RelationSchema,
    data: BTreeMap<RelationTuple, FeatureMap>,
}

impl SliceRelation {
    /// Create an empty slice relation over `dimensions`
    pub fn new(dimensions: RelationSchema) -> Self {
        Self {
            dimensions,
            data: BTreeMap::new(),
        }
    }

    /// The dimension schema inherited from the source space
    pub fn dimensions(&self) -> &RelationSchema {
        &self.dimensions
    }

    /// Add or replace one feature table of `region`
    pub fn add_slice_tuple(
        &mut self,
        region: RelationTuple,
        feature_schema: RelationSchema,
        feature: Table,
    ) -> CoreResult<()> {
        let actual = RelationSchema::of_table(&feature);
        if actual != feature_schema {
            return Err(CoreError::FeatureSchemaMismatch {
                region: region.to_string(),
                schema: feature_schema.to_string(),
                actual: actual.to_string(),
            });
        }
        if let Some(features) = self.data.get(&region) {
            if let Some(existing) = features
                .keys()
                .find(|s| **s != feature_schema && !s.is_disjoint(&feature_schema))
            {
                return Err(CoreError::OverlappingFeatures {
                    region: region.to_string(),
                    schema: feature_schema.to_string(),
                    existing: existing.to_string(),
                });
            }
        }
        self.data
            .entry(region)
            .or_default()
            .insert(feature_schema, feature);
        Ok(())
    }

    /// Add a region with all of its feature tables
    pub fn insert_region(&mut self, region: RelationTuple, features: FeatureMap) -> CoreResult<()> {
        if features.is_empty() {
            self.data.entry(region).or_default();
            return Ok(());
        }
        for (schema, table) in features {
            self.add_slice_tuple(region.clone(), schema, table)?;
        }
        Ok(())
    }

    /// Feature tables of `region`
    pub fn get(&self, region: &RelationTuple) -> Option<&FeatureMap> {
        self.data.get(region)
    }

    /// Feature tables of the global (empty) region
    pub fn global_features(&self) -> Option<&FeatureMap> {
        self.data.get(&RelationTuple::empty())
    }

    /// Whether `region` has a slice tuple
    pub fn contains_region(&self, region: &RelationTuple) -> bool {
        self.data.contains_key(region)
    }

    /// Regions in canonical order
    pub fn regions(&self) -> impl Iterator<Item = &RelationTuple> {
        self.data.keys()
    }

    /// Slice tuples in canonical region order
    pub fn iter(&self) -> impl Iterator<Item = (&RelationTuple, &FeatureMap)> {
        self.data.iter()
    }

    /// Number of slice tuples
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether there are no slice tuples
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl IntoIterator for SliceRelation {
    type Item = (RelationTuple, FeatureMap);
    type IntoIter = std::collections::btree_map::IntoIter<RelationTuple, FeatureMap>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

#[cfg(test)]
#[path = "slice_test.rs"]
mod tests;
