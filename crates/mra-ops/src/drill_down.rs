//! Drill-down frontier and the descendant check

use mra_core::{RelationSchema, RelationTuple};
use std::collections::HashSet;

/// Already-validated parent regions plus the schemas they were validated at.
///
/// A candidate region is a descendant when, for each of its one-component-
/// smaller projections whose schema is a known parent schema, that
/// projection is itself a validated parent. Projections at unknown schemas
/// are not checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrillDown {
    parents: HashSet<RelationTuple>,
    parent_schemas: HashSet<RelationSchema>,
}

impl DrillDown {
    /// Frontier with explicit parents and known parent schemas
    pub fn new<P, S>(parents: P, parent_schemas: S) -> Self
    where
        P: IntoIterator<Item = RelationTuple>,
        S: IntoIterator<Item = RelationSchema>,
    {
        Self {
            parents: parents.into_iter().collect(),
            parent_schemas: parent_schemas.into_iter().collect(),
        }
    }

    /// Frontier that only knows the schemas its parents carry.
    ///
    /// Suits depth-first expansion: ancestry outside the tracked schemas is
    /// never required to match.
    pub fn from_parents<P>(parents: P) -> Self
    where
        P: IntoIterator<Item = RelationTuple>,
    {
        let parents: HashSet<RelationTuple> = parents.into_iter().collect();
        let parent_schemas = parents.iter().map(RelationTuple::schema).collect();
        Self {
            parents,
            parent_schemas,
        }
    }

    /// Frontier for level-by-level expansion.
    ///
    /// Every `level`-sized subset of `dimensions` is a known parent schema, so
    /// each candidate at `level + 1` must have all of its immediate parents in
    /// `parents`.
    pub fn breadth_first<P>(parents: P, dimensions: &RelationSchema, level: usize) -> Self
    where
        P: IntoIterator<Item = RelationTuple>,
    {
        Self::new(parents, dimensions.combinations(level))
    }

    /// Validated parent regions
    pub fn parents(&self) -> &HashSet<RelationTuple> {
        &self.parents
    }

    /// Schemas at which parents were validated
    pub fn parent_schemas(&self) -> &HashSet<RelationSchema> {
        &self.parent_schemas
    }

    /// Whether `region` descends from the validated frontier.
    ///
    /// The empty region always passes.
    pub fn is_descendant(&self, region: &RelationTuple) -> bool {
        (0..region.len()).all(|i| {
            let projection = region.without(i);
            !self.parent_schemas.contains(&projection.schema()) || self.parents.contains(&projection)
        })
    }
}

#[cfg(test)]
#[path = "drill_down_test.rs"]
mod tests;
