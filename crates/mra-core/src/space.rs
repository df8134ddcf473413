//! Relation space: a dimension-bounded collection of tables keyed by schema

use crate::error::{CoreError, CoreResult};
use crate::schema::RelationSchema;
use mra_table::Table;
use std::collections::BTreeMap;

/// A family of tables organized around a fixed dimension schema `D`.
///
/// Every stored table is keyed by the schema `K` equal to the intersection of
/// its columns with `D`; a table is only retrievable by that exact key.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationSpace {
    dimensions: RelationSchema,
    relations: BTreeMap<RelationSchema, Table>,
}

impl RelationSpace {
    /// Create an empty space over `dimensions`
    pub fn new(dimensions: RelationSchema) -> Self {
        Self {
            dimensions,
            relations: BTreeMap::new(),
        }
    }

    /// The dimension schema of the space
    pub fn dimensions(&self) -> &RelationSchema {
        &self.dimensions
    }

    /// Store `relation` under `schema`, replacing any previous entry.
    ///
    /// Fails without modifying the space if the relation's dimensional
    /// columns are not exactly `schema`.
    pub fn add_relation(&mut self, relation: Table, schema: RelationSchema) -> CoreResult<()> {
        let actual = RelationSchema::of_table(&relation).intersection(&self.dimensions);
        if actual != schema {
            return Err(CoreError::SchemaMismatch {
                schema: schema.to_string(),
                actual: actual.to_string(),
                dimensions: self.dimensions.to_string(),
            });
        }
        if self.relations.insert(schema, relation).is_some() {
            log::trace!("Replaced relation {actual} in relation space");
        }
        Ok(())
    }

    /// Table stored under exactly `schema`, if any
    pub fn get_relation(&self, schema: &RelationSchema) -> Option<&Table> {
        self.relations.get(schema)
    }

    /// Whether a table is stored under `schema`
    pub fn contains(&self, schema: &RelationSchema) -> bool {
        self.relations.contains_key(schema)
    }

    /// Stored schema keys in canonical order
    pub fn schemas(&self) -> impl Iterator<Item = &RelationSchema> {
        self.relations.keys()
    }

    /// Stored `(schema, table)` pairs in canonical schema order
    pub fn relations(&self) -> impl Iterator<Item = (&RelationSchema, &Table)> {
        self.relations.iter()
    }

    /// Number of stored tables
    pub fn len(&self) -> usize {
        self.relations.len()
    }

    /// Whether no table is stored
    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }
}

#[cfg(test)]
#[path = "space_test.rs"]
mod tests;
