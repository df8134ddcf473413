//! Relation schema: canonical, order-independent set of attribute names

use mra_table::Table;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// An immutable set of attribute names.
///
/// Attributes are stored sorted and deduplicated, so construction order does
/// not affect equality or hashing:
/// `RelationSchema::new(["a", "b"]) == RelationSchema::new(["b", "a", "b"])`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct RelationSchema {
    attributes: Vec<String>,
}

impl RelationSchema {
    /// Create a schema from attribute names in any order
    pub fn new<I, S>(attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: BTreeSet<String> = attributes.into_iter().map(Into::into).collect();
        Self {
            attributes: set.into_iter().collect(),
        }
    }

    /// The empty schema (the schema of the global region)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Schema made of every column of a table
    pub fn of_table(table: &Table) -> Self {
        Self::new(table.columns())
    }

    /// Sorted attribute names
    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    /// Iterate over attribute names in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(String::as_str)
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Whether the schema has no attributes
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Attribute membership test
    pub fn contains(&self, attribute: &str) -> bool {
        self.attributes
            .binary_search_by(|a| a.as_str().cmp(attribute))
            .is_ok()
    }

    /// Attributes in either schema
    pub fn union(&self, other: &RelationSchema) -> RelationSchema {
        Self::new(self.attributes.iter().chain(&other.attributes).cloned())
    }

    /// Attributes in both schemas
    pub fn intersection(&self, other: &RelationSchema) -> RelationSchema {
        Self {
            attributes: self
                .attributes
                .iter()
                .filter(|a| other.contains(a))
                .cloned()
                .collect(),
        }
    }

    /// Attributes of `self` not in `other`
    pub fn difference(&self, other: &RelationSchema) -> RelationSchema {
        Self {
            attributes: self
                .attributes
                .iter()
                .filter(|a| !other.contains(a))
                .cloned()
                .collect(),
        }
    }

    /// Whether every attribute of `self` is in `other`
    pub fn is_subset(&self, other: &RelationSchema) -> bool {
        self.attributes.iter().all(|a| other.contains(a))
    }

    /// Whether the schemas share no attribute
    pub fn is_disjoint(&self, other: &RelationSchema) -> bool {
        !self.attributes.iter().any(|a| other.contains(a))
    }

    /// Every sub-schema with exactly `size` attributes, in lexicographic order
    pub fn combinations(&self, size: usize) -> Vec<RelationSchema> {
        let n = self.attributes.len();
        if size > n {
            return Vec::new();
        }
        let mut out = Vec::new();
        let mut picks: Vec<usize> = (0..size).collect();
        loop {
            out.push(Self {
                attributes: picks.iter().map(|&i| self.attributes[i].clone()).collect(),
            });
            // Advance the rightmost index that still has room.
            let Some(pos) = (0..size).rev().find(|&i| picks[i] < n - size + i) else {
                return out;
            };
            picks[pos] += 1;
            for i in pos + 1..size {
                picks[i] = picks[i - 1] + 1;
            }
        }
    }
}

impl std::fmt::Display for RelationSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({})", self.attributes.join(", "))
    }
}

impl From<Vec<String>> for RelationSchema {
    fn from(attributes: Vec<String>) -> Self {
        Self::new(attributes)
    }
}

impl From<RelationSchema> for Vec<String> {
    fn from(schema: RelationSchema) -> Self {
        schema.attributes
    }
}

impl<S: Into<String>> FromIterator<S> for RelationSchema {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
#[path = "schema_test.rs"]
mod tests;
