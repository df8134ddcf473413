//! Relation tuple: canonical attribute/value identity of a region

use crate::error::{CoreError, CoreResult};
use crate::schema::RelationSchema;
use mra_table::{Table, TableResult, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An immutable sequence of `(attribute, value)` pairs sorted by attribute.
///
/// A tuple identifies one region, e.g. `Device=Pixel, Browser=Chrome`. The
/// empty tuple is the global region that carries reference data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Vec<(String, Value)>", into = "Vec<(String, Value)>")]
pub struct RelationTuple {
    pairs: Vec<(String, Value)>,
}

/// Canonicalize a key/value mapping into a [`RelationTuple`].
///
/// Keys are sorted, so mappings built in different orders produce equal
/// tuples. A key repeated in the input keeps its last value.
pub fn create_relation_tuple<I, K, V>(key_values: I) -> RelationTuple
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    let map: BTreeMap<String, Value> = key_values
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect();
    RelationTuple {
        pairs: map.into_iter().collect(),
    }
}

impl RelationTuple {
    /// The empty (global) region
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a tuple from pairs, rejecting repeated attributes
    pub fn try_from_pairs<I, K, V>(pairs: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut pairs: Vec<(String, Value)> = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        pairs.sort_by(|a, b| a.0.cmp(&b.0));
        if let Some(dup) = pairs.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(CoreError::DuplicateAttribute {
                attribute: dup[0].0.clone(),
            });
        }
        Ok(Self { pairs })
    }

    /// Whether this is the global region
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Number of components
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Components in attribute order
    pub fn pairs(&self) -> &[(String, Value)] {
        &self.pairs
    }

    /// Value of one attribute
    pub fn get(&self, attribute: &str) -> Option<&Value> {
        self.pairs
            .binary_search_by(|(a, _)| a.as_str().cmp(attribute))
            .ok()
            .map(|i| &self.pairs[i].1)
    }

    /// The set of attribute names (not values) of this region
    pub fn schema(&self) -> RelationSchema {
        RelationSchema::new(self.pairs.iter().map(|(a, _)| a.clone()))
    }

    /// Tuple with component `index` removed.
    ///
    /// Out-of-range indices return an unchanged copy.
    pub fn without(&self, index: usize) -> RelationTuple {
        let mut pairs = self.pairs.clone();
        if index < pairs.len() {
            pairs.remove(index);
        }
        Self { pairs }
    }

    /// Tuple restricted to the attributes of `schema`
    pub fn project(&self, schema: &RelationSchema) -> RelationTuple {
        Self {
            pairs: self
                .pairs
                .iter()
                .filter(|(a, _)| schema.contains(a))
                .cloned()
                .collect(),
        }
    }

    /// One-row table with a column per attribute
    pub fn to_row_table(&self) -> TableResult<Table> {
        Table::from_rows(
            self.pairs.iter().map(|(a, _)| a.clone()),
            vec![self.pairs.iter().map(|(_, v)| v.clone()).collect()],
        )
    }
}

impl std::fmt::Display for RelationTuple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (attr, value)) in self.pairs.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{attr}={value}")?;
        }
        Ok(())
    }
}

impl TryFrom<Vec<(String, Value)>> for RelationTuple {
    type Error = CoreError;

    fn try_from(pairs: Vec<(String, Value)>) -> Result<Self, Self::Error> {
        Self::try_from_pairs(pairs)
    }
}

impl From<RelationTuple> for Vec<(String, Value)> {
    fn from(tuple: RelationTuple) -> Self {
        tuple.pairs
    }
}

#[cfg(test)]
#[path = "tuple_test.rs"]
mod tests;
