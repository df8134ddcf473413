//! Relation space construction by grouping sets and by full cube

use crate::data::{DataKind, MraData};
use crate::error::{OperatorError, OperatorResult};
use crate::operator::MraOperator;
use mra_core::{Aggregation, EngineConfig, RelationSchema, RelationSpace, Table};

/// Cubes wider than this still run but are logged as expensive
const WIDE_CUBE_KEYS: usize = 12;

/// Aggregate `base` over each explicit grouping set.
///
/// The space's dimensions are the union of the grouping sets. The empty
/// grouping set produces the one-row grand total.
pub fn create_relation_space(
    base: &Table,
    grouping_sets: &[RelationSchema],
    aggregations: &[Aggregation],
) -> OperatorResult<RelationSpace> {
    let dimensions = grouping_sets
        .iter()
        .fold(RelationSchema::empty(), |acc, set| acc.union(set));
    build_space(base, dimensions, grouping_sets, aggregations)
}

fn build_space(
    base: &Table,
    dimensions: RelationSchema,
    grouping_sets: &[RelationSchema],
    aggregations: &[Aggregation],
) -> OperatorResult<RelationSpace> {
    let mut space = RelationSpace::new(dimensions);
    for set in grouping_sets {
        let aggregated = if set.is_empty() {
            base.aggregate(aggregations)?
        } else {
            base.group_aggregate(set.attributes(), aggregations)?
        };
        log::trace!(
            "Grouping set {set} produced {} rows",
            aggregated.num_rows()
        );
        space.add_relation(aggregated, set.clone())?;
    }
    Ok(space)
}

/// `Table → RelationSpace` over caller-specified grouping sets
#[derive(Debug, Clone)]
pub struct CreateRelationSpace {
    grouping_sets: Vec<RelationSchema>,
    aggregations: Vec<Aggregation>,
}

impl CreateRelationSpace {
    /// Create the operator
    pub fn new(grouping_sets: Vec<RelationSchema>, aggregations: Vec<Aggregation>) -> Self {
        Self {
            grouping_sets,
            aggregations,
        }
    }

    /// Build the relation space from `base`
    pub fn apply(&self, base: &Table) -> OperatorResult<RelationSpace> {
        create_relation_space(base, &self.grouping_sets, &self.aggregations)
    }
}

impl MraOperator for CreateRelationSpace {
    fn name(&self) -> &'static str {
        "CreateRelationSpace"
    }

    fn input_kind(&self) -> DataKind {
        DataKind::Table
    }

    fn output_kind(&self) -> DataKind {
        DataKind::RelationSpace
    }

    fn execute(&self, data: MraData) -> OperatorResult<MraData> {
        let base = data.expect_table(self.name())?;
        Ok(self.apply(&base)?.into())
    }
}

/// `Table → RelationSpace` over every subset of the grouping keys
/// (`GROUP BY CUBE`).
///
/// Produces `2^k` relations, so the key count is bounded by
/// `cube.max_grouping_keys`.
#[derive(Debug, Clone)]
pub struct CreateRelationSpaceByCube {
    grouping_keys: Vec<String>,
    aggregations: Vec<Aggregation>,
    max_grouping_keys: usize,
}

impl CreateRelationSpaceByCube {
    /// Create the operator with the default key limit
    pub fn new<I, S>(grouping_keys: I, aggregations: Vec<Aggregation>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut keys: Vec<String> = Vec::new();
        for key in grouping_keys {
            let key = key.into();
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        Self {
            grouping_keys: keys,
            aggregations,
            max_grouping_keys: EngineConfig::default().cube.max_grouping_keys,
        }
    }

    /// Take the key limit from configuration
    pub fn with_config(mut self, config: &EngineConfig) -> Self {
        self.max_grouping_keys = config.cube.max_grouping_keys;
        self
    }

    /// Override the key limit
    pub fn with_max_grouping_keys(mut self, max: usize) -> Self {
        self.max_grouping_keys = max;
        self
    }

    /// Every subset of the grouping keys, smallest first.
    pub fn grouping_sets(&self) -> OperatorResult<Vec<RelationSchema>> {
        let k = self.grouping_keys.len();
        if k > self.max_grouping_keys {
            return Err(OperatorError::CubeTooLarge {
                keys: k,
                max: self.max_grouping_keys,
            });
        }
        if k > WIDE_CUBE_KEYS {
            log::warn!("Cube over {k} grouping keys will build 2^{k} relations");
        }
        let keys = RelationSchema::new(self.grouping_keys.iter().cloned());
        Ok((0..=k).flat_map(|size| keys.combinations(size)).collect())
    }

    /// Build the relation space from `base`
    pub fn apply(&self, base: &Table) -> OperatorResult<RelationSpace> {
        let sets = self.grouping_sets()?;
        log::debug!("Generating cube for keys: {:?}", self.grouping_keys);
        let dimensions = RelationSchema::new(self.grouping_keys.iter().cloned());
        build_space(base, dimensions, &sets, &self.aggregations)
    }
}

impl MraOperator for CreateRelationSpaceByCube {
    fn name(&self) -> &'static str {
        "CreateRelationSpaceByCube"
    }

    fn input_kind(&self) -> DataKind {
        DataKind::Table
    }

    fn output_kind(&self) -> DataKind {
        DataKind::RelationSpace
    }

    fn execute(&self, data: MraData) -> OperatorResult<MraData> {
        let base = data.expect_table(self.name())?;
        Ok(self.apply(&base)?.into())
    }
}

#[cfg(test)]
#[path = "cube_test.rs"]
mod tests;
