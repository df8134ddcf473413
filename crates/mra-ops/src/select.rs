//! SliceSelect: keep slice tuples matching a predicate

use crate::data::{DataKind, MraData};
use crate::error::OperatorResult;
use crate::operator::MraOperator;
use mra_core::{EngineConfig, FeatureMap, RelationTuple, SliceRelation};
use std::sync::Arc;

/// A predicate over one slice tuple
pub trait SlicePredicate: Send + Sync {
    /// Whether the slice tuple is kept
    fn evaluate(&self, region: &RelationTuple, features: &FeatureMap) -> bool;
}

impl<F> SlicePredicate for F
where
    F: Fn(&RelationTuple, &FeatureMap) -> bool + Send + Sync,
{
    fn evaluate(&self, region: &RelationTuple, features: &FeatureMap) -> bool {
        self(region, features)
    }
}

/// `SliceRelation → SliceRelation` keeping the tuples the predicate accepts.
///
/// The global region is exempt from the predicate unless
/// `retain_global_region` is turned off, so reference data stays available
/// to later stages.
#[derive(Clone)]
pub struct SliceSelect {
    predicate: Arc<dyn SlicePredicate>,
    retain_global_region: bool,
}

impl SliceSelect {
    /// Create the operator from a closure
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&RelationTuple, &FeatureMap) -> bool + Send + Sync + 'static,
    {
        Self::from_predicate(Arc::new(predicate))
    }

    /// Create the operator from a shared predicate
    pub fn from_predicate(predicate: Arc<dyn SlicePredicate>) -> Self {
        Self {
            predicate,
            retain_global_region: EngineConfig::default().select.retain_global_region,
        }
    }

    /// Take the global-region policy from configuration
    pub fn with_config(self, config: &EngineConfig) -> Self {
        self.with_retain_global_region(config.select.retain_global_region)
    }

    /// Set whether the global region bypasses the predicate
    pub fn with_retain_global_region(mut self, retain: bool) -> Self {
        self.retain_global_region = retain;
        self
    }

    /// Filter `input` into a new slice relation
    pub fn apply(&self, input: &SliceRelation) -> OperatorResult<SliceRelation> {
        let mut output = SliceRelation::new(input.dimensions().clone());
        for (region, features) in input.iter() {
            let exempt = region.is_empty() && self.retain_global_region;
            if exempt || self.predicate.evaluate(region, features) {
                output.insert_region(region.clone(), features.clone())?;
            }
        }
        log::debug!("Selected {} of {} slice tuples", output.len(), input.len());
        Ok(output)
    }
}

impl std::fmt::Debug for SliceSelect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SliceSelect")
            .field("retain_global_region", &self.retain_global_region)
            .finish_non_exhaustive()
    }
}

impl MraOperator for SliceSelect {
    fn name(&self) -> &'static str {
        "SliceSelect"
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
#[path = "select_test.rs"]
mod tests;
