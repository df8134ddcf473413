//! Identity transformation

use crate::error::OperatorResult;
use crate::transformation::SliceTransformation;
use mra_core::{RelationSchema, Table};

/// Returns a copy of its feature table
#[derive(Debug, Clone)]
pub struct IdentityTransformation {
    feature_schema: RelationSchema,
}

impl IdentityTransformation {
    /// Identity over `feature_schema`
    pub fn new(feature_schema: RelationSchema) -> Self {
        Self { feature_schema }
    }
}

impl SliceTransformation for IdentityTransformation {
    fn name(&self) -> &str {
        "identity"
    }

    fn feature_schema(&self) -> &RelationSchema {
        &self.feature_schema
    }

    fn apply(&self, feature: &Table, _reference: Option<&Table>) -> OperatorResult<Table> {
        Ok(feature.clone())
    }
}
