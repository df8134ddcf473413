//! Slice transformation capability

use crate::error::OperatorResult;
use mra_core::{RelationSchema, Table};

/// A per-region feature transformation.
///
/// The reference table (the global region's feature table under
/// [`feature_schema`](Self::feature_schema)) is passed to every call when
/// [`requires_reference_data`](Self::requires_reference_data) is true, so one
/// instance can be shared across concurrent runs.
pub trait SliceTransformation: Send + Sync {
    /// Name used in logs and errors
    fn name(&self) -> &str;
    /// Feature schema this transformation consumes
    fn feature_schema(&self) -> &RelationSchema;
    /// Whether `apply` needs the global region's table
    fn requires_reference_data(&self) -> bool {
        false
    }
    /// Map one feature table to its transformed table
    fn apply(&self, feature: &Table, reference: Option<&Table>) -> OperatorResult<Table>;
}

/// A transformation backed by a closure
pub struct FnTransformation<F> {
    name: String,
    feature_schema: RelationSchema,
    requires_reference_data: bool,
    func: F,
}

impl<F> FnTransformation<F>
where
    F: Fn(&Table, Option<&Table>) -> OperatorResult<Table> + Send + Sync,
{
    /// Wrap `func` as a transformation over `feature_schema`
    pub fn new(name: impl Into<String>, feature_schema: RelationSchema, func: F) -> Self {
        Self {
            name: name.into(),
            feature_schema,
            requires_reference_data: false,
            func,
        }
    }

    /// Require the global region's table as reference data
    pub fn with_reference_data(mut self) -> Self {
        self.requires_reference_data = true;
        self
    }
}

impl<F> std::fmt::Debug for FnTransformation<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnTransformation")
            .field("name", &self.name)
            .field("feature_schema", &self.feature_schema)
            .field("requires_reference_data", &self.requires_reference_data)
            .finish()
    }
}

impl<F> SliceTransformation for FnTransformation<F>
where
    F: Fn(&Table, Option<&Table>) -> OperatorResult<Table> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn feature_schema(&self) -> &RelationSchema {
        &self.feature_schema
    }

    fn requires_reference_data(&self) -> bool {
        self.requires_reference_data
    }

    fn apply(&self, feature: &Table, reference: Option<&Table>) -> OperatorResult<Table> {
        (self.func)(feature, reference)
    }
}
