//! Error types for mra-ops

use crate::data::DataKind;
use thiserror::Error;

/// Operator error type
///
/// Every failure aborts the operator call; no partial output is produced.
#[derive(Error, Debug)]
pub enum OperatorError {
    /// OP001: Operator received the wrong structural kind of input
    #[error("[OP001] {operator} expects a {expected}, got a {found}")]
    TypeMismatch {
        operator: String,
        expected: DataKind,
        found: DataKind,
    },

    /// OP002: Adjacent pipeline stages do not fit together
    #[error("[OP002] Cannot chain {next} after {previous}: {previous} produces a {produced}, {next} expects a {expected}")]
    IncompatibleStages {
        previous: String,
        next: String,
        produced: DataKind,
        expected: DataKind,
    },

    /// OP003: Transformation needs reference data the global region lacks
    #[error("[OP003] Transformation '{transformation}' requires reference data for {schema} but the global region has none")]
    MissingReferenceData {
        transformation: String,
        schema: String,
    },

    /// OP004: Full cube over too many grouping keys
    #[error("[OP004] Cube over {keys} grouping keys exceeds the limit of {max}; pass explicit grouping sets instead")]
    CubeTooLarge { keys: usize, max: usize },

    /// OP005: Two transformations claim the same feature schema
    #[error("[OP005] More than one transformation declares feature schema {schema}")]
    DuplicateTransformation { schema: String },

    /// OP006: A transformation failed on one region
    #[error("[OP006] Transformation '{transformation}' failed for region ({region}): {source}")]
    TransformationFailed {
        transformation: String,
        region: String,
        source: Box<OperatorError>,
    },

    /// OP007: Core error propagation
    #[error("[OP007] Core error: {0}")]
    Core(#[from] mra_core::CoreError),

    /// OP008: Table error propagation
    #[error("[OP008] Table error: {0}")]
    Table(#[from] mra_table::TableError),
}

/// Result type alias for OperatorError
pub type OperatorResult<T> = Result<T, OperatorError>;
