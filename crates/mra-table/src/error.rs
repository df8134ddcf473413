//! Error types for mra-table

use arrow::error::ArrowError;
use thiserror::Error;

/// Table error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// T001: Column lookup failed
    #[error("[T001] Unknown column '{column}'")]
    UnknownColumn { column: String },

    /// T002: The same column name appears twice
    #[error("[T002] Duplicate column '{column}'")]
    DuplicateColumn { column: String },

    /// T003: Row width does not match the table width
    #[error("[T003] Row has {found} values but the table has {expected} columns")]
    RowArity { expected: usize, found: usize },

    /// T004: Cross-join inputs share columns
    #[error("[T004] Cannot cross-join tables sharing columns: {columns}")]
    SharedColumns { columns: String },

    /// T005: Numeric aggregation over a non-numeric value
    #[error("[T005] Cannot compute {func} over column '{column}': found {found} value")]
    NonNumeric {
        column: String,
        func: String,
        found: &'static str,
    },

    /// T006: Integer aggregation overflowed
    #[error("[T006] Integer overflow while aggregating column '{column}'")]
    Overflow { column: String },

    /// T007: A column holds values of incompatible types
    #[error("[T007] Column '{column}' mixes {first} and {second} values")]
    MixedTypes {
        column: String,
        first: &'static str,
        second: &'static str,
    },

    /// T008: Arrow kernel failure
    #[error("[T008] Arrow error: {0}")]
    Arrow(String),
}

impl From<ArrowError> for TableError {
    fn from(err: ArrowError) -> Self {
        TableError::Arrow(err.to_string())
    }
}

/// Result type alias for TableError
pub type TableResult<T> = Result<T, TableError>;
