//! Error types for mra-core

use thiserror::Error;

/// Core error type for the relation store
#[derive(Error, Debug)]
pub enum CoreError {
    /// M001: A table's dimensional columns disagree with its schema key
    #[error("[M001] Relation keyed by {schema} has dimensional columns {actual} within dimensions {dimensions}")]
    SchemaMismatch {
        schema: String,
        actual: String,
        dimensions: String,
    },

    /// M002: The same attribute appears twice in a tuple
    #[error("[M002] Duplicate attribute '{attribute}' in relation tuple")]
    DuplicateAttribute { attribute: String },

    /// M003: A feature table's columns disagree with its feature schema
    #[error("[M003] Feature table for region ({region}) has columns {actual}, expected {schema}")]
    FeatureSchemaMismatch {
        region: String,
        schema: String,
        actual: String,
    },

    /// M004: Two feature schemas of one region share columns
    #[error("[M004] Feature schemas {schema} and {existing} of region ({region}) share columns")]
    OverlappingFeatures {
        region: String,
        schema: String,
        existing: String,
    },

    /// M005: Configuration file not found
    #[error("[M005] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// M006: Invalid configuration value
    #[error("[M006] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// M007: IO error with file path context
    #[error("[M007] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// M008: YAML parse error
    #[error("[M008] Config parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// M009: Table layer error propagation
    #[error("[M009] Table error: {0}")]
    Table(#[from] mra_table::TableError),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
