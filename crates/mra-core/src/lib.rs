//! mra-core - Core data model for the MRA engine
//!
//! This crate provides the schema-indexed relation store: canonical
//! [`RelationSchema`]s and [`RelationTuple`]s, the dimension-bounded
//! [`RelationSpace`], the entity-centric [`SliceRelation`], and the engine
//! configuration shared by the operator crate.

pub mod config;
pub mod error;
pub mod schema;
pub mod slice;
pub mod space;
pub mod tuple;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;

pub use config::{CubeConfig, EngineConfig, SelectConfig};
pub use error::{CoreError, CoreResult};
pub use schema::RelationSchema;
pub use slice::{FeatureMap, SliceRelation};
pub use space::RelationSpace;
pub use tuple::{create_relation_tuple, RelationTuple};

pub use mra_table::{AggFunc, Aggregation, Table, TableError, Value};
