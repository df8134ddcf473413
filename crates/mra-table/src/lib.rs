//! mra-table - In-memory tabular layer for the MRA engine
//!
//! This crate provides the small table engine the relation algebra is built
//! on: a [`Table`] facade over an arrow `RecordBatch`, exchanging cells as
//! [`Value`]s, with group-by, aggregation, projection, cross-join and
//! concatenation.

pub mod aggregate;
mod column;
pub mod error;
pub mod table;
pub mod value;

pub use aggregate::{AggFunc, Aggregation};
pub use error::{TableError, TableResult};
pub use table::Table;
pub use value::Value;
