//! mra-ops: multi-relational algebra operators
//!
//! This crate moves data between the cube representation ([`RelationSpace`])
//! and the entity-centric representation ([`SliceRelation`]), and composes
//! the operators into pipelines.
//!
//! [`RelationSpace`]: mra_core::RelationSpace
//! [`SliceRelation`]: mra_core::SliceRelation

pub mod crawl;
pub mod cube;
pub mod data;
pub mod drill_down;
pub mod error;
pub mod flatten;
pub mod operator;
pub mod pipeline;
pub mod project;
pub mod represent;
pub mod select;
pub mod transform;
pub mod transformation;
pub mod transformations;

pub use crawl::{Crawl, CrawlBuilder};
pub use cube::{create_relation_space, CreateRelationSpace, CreateRelationSpaceByCube};
pub use data::{DataKind, MraData};
pub use drill_down::DrillDown;
pub use error::{OperatorError, OperatorResult};
pub use flatten::Flatten;
pub use operator::MraOperator;
pub use pipeline::Pipeline;
pub use project::SliceProject;
pub use represent::Represent;
pub use select::{SlicePredicate, SliceSelect};
pub use transform::SliceTransform;
pub use transformation::{FnTransformation, SliceTransformation};
pub use transformations::{
    IdentityTransformation, RatioTransformation, SupportTransformation, SUPPORT_COLUMN,
};
