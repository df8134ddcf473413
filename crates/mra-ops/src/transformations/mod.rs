//! Stock slice transformations

pub mod identity;
pub mod ratio;
pub mod support;

pub use identity::IdentityTransformation;
pub use ratio::RatioTransformation;
pub use support::{SupportTransformation, SUPPORT_COLUMN};
