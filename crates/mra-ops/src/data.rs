//! The structural kinds operators consume and produce

use crate::error::{OperatorError, OperatorResult};
use mra_core::{RelationSpace, SliceRelation, Table};

/// Structural kind of operator input or output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataKind {
    /// A plain table
    Table,
    /// A [`RelationSpace`]
    RelationSpace,
    /// A [`SliceRelation`]
    SliceRelation,
}

impl std::fmt::Display for DataKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataKind::Table => write!(f, "Table"),
            DataKind::RelationSpace => write!(f, "RelationSpace"),
            DataKind::SliceRelation => write!(f, "SliceRelation"),
        }
    }
}

/// A value flowing through a pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum MraData {
    /// A plain table
    Table(Table),
    /// A relation space
    Space(RelationSpace),
    /// A slice relation
    Slices(SliceRelation),
}

impl MraData {
    /// Structural kind of this value
    pub fn kind(&self) -> DataKind {
        match self {
            MraData::Table(_) => DataKind::Table,
            MraData::Space(_) => DataKind::RelationSpace,
            MraData::Slices(_) => DataKind::SliceRelation,
        }
    }

    /// The relation space, if this is one
    pub fn into_space(self) -> Option<RelationSpace> {
        match self {
            MraData::Space(s) => Some(s),
            _ => None,
        }
    }

    /// The slice relation, if this is one
    pub fn into_slices(self) -> Option<SliceRelation> {
        match self {
            MraData::Slices(s) => Some(s),
            _ => None,
        }
    }

    pub(crate) fn expect_table(self, operator: &str) -> OperatorResult<Table> {
        match self {
            MraData::Table(t) => Ok(t),
            other => Err(other.mismatch(operator, DataKind::Table)),
        }
    }

    pub(crate) fn expect_space(self, operator: &str) -> OperatorResult<RelationSpace> {
        match self {
            MraData::Space(s) => Ok(s),
            other => Err(other.mismatch(operator, DataKind::RelationSpace)),
        }
    }

    pub(crate) fn expect_slices(self, operator: &str) -> OperatorResult<SliceRelation> {
        match self {
            MraData::Slices(s) => Ok(s),
            other => Err(other.mismatch(operator, DataKind::SliceRelation)),
        }
    }

    fn mismatch(&self, operator: &str, expected: DataKind) -> OperatorError {
        OperatorError::TypeMismatch {
            operator: operator.to_string(),
            expected,
            found: self.kind(),
        }
    }
}

impl From<Table> for MraData {
    fn from(t: Table) -> Self {
        MraData::Table(t)
    }
}

impl From<RelationSpace> for MraData {
    fn from(s: RelationSpace) -> Self {
        MraData::Space(s)
    }
}

impl From<SliceRelation> for MraData {
    fn from(s: SliceRelation) -> Self {
        MraData::Slices(s)
    }
}
