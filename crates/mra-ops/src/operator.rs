//! Operator capability trait

use crate::data::{DataKind, MraData};
use crate::error::OperatorResult;

/// A stateless transformer between MRA structures.
///
/// Operators declare the kind they consume and produce so pipelines can be
/// checked when they are composed, before any data flows.
pub trait MraOperator: Send + Sync {
    /// Operator name (used in logs and errors)
    fn name(&self) -> &'static str;
    /// Kind of input accepted
    fn input_kind(&self) -> DataKind;
    /// Kind of output produced
    fn output_kind(&self) -> DataKind;
    /// Transform `data`; fails with a type mismatch on the wrong input kind
    fn execute(&self, data: MraData) -> OperatorResult<MraData>;

    /// Execute with logging
    fn run(&self, data: MraData) -> OperatorResult<MraData> {
        log::debug!("Executing {}", self.name());
        self.execute(data)
    }
}
