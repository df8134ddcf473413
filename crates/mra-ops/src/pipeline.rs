//! Pipeline: ordered composition of operators

use crate::data::{DataKind, MraData};
use crate::error::{OperatorError, OperatorResult};
use crate::operator::MraOperator;

/// Operators executed strictly in sequence, each consuming the previous
/// output.
///
/// A pipeline always holds at least one operator. Appending checks that the
/// new stage accepts what the current last stage produces. Joining two
/// pipelines concatenates their operator lists.
pub struct Pipeline {
    operators: Vec<Box<dyn MraOperator>>,
}

impl Pipeline {
    /// Start a pipeline with its first operator
    pub fn start(operator: impl MraOperator + 'static) -> Self {
        Self {
            operators: vec![Box::new(operator)],
        }
    }

    /// Append one operator
    pub fn then(mut self, operator: impl MraOperator + 'static) -> OperatorResult<Self> {
        self.check_next(&operator)?;
        self.operators.push(Box::new(operator));
        Ok(self)
    }

    /// Append every operator of `other`, keeping its order
    pub fn append(mut self, other: Pipeline) -> OperatorResult<Self> {
        if let Some(first) = other.operators.first() {
            self.check_next(first.as_ref())?;
        }
        self.operators.extend(other.operators);
        Ok(self)
    }

    fn check_next(&self, next: &dyn MraOperator) -> OperatorResult<()> {
        let last = self.last();
        if last.output_kind() != next.input_kind() {
            return Err(OperatorError::IncompatibleStages {
                previous: last.name().to_string(),
                next: next.name().to_string(),
                produced: last.output_kind(),
                expected: next.input_kind(),
            });
        }
        Ok(())
    }

    fn last(&self) -> &dyn MraOperator {
        // `start` guarantees at least one operator.
        self.operators[self.operators.len() - 1].as_ref()
    }

    /// Number of operators
    pub fn len(&self) -> usize {
        self.operators.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }

    /// Operator names in execution order
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.operators.iter().map(|op| op.name()).collect()
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("stages", &self.stage_names())
            .finish()
    }
}

impl MraOperator for Pipeline {
    fn name(&self) -> &'static str {
        "Pipeline"
    }

    fn input_kind(&self) -> DataKind {
        self.operators[0].input_kind()
    }

    fn output_kind(&self) -> DataKind {
        self.last().output_kind()
    }

    fn execute(&self, data: MraData) -> OperatorResult<MraData> {
        self.operators
            .iter()
            .try_fold(data, |acc, op| op.run(acc))
    }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
