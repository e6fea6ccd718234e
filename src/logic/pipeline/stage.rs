//! Stage contract

use super::context::{ContextField, RunContext};
use crate::error::PipelineResult;

/// One step of the pipeline.
///
/// A stage takes the context by value and hands it back augmented with its
/// own slots. Collaborator failures are recorded as outcomes inside the
/// stage; only misconfiguration and fatal load errors are returned as `Err`.
pub trait Stage {
    /// Short name used in logs and errors
    fn name(&self) -> &'static str;

    /// Slots that must be present before `process` runs
    fn requires(&self) -> &'static [ContextField] {
        &[]
    }

    /// Slots written by `process`
    fn produces(&self) -> &'static [ContextField];

    fn process(&self, context: RunContext) -> PipelineResult<RunContext>;
}
