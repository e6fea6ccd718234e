//! Error handling
//!
//! Only fatal errors live here. Per-item collaborator failures (lookups,
//! block calls, notifications, chart writes) are degraded to recorded
//! outcomes inside their stage and never reach these types.

use std::path::PathBuf;

use thiserror::Error;

use crate::logic::pipeline::ContextField;

pub type PipelineResult<T> = Result<T, PipelineError>;

/// Configuration could not be resolved. Raised before any stage runs.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} is not set (required for {purpose})")]
    Missing { var: &'static str, purpose: &'static str },

    #[error("{var} has invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// The IDS log could not be turned into records.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("log file {0} not found")]
    NotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed event at line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("event #{index} is missing required field '{field}'")]
    MissingField { index: usize, field: &'static str },
}

/// Run-aborting failures. The engine never catches these.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A stage ran before the stage that produces its input.
    #[error("stage '{stage}' needs '{field}' but it is not in the context")]
    MissingInput {
        stage: &'static str,
        field: ContextField,
    },

    /// A stage tried to overwrite output already written to the context.
    #[error("stage '{stage}' tried to overwrite '{field}'")]
    OutputAlreadySet {
        stage: &'static str,
        field: ContextField,
    },

    /// Detected by the pre-run check, before any stage executes.
    #[error("stage '{stage}' requires '{field}' which no earlier stage produces")]
    UnsatisfiedDependency {
        stage: &'static str,
        field: ContextField,
    },

    #[error(transparent)]
    Load(#[from] LoadError),
}
