//! Pipeline Module
//!
//! Runs an ordered list of stages over one shared run context.
//!
//! ## Structure
//! - `context`: `RunContext` (one typed slot per stage output) and `ContextField`
//! - `stage`: the `Stage` trait every step implements
//! - `engine`: `Pipeline`, strictly sequential execution
//!
//! ## Usage
//! ```ignore
//! use crate::logic::pipeline::{Pipeline, RunContext};
//!
//! let pipeline = Pipeline::new(vec![Box::new(analyzer), Box::new(intel)]);
//! let context = pipeline.execute(RunContext::new())?;
//! ```

pub mod context;
pub mod stage;
pub mod engine;


pub use context::{ContextField, RunContext};
pub use stage::Stage;
pub use engine::Pipeline;
