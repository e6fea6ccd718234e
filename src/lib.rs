//! IDS Responder
//!
//! Batch incident response over Suricata logs: detect suspicious source IPs,
//! enrich them with threat intel, decide and execute blocks, then notify,
//! report and chart the result.

pub mod constants;
pub mod config;
pub mod error;
pub mod logic;
pub mod runner;

pub use config::Config;
pub use error::{ConfigError, LoadError, PipelineError, PipelineResult};
pub use runner::{build_pipeline, run, RunOutcome};
