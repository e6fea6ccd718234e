//! Activity Module - Suricata Log Analysis
//!
//! Loads IDS events, drops duplicate flows and flags source IPs that are
//! either far more active than the population or raised alerts.
//!
//! # Components
//! - `types.rs`: LogRecord, ActivityProfile, ActivitySummary
//! - `loader.rs`: LogSource trait, EVE file loader, flow dedup
//! - `analyzer.rs`: request/alert counting and the suspicion rule
//! - `stage.rs`: pipeline stage

pub mod types;
pub mod loader;
pub mod analyzer;
pub mod stage;


pub use types::{ActivityAnalysis, ActivityProfile, ActivitySummary, EventType, LogRecord};
pub use loader::{dedup_by_flow, FileLogSource, LogSource, MemoryLogSource};
pub use analyzer::{analyze, summarize};
pub use stage::ActivityAnalyzerStage;
