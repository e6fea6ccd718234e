//! Policy Module
//!
//! Quyết định block dựa trên activity và threat verdict.
//!
//! ## Structure
//! - `types`: BlockDecision, DecisionRecord
//! - `engine`: pure decision rule
//! - `stage`: pipeline stage
//!
//! ## Usage
//! ```ignore
//! use crate::logic::policy::{decide, BlockDecision};
//!
//! let record = decide(&profile, verdict);
//! match record.decision {
//!     BlockDecision::None => log_only(),
//!     BlockDecision::BlockByActivity | BlockDecision::BlockByThreatIntel => block(ip),
//! }
//! ```

pub mod types;
pub mod engine;
pub mod stage;

pub use types::{BlockDecision, DecisionRecord};
pub use engine::{decide, decide_all};
pub use stage::BlockDecisionStage;
