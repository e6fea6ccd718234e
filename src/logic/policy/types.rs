//! Policy Types
//!
//! Data only, the rule lives in `engine.rs`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether and why an IP gets blocked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockDecision {
    /// Low activity and a clean or unknown verdict
    None,
    /// Requests far above the population mean. Wins over threat intel.
    BlockByActivity,
    /// Not over threshold, but flagged malicious
    BlockByThreatIntel,
}

impl BlockDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockDecision::None => "none",
            BlockDecision::BlockByActivity => "block_by_activity",
            BlockDecision::BlockByThreatIntel => "block_by_threat_intel",
        }
    }

    pub fn is_block(&self) -> bool {
        !matches!(self, BlockDecision::None)
    }
}

impl fmt::Display for BlockDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Decision plus a human readable explanation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub decision: BlockDecision,
    pub reason: String,
}

impl DecisionRecord {
    pub fn is_block(&self) -> bool {
        self.decision.is_block()
    }
}
