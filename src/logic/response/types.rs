//! Response Types

use serde::{Deserialize, Serialize};

/// Why a response action (block call, notification) did not go through
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionError {
    /// Transport failure or timeout
    NetworkError { message: String },
    /// Remote side answered with something other than success
    HttpStatus { code: u16 },
    /// Request could not be built
    InvalidAction { reason: String },
}

impl std::fmt::Display for ActionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionError::NetworkError { message } => write!(f, "Network error: {}", message),
            ActionError::HttpStatus { code } => write!(f, "Unexpected HTTP status {}", code),
            ActionError::InvalidAction { reason } => write!(f, "Invalid action: {}", reason),
        }
    }
}

impl std::error::Error for ActionError {}

/// Counts over one blocking pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BlockTally {
    pub attempted: usize,
    pub blocked: usize,
    pub failed: usize,
}

impl BlockTally {
    pub fn from_results<'a>(results: impl IntoIterator<Item = &'a bool>) -> Self {
        results.into_iter().fold(Self::default(), |mut tally, ok| {
            tally.attempted += 1;
            if *ok {
                tally.blocked += 1;
            } else {
                tally.failed += 1;
            }
            tally
        })
    }
}
