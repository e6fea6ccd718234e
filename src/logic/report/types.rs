//! Report Types

use serde::{Deserialize, Serialize};

use crate::logic::activity::ActivityProfile;
use crate::logic::external_intel::ThreatVerdict;
use crate::logic::policy::DecisionRecord;
use crate::logic::IpMap;

/// Everything known about one IP after the run.
///
/// A field is absent when the stage that produces it did not run or did not
/// cover this IP (e.g. `block_result` for IPs that were never blocked).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity: Option<ActivityProfile>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threat_verdict: Option<ThreatVerdict>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_decision: Option<DecisionRecord>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_result: Option<bool>,
}

/// Report artifact, keyed by IP
pub type Report = IpMap<IpReport>;
