//! Policy Engine
//!
//! CHỈ chứa logic quyết định.
//! Input: ActivityProfile + ThreatVerdict
//! Output: DecisionRecord

use super::types::{BlockDecision, DecisionRecord};
use crate::logic::activity::ActivityProfile;
use crate::logic::external_intel::ThreatVerdict;
use crate::logic::IpMap;

// ============================================================================
// DECISION
// ============================================================================

/// Block rule for one IP.
///
/// Activity is checked first, so an IP that is both over threshold and
/// malicious is attributed to activity.
pub fn decide(profile: &ActivityProfile, verdict: ThreatVerdict) -> DecisionRecord {
    if profile.over_threshold {
        return DecisionRecord {
            decision: BlockDecision::BlockByActivity,
            reason: format!(
                "High activity: {} requests exceed the population threshold",
                profile.total_requests
            ),
        };
    }

    match verdict {
        ThreatVerdict::Malicious => DecisionRecord {
            decision: BlockDecision::BlockByThreatIntel,
            reason: "Flagged malicious by threat intelligence".to_string(),
        },
        ThreatVerdict::Clean | ThreatVerdict::Unknown => DecisionRecord {
            decision: BlockDecision::None,
            reason: format!(
                "Low activity ({} requests), threat intel verdict {}",
                profile.total_requests, verdict
            ),
        },
    }
}

/// Decide for every suspicious IP.
///
/// IPs without a verdict are treated as `Unknown`. Verdicts for IPs outside
/// the suspicious set are ignored.
pub fn decide_all(
    suspicious: &IpMap<ActivityProfile>,
    verdicts: &IpMap<ThreatVerdict>,
) -> IpMap<DecisionRecord> {
    suspicious
        .iter()
        .map(|(ip, profile)| {
            let verdict = verdicts.get(ip).copied().unwrap_or(ThreatVerdict::Unknown);
            (ip.clone(), decide(profile, verdict))
        })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
