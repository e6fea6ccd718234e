//! Threat intel contract

use super::types::ThreatVerdict;

/// Reputation lookup for a single IP.
///
/// Implementations never fail: transport or parse problems are reported as
/// `ThreatVerdict::Unknown`. Any pacing the remote service needs is the
/// implementation's business.
pub trait ThreatIntel {
    fn name(&self) -> &'static str;

    fn lookup(&self, ip: &str) -> ThreatVerdict;
}
