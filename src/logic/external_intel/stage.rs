//! Threat Intel Stage
//!
//! Looks up every suspicious IP once. Unknown verdicts are logged apart from
//! clean ones and never abort the run.

use super::source::ThreatIntel;
use super::types::ThreatVerdict;
use crate::error::PipelineResult;
use crate::logic::pipeline::{ContextField, RunContext, Stage};
use crate::logic::IpMap;

const STAGE_NAME: &str = "threat_intel";

pub struct ThreatIntelStage<I: ThreatIntel> {
    intel: I,
}

impl<I: ThreatIntel> ThreatIntelStage<I> {
    pub fn new(intel: I) -> Self {
        Self { intel }
    }
}

impl<I: ThreatIntel> Stage for ThreatIntelStage<I> {
    fn name(&self) -> &'static str {
        STAGE_NAME
    }

    fn requires(&self) -> &'static [ContextField] {
        &[ContextField::SuspiciousIps]
    }

    fn produces(&self) -> &'static [ContextField] {
        &[ContextField::ThreatVerdicts]
    }

    fn process(&self, mut context: RunContext) -> PipelineResult<RunContext> {
        let suspicious = context.require_suspicious_ips(STAGE_NAME)?;
        let total = suspicious.len();
        log::info!("Checking {} suspicious IPs via {}", total, self.intel.name());

        let mut verdicts: IpMap<ThreatVerdict> = IpMap::new();
        for (i, ip) in suspicious.keys().enumerate() {
            let verdict = self.intel.lookup(ip);
            match verdict {
                ThreatVerdict::Malicious => log::info!("[{}/{}] {}: MALICIOUS", i + 1, total, ip),
                ThreatVerdict::Clean => log::info!("[{}/{}] {}: clean", i + 1, total, ip),
                ThreatVerdict::Unknown => {
                    log::warn!("[{}/{}] {}: lookup failed, verdict unknown", i + 1, total, ip)
                }
            }
            verdicts.insert(ip.clone(), verdict);
        }

        let unknown = verdicts.values().filter(|v| **v == ThreatVerdict::Unknown).count();
        let malicious = verdicts.values().filter(|v| v.is_malicious()).count();
        log::info!(
            "Threat intel done: {} malicious, {} clean, {} unknown",
            malicious,
            total - malicious - unknown,
            unknown
        );

        context.set_threat_verdicts(STAGE_NAME, verdicts)?;
        Ok(context)
    }
}
