//! Report Assembler
//!
//! Outer join of the per-IP stage outputs. Every IP that appears in any
//! input appears in the report.

use super::types::{IpReport, Report};
use crate::logic::activity::ActivityProfile;
use crate::logic::external_intel::ThreatVerdict;
use crate::logic::pipeline::RunContext;
use crate::logic::policy::DecisionRecord;
use crate::logic::IpMap;

/// Borrowed stage outputs; a missing map contributes nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct ReportSources<'a> {
    pub activity: Option<&'a IpMap<ActivityProfile>>,
    pub verdicts: Option<&'a IpMap<ThreatVerdict>>,
    pub decisions: Option<&'a IpMap<DecisionRecord>>,
    pub results: Option<&'a IpMap<bool>>,
}

impl<'a> ReportSources<'a> {
    pub fn from_context(context: &'a RunContext) -> Self {
        Self {
            activity: context.suspicious_ips(),
            verdicts: context.threat_verdicts(),
            decisions: context.block_decisions(),
            results: context.block_results(),
        }
    }
}

pub fn assemble(sources: &ReportSources<'_>) -> Report {
    let mut report = Report::new();

    if let Some(activity) = sources.activity {
        for (ip, profile) in activity {
            entry(&mut report, ip).activity = Some(profile.clone());
        }
    }
    if let Some(verdicts) = sources.verdicts {
        for (ip, verdict) in verdicts {
            entry(&mut report, ip).threat_verdict = Some(*verdict);
        }
    }
    if let Some(decisions) = sources.decisions {
        for (ip, record) in decisions {
            entry(&mut report, ip).block_decision = Some(record.clone());
        }
    }
    if let Some(results) = sources.results {
        for (ip, blocked) in results {
            entry(&mut report, ip).block_result = Some(*blocked);
        }
    }

    report
}

fn entry<'r>(report: &'r mut Report, ip: &str) -> &'r mut IpReport {
    report.entry(ip.to_string()).or_default()
}
