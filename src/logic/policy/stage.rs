//! Block Decision Stage

use super::engine::decide_all;
use super::types::BlockDecision;
use crate::error::PipelineResult;
use crate::logic::pipeline::{ContextField, RunContext, Stage};

const STAGE_NAME: &str = "block_decision";

/// Applies the block rule to every suspicious IP. Stores `none` decisions
/// too, so the report explains why an IP was left alone.
#[derive(Debug, Default)]
pub struct BlockDecisionStage;

impl BlockDecisionStage {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for BlockDecisionStage {
    fn name(&self) -> &'static str {
        STAGE_NAME
    }

    fn requires(&self) -> &'static [ContextField] {
        &[ContextField::SuspiciousIps, ContextField::ThreatVerdicts]
    }

    fn produces(&self) -> &'static [ContextField] {
        &[ContextField::BlockDecisions]
    }

    fn process(&self, mut context: RunContext) -> PipelineResult<RunContext> {
        let suspicious = context.require_suspicious_ips(STAGE_NAME)?;
        let verdicts = context.require_threat_verdicts(STAGE_NAME)?;

        let decisions = decide_all(suspicious, verdicts);
        for (ip, record) in &decisions {
            match record.decision {
                BlockDecision::None => log::info!("{} will not be blocked: {}", ip, record.reason),
                _ => log::info!("{} will be blocked ({}): {}", ip, record.decision, record.reason),
            }
        }

        let to_block = decisions.values().filter(|r| r.is_block()).count();
        log::info!("{} of {} suspicious IPs marked for blocking", to_block, decisions.len());

        context.set_block_decisions(STAGE_NAME, decisions)?;
        Ok(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use crate::logic::activity::ActivityProfile;
    use crate::logic::external_intel::ThreatVerdict;
    use crate::logic::IpMap;

    #[test]
    fn test_stage_writes_decisions() {
        let mut suspicious = IpMap::new();
        suspicious.insert(
            "1.2.3.4".to_string(),
            ActivityProfile { total_requests: 90, alert_requests: 0, over_threshold: true, has_alerts: false },
        );
        suspicious.insert(
            "5.6.7.8".to_string(),
            ActivityProfile { total_requests: 2, alert_requests: 2, over_threshold: false, has_alerts: true },
        );
        let mut verdicts = IpMap::new();
        verdicts.insert("1.2.3.4".to_string(), ThreatVerdict::Malicious);
        verdicts.insert("5.6.7.8".to_string(), ThreatVerdict::Clean);

        let mut context = RunContext::new();
        context.set_suspicious_ips("test", suspicious).unwrap();
        context.set_threat_verdicts("test", verdicts).unwrap();

        let context = BlockDecisionStage::new().process(context).unwrap();
        let decisions = context.block_decisions().unwrap();
        assert_eq!(decisions["1.2.3.4"].decision, BlockDecision::BlockByActivity);
        assert_eq!(decisions["5.6.7.8"].decision, BlockDecision::None);
    }

    #[test]
    fn test_stage_needs_verdicts() {
        let mut context = RunContext::new();
        context.set_suspicious_ips("test", IpMap::new()).unwrap();

        assert!(matches!(
            BlockDecisionStage::new().process(context),
            Err(PipelineError::MissingInput { field: ContextField::ThreatVerdicts, .. })
        ));
    }
}
