use super::simulated::{SimulatedIntel, StaticIntel};
use super::stage::ThreatIntelStage;
use super::types::ThreatVerdict;
use crate::error::PipelineError;
use crate::logic::activity::ActivityProfile;
use crate::logic::pipeline::{ContextField, RunContext, Stage};
use crate::logic::IpMap;

fn context_with(ips: &[&str]) -> RunContext {
    let suspicious: IpMap<ActivityProfile> = ips
        .iter()
        .map(|ip| {
            let profile = ActivityProfile {
                total_requests: 10,
                alert_requests: 1,
                over_threshold: false,
                has_alerts: true,
            };
            (ip.to_string(), profile)
        })
        .collect();

    let mut context = RunContext::new();
    context.set_suspicious_ips("test", suspicious).unwrap();
    context
}

#[test]
fn test_one_verdict_per_suspicious_ip() {
    let intel = StaticIntel::new(ThreatVerdict::Unknown)
        .with_verdict("1.1.1.1", ThreatVerdict::Clean)
        .with_verdict("6.6.6.6", ThreatVerdict::Malicious);
    let stage = ThreatIntelStage::new(intel);

    let context = stage
        .process(context_with(&["1.1.1.1", "6.6.6.6", "8.8.8.8"]))
        .unwrap();
    let verdicts = context.threat_verdicts().unwrap();

    assert_eq!(verdicts.len(), 3);
    assert_eq!(verdicts["1.1.1.1"], ThreatVerdict::Clean);
    assert_eq!(verdicts["6.6.6.6"], ThreatVerdict::Malicious);
    assert_eq!(verdicts["8.8.8.8"], ThreatVerdict::Unknown);
}

#[test]
fn test_empty_suspicious_set() {
    let stage = ThreatIntelStage::new(SimulatedIntel::new(1.0, Some(1)));
    let context = stage.process(context_with(&[])).unwrap();
    assert!(context.threat_verdicts().unwrap().is_empty());
}

#[test]
fn test_missing_suspicious_ips_is_error() {
    let stage = ThreatIntelStage::new(StaticIntel::new(ThreatVerdict::Clean));
    match stage.process(RunContext::new()) {
        Err(PipelineError::MissingInput { stage, field }) => {
            assert_eq!(stage, "threat_intel");
            assert_eq!(field, ContextField::SuspiciousIps);
        }
        other => panic!("Expected MissingInput, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_running_twice_is_rejected() {
    let stage = ThreatIntelStage::new(StaticIntel::new(ThreatVerdict::Clean));
    let context = stage.process(context_with(&["1.1.1.1"])).unwrap();
    assert!(matches!(
        stage.process(context),
        Err(PipelineError::OutputAlreadySet { field: ContextField::ThreatVerdicts, .. })
    ));
}
