use std::fs;

use tempfile::tempdir;

use super::assembler::{assemble, ReportSources};
use super::stage::ReportStage;
use super::types::{IpReport, Report};
use super::writer::write_report;
use crate::error::PipelineError;
use crate::logic::activity::ActivityProfile;
use crate::logic::external_intel::ThreatVerdict;
use crate::logic::pipeline::{ContextField, RunContext, Stage};
use crate::logic::policy::{BlockDecision, DecisionRecord};
use crate::logic::IpMap;

fn profile(total: u64, over_threshold: bool) -> ActivityProfile {
    ActivityProfile {
        total_requests: total,
        alert_requests: 1,
        over_threshold,
        has_alerts: true,
    }
}

fn record(decision: BlockDecision) -> DecisionRecord {
    DecisionRecord { decision, reason: "test".to_string() }
}

fn map<T: Clone>(entries: &[(&str, T)]) -> IpMap<T> {
    entries.iter().map(|(ip, v)| (ip.to_string(), v.clone())).collect()
}

/// A: every stage, B: suspicious but not blocked, C: only in verdicts
fn full_context() -> RunContext {
    let mut context = RunContext::new();
    context
        .set_suspicious_ips("test", map(&[("A", profile(100, true)), ("B", profile(3, false))]))
        .unwrap();
    context
        .set_threat_verdicts(
            "test",
            map(&[
                ("A", ThreatVerdict::Clean),
                ("B", ThreatVerdict::Unknown),
                ("C", ThreatVerdict::Malicious),
            ]),
        )
        .unwrap();
    context
        .set_block_decisions(
            "test",
            map(&[
                ("A", record(BlockDecision::BlockByActivity)),
                ("B", record(BlockDecision::None)),
            ]),
        )
        .unwrap();
    context.set_block_results("test", map(&[("A", true)])).unwrap();
    context
}

// ============================================================================
// ASSEMBLER
// ============================================================================

#[test]
fn test_outer_join_keeps_every_ip() {
    let context = full_context();
    let report = assemble(&ReportSources::from_context(&context));

    assert_eq!(report.keys().collect::<Vec<_>>(), vec!["A", "B", "C"]);

    let a = &report["A"];
    assert_eq!(a.activity.as_ref().map(|p| p.total_requests), Some(100));
    assert_eq!(a.threat_verdict, Some(ThreatVerdict::Clean));
    assert_eq!(a.block_decision.as_ref().map(|d| d.decision), Some(BlockDecision::BlockByActivity));
    assert_eq!(a.block_result, Some(true));

    let b = &report["B"];
    assert!(b.activity.is_some());
    assert_eq!(b.block_decision.as_ref().map(|d| d.decision), Some(BlockDecision::None));
    assert_eq!(b.block_result, None);

    let c = &report["C"];
    assert_eq!(
        c,
        &IpReport { threat_verdict: Some(ThreatVerdict::Malicious), ..Default::default() }
    );
}

#[test]
fn test_assemble_is_idempotent() {
    let context = full_context();
    let sources = ReportSources::from_context(&context);
    assert_eq!(assemble(&sources), assemble(&sources));
}

#[test]
fn test_assemble_empty_inputs() {
    assert!(assemble(&ReportSources::default()).is_empty());

    let empty = IpMap::new();
    let sources = ReportSources { activity: Some(&empty), ..Default::default() };
    assert!(assemble(&sources).is_empty());
}

#[test]
fn test_absent_fields_not_serialized() {
    let mut report = Report::new();
    report.insert(
        "C".to_string(),
        IpReport { threat_verdict: Some(ThreatVerdict::Malicious), ..Default::default() },
    );

    let json: serde_json::Value = serde_json::to_value(&report).unwrap();
    assert_eq!(json, serde_json::json!({ "C": { "threat_verdict": "malicious" } }));
}

// ============================================================================
// WRITER / STAGE
// ============================================================================

#[test]
fn test_write_creates_parent_dirs() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out").join("nested").join("report.json");

    let context = full_context();
    let report = assemble(&ReportSources::from_context(&context));
    write_report(&path, &report).unwrap();

    let read_back: Report = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(read_back, report);
}

#[test]
fn test_stage_saves_report() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ip_report.json");

    let context = ReportStage::new(&path).process(full_context()).unwrap();
    assert_eq!(context.report_saved(), Some(true));
    assert_eq!(context.report().unwrap().len(), 3);

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["A"]["block_decision"]["decision"], "block_by_activity");
    assert_eq!(json["A"]["block_result"], true);
    assert!(json["B"].get("block_result").is_none());
}

#[test]
fn test_write_failure_keeps_report() {
    let dir = tempdir().unwrap();
    // Target is an existing directory, so the write fails
    let context = ReportStage::new(dir.path()).process(full_context()).unwrap();

    assert_eq!(context.report_saved(), Some(false));
    assert_eq!(context.report().unwrap().len(), 3);
}

#[test]
fn test_stage_with_only_activity() {
    let dir = tempdir().unwrap();
    let mut context = RunContext::new();
    context
        .set_suspicious_ips("test", map(&[("A", profile(5, false))]))
        .unwrap();

    let context = ReportStage::new(dir.path().join("r.json")).process(context).unwrap();
    let entry = &context.report().unwrap()["A"];
    assert!(entry.activity.is_some());
    assert!(entry.threat_verdict.is_none());
}

#[test]
fn test_stage_requires_suspicious_ips() {
    let dir = tempdir().unwrap();
    assert!(matches!(
        ReportStage::new(dir.path().join("r.json")).process(RunContext::new()),
        Err(PipelineError::MissingInput { field: ContextField::SuspiciousIps, .. })
    ));
}
