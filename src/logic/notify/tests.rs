use chrono::{Local, TimeZone};
use parking_lot::Mutex;
use uuid::Uuid;

use super::notifier::{LogNotifier, MailRelayNotifier, Notifier};
use super::stage::NotifyStage;
use super::summary::BlockSummary;
use crate::config::MailRelaySettings;
use crate::error::PipelineError;
use crate::logic::activity::ActivitySummary;
use crate::logic::pipeline::{ContextField, RunContext, Stage};
use crate::logic::response::ActionError;
use crate::logic::IpMap;

/// Keeps every message, optionally refusing all of them
#[derive(Default)]
struct RecordingNotifier {
    refuse: bool,
    sent: Mutex<Vec<(String, String, String)>>,
}

impl Notifier for &RecordingNotifier {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), ActionError> {
        if self.refuse {
            return Err(ActionError::HttpStatus { code: 503 });
        }
        self.sent
            .lock()
            .push((to.to_string(), subject.to_string(), body.to_string()));
        Ok(())
    }
}

fn activity() -> ActivitySummary {
    ActivitySummary {
        records_loaded: 66,
        records_after_dedup: 64,
        unique_ips: 4,
        alert_events: 2,
        event_types: Default::default(),
        mean_requests: 16.0,
        threshold: 32.0,
        suspicious_count: 3,
    }
}

fn results(entries: &[(&str, bool)]) -> IpMap<bool> {
    entries.iter().map(|(ip, ok)| (ip.to_string(), *ok)).collect()
}

fn context_with(entries: &[(&str, bool)]) -> RunContext {
    let mut context = RunContext::new();
    context.set_block_results("test", results(entries)).unwrap();
    context
}

// ============================================================================
// SUMMARY
// ============================================================================

#[test]
fn test_subject_format() {
    let at = Local.with_ymd_and_hms(2024, 3, 5, 14, 7, 0).single().unwrap();
    let summary = BlockSummary::new(Uuid::nil(), at, &IpMap::new());
    assert_eq!(summary.subject(), "IP blocking - 05.03.2024 14:07");
}

#[test]
fn test_empty_body() {
    let summary = BlockSummary::new(Uuid::nil(), Local::now(), &IpMap::new());
    assert_eq!(summary.body(), "No IP addresses were blocked");
    assert_eq!(summary.tally.attempted, 0);
}

#[test]
fn test_body_lists_every_ip() {
    let summary = BlockSummary::new(
        Uuid::nil(),
        Local::now(),
        &results(&[("10.0.0.1", true), ("10.0.0.2", false)]),
    );
    let body = summary.body();

    assert!(body.contains("10.0.0.1 blocked\n"));
    assert!(body.contains("10.0.0.2 not blocked\n"));
    assert!(body.contains("IP addresses to block: 2"));
    assert!(body.contains("Blocked: 1, failed: 1"));
    assert!(body.contains(&Uuid::nil().to_string()));
}

#[test]
fn test_body_carries_load_counts() {
    let summary = BlockSummary::new(Uuid::nil(), Local::now(), &results(&[("10.0.0.1", true)]))
        .with_activity(Some(activity()));
    let body = summary.body();

    assert!(body.contains("Events analyzed: 66 (64 after flow dedup), unique IPs: 4, suspicious: 3\n"));
    assert!(body.find("Events analyzed").unwrap() < body.find("IP addresses to block").unwrap());

    let without = BlockSummary::new(Uuid::nil(), Local::now(), &results(&[("10.0.0.1", true)]));
    assert!(!without.body().contains("Events analyzed"));
}

#[test]
fn test_empty_body_ignores_load_counts() {
    let summary = BlockSummary::new(Uuid::nil(), Local::now(), &IpMap::new()).with_activity(Some(activity()));
    assert_eq!(summary.body(), "No IP addresses were blocked");
}

// ============================================================================
// STAGE
// ============================================================================

#[test]
fn test_stage_sends_to_recipient() {
    let notifier = RecordingNotifier::default();
    let stage = NotifyStage::new(&notifier, "soc@example.com");

    let context = stage.process(context_with(&[("10.0.0.1", true)])).unwrap();
    assert_eq!(context.notification_sent(), Some(true));

    let sent = notifier.sent.lock();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "soc@example.com");
    assert!(sent[0].1.starts_with("IP blocking - "));
    assert!(sent[0].2.contains("10.0.0.1 blocked"));
}

#[test]
fn test_stage_sends_even_when_nothing_blocked() {
    let notifier = RecordingNotifier::default();
    let stage = NotifyStage::new(&notifier, "soc@example.com");

    stage.process(context_with(&[])).unwrap();
    assert_eq!(notifier.sent.lock()[0].2, "No IP addresses were blocked");
}

#[test]
fn test_delivery_failure_is_recorded() {
    let notifier = RecordingNotifier { refuse: true, ..Default::default() };
    let stage = NotifyStage::new(&notifier, "soc@example.com");

    let context = stage.process(context_with(&[("10.0.0.1", false)])).unwrap();
    assert_eq!(context.notification_sent(), Some(false));
}

#[test]
fn test_stage_includes_analyzer_counts() {
    let notifier = RecordingNotifier::default();
    let stage = NotifyStage::new(&notifier, "soc@example.com");

    let mut context = context_with(&[("10.0.0.1", true)]);
    context.set_activity_summary("test", activity()).unwrap();
    stage.process(context).unwrap();

    assert!(notifier.sent.lock()[0].2.contains("unique IPs: 4, suspicious: 3"));
}

#[test]
fn test_log_only_notification_is_not_sent() {
    let stage = NotifyStage::new(LogNotifier, "soc@example.com");

    let context = stage.process(context_with(&[("10.0.0.1", true)])).unwrap();
    assert_eq!(context.notification_sent(), Some(false));
    assert!(!LogNotifier.delivers());
}

#[test]
fn test_requires_block_results() {
    let stage = NotifyStage::new(LogNotifier, "soc@example.com");
    assert!(matches!(
        stage.process(RunContext::new()),
        Err(PipelineError::MissingInput { field: ContextField::BlockResults, .. })
    ));
}

// ============================================================================
// ADAPTERS
// ============================================================================

#[test]
fn test_log_notifier_always_succeeds() {
    assert!(LogNotifier.send("a@b.c", "subject", "line 1\nline 2").is_ok());
}

#[test]
fn test_unreachable_relay_fails() {
    let relay = MailRelayNotifier::new(&MailRelaySettings {
        url: "http://127.0.0.1:9/send".to_string(),
        token: "t".to_string(),
        from: "ids@example.com".to_string(),
    });
    assert!(matches!(
        relay.send("soc@example.com", "s", "b"),
        Err(ActionError::NetworkError { .. })
    ));
    assert!(matches!(
        relay.send("", "s", "b"),
        Err(ActionError::InvalidAction { .. })
    ));
}
