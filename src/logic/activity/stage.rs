//! Analyzer Stage
//!
//! First stage of the run: load, dedup, analyze. Writes the suspicious IP
//! set every later stage works from.

use super::analyzer::{analyze, summarize};
use super::loader::{dedup_by_flow, LogSource};
use super::types::{ActivityAnalysis, ActivitySummary};
use crate::constants::DEFAULT_ACTIVITY_MULTIPLIER;
use crate::error::PipelineResult;
use crate::logic::pipeline::{ContextField, RunContext, Stage};

const STAGE_NAME: &str = "activity_analyzer";

pub struct ActivityAnalyzerStage<S: LogSource> {
    source: S,
    multiplier: f64,
}

impl<S: LogSource> ActivityAnalyzerStage<S> {
    pub fn new(source: S) -> Self {
        Self::with_multiplier(source, DEFAULT_ACTIVITY_MULTIPLIER)
    }

    pub fn with_multiplier(source: S, multiplier: f64) -> Self {
        Self { source, multiplier }
    }
}

impl<S: LogSource> Stage for ActivityAnalyzerStage<S> {
    fn name(&self) -> &'static str {
        STAGE_NAME
    }

    fn produces(&self) -> &'static [ContextField] {
        &[ContextField::ActivitySummary, ContextField::SuspiciousIps]
    }

    fn process(&self, mut context: RunContext) -> PipelineResult<RunContext> {
        log::info!("Loading IDS events from {}", self.source.describe());
        let records = self.source.load()?;
        let loaded = records.len();

        let deduped = dedup_by_flow(records);
        log::info!("Loaded {} events, {} after flow dedup", loaded, deduped.len());

        let analysis = analyze(&deduped, self.multiplier);
        let summary = summarize(loaded, &deduped, &analysis);
        // Records are not needed past this point
        drop(deduped);

        log_summary(&summary);
        log_suspicious(&analysis);

        context.set_activity_summary(STAGE_NAME, summary)?;
        context.set_suspicious_ips(STAGE_NAME, analysis.suspicious)?;
        Ok(context)
    }
}

fn log_summary(summary: &ActivitySummary) {
    log::info!(
        "Unique IPs: {}, alert events: {}, mean requests/IP: {:.2}, threshold: {:.2}",
        summary.unique_ips,
        summary.alert_events,
        summary.mean_requests,
        summary.threshold
    );
    log::debug!("Event type distribution: {:?}", summary.event_types);
}

fn log_suspicious(analysis: &ActivityAnalysis) {
    if analysis.suspicious.is_empty() {
        log::info!("No suspicious IPs found");
        return;
    }

    log::info!("{:<20} {:<8} {:<8} {:<8}", "IP", "Total", "Alerts", "Over");
    for (ip, profile) in &analysis.suspicious {
        log::info!(
            "{:<20} {:<8} {:<8} {:<8}",
            ip,
            profile.total_requests,
            profile.alert_requests,
            if profile.over_threshold { "yes" } else { "no" }
        );
    }
}
