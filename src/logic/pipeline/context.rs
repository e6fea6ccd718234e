//! Run Context
//!
//! Typed accumulator threaded through the stages. Each stage output has
//! exactly one slot; a slot is written once and never replaced, so a stage
//! cannot rewrite what an earlier stage produced.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{PipelineError, PipelineResult};
use crate::logic::activity::{ActivityProfile, ActivitySummary};
use crate::logic::external_intel::ThreatVerdict;
use crate::logic::policy::DecisionRecord;
use crate::logic::report::Report;
use crate::logic::IpMap;

// ============================================================================
// FIELDS
// ============================================================================

/// Names of the context slots, used by stages to declare dependencies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextField {
    ActivitySummary,
    SuspiciousIps,
    ThreatVerdicts,
    BlockDecisions,
    BlockResults,
    NotificationSent,
    Report,
    ReportSaved,
    ChartSaved,
}

impl ContextField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContextField::ActivitySummary => "activity_summary",
            ContextField::SuspiciousIps => "suspicious_ips",
            ContextField::ThreatVerdicts => "threat_verdicts",
            ContextField::BlockDecisions => "block_decisions",
            ContextField::BlockResults => "block_results",
            ContextField::NotificationSent => "notification_sent",
            ContextField::Report => "report",
            ContextField::ReportSaved => "report_saved",
            ContextField::ChartSaved => "chart_saved",
        }
    }
}

impl fmt::Display for ContextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// RUN CONTEXT
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct RunContext {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    activity_summary: Option<ActivitySummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    suspicious_ips: Option<IpMap<ActivityProfile>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    threat_verdicts: Option<IpMap<ThreatVerdict>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    block_decisions: Option<IpMap<DecisionRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    block_results: Option<IpMap<bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    notification_sent: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<Report>,
    #[serde(skip_serializing_if = "Option::is_none")]
    report_saved: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    chart_saved: Option<bool>,
}

impl RunContext {
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            activity_summary: None,
            suspicious_ips: None,
            threat_verdicts: None,
            block_decisions: None,
            block_results: None,
            notification_sent: None,
            report: None,
            report_saved: None,
            chart_saved: None,
        }
    }

    /// Whether a slot has been written
    pub fn has(&self, field: ContextField) -> bool {
        match field {
            ContextField::ActivitySummary => self.activity_summary.is_some(),
            ContextField::SuspiciousIps => self.suspicious_ips.is_some(),
            ContextField::ThreatVerdicts => self.threat_verdicts.is_some(),
            ContextField::BlockDecisions => self.block_decisions.is_some(),
            ContextField::BlockResults => self.block_results.is_some(),
            ContextField::NotificationSent => self.notification_sent.is_some(),
            ContextField::Report => self.report.is_some(),
            ContextField::ReportSaved => self.report_saved.is_some(),
            ContextField::ChartSaved => self.chart_saved.is_some(),
        }
    }

    // --- Readers (optional) ---

    pub fn activity_summary(&self) -> Option<&ActivitySummary> {
        self.activity_summary.as_ref()
    }

    pub fn suspicious_ips(&self) -> Option<&IpMap<ActivityProfile>> {
        self.suspicious_ips.as_ref()
    }

    pub fn threat_verdicts(&self) -> Option<&IpMap<ThreatVerdict>> {
        self.threat_verdicts.as_ref()
    }

    pub fn block_decisions(&self) -> Option<&IpMap<DecisionRecord>> {
        self.block_decisions.as_ref()
    }

    pub fn block_results(&self) -> Option<&IpMap<bool>> {
        self.block_results.as_ref()
    }

    pub fn notification_sent(&self) -> Option<bool> {
        self.notification_sent
    }

    pub fn report(&self) -> Option<&Report> {
        self.report.as_ref()
    }

    pub fn report_saved(&self) -> Option<bool> {
        self.report_saved
    }

    pub fn chart_saved(&self) -> Option<bool> {
        self.chart_saved
    }

    // --- Readers (required by the calling stage) ---

    pub fn require_suspicious_ips(&self, stage: &'static str) -> PipelineResult<&IpMap<ActivityProfile>> {
        required(&self.suspicious_ips, stage, ContextField::SuspiciousIps)
    }

    pub fn require_threat_verdicts(&self, stage: &'static str) -> PipelineResult<&IpMap<ThreatVerdict>> {
        required(&self.threat_verdicts, stage, ContextField::ThreatVerdicts)
    }

    pub fn require_block_decisions(&self, stage: &'static str) -> PipelineResult<&IpMap<DecisionRecord>> {
        required(&self.block_decisions, stage, ContextField::BlockDecisions)
    }

    pub fn require_block_results(&self, stage: &'static str) -> PipelineResult<&IpMap<bool>> {
        required(&self.block_results, stage, ContextField::BlockResults)
    }

    // --- Writers (once per slot) ---

    pub fn set_activity_summary(&mut self, stage: &'static str, value: ActivitySummary) -> PipelineResult<()> {
        write_once(&mut self.activity_summary, value, stage, ContextField::ActivitySummary)
    }

    pub fn set_suspicious_ips(&mut self, stage: &'static str, value: IpMap<ActivityProfile>) -> PipelineResult<()> {
        write_once(&mut self.suspicious_ips, value, stage, ContextField::SuspiciousIps)
    }

    pub fn set_threat_verdicts(&mut self, stage: &'static str, value: IpMap<ThreatVerdict>) -> PipelineResult<()> {
        write_once(&mut self.threat_verdicts, value, stage, ContextField::ThreatVerdicts)
    }

    pub fn set_block_decisions(&mut self, stage: &'static str, value: IpMap<DecisionRecord>) -> PipelineResult<()> {
        write_once(&mut self.block_decisions, value, stage, ContextField::BlockDecisions)
    }

    pub fn set_block_results(&mut self, stage: &'static str, value: IpMap<bool>) -> PipelineResult<()> {
        write_once(&mut self.block_results, value, stage, ContextField::BlockResults)
    }

    pub fn set_notification_sent(&mut self, stage: &'static str, value: bool) -> PipelineResult<()> {
        write_once(&mut self.notification_sent, value, stage, ContextField::NotificationSent)
    }

    pub fn set_report(&mut self, stage: &'static str, value: Report) -> PipelineResult<()> {
        write_once(&mut self.report, value, stage, ContextField::Report)
    }

    pub fn set_report_saved(&mut self, stage: &'static str, value: bool) -> PipelineResult<()> {
        write_once(&mut self.report_saved, value, stage, ContextField::ReportSaved)
    }

    pub fn set_chart_saved(&mut self, stage: &'static str, value: bool) -> PipelineResult<()> {
        write_once(&mut self.chart_saved, value, stage, ContextField::ChartSaved)
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// SLOT HELPERS
// ============================================================================

fn required<'a, T>(
    slot: &'a Option<T>,
    stage: &'static str,
    field: ContextField,
) -> PipelineResult<&'a T> {
    slot.as_ref().ok_or(PipelineError::MissingInput { stage, field })
}

fn write_once<T>(
    slot: &mut Option<T>,
    value: T,
    stage: &'static str,
    field: ContextField,
) -> PipelineResult<()> {
    if slot.is_some() {
        return Err(PipelineError::OutputAlreadySet { stage, field });
    }
    *slot = Some(value);
    Ok(())
}
