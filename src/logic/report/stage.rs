//! Report Stage

use std::path::PathBuf;

use super::assembler::{assemble, ReportSources};
use super::types::Report;
use super::writer::write_report;
use crate::error::PipelineResult;
use crate::logic::pipeline::{ContextField, RunContext, Stage};

const STAGE_NAME: &str = "ip_report";

/// Joins whatever per-IP outputs exist and writes them to `path`.
/// A failed write sets `report_saved = false`; the report stays in the context.
pub struct ReportStage {
    path: PathBuf,
}

impl ReportStage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Stage for ReportStage {
    fn name(&self) -> &'static str {
        STAGE_NAME
    }

    fn requires(&self) -> &'static [ContextField] {
        &[ContextField::SuspiciousIps]
    }

    fn produces(&self) -> &'static [ContextField] {
        &[ContextField::Report, ContextField::ReportSaved]
    }

    fn process(&self, mut context: RunContext) -> PipelineResult<RunContext> {
        context.require_suspicious_ips(STAGE_NAME)?;

        let report = assemble(&ReportSources::from_context(&context));
        log_report(&report);

        let saved = match write_report(&self.path, &report) {
            Ok(()) => {
                log::info!("Report with {} IPs saved to {}", report.len(), self.path.display());
                true
            }
            Err(e) => {
                log::warn!("Report not saved: {}", e);
                false
            }
        };

        context.set_report(STAGE_NAME, report)?;
        context.set_report_saved(STAGE_NAME, saved)?;
        Ok(context)
    }
}

fn log_report(report: &Report) {
    for (ip, entry) in report {
        log::info!(
            "{}: requests={} verdict={} decision={} blocked={}",
            ip,
            entry.activity.as_ref().map(|a| a.total_requests.to_string()).unwrap_or_else(|| "-".into()),
            entry.threat_verdict.map(|v| v.as_str()).unwrap_or("-"),
            entry.block_decision.as_ref().map(|d| d.decision.as_str()).unwrap_or("-"),
            entry.block_result.map(|b| b.to_string()).unwrap_or_else(|| "-".into()),
        );
    }
}
