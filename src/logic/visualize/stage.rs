//! Visualizer Stage

use std::path::PathBuf;

use super::chart::{top_by_requests, ChartRenderer};
use crate::constants::DEFAULT_CHART_TOP_N;
use crate::error::PipelineResult;
use crate::logic::pipeline::{ContextField, RunContext, Stage};

const STAGE_NAME: &str = "visualizer";

/// Draws the top-N suspicious IPs. With nothing suspicious no file is
/// written and `chart_saved` is `false`.
pub struct VisualizerStage<R: ChartRenderer> {
    renderer: R,
    path: PathBuf,
    top_n: usize,
}

impl<R: ChartRenderer> VisualizerStage<R> {
    pub fn new(renderer: R, path: impl Into<PathBuf>) -> Self {
        Self::with_top_n(renderer, path, DEFAULT_CHART_TOP_N)
    }

    pub fn with_top_n(renderer: R, path: impl Into<PathBuf>, top_n: usize) -> Self {
        Self { renderer, path: path.into(), top_n }
    }
}

impl<R: ChartRenderer> Stage for VisualizerStage<R> {
    fn name(&self) -> &'static str {
        STAGE_NAME
    }

    fn requires(&self) -> &'static [ContextField] {
        &[ContextField::SuspiciousIps]
    }

    fn produces(&self) -> &'static [ContextField] {
        &[ContextField::ChartSaved]
    }

    fn process(&self, mut context: RunContext) -> PipelineResult<RunContext> {
        let suspicious = context.require_suspicious_ips(STAGE_NAME)?;
        let bars = top_by_requests(suspicious, self.top_n);

        let saved = if bars.is_empty() {
            log::info!("No suspicious IPs, chart skipped");
            false
        } else {
            let title = format!("Top {} IP addresses", bars.len());
            match self.renderer.render(&bars, &title, &self.path) {
                Ok(()) => {
                    log::info!("Chart saved to {}", self.path.display());
                    true
                }
                Err(e) => {
                    log::warn!("Chart not saved: {}", e);
                    false
                }
            }
        };

        context.set_chart_saved(STAGE_NAME, saved)?;
        Ok(context)
    }
}
