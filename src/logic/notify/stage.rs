//! Notify Stage

use chrono::Local;

use super::notifier::Notifier;
use super::summary::BlockSummary;
use crate::error::PipelineResult;
use crate::logic::pipeline::{ContextField, RunContext, Stage};

const STAGE_NAME: &str = "notify";

/// Sends the block summary. Delivery failure, or a notifier that does not
/// deliver, is recorded as `notification_sent = false`, never raised.
pub struct NotifyStage<N: Notifier> {
    notifier: N,
    to: String,
}

impl<N: Notifier> NotifyStage<N> {
    pub fn new(notifier: N, to: &str) -> Self {
        Self {
            notifier,
            to: to.to_string(),
        }
    }
}

impl<N: Notifier> Stage for NotifyStage<N> {
    fn name(&self) -> &'static str {
        STAGE_NAME
    }

    fn requires(&self) -> &'static [ContextField] {
        &[ContextField::BlockResults]
    }

    fn produces(&self) -> &'static [ContextField] {
        &[ContextField::NotificationSent]
    }

    fn process(&self, mut context: RunContext) -> PipelineResult<RunContext> {
        let results = context.require_block_results(STAGE_NAME)?;
        let summary = BlockSummary::new(context.run_id, Local::now(), results)
            .with_activity(context.activity_summary().cloned());

        let subject = summary.subject();
        let body = summary.body();
        log::debug!("Notification body:\n{}", body);

        let sent = match self.notifier.send(&self.to, &subject, &body) {
            Ok(()) if !self.notifier.delivers() => {
                log::warn!("Notification '{}' only logged, not delivered", subject);
                false
            }
            Ok(()) => {
                log::info!("Notification '{}' delivered via {}", subject, self.notifier.name());
                true
            }
            Err(e) => {
                log::warn!("Notification via {} failed: {}", self.notifier.name(), e);
                false
            }
        };

        context.set_notification_sent(STAGE_NAME, sent)?;
        Ok(context)
    }
}
