//! Firewall Ban Stage
//!
//! Calls the firewall once per IP whose decision is a block. A failed call
//! is recorded as `false` and the loop moves on.

use super::firewall::Firewall;
use super::types::BlockTally;
use crate::error::PipelineResult;
use crate::logic::pipeline::{ContextField, RunContext, Stage};
use crate::logic::IpMap;

const STAGE_NAME: &str = "firewall_ban";

pub struct FirewallBanStage<F: Firewall> {
    firewall: F,
}

impl<F: Firewall> FirewallBanStage<F> {
    pub fn new(firewall: F) -> Self {
        Self { firewall }
    }
}

impl<F: Firewall> Stage for FirewallBanStage<F> {
    fn name(&self) -> &'static str {
        STAGE_NAME
    }

    fn requires(&self) -> &'static [ContextField] {
        &[ContextField::BlockDecisions]
    }

    fn produces(&self) -> &'static [ContextField] {
        &[ContextField::BlockResults]
    }

    fn process(&self, mut context: RunContext) -> PipelineResult<RunContext> {
        let decisions = context.require_block_decisions(STAGE_NAME)?;

        let mut results: IpMap<bool> = IpMap::new();
        for (ip, record) in decisions.iter().filter(|(_, r)| r.is_block()) {
            let blocked = self.firewall.block(ip);
            if blocked {
                log::info!("Blocked {} ({})", ip, record.decision);
            } else {
                log::warn!("Failed to block {} ({})", ip, record.decision);
            }
            results.insert(ip.clone(), blocked);
        }

        let tally = BlockTally::from_results(results.values());
        log::info!(
            "Firewall ({}): {} attempted, {} blocked, {} failed",
            self.firewall.name(),
            tally.attempted,
            tally.blocked,
            tally.failed
        );

        context.set_block_results(STAGE_NAME, results)?;
        Ok(context)
    }
}
