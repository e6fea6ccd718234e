//! Runner
//!
//! Turns a resolved `Config` into the default stage order and executes it:
//! analyzer → threat intel → decision → firewall → notify → report → chart.

use serde::Serialize;
use uuid::Uuid;

use crate::config::{Config, FirewallSettings, IntelSettings};
use crate::error::PipelineResult;
use crate::logic::activity::{ActivityAnalyzerStage, FileLogSource};
use crate::logic::external_intel::{SimulatedIntel, ThreatIntelStage, VTClient};
use crate::logic::notify::{LogNotifier, MailRelayNotifier, NotifyStage};
use crate::logic::pipeline::{Pipeline, RunContext, Stage};
use crate::logic::policy::BlockDecisionStage;
use crate::logic::report::ReportStage;
use crate::logic::response::{BlockTally, DryRunFirewall, FirewallApiClient, FirewallBanStage};
use crate::logic::visualize::{SvgChartRenderer, VisualizerStage};

pub fn build_pipeline(config: &Config) -> Pipeline {
    let analyzer = ActivityAnalyzerStage::with_multiplier(
        FileLogSource::new(&config.events_path),
        config.activity_multiplier,
    );

    let intel: Box<dyn Stage> = match &config.intel {
        IntelSettings::Simulated { malicious_probability, seed } => {
            log::info!("Threat intel: simulated (p = {})", malicious_probability);
            Box::new(ThreatIntelStage::new(SimulatedIntel::new(*malicious_probability, *seed)))
        }
        IntelSettings::VirusTotal { api_key, base_url, request_interval } => {
            log::info!("Threat intel: VirusTotal ({} s between lookups)", request_interval.as_secs());
            Box::new(ThreatIntelStage::new(VTClient::with_options(api_key, base_url, *request_interval)))
        }
    };

    let firewall: Box<dyn Stage> = match &config.firewall {
        FirewallSettings::DryRun => {
            log::info!("Firewall: dry run");
            Box::new(FirewallBanStage::new(DryRunFirewall))
        }
        FirewallSettings::Api { base_url, api_key, timeout } => {
            log::info!("Firewall: {}", base_url);
            Box::new(FirewallBanStage::new(FirewallApiClient::with_timeout(base_url, api_key, *timeout)))
        }
    };

    let notify: Box<dyn Stage> = match &config.mail_relay {
        Some(relay) => Box::new(NotifyStage::new(MailRelayNotifier::new(relay), &config.notify_to)),
        None => {
            log::info!("Live notification off, the summary is logged and not counted as sent");
            Box::new(NotifyStage::new(LogNotifier, &config.notify_to))
        }
    };

    Pipeline::new(Vec::new())
        .with_stage(Box::new(analyzer))
        .with_stage(intel)
        .with_stage(Box::new(BlockDecisionStage::new()))
        .with_stage(firewall)
        .with_stage(notify)
        .with_stage(Box::new(ReportStage::new(&config.report_path)))
        .with_stage(Box::new(VisualizerStage::with_top_n(
            SvgChartRenderer::default(),
            &config.chart_path,
            config.chart_top_n,
        )))
}

/// Build and execute the default pipeline once
pub fn run(config: &Config) -> PipelineResult<RunOutcome> {
    let context = build_pipeline(config).execute(RunContext::new())?;
    Ok(RunOutcome::from_context(&context))
}

/// Final state of a run, printed by the binary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunOutcome {
    pub run_id: Uuid,
    pub suspicious_ips: usize,
    pub marked_for_block: usize,
    pub blocks: BlockTally,
    pub notification_sent: bool,
    pub report_saved: bool,
    pub chart_saved: bool,
}

impl RunOutcome {
    pub fn from_context(context: &RunContext) -> Self {
        Self {
            run_id: context.run_id,
            suspicious_ips: context.suspicious_ips().map_or(0, |m| m.len()),
            marked_for_block: context
                .block_decisions()
                .map_or(0, |m| m.values().filter(|r| r.is_block()).count()),
            blocks: context
                .block_results()
                .map(|m| BlockTally::from_results(m.values()))
                .unwrap_or_default(),
            notification_sent: context.notification_sent().unwrap_or(false),
            report_saved: context.report_saved().unwrap_or(false),
            chart_saved: context.chart_saved().unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MailRelaySettings;
    use std::fs;
    use tempfile::tempdir;

    fn test_config(dir: &std::path::Path) -> Config {
        Config {
            events_path: dir.join("events.json"),
            report_path: dir.join("ip_report.json"),
            chart_path: dir.join("ip_report.svg"),
            activity_multiplier: 2.0,
            chart_top_n: 5,
            notify_to: "soc@example.com".to_string(),
            intel: IntelSettings::Simulated { malicious_probability: 1.0, seed: Some(1) },
            firewall: FirewallSettings::DryRun,
            mail_relay: None,
        }
    }

    #[test]
    fn test_default_stage_order() {
        let dir = tempdir().unwrap();
        let pipeline = build_pipeline(&test_config(dir.path()));
        assert_eq!(
            pipeline.stage_names(),
            vec!["activity_analyzer", "threat_intel", "block_decision", "firewall_ban", "notify", "ip_report", "visualizer"]
        );
        assert!(pipeline.check_dependencies(&RunContext::new()).is_ok());
    }

    fn write_events(config: &Config) {
        let mut lines = Vec::new();
        for i in 0..40 {
            lines.push(format!(r#"{{"flow_id":{},"event_type":"flow","src_ip":"10.0.0.1"}}"#, i));
        }
        lines.push(r#"{"flow_id":100,"event_type":"alert","src_ip":"10.0.0.2"}"#.to_string());
        for i in 0..3 {
            lines.push(format!(r#"{{"flow_id":{},"event_type":"dns","src_ip":"10.0.0.3"}}"#, 200 + i));
        }
        fs::write(&config.events_path, lines.join("\n")).unwrap();
    }

    #[test]
    fn test_run_from_file() {
        let dir = tempdir().unwrap();
        let config = test_config(dir.path());
        write_events(&config);

        let outcome = run(&config).unwrap();
        // mean = 44 / 3, threshold ~29.3: 10.0.0.1 by activity, 10.0.0.2 by alert
        assert_eq!(outcome.suspicious_ips, 2);
        assert_eq!(outcome.marked_for_block, 2);
        assert_eq!(outcome.blocks.blocked, 2);
        // Log-only notification is never reported as delivered
        assert!(!outcome.notification_sent);
        assert!(outcome.report_saved);
        assert!(outcome.chart_saved);
        assert!(config.report_path.exists());
        assert!(config.chart_path.exists());
    }

    #[test]
    fn test_unreachable_relay_is_not_sent() {
        let dir = tempdir().unwrap();
        let config = Config {
            mail_relay: Some(MailRelaySettings {
                url: "http://127.0.0.1:9/send".to_string(),
                token: "t".to_string(),
                from: "ids@example.com".to_string(),
            }),
            ..test_config(dir.path())
        };
        write_events(&config);

        let outcome = run(&config).unwrap();
        assert_eq!(outcome.blocks.blocked, 2);
        assert!(!outcome.notification_sent);
        assert!(outcome.report_saved);
    }

    #[test]
    fn test_missing_events_file_aborts() {
        let dir = tempdir().unwrap();
        let config = test_config(dir.path());
        assert!(run(&config).is_err());
        assert!(!config.report_path.exists());
    }
}
