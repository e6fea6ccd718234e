//! IDS Responder - Main Entry Point

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use ids_responder::constants::*;
use ids_responder::{run, Config, RunOutcome};

#[derive(Parser)]
#[command(name = "ids-responder", about = "Batch incident response over Suricata logs", version)]
struct Cli {
    /// Suricata EVE log (JSON array or JSON lines).
    #[arg(long)]
    events: Option<PathBuf>,
    /// Where to write the per-IP JSON report.
    #[arg(long)]
    report: Option<PathBuf>,
    /// Where to write the top-N SVG chart.
    #[arg(long)]
    chart: Option<PathBuf>,
    /// Notification recipient.
    #[arg(long)]
    notify_to: Option<String>,
    /// Suspicion threshold as a multiple of the mean request count.
    #[arg(long)]
    multiplier: Option<f64>,
    /// Query VirusTotal instead of simulating verdicts.
    #[arg(long)]
    live_intel: bool,
    /// Send block requests to the firewall API instead of a dry run.
    #[arg(long)]
    live_firewall: bool,
    /// Send the summary through the mail relay instead of only logging it.
    #[arg(long)]
    live_notify: bool,
}

impl Cli {
    /// CLI values keyed by the environment variable they replace
    fn overrides(&self) -> HashMap<&'static str, String> {
        let mut map = HashMap::new();
        let path = |p: &PathBuf| p.to_string_lossy().to_string();

        if let Some(p) = &self.events {
            map.insert(ENV_EVENTS_PATH, path(p));
        }
        if let Some(p) = &self.report {
            map.insert(ENV_REPORT_PATH, path(p));
        }
        if let Some(p) = &self.chart {
            map.insert(ENV_CHART_PATH, path(p));
        }
        if let Some(to) = &self.notify_to {
            map.insert(ENV_NOTIFY_EMAIL_TO, to.clone());
        }
        if let Some(m) = self.multiplier {
            map.insert(ENV_ACTIVITY_MULTIPLIER, m.to_string());
        }
        if self.live_intel {
            map.insert(ENV_LIVE_INTEL, "true".to_string());
        }
        if self.live_firewall {
            map.insert(ENV_LIVE_FIREWALL, "true".to_string());
        }
        if self.live_notify {
            map.insert(ENV_LIVE_NOTIFY, "true".to_string());
        }
        map
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match try_main() {
        Ok(outcome) => {
            print_outcome(&outcome);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn try_main() -> anyhow::Result<RunOutcome> {
    if let Err(e) = dotenvy::dotenv() {
        log::debug!("No .env loaded: {}", e);
    }

    let cli = Cli::parse();
    let overrides = cli.overrides();
    let config = Config::from_lookup(|key| {
        overrides.get(key).cloned().or_else(|| env::var(key).ok())
    })
    .context("invalid configuration")?;

    log::info!("Starting {} v{}", APP_NAME, APP_VERSION);
    if config.is_live() {
        log::warn!("Live collaborators enabled, real services will be contacted");
    }

    let outcome = run(&config).context("pipeline run failed")?;
    Ok(outcome)
}

fn print_outcome(outcome: &RunOutcome) {
    println!("Run {}", outcome.run_id);
    println!("  suspicious IPs:     {}", outcome.suspicious_ips);
    println!("  marked for block:   {}", outcome.marked_for_block);
    println!(
        "  blocked / failed:   {} / {}",
        outcome.blocks.blocked, outcome.blocks.failed
    );
    println!("  notification sent:  {}", outcome.notification_sent);
    println!("  report saved:       {}", outcome.report_saved);
    println!("  chart saved:        {}", outcome.chart_saved);
}
