//! Block summary and message formatting

use chrono::{DateTime, Local};
use serde::Serialize;
use uuid::Uuid;

use crate::logic::activity::ActivitySummary;
use crate::logic::response::BlockTally;
use crate::logic::IpMap;

/// Everything the notification says about one run
#[derive(Debug, Clone, Serialize)]
pub struct BlockSummary {
    pub run_id: Uuid,
    pub host: String,
    pub generated_at: DateTime<Local>,
    pub tally: BlockTally,
    pub results: IpMap<bool>,
    /// Load counts from the analyzer, when it ran
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity: Option<ActivitySummary>,
}

impl BlockSummary {
    pub fn new(run_id: Uuid, generated_at: DateTime<Local>, results: &IpMap<bool>) -> Self {
        Self {
            run_id,
            host: local_hostname(),
            generated_at,
            tally: BlockTally::from_results(results.values()),
            results: results.clone(),
            activity: None,
        }
    }

    pub fn with_activity(mut self, activity: Option<ActivitySummary>) -> Self {
        self.activity = activity;
        self
    }

    pub fn subject(&self) -> String {
        format!("IP blocking - {}", self.generated_at.format("%d.%m.%Y %H:%M"))
    }

    pub fn body(&self) -> String {
        if self.results.is_empty() {
            return "No IP addresses were blocked".to_string();
        }

        let mut body = String::from("IP BLOCKING NOTICE\n\n");
        body.push_str(&format!("Run: {}\n", self.run_id));
        body.push_str(&format!("Host: {}\n", self.host));
        body.push_str(&format!("Time: {}\n", self.generated_at.format("%Y-%m-%d %H:%M:%S")));
        if let Some(activity) = &self.activity {
            body.push_str(&format!(
                "Events analyzed: {} ({} after flow dedup), unique IPs: {}, suspicious: {}\n",
                activity.records_loaded,
                activity.records_after_dedup,
                activity.unique_ips,
                activity.suspicious_count
            ));
        }
        body.push_str(&format!("IP addresses to block: {}\n", self.tally.attempted));
        body.push_str(&format!(
            "Blocked: {}, failed: {}\n\n",
            self.tally.blocked, self.tally.failed
        ));

        body.push_str("Block results:\n");
        for (ip, blocked) in &self.results {
            let status = if *blocked { "blocked" } else { "not blocked" };
            body.push_str(&format!("{} {}\n", ip, status));
        }
        body
    }
}

fn local_hostname() -> String {
    hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string())
}
