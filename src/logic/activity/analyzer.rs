//! Activity Analyzer
//!
//! CHỈ chứa logic đếm và luật nghi ngờ - không đọc file, không log bảng.
//! Input: deduplicated LogRecords + multiplier
//! Output: ActivityAnalysis

use std::collections::BTreeMap;

use super::types::{ActivityAnalysis, ActivityProfile, ActivitySummary, LogRecord};

#[derive(Default)]
struct Counts {
    total: u64,
    alerts: u64,
}

/// Apply the suspicion rule.
///
/// `threshold = mean(requests per IP) * multiplier`. An IP is suspicious when
/// its request count is strictly above the threshold or it has any alert.
/// The mean is taken over every IP, not only suspicious ones.
pub fn analyze(records: &[LogRecord], multiplier: f64) -> ActivityAnalysis {
    let mut per_ip: BTreeMap<&str, Counts> = BTreeMap::new();
    for record in records {
        let counts = per_ip.entry(record.source_ip.as_str()).or_default();
        counts.total += 1;
        if record.event_type.is_alert() {
            counts.alerts += 1;
        }
    }

    // Empty log: no mean, nothing suspicious
    if per_ip.is_empty() {
        return ActivityAnalysis {
            unique_ips: 0,
            mean_requests: 0.0,
            threshold: 0.0,
            suspicious: BTreeMap::new(),
        };
    }

    let total: u64 = per_ip.values().map(|c| c.total).sum();
    let mean_requests = total as f64 / per_ip.len() as f64;
    let threshold = mean_requests * multiplier;

    let suspicious = per_ip
        .iter()
        .filter_map(|(ip, counts)| {
            let profile = ActivityProfile {
                total_requests: counts.total,
                alert_requests: counts.alerts,
                over_threshold: counts.total as f64 > threshold,
                has_alerts: counts.alerts > 0,
            };
            profile.is_suspicious().then(|| (ip.to_string(), profile))
        })
        .collect();

    ActivityAnalysis {
        unique_ips: per_ip.len(),
        mean_requests,
        threshold,
        suspicious,
    }
}

/// Build the run summary from the loaded and deduplicated sets
pub fn summarize(
    records_loaded: usize,
    deduped: &[LogRecord],
    analysis: &ActivityAnalysis,
) -> ActivitySummary {
    let mut event_types: BTreeMap<String, u64> = BTreeMap::new();
    for record in deduped {
        *event_types.entry(record.event_type.as_str().to_string()).or_insert(0) += 1;
    }

    ActivitySummary {
        records_loaded,
        records_after_dedup: deduped.len(),
        unique_ips: analysis.unique_ips,
        alert_events: deduped.iter().filter(|r| r.event_type.is_alert()).count() as u64,
        event_types,
        mean_requests: analysis.mean_requests,
        threshold: analysis.threshold,
        suspicious_count: analysis.suspicious.len(),
    }
}
