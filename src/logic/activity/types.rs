//! Activity Types

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::ALERT_EVENT_TYPE;
use crate::logic::IpMap;

// ============================================================================
// LOG RECORDS
// ============================================================================

/// Suricata `event_type`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventType {
    Alert,
    /// flow, dns, http, tls, ...
    Other(String),
}

impl EventType {
    pub fn as_str(&self) -> &str {
        match self {
            EventType::Alert => ALERT_EVENT_TYPE,
            EventType::Other(name) => name,
        }
    }

    pub fn is_alert(&self) -> bool {
        matches!(self, EventType::Alert)
    }
}

impl From<&str> for EventType {
    fn from(value: &str) -> Self {
        if value == ALERT_EVENT_TYPE {
            EventType::Alert
        } else {
            EventType::Other(value.to_string())
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One IDS event, immutable once loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub source_ip: String,
    pub event_type: EventType,
    /// Used for dedup; events without one are never collapsed
    pub flow_id: Option<String>,
}

impl LogRecord {
    pub fn new(source_ip: &str, event_type: &str, flow_id: Option<&str>) -> Self {
        Self {
            source_ip: source_ip.to_string(),
            event_type: EventType::from(event_type),
            flow_id: flow_id.map(str::to_string),
        }
    }
}

// ============================================================================
// ACTIVITY PROFILE
// ============================================================================

/// Per-IP activity, only emitted for suspicious IPs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityProfile {
    /// Events for this IP after dedup
    pub total_requests: u64,
    /// Of which `event_type == alert`
    pub alert_requests: u64,
    /// `total_requests > mean * multiplier`
    pub over_threshold: bool,
    /// `alert_requests > 0`
    pub has_alerts: bool,
}

impl ActivityProfile {
    pub fn is_suspicious(&self) -> bool {
        self.over_threshold || self.has_alerts
    }
}

/// Output of the suspicion rule
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityAnalysis {
    /// Distinct source IPs seen
    pub unique_ips: usize,
    pub mean_requests: f64,
    pub threshold: f64,
    pub suspicious: IpMap<ActivityProfile>,
}

// ============================================================================
// SUMMARY
// ============================================================================

/// What the analyzer saw, kept for logging and the notification
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivitySummary {
    pub records_loaded: usize,
    pub records_after_dedup: usize,
    pub unique_ips: usize,
    pub alert_events: u64,
    pub event_types: BTreeMap<String, u64>,
    pub mean_requests: f64,
    pub threshold: f64,
    pub suspicious_count: usize,
}
