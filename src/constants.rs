//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! Environment variable names live next to their defaults so `config.rs`
//! only has to deal with resolution.

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "IDS Responder";

// ============================================
// Input / output artifacts
// ============================================

/// Suricata EVE log read by the analyzer stage
pub const DEFAULT_EVENTS_PATH: &str = "events.json";
pub const ENV_EVENTS_PATH: &str = "IDS_EVENTS_PATH";

/// Per-IP JSON report
pub const DEFAULT_REPORT_PATH: &str = "ip_report.json";
pub const ENV_REPORT_PATH: &str = "IDS_REPORT_PATH";

/// Top-N chart
pub const DEFAULT_CHART_PATH: &str = "ip_report.svg";
pub const ENV_CHART_PATH: &str = "IDS_CHART_PATH";

// ============================================
// Detection
// ============================================

/// An IP is over threshold when its request count exceeds mean * multiplier
pub const DEFAULT_ACTIVITY_MULTIPLIER: f64 = 2.0;
pub const ENV_ACTIVITY_MULTIPLIER: &str = "IDS_ACTIVITY_MULTIPLIER";

/// Bars drawn in the chart
pub const DEFAULT_CHART_TOP_N: usize = 5;
pub const ENV_CHART_TOP_N: &str = "IDS_CHART_TOP_N";

/// Event type that marks an IDS alert
pub const ALERT_EVENT_TYPE: &str = "alert";

// ============================================
// Threat intel
// ============================================

pub const ENV_LIVE_INTEL: &str = "IDS_LIVE_INTEL";

/// Probability that the simulated intel source reports an IP as malicious
pub const DEFAULT_SIMULATED_MALICIOUS_PROBABILITY: f64 = 0.6;
pub const ENV_SIMULATED_MALICIOUS_PROBABILITY: &str = "IDS_SIMULATED_MALICIOUS_PROBABILITY";
pub const ENV_SIMULATION_SEED: &str = "IDS_SIMULATION_SEED";

pub const VIRUSTOTAL_API_BASE: &str = "https://www.virustotal.com/api/v3";
pub const ENV_VIRUSTOTAL_API_KEY: &str = "API_KEY_VIRUSTOTAL";

/// Free tier allows 4 requests per minute
pub const DEFAULT_VIRUSTOTAL_REQUEST_INTERVAL_SECS: u64 = 16;
pub const ENV_VIRUSTOTAL_REQUEST_INTERVAL: &str = "VIRUSTOTAL_REQUEST_INTERVAL_SECS";

pub const VIRUSTOTAL_TIMEOUT_SECS: u64 = 30;

// ============================================
// Firewall control plane
// ============================================

pub const ENV_LIVE_FIREWALL: &str = "IDS_LIVE_FIREWALL";

pub const DEFAULT_FIREWALL_URL: &str = "https://firewall.local/v2";
pub const ENV_FIREWALL_URL: &str = "FIREWALL_API_URL";
pub const ENV_FIREWALL_API_KEY: &str = "API_KEY_FIREWALL";

pub const DEFAULT_FIREWALL_TIMEOUT_SECS: u64 = 5;
pub const ENV_FIREWALL_TIMEOUT: &str = "FIREWALL_TIMEOUT_SECS";

// ============================================
// Notification
// ============================================

pub const DEFAULT_NOTIFY_EMAIL_TO: &str = "admin_report@example.com";
pub const ENV_NOTIFY_EMAIL_TO: &str = "NOTIFY_EMAIL_TO";

pub const ENV_LIVE_NOTIFY: &str = "IDS_LIVE_NOTIFY";
pub const ENV_MAIL_RELAY_URL: &str = "MAIL_RELAY_URL";
pub const ENV_MAIL_RELAY_TOKEN: &str = "MAIL_RELAY_TOKEN";
pub const ENV_MAIL_FROM: &str = "MAIL_FROM";

pub const MAIL_RELAY_TIMEOUT_SECS: u64 = 15;
