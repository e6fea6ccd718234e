//! Configuration module
//!
//! Resolved once, before the pipeline is built. Every collaborator adapter
//! receives its settings from here; nothing reads the environment later.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::constants::*;
use crate::error::ConfigError;

/// Where threat verdicts come from
#[derive(Debug, Clone, PartialEq)]
pub enum IntelSettings {
    /// Verdicts drawn at random, no network
    Simulated {
        malicious_probability: f64,
        seed: Option<u64>,
    },
    /// VirusTotal v3 API
    VirusTotal {
        api_key: String,
        base_url: String,
        request_interval: Duration,
    },
}

/// How block requests are carried out
#[derive(Debug, Clone, PartialEq)]
pub enum FirewallSettings {
    /// Every block is reported as confirmed, nothing is sent
    DryRun,
    /// Firewall control-plane REST API
    Api {
        base_url: String,
        api_key: String,
        timeout: Duration,
    },
}

/// HTTP mail relay used for the run notification
#[derive(Debug, Clone, PartialEq)]
pub struct MailRelaySettings {
    pub url: String,
    pub token: String,
    pub from: String,
}

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Suricata EVE log
    pub events_path: PathBuf,

    /// Report artifact
    pub report_path: PathBuf,

    /// Chart artifact
    pub chart_path: PathBuf,

    /// Suspicion threshold = mean requests * multiplier
    pub activity_multiplier: f64,

    /// Number of IPs drawn in the chart
    pub chart_top_n: usize,

    /// Notification recipient
    pub notify_to: String,

    pub intel: IntelSettings,

    pub firewall: FirewallSettings,

    /// `None` means notifications are only logged
    pub mail_relay: Option<MailRelaySettings>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// The binary layers CLI overrides on top of the environment through
    /// this; tests use it with a plain map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let activity_multiplier =
            parse_or(&get, ENV_ACTIVITY_MULTIPLIER, DEFAULT_ACTIVITY_MULTIPLIER)?;
        if !(activity_multiplier.is_finite() && activity_multiplier > 0.0) {
            return Err(invalid(ENV_ACTIVITY_MULTIPLIER, activity_multiplier, "must be a positive number"));
        }

        let chart_top_n = parse_or(&get, ENV_CHART_TOP_N, DEFAULT_CHART_TOP_N)?;
        if chart_top_n == 0 {
            return Err(invalid(ENV_CHART_TOP_N, chart_top_n, "must be at least 1"));
        }

        let intel = if parse_flag(&get, ENV_LIVE_INTEL)? {
            IntelSettings::VirusTotal {
                api_key: require(&get, ENV_VIRUSTOTAL_API_KEY, "live threat intel")?,
                base_url: VIRUSTOTAL_API_BASE.to_string(),
                request_interval: Duration::from_secs(parse_or(
                    &get,
                    ENV_VIRUSTOTAL_REQUEST_INTERVAL,
                    DEFAULT_VIRUSTOTAL_REQUEST_INTERVAL_SECS,
                )?),
            }
        } else {
            let malicious_probability = parse_or(
                &get,
                ENV_SIMULATED_MALICIOUS_PROBABILITY,
                DEFAULT_SIMULATED_MALICIOUS_PROBABILITY,
            )?;
            if !(0.0..=1.0).contains(&malicious_probability) {
                return Err(invalid(
                    ENV_SIMULATED_MALICIOUS_PROBABILITY,
                    malicious_probability,
                    "must be within [0, 1]",
                ));
            }
            IntelSettings::Simulated {
                malicious_probability,
                seed: get(ENV_SIMULATION_SEED)
                    .map(|raw| parse_value(ENV_SIMULATION_SEED, &raw))
                    .transpose()?,
            }
        };

        let firewall = if parse_flag(&get, ENV_LIVE_FIREWALL)? {
            FirewallSettings::Api {
                base_url: get(ENV_FIREWALL_URL).unwrap_or_else(|| DEFAULT_FIREWALL_URL.to_string()),
                api_key: require(&get, ENV_FIREWALL_API_KEY, "live firewall blocking")?,
                timeout: Duration::from_secs(parse_or(
                    &get,
                    ENV_FIREWALL_TIMEOUT,
                    DEFAULT_FIREWALL_TIMEOUT_SECS,
                )?),
            }
        } else {
            FirewallSettings::DryRun
        };

        // Relay settings are ignored unless live notification is requested
        let mail_relay = if parse_flag(&get, ENV_LIVE_NOTIFY)? {
            Some(MailRelaySettings {
                url: require(&get, ENV_MAIL_RELAY_URL, "live notifications")?,
                token: require(&get, ENV_MAIL_RELAY_TOKEN, "live notifications")?,
                from: require(&get, ENV_MAIL_FROM, "live notifications")?,
            })
        } else {
            None
        };

        Ok(Self {
            events_path: get(ENV_EVENTS_PATH)
                .unwrap_or_else(|| DEFAULT_EVENTS_PATH.to_string())
                .into(),
            report_path: get(ENV_REPORT_PATH)
                .unwrap_or_else(|| DEFAULT_REPORT_PATH.to_string())
                .into(),
            chart_path: get(ENV_CHART_PATH)
                .unwrap_or_else(|| DEFAULT_CHART_PATH.to_string())
                .into(),
            activity_multiplier,
            chart_top_n,
            notify_to: get(ENV_NOTIFY_EMAIL_TO).unwrap_or_else(|| DEFAULT_NOTIFY_EMAIL_TO.to_string()),
            intel,
            firewall,
            mail_relay,
        })
    }

    /// True when any collaborator talks to a real service
    pub fn is_live(&self) -> bool {
        matches!(self.intel, IntelSettings::VirusTotal { .. })
            || matches!(self.firewall, FirewallSettings::Api { .. })
            || self.mail_relay.is_some()
    }
}

// ============================================================================
// HELPERS
// ============================================================================

fn require<G>(get: &G, var: &'static str, purpose: &'static str) -> Result<String, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    get(var).ok_or(ConfigError::Missing { var, purpose })
}

fn parse_or<G, T>(get: &G, var: &'static str, default: T) -> Result<T, ConfigError>
where
    G: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match get(var) {
        Some(raw) => parse_value(var, &raw),
        None => Ok(default),
    }
}

fn parse_value<T>(var: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        var,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

fn parse_flag<G>(get: &G, var: &'static str) -> Result<bool, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    match get(var).map(|v| v.trim().to_lowercase()) {
        None => Ok(false),
        Some(v) => match v.as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(invalid(var, &v, "expected true/false")),
        },
    }
}

fn invalid(var: &'static str, value: impl ToString, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        var,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
