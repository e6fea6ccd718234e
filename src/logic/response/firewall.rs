//! Firewall Module
//!
//! Mục đích: Chặn IP qua firewall control-plane API
//!
//! Features:
//! - `POST {base}/block` với header `API-Key`
//! - Timeout cố định cho mỗi request
//! - Dry-run adapter: xác nhận mọi block, không gửi gì

use std::time::Duration;

use serde_json::json;

use super::types::ActionError;
use crate::constants::DEFAULT_FIREWALL_TIMEOUT_SECS;

// ============================================================================
// CONTRACT
// ============================================================================

/// Block one IP. `true` only when the firewall confirmed the block.
///
/// Implementations must not panic or return early on failure; any problem
/// is reported as `false`.
pub trait Firewall {
    fn name(&self) -> &'static str;

    fn block(&self, ip: &str) -> bool;
}

// ============================================================================
// API CLIENT
// ============================================================================

pub struct FirewallApiClient {
    base_url: String,
    api_key: String,
    agent: ureq::Agent,
}

impl FirewallApiClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self::with_timeout(base_url, api_key, Duration::from_secs(DEFAULT_FIREWALL_TIMEOUT_SECS))
    }

    pub fn with_timeout(base_url: &str, api_key: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            agent,
        }
    }

    /// Send the block request, success iff HTTP 200
    pub fn request_block(&self, ip: &str) -> Result<(), ActionError> {
        if ip.is_empty() {
            return Err(ActionError::InvalidAction { reason: "empty IP".to_string() });
        }

        let url = format!("{}/block", self.base_url);
        let response = self.agent.post(&url)
            .set("API-Key", &self.api_key)
            .set("Content-Type", "application/json")
            .send_string(&block_payload(ip));

        match response {
            Ok(resp) if resp.status() == 200 => Ok(()),
            Ok(resp) => Err(ActionError::HttpStatus { code: resp.status() }),
            Err(ureq::Error::Status(code, _)) => Err(ActionError::HttpStatus { code }),
            Err(e) => Err(ActionError::NetworkError { message: e.to_string() }),
        }
    }
}

/// Request body for one block call
fn block_payload(ip: &str) -> String {
    json!({ "ip": ip, "action": "block" }).to_string()
}

impl Firewall for FirewallApiClient {
    fn name(&self) -> &'static str {
        "firewall_api"
    }

    fn block(&self, ip: &str) -> bool {
        match self.request_block(ip) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Block request for {} failed: {}", ip, e);
                false
            }
        }
    }
}

// ============================================================================
// DRY RUN
// ============================================================================

/// Confirms every block without contacting anything
#[derive(Debug, Default)]
pub struct DryRunFirewall;

impl Firewall for DryRunFirewall {
    fn name(&self) -> &'static str {
        "dry_run"
    }

    fn block(&self, ip: &str) -> bool {
        log::debug!("[dry run] would block {}", ip);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dry_run_always_confirms() {
        let firewall = DryRunFirewall;
        assert!(firewall.block("203.0.113.5"));
        assert!(firewall.block("2001:db8::1"));
    }

    #[test]
    fn test_unreachable_firewall_is_not_blocked() {
        let client = FirewallApiClient::with_timeout("http://127.0.0.1:9/", "key", Duration::from_secs(1));
        assert!(matches!(
            client.request_block("198.51.100.7"),
            Err(ActionError::NetworkError { .. })
        ));
        assert!(!client.block("198.51.100.7"));
    }

    #[test]
    fn test_block_payload() {
        let body: serde_json::Value = serde_json::from_str(&block_payload("203.0.113.5")).unwrap();
        assert_eq!(body, json!({ "ip": "203.0.113.5", "action": "block" }));
    }

    #[test]
    fn test_empty_ip_rejected() {
        let client = FirewallApiClient::new("http://127.0.0.1:9", "key");
        assert!(matches!(
            client.request_block(""),
            Err(ActionError::InvalidAction { .. })
        ));
    }
}
