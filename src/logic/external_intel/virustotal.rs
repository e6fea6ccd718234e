//! VirusTotal Integration Module
//!
//! Mục đích: Query VirusTotal API để kiểm tra reputation của IP
//!
//! Features:
//! - IP address lookup (`/ip_addresses/{ip}`)
//! - Fixed minimum spacing between requests (free tier: 4 req/min)
//! - Every failure maps to `ThreatVerdict::Unknown`

use std::thread;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use super::source::ThreatIntel;
use super::types::{IntelError, ThreatVerdict, VTApiResponse, VTIpResult};
use crate::constants::{DEFAULT_VIRUSTOTAL_REQUEST_INTERVAL_SECS, VIRUSTOTAL_API_BASE, VIRUSTOTAL_TIMEOUT_SECS};

// ============================================================================
// VT CLIENT
// ============================================================================

pub struct VTClient {
    api_key: String,
    base_url: String,
    agent: ureq::Agent,
    request_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl VTClient {
    pub fn new(api_key: &str) -> Self {
        Self::with_options(
            api_key,
            VIRUSTOTAL_API_BASE,
            Duration::from_secs(DEFAULT_VIRUSTOTAL_REQUEST_INTERVAL_SECS),
        )
    }

    pub fn with_options(api_key: &str, base_url: &str, request_interval: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(VIRUSTOTAL_TIMEOUT_SECS))
            .build();

        Self {
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            agent,
            request_interval,
            last_request: Mutex::new(None),
        }
    }

    /// Block until `request_interval` has passed since the previous call
    fn wait_for_slot(&self) {
        let last = *self.last_request.lock();
        if let Some(last) = last {
            let elapsed = last.elapsed();
            if elapsed < self.request_interval {
                let wait = self.request_interval - elapsed;
                log::debug!("VirusTotal rate limit: waiting {} ms", wait.as_millis());
                thread::sleep(wait);
            }
        }
    }

    /// Query VT API for an IP (blocking)
    pub fn check_ip(&self, ip: &str) -> Result<VTIpResult, IntelError> {
        self.wait_for_slot();

        let url = format!("{}/ip_addresses/{}", self.base_url, ip);
        let response = self.agent.get(&url)
            .set("x-apikey", &self.api_key)
            .call();

        *self.last_request.lock() = Some(Instant::now());

        match response {
            Ok(resp) => {
                let body = resp.into_string()
                    .map_err(|e| IntelError::ParseError { message: e.to_string() })?;

                let api_response: VTApiResponse = serde_json::from_str(&body)
                    .map_err(|e| IntelError::ParseError { message: e.to_string() })?;

                Ok(parse_api_response(ip, api_response))
            }
            Err(ureq::Error::Status(401, _)) => Err(IntelError::InvalidApiKey),
            Err(ureq::Error::Status(429, _)) => Err(IntelError::RateLimited { retry_after: 60 }),
            Err(ureq::Error::Status(404, _)) => Err(IntelError::NotFound),
            Err(ureq::Error::Status(code, _)) => Err(IntelError::HttpStatus { code }),
            Err(e) => Err(IntelError::NetworkError { message: e.to_string() }),
        }
    }
}

impl ThreatIntel for VTClient {
    fn name(&self) -> &'static str {
        "virustotal"
    }

    fn lookup(&self, ip: &str) -> ThreatVerdict {
        match self.check_ip(ip) {
            Ok(result) => {
                log::debug!(
                    "VT {}: {}/{} engines flagged (malicious {}, suspicious {})",
                    ip,
                    result.malicious + result.suspicious,
                    result.total_engines(),
                    result.malicious,
                    result.suspicious
                );
                result.verdict()
            }
            Err(e) => {
                log::warn!("VirusTotal lookup for {} failed: {}", ip, e);
                ThreatVerdict::Unknown
            }
        }
    }
}

// ============================================================================
// PARSE RESPONSE
// ============================================================================

fn parse_api_response(ip: &str, resp: VTApiResponse) -> VTIpResult {
    let attrs = resp.data.attributes;
    let stats = attrs.last_analysis_stats.unwrap_or_default();

    VTIpResult {
        ip: ip.to_string(),
        malicious: stats.malicious,
        suspicious: stats.suspicious,
        harmless: stats.harmless,
        undetected: stats.undetected,
        reputation: attrs.reputation,
        country: attrs.country,
        as_owner: attrs.as_owner,
    }
}

// ============================================================================
// TESTS
// ============================================================================
