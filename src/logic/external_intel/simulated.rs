//! Offline intel sources
//!
//! - `SimulatedIntel`: random verdict per IP, for exercising the pipeline
//!   without network access
//! - `StaticIntel`: fixed verdict table, e.g. a local blocklist

use std::collections::HashMap;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::source::ThreatIntel;
use super::types::ThreatVerdict;

// ============================================================================
// SIMULATED
// ============================================================================

pub struct SimulatedIntel {
    malicious_probability: f64,
    rng: Mutex<StdRng>,
}

impl SimulatedIntel {
    /// `seed = None` draws from OS entropy
    pub fn new(malicious_probability: f64, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let malicious_probability = if malicious_probability.is_nan() {
            0.0
        } else {
            malicious_probability.clamp(0.0, 1.0)
        };

        Self {
            malicious_probability,
            rng: Mutex::new(rng),
        }
    }

    pub fn malicious_probability(&self) -> f64 {
        self.malicious_probability
    }
}

impl ThreatIntel for SimulatedIntel {
    fn name(&self) -> &'static str {
        "simulated"
    }

    fn lookup(&self, _ip: &str) -> ThreatVerdict {
        if self.rng.lock().gen_bool(self.malicious_probability) {
            ThreatVerdict::Malicious
        } else {
            ThreatVerdict::Clean
        }
    }
}

// ============================================================================
// STATIC TABLE
// ============================================================================

pub struct StaticIntel {
    verdicts: HashMap<String, ThreatVerdict>,
    fallback: ThreatVerdict,
}

impl StaticIntel {
    /// IPs not in the table get `fallback`
    pub fn new(fallback: ThreatVerdict) -> Self {
        Self {
            verdicts: HashMap::new(),
            fallback,
        }
    }

    pub fn with_verdict(mut self, ip: &str, verdict: ThreatVerdict) -> Self {
        self.verdicts.insert(ip.to_string(), verdict);
        self
    }

    /// Every listed IP is malicious, everything else clean
    pub fn blocklist<'a>(ips: impl IntoIterator<Item = &'a str>) -> Self {
        ips.into_iter().fold(Self::new(ThreatVerdict::Clean), |intel, ip| {
            intel.with_verdict(ip, ThreatVerdict::Malicious)
        })
    }
}

impl ThreatIntel for StaticIntel {
    fn name(&self) -> &'static str {
        "static"
    }

    fn lookup(&self, ip: &str) -> ThreatVerdict {
        self.verdicts.get(ip).copied().unwrap_or(self.fallback)
    }
}

// ============================================================================
// TESTS
// ============================================================================
