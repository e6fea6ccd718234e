//! External Intelligence Types

use serde::{Deserialize, Serialize};

// ============================================================================
// VERDICT
// ============================================================================

/// Reputation verdict for one IP
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreatVerdict {
    Malicious,
    Clean,
    /// Lookup failed; treated as not malicious downstream
    Unknown,
}

impl ThreatVerdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThreatVerdict::Malicious => "malicious",
            ThreatVerdict::Clean => "clean",
            ThreatVerdict::Unknown => "unknown",
        }
    }

    pub fn is_malicious(&self) -> bool {
        matches!(self, ThreatVerdict::Malicious)
    }
}

impl std::fmt::Display for ThreatVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// VIRUSTOTAL TYPES
// ============================================================================

/// Kết quả tra cứu IP từ VirusTotal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VTIpResult {
    pub ip: String,

    /// Số engine phát hiện là malicious
    pub malicious: u32,
    /// Số engine phát hiện là suspicious
    pub suspicious: u32,
    pub harmless: u32,
    pub undetected: u32,

    /// Community reputation score
    pub reputation: Option<i64>,
    pub country: Option<String>,
    pub as_owner: Option<String>,
}

impl VTIpResult {
    /// Any malicious or suspicious detection flags the IP
    pub fn verdict(&self) -> ThreatVerdict {
        if self.malicious > 0 || self.suspicious > 0 {
            ThreatVerdict::Malicious
        } else {
            ThreatVerdict::Clean
        }
    }

    pub fn total_engines(&self) -> u32 {
        self.malicious + self.suspicious + self.harmless + self.undetected
    }
}

/// Lookup error types
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum IntelError {
    /// API key không hợp lệ
    InvalidApiKey,
    /// Rate limit exceeded
    RateLimited { retry_after: u64 },
    /// IP không tìm thấy trên VT
    NotFound,
    /// Non-success status other than the above
    HttpStatus { code: u16 },
    /// Network error
    NetworkError { message: String },
    /// Parse error
    ParseError { message: String },
}

impl std::fmt::Display for IntelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntelError::InvalidApiKey => write!(f, "Invalid VirusTotal API key"),
            IntelError::RateLimited { retry_after } =>
                write!(f, "Rate limited, retry after {} seconds", retry_after),
            IntelError::NotFound => write!(f, "IP not found on VirusTotal"),
            IntelError::HttpStatus { code } => write!(f, "Unexpected HTTP status {}", code),
            IntelError::NetworkError { message } => write!(f, "Network error: {}", message),
            IntelError::ParseError { message } => write!(f, "Parse error: {}", message),
        }
    }
}

impl std::error::Error for IntelError {}

// ============================================================================
// API RESPONSE TYPES (for parsing VT API)
// ============================================================================

/// `GET /ip_addresses/{ip}` response
#[derive(Debug, Deserialize)]
pub struct VTApiResponse {
    pub data: VTApiData,
}

#[derive(Debug, Deserialize)]
pub struct VTApiData {
    pub id: String,
    #[serde(rename = "type")]
    pub data_type: String,
    pub attributes: VTApiAttributes,
}

#[derive(Debug, Deserialize)]
pub struct VTApiAttributes {
    pub last_analysis_stats: Option<VTApiStats>,
    pub reputation: Option<i64>,
    pub country: Option<String>,
    pub as_owner: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct VTApiStats {
    #[serde(default)]
    pub malicious: u32,
    #[serde(default)]
    pub suspicious: u32,
    #[serde(default)]
    pub undetected: u32,
    #[serde(default)]
    pub harmless: u32,
    #[serde(default)]
    pub timeout: u32,
}
