//! External Intelligence Module - Threat Intelligence Integration
//!
//! Mục đích: Kiểm tra reputation của các IP nghi ngờ qua nguồn bên ngoài
//!
//! # Components
//! - `source.rs`: `ThreatIntel` contract
//! - `virustotal.rs`: VirusTotal API integration
//! - `simulated.rs`: offline sources (random, static table)
//! - `stage.rs`: pipeline stage

pub mod types;
pub mod source;
pub mod virustotal;
pub mod simulated;
pub mod stage;

#[cfg(test)]
mod tests;

pub use types::{IntelError, ThreatVerdict, VTIpResult};
pub use source::ThreatIntel;
pub use virustotal::VTClient;
pub use simulated::{SimulatedIntel, StaticIntel};
pub use stage::ThreatIntelStage;
