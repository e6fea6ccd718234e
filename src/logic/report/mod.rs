//! Report Module
//!
//! Ghép kết quả của các stage theo IP thành một báo cáo JSON.
//!
//! # Components
//! - `types.rs`: IpReport, Report
//! - `assembler.rs`: outer join on IP
//! - `writer.rs`: JSON persistence
//! - `stage.rs`: pipeline stage

pub mod types;
pub mod assembler;
pub mod writer;
pub mod stage;

#[cfg(test)]
mod tests;

pub use types::{IpReport, Report};
pub use assembler::{assemble, ReportSources};
pub use writer::{write_report, ReportError};
pub use stage::ReportStage;
