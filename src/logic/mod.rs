//! Logic Module - Pipeline & Engines
//!
//! Every stage of the incident-response run lives here.
//!
//! ## Stage order
//! - `activity/` - Suricata log loading, dedup, suspicious IP detection
//! - `external_intel/` - threat verdict per suspicious IP
//! - `policy/` - block decision per IP
//! - `response/` - firewall blocking
//! - `notify/` - run summary notification
//! - `report/` - per-IP report joined across stages
//! - `visualize/` - top-N chart
//!
//! `pipeline/` holds the engine and the shared run context.

use std::collections::BTreeMap;

pub mod pipeline;
pub mod activity;
pub mod external_intel;
pub mod policy;
pub mod response;
pub mod notify;
pub mod report;
pub mod visualize;

/// Per-IP map used by every stage output.
///
/// Ordered so logs, reports and charts come out the same on every run.
pub type IpMap<T> = BTreeMap<String, T>;
