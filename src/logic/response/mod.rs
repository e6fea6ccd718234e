//! Response Module - IP Blocking
//!
//! ## Structure
//! - `types`: ActionError, BlockTally
//! - `firewall`: `Firewall` trait, control-plane client, dry run
//! - `stage`: pipeline stage

pub mod types;
pub mod firewall;
pub mod stage;


pub use types::{ActionError, BlockTally};
pub use firewall::{DryRunFirewall, Firewall, FirewallApiClient};
pub use stage::FirewallBanStage;
