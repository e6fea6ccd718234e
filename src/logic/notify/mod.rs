//! Notify Module - Run Summary Notification
//!
//! # Components
//! - `summary.rs`: BlockSummary, subject and body text
//! - `notifier.rs`: `Notifier` trait, mail relay, log-only
//! - `stage.rs`: pipeline stage

pub mod summary;
pub mod notifier;
pub mod stage;

#[cfg(test)]
mod tests;

pub use summary::BlockSummary;
pub use notifier::{LogNotifier, MailRelayNotifier, Notifier};
pub use stage::NotifyStage;
