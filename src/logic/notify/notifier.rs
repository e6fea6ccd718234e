//! Notifier adapters
//!
//! - `MailRelayNotifier`: JSON POST to an HTTP mail relay
//! - `LogNotifier`: writes the message to the log when live notification is off

use std::time::Duration;

use serde_json::json;

use crate::config::MailRelaySettings;
use crate::constants::MAIL_RELAY_TIMEOUT_SECS;
use crate::logic::response::ActionError;

/// Delivers one plain-text message
pub trait Notifier {
    fn name(&self) -> &'static str;

    /// Whether a successful `send` reaches the recipient
    fn delivers(&self) -> bool {
        true
    }

    fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), ActionError>;
}

// ============================================================================
// MAIL RELAY
// ============================================================================

pub struct MailRelayNotifier {
    url: String,
    token: String,
    from: String,
    agent: ureq::Agent,
}

impl MailRelayNotifier {
    pub fn new(settings: &MailRelaySettings) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(MAIL_RELAY_TIMEOUT_SECS))
            .build();

        Self {
            url: settings.url.clone(),
            token: settings.token.clone(),
            from: settings.from.clone(),
            agent,
        }
    }
}

impl Notifier for MailRelayNotifier {
    fn name(&self) -> &'static str {
        "mail_relay"
    }

    fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), ActionError> {
        if to.is_empty() {
            return Err(ActionError::InvalidAction { reason: "empty recipient".to_string() });
        }

        let payload = relay_payload(&self.from, to, subject, body);

        let response = self.agent.post(&self.url)
            .set("Authorization", &format!("Bearer {}", self.token))
            .set("Content-Type", "application/json")
            .send_string(&payload);

        match response {
            Ok(resp) => {
                log::info!("Notification sent to {} ({})", to, resp.status());
                Ok(())
            }
            Err(ureq::Error::Status(code, _)) => Err(ActionError::HttpStatus { code }),
            Err(e) => Err(ActionError::NetworkError { message: e.to_string() }),
        }
    }
}

/// JSON body accepted by the relay
fn relay_payload(from: &str, to: &str, subject: &str, body: &str) -> String {
    json!({
        "from": from,
        "to": to,
        "subject": subject,
        "text": body,
    })
    .to_string()
}

// ============================================================================
// LOG ONLY
// ============================================================================

/// Writes the message to the log. Nothing leaves the host, so a run using
/// it never counts the notification as sent.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn name(&self) -> &'static str {
        "log"
    }

    fn delivers(&self) -> bool {
        false
    }

    fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), ActionError> {
        log::info!("Notification for {}: {}", to, subject);
        for line in body.lines() {
            log::info!("  {}", line);
        }
        Ok(())
    }
}
