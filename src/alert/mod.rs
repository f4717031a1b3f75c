//! Security alert mail.
//!
//! Alerts are fire-and-forget: callers enqueue a [`SecurityAlert`] with the
//! [`AlertDispatcher`], and a background worker hands it to an
//! [`AlertMailer`]. Delivery outcomes are only logged.

mod dispatcher;
mod mailer;

pub use dispatcher::*;
pub use mailer::*;

use chrono::{DateTime, Utc};

/// A single alert waiting for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityAlert {
    /// Destination mailbox.
    pub recipient: String,
    /// Plain-text body.
    pub message: String,
    /// When the alert was raised.
    pub raised_at: DateTime<Utc>,
}

impl SecurityAlert {
    pub fn new(recipient: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            message: message.into(),
            raised_at: Utc::now(),
        }
    }
}

/// Sends an alert for every suspicious link `/check` sees.
///
/// Only built when `mail.alert_on_suspicious` is set together with a
/// recipient.
#[derive(Debug, Clone)]
pub struct SuspiciousLinkAlerts {
    dispatcher: AlertDispatcher,
    recipient: String,
}

impl SuspiciousLinkAlerts {
    pub fn new(dispatcher: AlertDispatcher, recipient: impl Into<String>) -> Self {
        Self {
            dispatcher,
            recipient: recipient.into(),
        }
    }

    pub fn notify(&self, url: &str) {
        self.dispatcher.send_security_alert(
            &self.recipient,
            &format!("Suspicious link detected: {url}"),
        );
    }
}
