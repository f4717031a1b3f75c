//! Background alert queue.

use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;

use crate::alert::{AlertMailer, SecurityAlert};

/// Handle for enqueueing security alerts.
///
/// Cloning is cheap; every clone feeds the same worker. The worker exits
/// once all handles are dropped and the queue drains.
#[derive(Debug, Clone)]
pub struct AlertDispatcher {
    queue: mpsc::Sender<SecurityAlert>,
}

impl AlertDispatcher {
    /// Start the delivery worker on the current tokio runtime.
    pub fn spawn<M>(mailer: M, capacity: usize) -> (Self, JoinHandle<()>)
    where
        M: AlertMailer + 'static,
    {
        let (queue, mut pending) = mpsc::channel::<SecurityAlert>(capacity.max(1));

        let worker = tokio::spawn(async move {
            while let Some(alert) = pending.recv().await {
                match mailer.deliver(&alert).await {
                    Ok(()) => tracing::info!(
                        recipient = %alert.recipient,
                        raised_at = %alert.raised_at,
                        "Alert email sent successfully"
                    ),
                    Err(e) => tracing::error!(
                        recipient = %alert.recipient,
                        error = %e,
                        "Alert email sending failed"
                    ),
                }
            }
            tracing::debug!("Alert queue closed, worker stopping");
        });

        (Self { queue }, worker)
    }

    /// Queue an alert for delivery without waiting.
    ///
    /// Never blocks and never fails the caller: a full or closed queue
    /// drops the alert with a warning.
    pub fn send_security_alert(&self, recipient: &str, message: &str) {
        match self.queue.try_send(SecurityAlert::new(recipient, message)) {
            Ok(()) => tracing::debug!(recipient = %recipient, "Alert queued"),
            Err(TrySendError::Full(alert)) => tracing::warn!(
                recipient = %alert.recipient,
                "Alert queue full, dropping alert"
            ),
            Err(TrySendError::Closed(alert)) => tracing::warn!(
                recipient = %alert.recipient,
                "Alert worker stopped, dropping alert"
            ),
        }
    }
}
