//! Alert delivery over SMTP.

use std::future::Future;
use std::time::Duration;

use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::alert::SecurityAlert;
use crate::config::MailConfig;
use crate::error::{RakshaError, RakshaResult};

/// Trait for alert delivery backends.
pub trait AlertMailer: Send + Sync {
    /// Deliver one alert. Called from the dispatcher worker only.
    fn deliver(&self, alert: &SecurityAlert) -> impl Future<Output = RakshaResult<()>> + Send;
}

/// SMTP relay mailer using implicit TLS and configured credentials.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
    subject: String,
}

impl SmtpMailer {
    /// Build the relay transport from configuration.
    ///
    /// Fails when credentials are missing or the sender does not parse;
    /// no connection is attempted until the first delivery.
    pub fn from_config(config: &MailConfig) -> RakshaResult<Self> {
        if config.username.is_empty() || config.password.is_empty() {
            return Err(RakshaError::MailSetup(
                "mail.username and mail.password are required when mail is enabled".to_string(),
            ));
        }

        let sender: Mailbox = config.sender.parse()?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.relay)?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .timeout(Some(Duration::from_secs(config.timeout_secs)))
            .build();

        Ok(Self {
            transport,
            sender,
            subject: config.subject.clone(),
        })
    }

    fn compose(&self, alert: &SecurityAlert) -> RakshaResult<Message> {
        let recipient: Mailbox = alert.recipient.parse()?;

        let message = Message::builder()
            .from(self.sender.clone())
            .to(recipient)
            .subject(self.subject.clone())
            .date(alert.raised_at.into())
            .header(ContentType::TEXT_PLAIN)
            .body(alert.message.clone())?;

        Ok(message)
    }
}

impl AlertMailer for SmtpMailer {
    async fn deliver(&self, alert: &SecurityAlert) -> RakshaResult<()> {
        let message = self.compose(alert)?;
        self.transport.send(message).await?;
        Ok(())
    }
}
