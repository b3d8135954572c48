//! SMTP notification channel (async lettre, STARTTLS).

use async_trait::async_trait;
use gisource_core::config::SmtpConfig;
use gisource_core::error::{GisourceError, Result};
use gisource_core::traits::Mailer;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// SMTP mailer for notification emails.
pub struct SmtpMailer {
    config: SmtpConfig,
}

impl SmtpMailer {
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, to_email: &str, to_name: &str, subject: &str, body: &str) -> Result<()> {
        let from_mailbox: Mailbox = self
            .config
            .username
            .parse()
            .map_err(|e| GisourceError::Mail(format!("Invalid from address: {e}")))?;
        let to_mailbox: Mailbox = to_email
            .parse()
            .map_err(|e| GisourceError::Mail(format!("Invalid to address: {e}")))?;

        let email = Message::builder()
            .from(from_mailbox)
            .to(to_mailbox)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| GisourceError::Mail(format!("Build email: {e}")))?;

        let creds = Credentials::new(self.config.username.clone(), self.config.password.clone());
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.host)
            .map_err(|e| GisourceError::Mail(format!("SMTP relay: {e}")))?
            .port(self.config.port)
            .credentials(creds)
            .build();

        mailer
            .send(email)
            .await
            .map_err(|e| GisourceError::Mail(format!("SMTP send: {e}")))?;

        tracing::info!("📤 Email sent to {to_name} ({to_email})");
        Ok(())
    }
}
