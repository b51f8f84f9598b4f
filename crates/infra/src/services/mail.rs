use crate::config::SmtpConfig;
use anyhow::{anyhow, Context};
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use std::time::Duration;
use tracing::info;

/// How long a single smtp send may take before it is aborted, so that a
/// hung transport cannot starve a whole reminder pass
const SMTP_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct ReminderEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Outgoing email transport. The real implementation talks smtp, the
/// stub just logs, which keeps the service operable and testable when no
/// smtp credentials are configured.
#[async_trait::async_trait]
pub trait IMailer: Send + Sync {
    async fn send(&self, email: ReminderEmail) -> anyhow::Result<()>;
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig, from_address: &str) -> anyhow::Result<Self> {
        let from = from_address
            .parse::<Mailbox>()
            .map_err(|e| anyhow!("Invalid smtp from address: {}", e))?;

        let credentials = Credentials::new(config.username.clone(), config.password.clone());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .context("Unable to create smtp transport")?
            .port(config.port)
            .credentials(credentials)
            .timeout(Some(SMTP_TIMEOUT))
            .build();

        Ok(Self { transport, from })
    }
}

#[async_trait::async_trait]
impl IMailer for SmtpMailer {
    async fn send(&self, email: ReminderEmail) -> anyhow::Result<()> {
        let to = email
            .to
            .parse::<Mailbox>()
            .map_err(|e| anyhow!("Invalid recipient address: {}", e))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(email.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(email.body)
            .context("Unable to build email")?;

        self.transport
            .send(message)
            .await
            .context("Smtp send failed")?;

        Ok(())
    }
}

/// Log-only mail sink used when smtp is not configured
pub struct StubMailer;

#[async_trait::async_trait]
impl IMailer for StubMailer {
    async fn send(&self, email: ReminderEmail) -> anyhow::Result<()> {
        info!(
            to = %email.to,
            subject = %email.subject,
            "Smtp is not configured, logging email instead of sending it"
        );
        Ok(())
    }
}
