//! SMTP email notifier.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::fmt;
use std::time::Duration;
use tracker_core::error::NotifyError;
use tracker_core::traits::Notifier;
use tracker_core::types::{Price, ProductRef};
use tracing::{debug, info};

use crate::message::{alert_body, alert_subject};

/// SMTP delivery settings.
#[derive(Clone)]
pub struct EmailConfig {
    pub smtp_server: String,
    pub smtp_port: u16,
    /// Sender address, also used as the SMTP login
    pub sender: String,
    pub receiver: String,
    pub password: String,
    pub timeout: Duration,
}

impl fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailConfig")
            .field("smtp_server", &self.smtp_server)
            .field("smtp_port", &self.smtp_port)
            .field("sender", &self.sender)
            .field("receiver", &self.receiver)
            .field("password", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Sends price drop alerts over SMTP with STARTTLS.
pub struct EmailNotifier {
    from: Mailbox,
    to: Mailbox,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl EmailNotifier {
    /// Create a notifier. No connection is made until the first alert.
    pub fn new(config: EmailConfig) -> Result<Self, NotifyError> {
        let from: Mailbox = config
            .sender
            .parse()
            .map_err(|e| NotifyError::Message(format!("sender {:?}: {}", config.sender, e)))?;
        let to: Mailbox = config
            .receiver
            .parse()
            .map_err(|e| NotifyError::Message(format!("receiver {:?}: {}", config.receiver, e)))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_server)
            .map_err(|e| NotifyError::Transport(e.to_string()))?
            .port(config.smtp_port)
            .credentials(Credentials::new(config.sender.clone(), config.password.clone()))
            .timeout(Some(config.timeout))
            .build();

        Ok(Self { from, to, transport })
    }

    /// Compose the alert email.
    pub fn build_message(&self, price: Price, product: &ProductRef) -> Result<Message, NotifyError> {
        Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(alert_subject(price))
            .header(ContentType::TEXT_PLAIN)
            .body(alert_body(price, product))
            .map_err(|e| NotifyError::Message(e.to_string()))
    }
}

fn map_smtp_error(err: lettre::transport::smtp::Error) -> NotifyError {
    // 530/534/535: authentication required, mechanism too weak, credentials rejected
    let auth_failure = err
        .status()
        .map(|code| code.to_string().starts_with("53"))
        .unwrap_or(false);

    if auth_failure {
        NotifyError::Authentication(err.to_string())
    } else {
        NotifyError::Transport(err.to_string())
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn notify(&self, price: Price, product: &ProductRef) -> Result<(), NotifyError> {
        let message = self.build_message(price, product)?;

        debug!(to = %self.to, "Sending price drop email");
        self.transport.send(message).await.map_err(map_smtp_error)?;

        info!("Price drop email sent! New price: ${}", price);
        Ok(())
    }

    fn name(&self) -> &str {
        "email"
    }
}
