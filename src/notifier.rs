//! Outbound replies over SMTP

use crate::config::SmtpConfig;
use crate::error::SendError;
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use log::{debug, info};
use secrecy::{ExposeSecret, SecretString};

pub const ORIGINAL_MARKER: &str = "--- Original Message ---";

/// One composed reply, ready to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
    /// Raw inquiry body, attached after the reply text
    pub original: Option<String>,
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, message: &OutboundMessage) -> Result<(), SendError>;
}

/// Implicit-TLS SMTP delivery
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpNotifier {
    pub fn new(config: &SmtpConfig, address: &str, password: &SecretString) -> Result<Self, SendError> {
        let from = format!("{} <{}>", config.from_name, address)
            .parse::<Mailbox>()
            .map_err(|e| SendError::Address(format!("{address}: {e}")))?;

        let credentials = Credentials::new(address.to_string(), password.expose_secret().to_string());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
            .map_err(|e| SendError::Transport(format!("SMTP relay {} failed: {e}", config.host)))?
            .port(config.port)
            .credentials(credentials)
            .build();

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send(&self, message: &OutboundMessage) -> Result<(), SendError> {
        let email = compose_message(&self.from, message)?;
        self.transport
            .send(email)
            .await
            .map_err(|e| SendError::Transport(e.to_string()))?;
        info!("Email sent successfully to {}", message.to);
        Ok(())
    }
}

/// Build the MIME message: reply text first, then the original inquiry
pub fn compose_message(from: &Mailbox, message: &OutboundMessage) -> Result<Message, SendError> {
    let to = message
        .to
        .parse::<Mailbox>()
        .map_err(|e| SendError::Address(format!("{}: {e}", message.to)))?;

    let builder = Message::builder().from(from.clone()).to(to).subject(message.subject.clone());
    let email = match &message.original {
        Some(original) => builder.multipart(
            MultiPart::mixed()
                .singlepart(SinglePart::plain(message.body.clone()))
                .singlepart(SinglePart::plain(format!("{ORIGINAL_MARKER}\n\n{original}"))),
        ),
        None => builder.header(ContentType::TEXT_PLAIN).body(message.body.clone()),
    }
    .map_err(|e| SendError::Compose(e.to_string()))?;

    debug!("Composed message '{}' for {}", message.subject, message.to);
    Ok(email)
}
