//! Inbound mail: where unseen inquiries come from

#[cfg(feature = "imap")]
pub mod imap;
pub mod spool;

#[cfg(feature = "imap")]
pub use self::imap::ImapSource;
pub use spool::SpoolSource;

use crate::error::MailError;
use async_trait::async_trait;
use mail_parser::MessageParser;

/// A decoded inquiry, before extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEmail {
    /// Source-specific identifier (IMAP UID, spool file name)
    pub id: String,
    pub sender: Option<String>,
    pub subject: Option<String>,
    pub body: String,
    /// Set when the message could not be decoded; `body` then holds the raw
    /// bytes as lossy UTF-8 and the email goes to manual review
    pub decode_error: Option<String>,
}

impl RawEmail {
    /// Placeholder for a message that failed to decode
    pub fn undecodable(id: &str, data: &[u8], err: &MailError) -> Self {
        Self {
            id: id.to_string(),
            sender: None,
            subject: None,
            body: String::from_utf8_lossy(data).into_owned(),
            decode_error: Some(err.to_string()),
        }
    }
}

#[async_trait]
pub trait MailSource: Send {
    /// Every message not handled yet, oldest first
    async fn fetch_unseen(&mut self) -> Result<Vec<RawEmail>, MailError>;

    /// Record that a message was answered. Sources that flag messages while
    /// fetching need nothing here.
    async fn mark_processed(&mut self, _email: &RawEmail) -> Result<(), MailError> {
        Ok(())
    }
}

/// Decode an RFC 822 message: first text part (HTML is converted to text)
/// and the first From address
pub fn decode_message(id: &str, data: &[u8]) -> Result<RawEmail, MailError> {
    let message = MessageParser::default().parse(data).ok_or_else(|| MailError::Decode {
        uid: id.to_string(),
        reason: format!("not a MIME message ({} bytes)", data.len()),
    })?;

    let body = message.body_text(0).map(|s| s.to_string()).unwrap_or_default();
    let sender = message
        .from()
        .and_then(|from| from.first())
        .and_then(|addr| addr.address())
        .map(|s| s.to_string());
    let subject = message.subject().map(|s| s.to_string());

    Ok(RawEmail { id: id.to_string(), sender, subject, body, decode_error: None })
}
