//! Error types shared across the crate
//!
//! Extraction errors never leave the pipeline: a `DateParseError` drops the
//! field, an `AssemblyError` turns the record into an unparsed one. The
//! collaborator errors are surfaced to the processor, which picks the
//! matching fallback response.

use chrono::NaiveDate;

/// A date fragment that no normalizer form could resolve
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unable to parse date: '{0}'")]
pub struct DateParseError(pub String);

/// Validation failure while assembling a reservation record
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssemblyError {
    #[error("Check-out {check_out} is not after check-in {check_in}")]
    InvalidDateRange { check_in: NaiveDate, check_out: NaiveDate },
}

/// Mailbox access failures
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Mailbox connection failed: {0}")]
    Connection(String),
    #[error("Mailbox login failed: {0}")]
    Authentication(String),
    #[error("Could not decode message {uid}: {reason}")]
    Decode { uid: String, reason: String },
    #[error("Spool I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Outbound delivery failures
#[derive(Debug, thiserror::Error)]
pub enum SendError {
    #[error("Invalid address '{0}'")]
    Address(String),
    #[error("Could not build message: {0}")]
    Compose(String),
    #[error("SMTP delivery failed: {0}")]
    Transport(String),
}

/// Availability lookup failures
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("Booking request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Booking site answered with status {0}")]
    Status(u16),
    #[error("Invalid booking URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("Invalid stay: {0}")]
    InvalidStay(String),
}

/// Text standardizer (language model) failures
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("OPENAI_API_KEY environment variable not set")]
    MissingApiKey,
    #[error("Model request failed: {0}")]
    Request(String),
    #[error("Model API error: {0}")]
    Status(u16),
    #[error("Invalid model response format")]
    InvalidResponse,
}
