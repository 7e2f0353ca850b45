//! One polling run: fetch, extract, look up, reply

use crate::availability::{AvailabilityProvider, PriceQuote, ReserveOnlineProvider};
use crate::config::{Config, MailSourceKind};
use crate::env_manager::{self, Credentials};
use crate::error::MailError;
use crate::mail::{MailSource, RawEmail, SpoolSource};
use crate::notifier::{Notifier, SmtpNotifier};
use crate::parser::ExtractionPipeline;
use crate::reservation::{Language, ReservationRequest};
use crate::responder::{ReplyKind, Responder};
use anyhow::{Context, Result};
use log::{error, info, warn};
#[cfg(feature = "imap")]
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;

/// Outcome counts of one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub fetched: usize,
    pub availability: usize,
    pub partial: usize,
    pub manual_review: usize,
    pub send_failures: usize,
}

impl RunSummary {
    pub fn sent(&self) -> usize {
        self.availability + self.partial + self.manual_review
    }
}

pub struct EmailProcessor {
    source: Box<dyn MailSource>,
    pipeline: Arc<ExtractionPipeline>,
    provider: Box<dyn AvailabilityProvider>,
    notifier: Box<dyn Notifier>,
    responder: Responder,
}

impl EmailProcessor {
    pub fn new(
        source: Box<dyn MailSource>,
        pipeline: ExtractionPipeline,
        provider: Box<dyn AvailabilityProvider>,
        notifier: Box<dyn Notifier>,
        responder: Responder,
    ) -> Self {
        Self { source, pipeline: Arc::new(pipeline), provider, notifier, responder }
    }

    /// Wire the production collaborators selected by configuration
    pub fn from_config(config: &Config, credentials: Credentials) -> Result<Self> {
        let source: Box<dyn MailSource> = match config.mailbox.source {
            MailSourceKind::Spool => {
                info!("Reading inquiries from spool directory {:?}", config.mailbox.spool_dir);
                Box::new(SpoolSource::new(&config.mailbox.spool_dir))
            }
            #[cfg(feature = "imap")]
            MailSourceKind::Imap => {
                info!("Reading inquiries from {}:{}", config.mailbox.imap_host, config.mailbox.imap_port);
                Box::new(crate::mail::ImapSource::new(
                    &config.mailbox,
                    credentials.email_address.clone(),
                    SecretString::from(credentials.email_password.expose_secret().to_string()),
                ))
            }
            #[cfg(not(feature = "imap"))]
            MailSourceKind::Imap => {
                anyhow::bail!("mailbox source \"imap\" requires building with the `imap` feature")
            }
        };

        let pipeline = ExtractionPipeline::from_config(&config.extraction, env_manager::openai_api_key())
            .context("Failed to set up the extraction pipeline")?;
        let provider = ReserveOnlineProvider::new(config.booking.clone())
            .context("Failed to set up the availability provider")?;
        let notifier =
            SmtpNotifier::new(&config.smtp, &credentials.email_address, &credentials.email_password)
                .context("Failed to set up SMTP delivery")?;
        let responder = Responder::new(credentials.staff_email, config.notify.recipient);

        Ok(Self::new(source, pipeline, Box::new(provider), Box::new(notifier), responder))
    }

    /// Answer every unseen inquiry once. Only a failure to read the mailbox
    /// aborts the run.
    pub async fn run_once(&mut self) -> Result<RunSummary, MailError> {
        let emails = self.source.fetch_unseen().await?;
        let mut summary = RunSummary { fetched: emails.len(), ..Default::default() };
        if emails.is_empty() {
            info!("No new messages found");
            return Ok(summary);
        }

        for email in emails {
            info!("Processing message {} from {:?}", email.id, email.sender);
            let record = self.extract(&email).await;
            let quotes = self.lookup(&record).await;
            let reply = self.responder.compose(&email, &record, &quotes);

            match self.notifier.send(&reply).await {
                Ok(()) => {
                    match ReplyKind::select(&record, &quotes) {
                        ReplyKind::Availability => summary.availability += 1,
                        ReplyKind::Partial => summary.partial += 1,
                        ReplyKind::ManualReview => summary.manual_review += 1,
                    }
                    if let Err(err) = self.source.mark_processed(&email).await {
                        warn!("Could not mark message {} as processed: {}", email.id, err);
                    }
                }
                Err(err) => {
                    error!("Failed to send reply for message {} to {}: {}", email.id, reply.to, err);
                    summary.send_failures += 1;
                }
            }
            info!("Finished processing message {}", email.id);
        }

        info!(
            "Run complete: {} fetched, {} answered, {} send failure(s)",
            summary.fetched,
            summary.sent(),
            summary.send_failures
        );
        Ok(summary)
    }

    async fn extract(&self, email: &RawEmail) -> ReservationRequest {
        if let Some(reason) = &email.decode_error {
            warn!("Message {} could not be decoded, sending to manual review", email.id);
            let mut record = ReservationRequest::empty(Language::English);
            record.error = Some(format!("could not decode message: {reason}"));
            return record;
        }
        let pipeline = Arc::clone(&self.pipeline);
        let body = email.body.clone();
        match tokio::task::spawn_blocking(move || pipeline.run(&body)).await {
            Ok(record) => record,
            Err(err) => {
                error!("Extraction task for message {} failed: {}", email.id, err);
                let mut record = ReservationRequest::empty(Language::English);
                record.error = Some(format!("extraction failed: {err}"));
                record
            }
        }
    }

    /// Empty when the stay is unusable or the provider failed
    async fn lookup(&self, record: &ReservationRequest) -> Vec<PriceQuote> {
        let Some((check_in, check_out)) = record.stay() else {
            warn!("Failed to parse reservation dates, sending to manual review");
            return Vec::new();
        };

        info!("Reservation dates found, checking availability");
        match self.provider.query(check_in, check_out, record.adults, record.children).await {
            Ok(quotes) => quotes,
            Err(err) => {
                error!("Availability lookup failed: {}", err);
                Vec::new()
            }
        }
    }
}
