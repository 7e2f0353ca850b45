/// Reservation extraction pipeline
///
/// Body cleaning, language routing, the per-language strategy cascade, date
/// normalization and record assembly.
pub mod assembler;
pub mod dates;
pub mod extractor;
pub mod fields;
pub mod language;
pub mod standardizer;
pub mod strategies;
pub mod tables;
pub mod traits;
pub mod utils;

pub use assembler::ReservationAssembler;
pub use dates::DateNormalizer;
pub use extractor::CascadeExtractor;
pub use fields::{Field, RawFields};
pub use language::LanguageRouter;
pub use standardizer::{OpenAiStandardizer, StandardizingExtractor, TextStandardizer};
pub use traits::{FieldExtractor, Strategy};

use crate::config::{ExtractionConfig, StandardizerKind};
use crate::reservation::ReservationRequest;
use anyhow::Result;
use chrono::{Local, NaiveDate};
use log::{debug, info};
use secrecy::SecretString;

/// Email body in, reservation record out. Never fails: anything that cannot
/// be read degrades to an absent field.
pub struct ExtractionPipeline {
    router: LanguageRouter,
    extractor: Box<dyn FieldExtractor>,
    reference: Option<NaiveDate>,
}

impl Default for ExtractionPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractionPipeline {
    /// Regex cascade, dates resolved against the wall-clock date
    pub fn new() -> Self {
        Self { router: LanguageRouter::new(), extractor: Box::new(CascadeExtractor::new()), reference: None }
    }

    /// Build the pipeline selected by configuration
    pub fn from_config(config: &ExtractionConfig, api_key: Option<SecretString>) -> Result<Self> {
        let pipeline = Self::new();
        match config.standardizer {
            StandardizerKind::None => Ok(pipeline),
            StandardizerKind::OpenAI => {
                info!("Using {} to standardize inquiry text", config.model);
                let standardizer = OpenAiStandardizer::new(config, api_key)?;
                let extractor = StandardizingExtractor::new(Box::new(standardizer), CascadeExtractor::new());
                Ok(pipeline.with_extractor(Box::new(extractor)))
            }
        }
    }

    /// Fix "today" instead of reading the clock
    pub fn with_reference_date(mut self, reference: NaiveDate) -> Self {
        self.reference = Some(reference);
        self
    }

    pub fn with_extractor(mut self, extractor: Box<dyn FieldExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn run(&self, email_text: &str) -> ReservationRequest {
        let reference = self.reference.unwrap_or_else(|| Local::now().date_naive());
        let cleaned = utils::clean_email_body(email_text);
        let language = self.router.detect(&cleaned);
        info!("Detected language: {}", language);

        let raw = self.extractor.extract_body(&cleaned, language);
        debug!("Extracted raw fields: {:?}", raw);

        let record = ReservationAssembler::new(reference).assemble(&raw, language);
        info!(
            "Reservation record: status={:?} check_in={:?} check_out={:?} nights={:?} adults={} children={}",
            record.status, record.check_in, record.check_out, record.nights, record.adults, record.children
        );
        record
    }
}
