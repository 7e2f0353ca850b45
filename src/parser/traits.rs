//! Parser traits module
//!
//! This module defines the two seams of the extraction pipeline: a single
//! pattern strategy, and a field extractor that turns a whole body into raw
//! fields.

use crate::parser::fields::RawFields;
use crate::parser::utils::normalize;
use crate::reservation::Language;

/// One pattern family of the extraction cascade
pub trait Strategy: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Match against normalized text. A miss returns `None`, never an error;
    /// a hit always carries at least one field.
    fn try_extract(&self, text: &str) -> Option<RawFields>;
}

/// Produces raw fields for an email body
pub trait FieldExtractor: Send + Sync {
    /// Fields from normalized text (lowercase, accents folded on the Greek
    /// paths)
    fn extract(&self, text: &str, language: Language) -> RawFields;

    /// Fields from a cleaned body as the guest wrote it. Extractors that
    /// only work on normalized text keep the default.
    fn extract_body(&self, body: &str, language: Language) -> RawFields {
        self.extract(&normalize(body, language), language)
    }
}

/// Wrap a strategy result so empty matches count as misses
pub(crate) fn non_empty(raw: RawFields) -> Option<RawFields> {
    if raw.is_empty() { None } else { Some(raw) }
}
