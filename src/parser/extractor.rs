//! The per-language strategy cascade

use crate::parser::fields::RawFields;
use crate::parser::strategies::{
    ConciseStrategy, CountStrategy, DatePairStrategy, DateRangeStrategy, LabeledStrategy,
    LineStrategy, NaturalPhraseStrategy, RoomsNightsStrategy,
};
use crate::parser::traits::{FieldExtractor, Strategy};
use crate::reservation::Language;
use log::debug;

/// Ordered strategy chains, one per language.
///
/// The first strategy that yields a date owns check-in; every strategy, in
/// order, may still fill the fields that are empty. Check-out and nights only
/// come from strategies that agree on check-in or name none.
pub struct CascadeExtractor {
    greek: Vec<Box<dyn Strategy>>,
    greeklish: Vec<Box<dyn Strategy>>,
    english: Vec<Box<dyn Strategy>>,
}

impl Default for CascadeExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl CascadeExtractor {
    pub fn new() -> Self {
        Self {
            greek: vec![
                Box::new(LabeledStrategy),
                Box::new(DatePairStrategy),
                Box::new(NaturalPhraseStrategy),
                Box::new(RoomsNightsStrategy),
                Box::new(DateRangeStrategy),
                Box::new(LineStrategy),
                Box::new(ConciseStrategy),
                Box::new(CountStrategy),
            ],
            greeklish: vec![
                Box::new(NaturalPhraseStrategy),
                Box::new(LabeledStrategy),
                Box::new(DateRangeStrategy),
                Box::new(ConciseStrategy),
                Box::new(LineStrategy),
                Box::new(DatePairStrategy),
                Box::new(CountStrategy),
            ],
            english: vec![
                Box::new(LabeledStrategy),
                Box::new(DateRangeStrategy),
                Box::new(ConciseStrategy),
                Box::new(DatePairStrategy),
                Box::new(LineStrategy),
                Box::new(CountStrategy),
            ],
        }
    }

    pub fn chain(&self, language: Language) -> &[Box<dyn Strategy>] {
        match language {
            Language::Greek => &self.greek,
            Language::Greeklish => &self.greeklish,
            Language::English => &self.english,
        }
    }

    /// Strategy names in the order they run, for logs and diagnostics
    pub fn chain_names(&self, language: Language) -> Vec<&'static str> {
        self.chain(language).iter().map(|s| s.name()).collect()
    }
}

impl FieldExtractor for CascadeExtractor {
    fn extract(&self, text: &str, language: Language) -> RawFields {
        let mut result = RawFields::default();
        for strategy in self.chain(language) {
            match strategy.try_extract(text) {
                Some(raw) => {
                    if !result.has_date() && raw.has_date() {
                        debug!("{} strategy supplies the stay dates", strategy.name());
                    }
                    result.fill_gaps_from(&raw);
                }
                None => debug!("{} strategy found nothing", strategy.name()),
            }
        }
        result
    }
}
