//! Standalone cues scattered over separate lines:
//! "4 ατομα", "απο 13/11", "μεχρι 18/11", "3 νυχτες"

use crate::parser::dates::is_date_fragment;
use crate::parser::fields::{Field, RawFields};
use crate::parser::traits::{non_empty, Strategy};
use crate::parser::utils::parse_count;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

static PERSONS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{1,2}|\p{L}+)\s*(?:ατομα|ατομο|persons?|people|atoma|atomo)\b").unwrap()
});

static KIDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{1,2}|\p{L}+)\s*(?:παιδια|παιδι|kids?|paidia|paidi)\b").unwrap()
});

static NIGHTS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{1,2}|\p{L}+)\s*(?:νυχτες|βραδια|nights?|nyxtes|nuxtes|vradia)\b").unwrap()
});

static FROM: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?:απο|from|apo)\s+(.+)").unwrap());

static UNTIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:εως|μεχρι|until|till|to|mexri|eos|ews)\s+(.+)").unwrap());

static CUT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s(?:εως|μεχρι|until|till|to|mexri|eos|ews|και|and|kai|για|for|gia)\s|[,;]").unwrap()
});

/// Line-by-line scan for cues no single pattern covers
#[derive(Debug, Default, Clone, Copy)]
pub struct LineStrategy;

impl LineStrategy {
    fn count(pattern: &Regex, line: &str) -> Option<u32> {
        pattern.captures_iter(line).find_map(|caps| parse_count(&caps[1]))
    }

    /// Date after a "from"/"until" cue, cut before the next connector
    fn date_after(pattern: &Regex, line: &str) -> Option<String> {
        pattern.captures_iter(line).find_map(|caps| {
            let tail = &caps[1];
            let fragment = match CUT.find(tail) {
                Some(m) => &tail[..m.start()],
                None => tail,
            };
            is_date_fragment(fragment).then(|| fragment.trim().to_string())
        })
    }
}

impl Strategy for LineStrategy {
    fn name(&self) -> &'static str {
        "line oriented"
    }

    fn try_extract(&self, text: &str) -> Option<RawFields> {
        let mut raw = RawFields::default();
        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if let Some(n) = Self::count(&PERSONS, line) {
                raw.fill(Field::Adults, n.to_string());
            }
            if let Some(n) = Self::count(&KIDS, line) {
                raw.fill(Field::Children, n.to_string());
            }
            if let Some(n) = Self::count(&NIGHTS, line) {
                raw.fill(Field::Nights, n.to_string());
            }
            if let Some(date) = Self::date_after(&FROM, line) {
                raw.fill(Field::CheckIn, date);
            }
            if let Some(date) = Self::date_after(&UNTIL, line) {
                raw.fill(Field::CheckOut, date);
            }
        }
        debug!("Line strategy result: {:?}", raw);
        non_empty(raw)
    }
}
