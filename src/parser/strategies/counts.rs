//! Party size and night counts from number + noun phrases, in any script

use crate::parser::fields::{Field, RawFields};
use crate::parser::traits::{non_empty, Strategy};
use crate::parser::utils::parse_count;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

const COUNT: &str = r"\b(\d{1,2}|\p{L}+)[ \t]*";

static ADULTS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"{}(?:adults?|persons?|people|guests?|pax|ενηλικες|ενηλικας|ενηλικοι|ατομα|ατομο|enilikes|enhlikes|atoma|atomo)\b",
        COUNT
    ))
    .unwrap()
});

static CHILDREN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"{}(?:children|child|kids?|παιδια|παιδι|ανηλικα|ανηλικοι|paidia|paidi)\b",
        COUNT
    ))
    .unwrap()
});

static NIGHTS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"{}(?:nights?|νυχτες|νυχτα|βραδια|βραδυ|διανυκτερευσεις|nyxtes|nuxtes|nixtes|nyxta|vradia)\b",
        COUNT
    ))
    .unwrap()
});

/// Gap filler for counts; never yields dates
#[derive(Debug, Default, Clone, Copy)]
pub struct CountStrategy;

impl CountStrategy {
    fn first_count(pattern: &Regex, text: &str) -> Option<u32> {
        pattern.captures_iter(text).find_map(|caps| parse_count(&caps[1]))
    }
}

impl Strategy for CountStrategy {
    fn name(&self) -> &'static str {
        "counts"
    }

    fn try_extract(&self, text: &str) -> Option<RawFields> {
        let mut raw = RawFields::default();
        for (field, pattern) in [(Field::Adults, &ADULTS), (Field::Children, &CHILDREN), (Field::Nights, &NIGHTS)] {
            if let Some(n) = Self::first_count(pattern, text) {
                raw.set(field, n.to_string());
            }
        }
        debug!("Count strategy result: {:?}", raw);
        non_empty(raw)
    }
}
