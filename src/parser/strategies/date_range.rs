//! Unlabeled ranges: "from 9/11 to 12/11", "απο 13 νοεμ εως 18 νοεμ",
//! "from 10 to 15 december"

use crate::parser::dates::is_date_fragment;
use crate::parser::fields::{Field, RawFields};
use crate::parser::traits::Strategy;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

const DATE: &str = r"\d{1,2}[/.\-]\d{1,2}(?:[/.\-]\d{2,4})?|\d{1,2}(?:st|nd|rd|th)?\s*(?:of\s+)?\p{L}{3,}\.?|\p{L}{3,}\.?\s*\d{1,2}(?:st|nd|rd|th)?\b";

const NUMERIC: &str = r"\d{1,2}[/.\-]\d{1,2}(?:[/.\-]\d{2,4})?";

const SEPARATOR: &str = r"(?:-|–|\b(?:to|till|until|and|εως|μεχρι|ως|και|eos|ews|mexri|mexris|me|os|kai)\b)";

static LEAD_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b(?:from|between|απο|για|apo|gia)\s+(?:the\s+)?({date})\s*{sep}\s*(?:the\s+)?({date})",
        date = DATE,
        sep = SEPARATOR
    ))
    .unwrap()
});

// Two days sharing the closing month: "from 10 to 15 december 2024"
static SHARED_MONTH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b(?:from|between|απο|για|apo|gia)\s+(?:the\s+)?(\d{{1,2}})(?:st|nd|rd|th)?\s*{sep}\s*(?:the\s+)?(\d{{1,2}})(?:st|nd|rd|th)?\s*(?:of\s+)?(\p{{L}}{{3,}})\.?(?:[ \t]*,?[ \t]*(\d{{4}})\b)?",
        sep = SEPARATOR
    ))
    .unwrap()
});

// Bare numeric ranges need no lead word: "9/11 - 12/11"
static NUMERIC_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"\b({num})\s*{sep}\s*({num})\b", num = NUMERIC, sep = SEPARATOR)).unwrap()
});

/// Both stay dates from one "from X to Y" phrase
#[derive(Debug, Default, Clone, Copy)]
pub struct DateRangeStrategy;

impl DateRangeStrategy {
    fn shared_month(text: &str) -> Option<(String, String)> {
        SHARED_MONTH.captures_iter(text).find_map(|caps| {
            let year = caps.get(4).map_or(String::new(), |y| format!(" {}", y.as_str()));
            let from = format!("{} {}{}", &caps[1], &caps[3], year);
            let to = format!("{} {}{}", &caps[2], &caps[3], year);
            if is_date_fragment(&to) {
                Some((from, to))
            } else {
                debug!("Date range: '{}' is not a month", &caps[3]);
                None
            }
        })
    }

    fn explicit_range(text: &str) -> Option<(String, String)> {
        [&*LEAD_RANGE, &*NUMERIC_RANGE].into_iter().find_map(|pattern| {
            pattern.captures_iter(text).find_map(|caps| {
                let (from, to) = (caps[1].trim(), caps[2].trim());
                if is_date_fragment(from) && is_date_fragment(to) {
                    Some((from.to_string(), to.to_string()))
                } else {
                    debug!("Date range: '{}' / '{}' are not dates", from, to);
                    None
                }
            })
        })
    }
}

impl Strategy for DateRangeStrategy {
    fn name(&self) -> &'static str {
        "date range"
    }

    fn try_extract(&self, text: &str) -> Option<RawFields> {
        let found = Self::shared_month(text).or_else(|| Self::explicit_range(text));
        let (from, to) = found?;
        debug!("Date range matched {} -> {}", from, to);
        Some(RawFields::default().with(Field::CheckIn, from).with(Field::CheckOut, to))
    }
}
