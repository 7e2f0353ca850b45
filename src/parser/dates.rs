//! Date normalization for reservation requests
//!
//! Turns free-text date fragments ("26 οκτωβρίου", "10/1", "noem 4",
//! "2024-11-09") into calendar dates. The recognised forms are
//!
//! 1. numeric (`DD/MM`, `DD-MM`, `DD.MM`, optional 2 or 4 digit year, ISO)
//! 2. month names in English, Greek or Greeklish, day first or month first
//!
//! and the one that starts earliest in the fragment wins, so "12 May, lands
//! 11.05" is the 12th of May. A handful of `chrono` formats are the last
//! resort.
//!
//! When the year is not written it is taken from the reference date, and a
//! date that would fall before the reference moves to the next year:
//! reservation requests are always for the future.

use crate::error::DateParseError;
use crate::parser::tables::{ENGLISH_MONTHS, GREEKLISH_MONTHS, GREEK_MONTHS, NUMBER_WORDS};
use crate::parser::utils::fold;
use crate::reservation::Language;
use chrono::{Datelike, NaiveDate};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{4})[-/.](\d{1,2})[-/.](\d{1,2})\b").unwrap());

static NUMERIC_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{1,2})\s*[/.\-]\s*(\d{1,2})(?:\s*[/.\-]\s*(\d{4}|\d{2}))?\b").unwrap()
});

// The trailing word lets us refuse "5 jan 10 nights" as the year 2010.
static DAY_MONTH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(\d{1,2})(?:st|nd|rd|th|η|ης)?\s*(?:of\s+|του\s+)?(\p{L}{3,})\.?(?:[ \t]*,?[ \t]*(\d{4}|\d{2})\b[ \t]*(\p{L}+)?)?",
    )
    .unwrap()
});

static MONTH_DAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\p{L}{3,})\.?\s*(\d{1,2})(?:st|nd|rd|th)?\b(?:[ \t]*,?[ \t]*(\d{4})\b)?")
        .unwrap()
});

const FALLBACK_FORMATS: &[&str] = &[
    "%Y/%m/%d",
    "%Y%m%d",
    "%d%m%Y",
    "%d %m %Y",
    "%A, %d %B %Y",
    "%a, %d %b %Y",
    "%A %d %B %Y",
    "%B %d %Y",
    "%d %B, %Y",
    "%b %d %Y",
];

/// Stateless date parser bound to a reference "today"
#[derive(Debug, Clone, Copy)]
pub struct DateNormalizer {
    reference: NaiveDate,
}

impl DateNormalizer {
    pub fn new(reference: NaiveDate) -> Self {
        Self { reference }
    }

    pub fn reference(&self) -> NaiveDate {
        self.reference
    }

    /// Same normalizer with another reference date
    pub fn with_reference(&self, reference: NaiveDate) -> Self {
        Self { reference }
    }

    pub fn parse(&self, fragment: &str, language: Language) -> Result<NaiveDate, DateParseError> {
        parse_date(fragment, language, self.reference)
    }
}

/// Resolve a date fragment against a reference date
pub fn parse_date(
    fragment: &str,
    language: Language,
    reference: NaiveDate,
) -> Result<NaiveDate, DateParseError> {
    let text = fold(fragment);
    let text = text.trim();

    let parsed = earliest_date(text, language, reference)
        .map(|found| found.date)
        .or_else(|| parse_fallback(text));

    match parsed {
        Some(date) => {
            debug!("Parsed date fragment '{}' as {}", fragment, date);
            Ok(date)
        }
        None => {
            debug!("No date form matched fragment '{}'", fragment);
            Err(DateParseError(fragment.to_string()))
        }
    }
}

/// Whether some date form matches inside `text`, regardless of year
pub fn is_date_fragment(text: &str) -> bool {
    let text = fold(text);
    if ISO_DATE.is_match(&text) || NUMERIC_DATE.is_match(&text) {
        return true;
    }
    DAY_MONTH.captures_iter(&text).any(|caps| month_token_matches(&caps[2]))
        || MONTH_DAY.captures_iter(&text).any(|caps| month_token_matches(&caps[1]))
}

fn month_token_matches(token: &str) -> bool {
    [Language::English, Language::Greek, Language::Greeklish]
        .iter()
        .any(|lang| resolve_month(token, *lang).is_some())
}

/// Map a month token to its number, trying the tables in the order that
/// suits the language ("noem", "νοεμβρίου", "Nov." all give 11)
pub fn resolve_month(token: &str, language: Language) -> Option<u32> {
    let token = fold(token);
    let token = token.trim_end_matches('.');
    if token.chars().count() < 3 || NUMBER_WORDS.contains_key(token) {
        return None;
    }

    let is_greek_script = token.chars().any(is_greek_char);
    if is_greek_script {
        return lookup_month(token, GREEK_MONTHS);
    }

    match language {
        Language::English => lookup_month(token, ENGLISH_MONTHS),
        _ => greeklish_month(token).or_else(|| lookup_month(token, ENGLISH_MONTHS)),
    }
}

/// Exact form, or an unambiguous abbreviation of one ("νοεμ", "sept")
fn lookup_month(token: &str, table: &[(&str, u32)]) -> Option<u32> {
    if let Some((_, month)) = table.iter().find(|(form, _)| *form == token) {
        return Some(*month);
    }
    let mut candidates = table.iter().filter(|(form, _)| form.starts_with(token)).map(|(_, m)| *m);
    let first = candidates.next()?;
    if candidates.all(|m| m == first) { Some(first) } else { None }
}

/// Greeklish spelling or abbreviation -> Greek spelling -> month number
fn greeklish_month(token: &str) -> Option<u32> {
    let mut candidates = GREEKLISH_MONTHS
        .iter()
        .filter(|(form, _)| form.starts_with(token))
        .filter_map(|(_, greek)| lookup_month(greek, GREEK_MONTHS));
    let first = candidates.next()?;
    if candidates.all(|m| m == first) { Some(first) } else { None }
}

pub(crate) fn is_greek_char(c: char) -> bool {
    ('\u{0370}'..='\u{03FF}').contains(&c) || ('\u{1F00}'..='\u{1FFF}').contains(&c)
}

/// A date found inside a fragment, with the byte span it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DateMatch {
    pub start: usize,
    pub end: usize,
    pub date: NaiveDate,
}

/// The first valid date of every form, and of those the one that starts
/// earliest; on a tie the order ISO, numeric, day-month, month-day decides
fn earliest_date(text: &str, language: Language, reference: NaiveDate) -> Option<DateMatch> {
    [
        first_iso(text),
        first_numeric(text, reference),
        first_day_month(text, language, reference),
        first_month_day(text, language, reference),
    ]
    .into_iter()
    .flatten()
    .min_by_key(|found| found.start)
}

/// Span of the earliest date form in `text`, in any of the three languages.
/// `text` must already be normalized (lowercase, accents folded).
pub(crate) fn first_date_span(text: &str) -> Option<(usize, usize)> {
    // A leap year, so "29/2" still counts as a date
    let reference = NaiveDate::from_ymd_opt(2000, 1, 1)?;
    earliest_date(text, Language::Greeklish, reference).map(|found| (found.start, found.end))
}

fn first_iso(text: &str) -> Option<DateMatch> {
    ISO_DATE.captures_iter(text).find_map(|caps| {
        let whole = caps.get(0)?;
        let date = NaiveDate::from_ymd_opt(caps[1].parse().ok()?, caps[2].parse().ok()?, caps[3].parse().ok()?)?;
        Some(DateMatch { start: whole.start(), end: whole.end(), date })
    })
}

fn first_numeric(text: &str, reference: NaiveDate) -> Option<DateMatch> {
    NUMERIC_DATE.captures_iter(text).find_map(|caps| {
        let whole = caps.get(0)?;
        let day: u32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let year = caps.get(3).and_then(|y| expand_year(y.as_str()));
        let date = build_date(day, month, year, reference)?;
        Some(DateMatch { start: whole.start(), end: whole.end(), date })
    })
}

fn first_day_month(text: &str, language: Language, reference: NaiveDate) -> Option<DateMatch> {
    DAY_MONTH.captures_iter(text).find_map(|caps| {
        let month = resolve_month(&caps[2], language)?;
        let day: u32 = caps[1].parse().ok()?;
        let followed_by_word = caps.get(4).is_some();
        let written_year = caps.get(3).filter(|y| !(y.as_str().len() == 2 && followed_by_word));
        let year = written_year.and_then(|y| expand_year(y.as_str()));
        let date = build_date(day, month, year, reference)?;
        let end = written_year.or_else(|| caps.get(2))?.end();
        Some(DateMatch { start: caps.get(0)?.start(), end, date })
    })
}

fn first_month_day(text: &str, language: Language, reference: NaiveDate) -> Option<DateMatch> {
    MONTH_DAY.captures_iter(text).find_map(|caps| {
        let month = resolve_month(&caps[1], language)?;
        let day: u32 = caps[2].parse().ok()?;
        let year = caps.get(3).and_then(|y| expand_year(y.as_str()));
        let date = build_date(day, month, year, reference)?;
        let end = caps.get(3).or_else(|| caps.get(2))?.end();
        Some(DateMatch { start: caps.get(0)?.start(), end, date })
    })
}

fn parse_fallback(text: &str) -> Option<NaiveDate> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    for width in (1..=4).rev() {
        for window in tokens.windows(width) {
            let candidate = window.join(" ");
            for format in FALLBACK_FORMATS {
                if let Ok(date) = NaiveDate::parse_from_str(&candidate, format) {
                    debug!("Fallback format '{}' matched '{}'", format, candidate);
                    return Some(date);
                }
            }
        }
    }
    None
}

/// Two-digit years map to 2000+yy, or 1900+yy from 50 up
fn expand_year(year: &str) -> Option<i32> {
    let value: i32 = year.parse().ok()?;
    match year.len() {
        2 if value >= 50 => Some(1900 + value),
        2 => Some(2000 + value),
        4 => Some(value),
        _ => None,
    }
}

/// Build a date; without an explicit year the reference year is used and
/// past dates roll over to the next year
fn build_date(day: u32, month: u32, year: Option<i32>, reference: NaiveDate) -> Option<NaiveDate> {
    match year {
        Some(year) => NaiveDate::from_ymd_opt(year, month, day),
        None => {
            let date = NaiveDate::from_ymd_opt(reference.year(), month, day)
                .or_else(|| NaiveDate::from_ymd_opt(reference.year() + 1, month, day))?;
            if date < reference {
                NaiveDate::from_ymd_opt(reference.year() + 1, month, day)
            } else {
                Some(date)
            }
        }
    }
}
