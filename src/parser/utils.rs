//! Text helpers shared by every stage of the extraction pipeline

use crate::parser::tables::NUMBER_WORDS;
use crate::reservation::Language;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

static FORWARDED_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)-{5,}\s*Forwarded message\s*-{5,}\n.*?\n\n").unwrap());

// Address and subject headers left over from forwarded or pasted mail. Date
// headers only go when they carry a clock time, so "From: 9/11" survives.
// Greek header names come with or without tonos.
static ADDRESS_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?mi)^[ \t]*(?:from|to|cc|reply-to|απ[οό]|πρ[οό]ς|κοινοποι[ηή]ση):[ \t].*@.*$").unwrap()
});

static SUBJECT_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?mi)^[ \t]*(?:subject|θ[εέ]μα):.*$").unwrap());

static TIMESTAMP_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?mi)^[ \t]*(?:date|sent|ημερομην[ιί]α|στ[αά]λθηκε):.*\d{1,2}:\d{2}.*$").unwrap()
});

static QUOTED_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[ \t]*>.*$").unwrap());

static FOOTER_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)sent with|sent from my|unsubscribe").unwrap());

static BLANK_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n[ \t]*(?:\n[ \t]*)+").unwrap());

static NUMERIC_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{1,2}\s*[/.\-]\s*\d{1,2}").unwrap());

static LEADING_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+|\p{L}+").unwrap());

/// Filter out control characters except for newlines and tabs
pub fn sanitize_user_input(input: &str) -> String {
    input
        .chars()
        .filter(|&c| !c.is_control() || c == '\n' || c == '\t')
        .collect::<String>()
}

/// Lowercase and drop diacritics ("Νοεμβρίου" -> "νοεμβριου")
pub fn fold(text: &str) -> String {
    text.to_lowercase().nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Prepare text for pattern matching.
///
/// Everything is lowercased; Greek and Greeklish text is also accent-folded
/// so patterns can be written without tonos.
pub fn normalize(text: &str, language: Language) -> String {
    match language {
        Language::Greek | Language::Greeklish => fold(text),
        Language::English => text.to_lowercase(),
    }
}

/// Remove forwarding headers, quoted replies and footers from an email body
pub fn clean_email_body(body: &str) -> String {
    let body = sanitize_user_input(body).replace("\r\n", "\n");
    let body = FORWARDED_BLOCK.replace_all(&body, "");
    let body = ADDRESS_HEADER.replace_all(&body, "");
    let body = SUBJECT_HEADER.replace_all(&body, "");
    let body = TIMESTAMP_HEADER.replace_all(&body, "");
    let body = QUOTED_LINE.replace_all(&body, "");
    let body = match FOOTER_MARKER.find(&body) {
        Some(m) => &body[..m.start()],
        None => &body[..],
    };
    let cleaned = BLANK_RUN.replace_all(body, "\n\n").trim().to_string();
    debug!("Cleaned email body: {:?}", cleaned);
    cleaned
}

/// Whether a value carries a numeric date such as "9/11" or "09-11-2024"
pub fn contains_numeric_date(value: &str) -> bool {
    NUMERIC_DATE.is_match(value)
}

/// First count in a value: digits or a spelled-out number ("3 adults", "two")
pub fn parse_count(value: &str) -> Option<u32> {
    let folded = fold(value);
    for token in LEADING_NUMBER.find_iter(&folded) {
        let token = token.as_str();
        if let Ok(n) = token.parse::<u32>() {
            return Some(n);
        }
        if let Some(n) = NUMBER_WORDS.get(token) {
            return Some(*n);
        }
    }
    None
}
