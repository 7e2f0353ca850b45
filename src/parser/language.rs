//! Language routing for inquiry emails

use crate::parser::dates::is_greek_char;
use crate::parser::tables::GREEKLISH_CUES;
use crate::parser::utils::fold;
use crate::reservation::Language;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Score a text needs before it counts as Greeklish
const GREEKLISH_THRESHOLD: u32 = 2;

static LATIN_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z]+").unwrap());

// Common English words; a Greeklish score must beat these to win.
static ENGLISH_CUES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "and", "for", "to", "we", "would", "like", "room", "rooms", "please", "from",
        "with", "is", "are", "have", "you", "your", "book", "booking", "stay", "night", "nights",
        "adults", "children", "available", "availability", "hello", "dear", "thanks", "regards",
    ]
    .into_iter()
    .collect()
});

/// Picks the extraction chain for an email
#[derive(Debug, Default, Clone, Copy)]
pub struct LanguageRouter;

impl LanguageRouter {
    pub fn new() -> Self {
        Self
    }

    /// Greek script wins outright; Latin text is Greeklish only when its cue
    /// words clearly outweigh English ones.
    pub fn detect(&self, text: &str) -> Language {
        if text.chars().any(|c| is_greek_char(c) && c.is_alphabetic()) {
            debug!("Greek script found, routing to greek chain");
            return Language::Greek;
        }

        let folded = fold(text);
        let mut greeklish = 0;
        let mut english = 0;
        for word in LATIN_WORD.find_iter(&folded).map(|m| m.as_str()) {
            if let Some(weight) = GREEKLISH_CUES.get(word) {
                greeklish += weight;
            } else if ENGLISH_CUES.contains(word) {
                english += 1;
            }
        }
        debug!("Language scores: greeklish={}, english={}", greeklish, english);

        if greeklish >= GREEKLISH_THRESHOLD && greeklish > english {
            Language::Greeklish
        } else {
            Language::English
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("ενα διαμερισμα 13 νοεμ εως 18 νοεμ", Language::Greek ; "greek phrase")]
    #[test_case("Καλησπέρα, room for 2", Language::Greek ; "mixed script")]
    #[test_case("Kalimera, thelo ena dwmatio gia 3 atoma", Language::Greeklish ; "greeklish request")]
    #[test_case("diamerisma 4 noem mexri 8 noem", Language::Greeklish ; "greeklish phrase")]
    #[test_case("Hello, do you have availability?", Language::English ; "english question")]
    #[test_case("10/1 ONE APARTMENT 3 NIGHTS", Language::English ; "english one liner")]
    #[test_case("We would like a room with me and my wife", Language::English ; "weak cue only")]
    #[test_case("", Language::English ; "empty")]
    fn test_detect(text: &str, expected: Language) {
        assert_eq!(LanguageRouter::new().detect(text), expected);
    }
}
