//! Greek and Greeklish one-clause requests:
//! "ενα διαμερισμα 13 νοεμ εως 18 νοεμ", "diamerisma 4 noem me 8 noem"

use super::{is_clean_room_type, NOT_ROOM_WORDS};
use crate::parser::dates::resolve_month;
use crate::parser::fields::{Field, RawFields};
use crate::parser::tables::ROOM_TYPE_ARTICLES;
use crate::parser::traits::Strategy;
use crate::reservation::Language;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

static PHRASE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?P<room>\p{L}{2,20}(?:[ \t]+\p{L}{2,20})?)[ \t]+(?P<d1>\d{1,2})[ \t]*(?P<m1>\p{L}{3,15})?\.?[ \t]+(?:εως|μεχρι|ως|με|eos|ews|mexri|mexris|me|os)[ \t]+(?P<d2>\d{1,2})[ \t]*(?P<m2>\p{L}{3,15})",
    )
    .unwrap()
});

/// Room type and a compact date range in one clause
#[derive(Debug, Default, Clone, Copy)]
pub struct NaturalPhraseStrategy;

impl NaturalPhraseStrategy {
    fn month(token: &str) -> Option<u32> {
        resolve_month(token, Language::Greek).or_else(|| resolve_month(token, Language::Greeklish))
    }

    fn room_type(room: &str) -> Option<String> {
        let words: Vec<&str> = room
            .split_whitespace()
            .filter(|w| !ROOM_TYPE_ARTICLES.contains(w) && !NOT_ROOM_WORDS.contains(w))
            .collect();
        let room = words.join(" ");
        is_clean_room_type(&room).then_some(room)
    }
}

impl Strategy for NaturalPhraseStrategy {
    fn name(&self) -> &'static str {
        "natural phrase"
    }

    fn try_extract(&self, text: &str) -> Option<RawFields> {
        for caps in PHRASE.captures_iter(text) {
            let second_month = &caps["m2"];
            if Self::month(second_month).is_none() {
                continue;
            }
            // "13 εως 18 νοεμ" shares the closing month
            let first_month = match caps.name("m1") {
                Some(m) if Self::month(m.as_str()).is_some() => m.as_str(),
                Some(_) => continue,
                None => second_month,
            };

            let mut raw = RawFields::default()
                .with(Field::CheckIn, format!("{} {}", &caps["d1"], first_month))
                .with(Field::CheckOut, format!("{} {}", &caps["d2"], second_month));
            if let Some(room) = Self::room_type(&caps["room"]) {
                raw.set(Field::RoomType, room);
            }
            debug!("Natural phrase matched: {:?}", raw);
            return Some(raw);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_greek_phrase() {
        let raw = NaturalPhraseStrategy.try_extract("ενα διαμερισμα 13 νοεμ εως 18 νοεμ").unwrap();
        assert_eq!(
            raw,
            RawFields::default()
                .with(Field::CheckIn, "13 νοεμ")
                .with(Field::CheckOut, "18 νοεμ")
                .with(Field::RoomType, "διαμερισμα")
        );
    }

    #[test]
    fn test_greeklish_phrase() {
        let raw = NaturalPhraseStrategy.try_extract("kalispera, diamerisma 4 noem me 8 noem").unwrap();
        assert_eq!(raw.get(Field::CheckIn), Some("4 noem"));
        assert_eq!(raw.get(Field::CheckOut), Some("8 noem"));
        assert_eq!(raw.get(Field::RoomType), Some("diamerisma"));
    }

    #[test]
    fn test_shared_month() {
        let raw = NaturalPhraseStrategy.try_extract("θελω στουντιο 3 εως 6 μαιου").unwrap();
        assert_eq!(raw.get(Field::CheckIn), Some("3 μαιου"));
        assert_eq!(raw.get(Field::CheckOut), Some("6 μαιου"));
        assert_eq!(raw.get(Field::RoomType), Some("στουντιο"));
    }

    #[test]
    fn test_connector_is_not_a_room() {
        let raw = NaturalPhraseStrategy.try_extract("απο 13 νοεμ εως 18 νοεμ").unwrap();
        assert_eq!(raw.get(Field::RoomType), None);
        assert_eq!(raw.get(Field::CheckIn), Some("13 νοεμ"));
    }

    #[test]
    fn test_requires_month_words() {
        assert!(NaturalPhraseStrategy.try_extract("δωματιο 2 εως 3 ατομα").is_none());
    }
}
