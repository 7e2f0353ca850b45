//! "θελω 2 δωματια για 26 οκτωβριου για 3 νυχτες"

use crate::parser::dates::resolve_month;
use crate::parser::fields::{Field, RawFields};
use crate::parser::traits::Strategy;
use crate::parser::utils::parse_count;
use crate::reservation::{Language, DEFAULT_ADULTS};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

static ROOMS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{1,2}|\p{L}+)\s*δωματι(?:ο|α)\b").unwrap());

static DAY_MONTH: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(\d{1,2})\s*(\p{L}{3,})").unwrap());

static NIGHTS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{1,2}|\p{L}+)\s*(?:νυχτες|νυχτα|βραδια|βραδυ|διανυκτερευσεις)\b").unwrap()
});

/// Room count, arrival day and night count in one Greek sentence
#[derive(Debug, Default, Clone, Copy)]
pub struct RoomsNightsStrategy;

impl Strategy for RoomsNightsStrategy {
    fn name(&self) -> &'static str {
        "rooms and nights"
    }

    fn try_extract(&self, text: &str) -> Option<RawFields> {
        let (rooms, rest) = ROOMS.captures_iter(text).find_map(|caps| {
            let rooms = parse_count(&caps[1]).filter(|n| *n > 0)?;
            Some((rooms, &text[caps.get(0)?.end()..]))
        })?;

        let (check_in, rest) = DAY_MONTH.captures_iter(rest).find_map(|caps| {
            resolve_month(&caps[2], Language::Greek)?;
            Some((caps[0].to_string(), &rest[caps.get(0)?.end()..]))
        })?;

        let room_type = if rooms == 1 { "δωματιο" } else { "δωματια" };
        let mut raw = RawFields::default()
            .with(Field::CheckIn, check_in)
            .with(Field::Adults, (rooms * DEFAULT_ADULTS).to_string())
            .with(Field::RoomType, room_type);
        if let Some(nights) = NIGHTS.captures_iter(rest).find_map(|caps| parse_count(&caps[1])) {
            raw.set(Field::Nights, nights.to_string());
        }
        debug!("Rooms and nights matched: {:?}", raw);
        Some(raw)
    }
}
