//! One-liners: "10/1 one apartment 3 nights"

use super::{is_clean_room_type, is_filler_only};
use crate::parser::fields::{Field, RawFields};
use crate::parser::traits::Strategy;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

static CONCISE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(\d{1,2}[/.\-]\d{1,2}(?:[/.\-]\d{2,4})?)[ \t]+([^\n]+?)[ \t]+(\d{1,2})[ \t]*(?:nights?|νυχτες|νυχτα|βραδια|nuxtes|nyxtes|vradia)\b",
    )
    .unwrap()
});

/// Arrival date, room type and night count in one line
#[derive(Debug, Default, Clone, Copy)]
pub struct ConciseStrategy;

impl Strategy for ConciseStrategy {
    fn name(&self) -> &'static str {
        "concise"
    }

    fn try_extract(&self, text: &str) -> Option<RawFields> {
        let caps = CONCISE.captures(text)?;
        let mut raw = RawFields::default()
            .with(Field::CheckIn, &caps[1])
            .with(Field::Nights, &caps[3]);
        let room = caps[2].trim();
        if is_clean_room_type(room) && !is_filler_only(room) {
            raw.set(Field::RoomType, room);
        } else {
            debug!("Concise: dropped room type '{}'", room);
        }
        debug!("Concise matched: {:?}", raw);
        Some(raw)
    }
}
