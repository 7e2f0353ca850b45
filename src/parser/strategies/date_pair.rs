//! The first two fully written dates anywhere in the body

use crate::parser::fields::{Field, RawFields};
use crate::parser::traits::Strategy;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

static FULL_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{1,2}[/.\-]\d{1,2}[/.\-](?:\d{4}|\d{2})\b").unwrap());

#[derive(Debug, Default, Clone, Copy)]
pub struct DatePairStrategy;

impl Strategy for DatePairStrategy {
    fn name(&self) -> &'static str {
        "full date pair"
    }

    fn try_extract(&self, text: &str) -> Option<RawFields> {
        let mut dates = FULL_DATE.find_iter(text).map(|m| m.as_str());
        let (first, second) = (dates.next()?, dates.next()?);
        debug!("Date pair matched {} and {}", first, second);
        Some(RawFields::default().with(Field::CheckIn, first).with(Field::CheckOut, second))
    }
}
