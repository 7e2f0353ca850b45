//! Pattern strategies of the extraction cascade
//!
//! Each strategy is a pure function over normalized text (lowercase, and
//! accent-free on the Greek paths). They never fail: a miss is `None`.

mod concise;
mod counts;
mod date_pair;
mod date_range;
mod labeled;
mod line_oriented;
mod natural_phrase;
mod rooms_nights;

pub use concise::ConciseStrategy;
pub use counts::CountStrategy;
pub use date_pair::DatePairStrategy;
pub use date_range::DateRangeStrategy;
pub use labeled::LabeledStrategy;
pub use line_oriented::LineStrategy;
pub use natural_phrase::NaturalPhraseStrategy;
pub use rooms_nights::RoomsNightsStrategy;

use crate::parser::dates::is_date_fragment;
use crate::parser::tables::ROOM_TYPE_ARTICLES;
use crate::parser::utils::contains_numeric_date;

/// Connectors and verbs that sit between a date and a count without naming
/// the accommodation
pub(crate) const NOT_ROOM_WORDS: &[&str] = &[
    "απο", "για", "στις", "τις", "την", "στο", "θελω", "θελουμε", "θα", "ηθελα", "ηθελαμε", "με",
    "και", "εως", "μεχρι", "apo", "gia", "stis", "tis", "tin", "sto", "thelo", "thelw", "theloume",
    "tha", "ithela", "me", "kai", "mexri", "from", "for", "to", "the", "a", "an", "and", "on",
    "at", "in", "of", "with", "we", "i", "need", "want", "please", "until", "till", "about",
];

/// Whether every word of `value` is a connector or an article
pub(crate) fn is_filler_only(value: &str) -> bool {
    value
        .split_whitespace()
        .all(|w| NOT_ROOM_WORDS.contains(&w) || ROOM_TYPE_ARTICLES.contains(&w))
}

/// A captured room type is only kept when no date leaked into it
pub(crate) fn is_clean_room_type(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && !contains_numeric_date(value) && !is_date_fragment(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_type_rejects_dates() {
        assert!(is_clean_room_type("one apartment"));
        assert!(is_clean_room_type("διαμερισμα"));
        assert!(!is_clean_room_type("loft 9/11"));
        assert!(!is_clean_room_type("studio 13 νοεμ"));
        assert!(!is_clean_room_type("  "));
    }

    #[test]
    fn test_filler_only() {
        assert!(is_filler_only("for"));
        assert!(is_filler_only("για τα"));
        assert!(is_filler_only("and the"));
        assert!(!is_filler_only("one apartment"));
        assert!(!is_filler_only("for a loft"));
    }
}
