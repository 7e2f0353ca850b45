//! Labeled fields: "Check-in: 9/11", "Άφιξη: 13 Νοεμ", "Adults = 3"

use super::is_clean_room_type;
use crate::parser::dates::{first_date_span, is_date_fragment};
use crate::parser::fields::{Field, RawFields};
use crate::parser::tables::{Label, FIELD_LABELS};
use crate::parser::traits::{non_empty, Strategy};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

// Longest labels first so "check-in date" beats "check-in" and "room type"
// beats "room".
static LABEL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let mut texts: Vec<&str> = FIELD_LABELS.iter().map(|l| l.text).collect();
    texts.sort_by_key(|t| std::cmp::Reverse(t.len()));
    let alternation = texts
        .iter()
        .map(|t| regex::escape(t).replace(' ', r"[ \t]+"))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"\b({})\b[ \t]*([:=]?)[ \t]*", alternation)).unwrap()
});

static LABELS_BY_TEXT: Lazy<HashMap<&'static str, Label>> =
    Lazy::new(|| FIELD_LABELS.iter().map(|l| (l.text, *l)).collect());

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").unwrap());

/// A label accepted on one line, with the span its value may occupy
struct LabelHit {
    field: Field,
    label_start: usize,
    value_start: usize,
}

/// Explicit "label: value" lines in any of the three scripts
#[derive(Debug, Default, Clone, Copy)]
pub struct LabeledStrategy;

impl LabeledStrategy {
    fn hits(line: &str) -> Vec<LabelHit> {
        LABEL_PATTERN
            .captures_iter(line)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let text = WHITESPACE.replace_all(&caps[1], " ");
                let label = LABELS_BY_TEXT.get(text.as_ref())?;
                let has_separator = !caps[2].is_empty();
                (label.strong || has_separator).then(|| LabelHit {
                    field: label.field,
                    label_start: whole.start(),
                    value_start: whole.end(),
                })
            })
            .collect()
    }

    /// A date value ends with its first date, so a clock time or a night
    /// count later on the line stays out of it
    fn trim_value(field: Field, value: &str) -> &str {
        match field {
            Field::CheckIn | Field::CheckOut => match first_date_span(value) {
                Some((_, end)) => value[..end].trim_end(),
                None => value,
            },
            _ => value,
        }
    }

    fn accept(field: Field, value: &str) -> bool {
        match field {
            Field::CheckIn | Field::CheckOut => is_date_fragment(value),
            Field::RoomType => is_clean_room_type(value),
            _ => true,
        }
    }
}

impl Strategy for LabeledStrategy {
    fn name(&self) -> &'static str {
        "labeled"
    }

    fn try_extract(&self, text: &str) -> Option<RawFields> {
        let mut raw = RawFields::default();
        for line in text.lines() {
            let hits = Self::hits(line);
            for (i, hit) in hits.iter().enumerate() {
                let end = hits.get(i + 1).map_or(line.len(), |next| next.label_start);
                if end <= hit.value_start {
                    continue;
                }
                let value = line[hit.value_start..end]
                    .trim_matches(|c: char| c.is_whitespace() || c == ',' || c == ';');
                let value = Self::trim_value(hit.field, value);
                if Self::accept(hit.field, value) {
                    raw.fill(hit.field, value);
                } else {
                    debug!("Labeled: rejected {:?} value '{}'", hit.field, value);
                }
            }
        }
        debug!("Labeled strategy result: {:?}", raw);
        non_empty(raw)
    }
}
