//! Raw, untyped field values produced by the extraction strategies

use crate::reservation::ReservationRequest;
use serde::Serialize;

/// Reservation fields a strategy can fill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Field {
    CheckIn,
    CheckOut,
    Nights,
    Adults,
    Children,
    RoomType,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::CheckIn,
        Field::CheckOut,
        Field::Nights,
        Field::Adults,
        Field::Children,
        Field::RoomType,
    ];

    /// Fields that describe the stay itself and are adopted together
    pub fn is_stay(&self) -> bool {
        matches!(self, Field::CheckIn | Field::CheckOut | Field::Nights)
    }
}

/// Best-effort matched substrings, one per field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RawFields {
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub nights: Option<String>,
    pub adults: Option<String>,
    pub children: Option<String>,
    pub room_type: Option<String>,
}

impl RawFields {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.slot(field).as_deref()
    }

    /// Store a trimmed value; blank values are ignored
    pub fn set(&mut self, field: Field, value: impl AsRef<str>) {
        let value = value.as_ref().trim();
        if !value.is_empty() {
            *self.slot_mut(field) = Some(value.to_string());
        }
    }

    /// Store a value only if the field is still empty
    pub fn fill(&mut self, field: Field, value: impl AsRef<str>) {
        if self.get(field).is_none() {
            self.set(field, value);
        }
    }

    pub fn clear(&mut self, field: Field) {
        *self.slot_mut(field) = None;
    }

    pub fn with(mut self, field: Field, value: impl AsRef<str>) -> Self {
        self.set(field, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|f| self.get(*f).is_none())
    }

    pub fn has_date(&self) -> bool {
        self.check_in.is_some() || self.check_out.is_some()
    }

    /// Fill every empty field of `self` from `other`.
    ///
    /// Check-in is owned by the first source that carried a date; when
    /// `other` brings the first date its stay fields replace whatever `self`
    /// held. Afterwards an empty check-out or night count is still filled,
    /// but only from a source that names no check-in or the same one.
    pub fn fill_gaps_from(&mut self, other: &RawFields) {
        let keep_stay = self.has_date();
        let adopt_stay = !keep_stay && other.has_date();
        let same_anchor = match (self.get(Field::CheckIn), other.get(Field::CheckIn)) {
            (_, None) => true,
            (Some(ours), Some(theirs)) => ours == theirs,
            (None, Some(_)) => false,
        };
        for field in Field::ALL {
            let Some(value) = other.get(field) else {
                continue;
            };
            match (field, keep_stay, adopt_stay) {
                (Field::CheckIn, true, _) => {}
                (Field::CheckOut | Field::Nights, true, _) if same_anchor => self.fill(field, value),
                (_, true, _) if field.is_stay() => {}
                (_, false, true) if field.is_stay() => self.set(field, value),
                _ => self.fill(field, value),
            }
        }
    }

    fn slot(&self, field: Field) -> &Option<String> {
        match field {
            Field::CheckIn => &self.check_in,
            Field::CheckOut => &self.check_out,
            Field::Nights => &self.nights,
            Field::Adults => &self.adults,
            Field::Children => &self.children,
            Field::RoomType => &self.room_type,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::CheckIn => &mut self.check_in,
            Field::CheckOut => &mut self.check_out,
            Field::Nights => &mut self.nights,
            Field::Adults => &mut self.adults,
            Field::Children => &mut self.children,
            Field::RoomType => &mut self.room_type,
        }
    }
}

/// Turn a finished record back into raw fields (ISO dates), so it can be
/// assembled again
impl From<&ReservationRequest> for RawFields {
    fn from(record: &ReservationRequest) -> Self {
        let mut raw = RawFields::default();
        if let Some(date) = record.check_in {
            raw.set(Field::CheckIn, date.format("%Y-%m-%d").to_string());
        }
        if let Some(date) = record.check_out {
            raw.set(Field::CheckOut, date.format("%Y-%m-%d").to_string());
        }
        if let Some(nights) = record.nights {
            raw.set(Field::Nights, nights.to_string());
        }
        raw.set(Field::Adults, record.adults.to_string());
        raw.set(Field::Children, record.children.to_string());
        if let Some(room) = &record.room_type {
            raw.set(Field::RoomType, room);
        }
        raw
    }
}
