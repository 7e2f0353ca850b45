//! Turns raw field strings into a validated reservation record

use crate::error::AssemblyError;
use crate::parser::dates::DateNormalizer;
use crate::parser::fields::{Field, RawFields};
use crate::parser::strategies::is_clean_room_type;
use crate::parser::utils::parse_count;
use crate::reservation::{Language, ReservationRequest, Status, DEFAULT_ADULTS, DEFAULT_CHILDREN};
use chrono::{Datelike, Duration, NaiveDate};
use log::{debug, warn};

#[derive(Debug, Clone, Copy)]
pub struct ReservationAssembler {
    dates: DateNormalizer,
}

impl ReservationAssembler {
    pub fn new(reference: NaiveDate) -> Self {
        Self { dates: DateNormalizer::new(reference) }
    }

    pub fn assemble(&self, raw: &RawFields, language: Language) -> ReservationRequest {
        let mut record = ReservationRequest::empty(language);

        let stated_in = self.parse_field(raw, Field::CheckIn, language);
        let stated_out = stated_in
            .map(|check_in| self.parse_departure(raw, check_in, language))
            .unwrap_or_else(|| self.parse_field(raw, Field::CheckOut, language));
        let stated_nights = raw.get(Field::Nights).and_then(parse_count).filter(|n| *n > 0);

        let (check_in, check_out, status) = match (stated_in, stated_out) {
            (Some(check_in), Some(check_out)) => (check_in, check_out, Status::Complete),
            (Some(check_in), None) => {
                let check_out = stated_nights
                    .and_then(|n| check_in.checked_add_signed(Duration::days(i64::from(n))))
                    .unwrap_or(check_in + Duration::days(1));
                (check_in, check_out, Status::Partial)
            }
            (None, Some(check_out)) => {
                (check_out.pred_opt().unwrap_or(check_out), check_out, Status::Partial)
            }
            (None, None) => {
                debug!("No usable date; record stays unparsed");
                record.nights = stated_nights;
                self.fill_party(raw, &mut record);
                return record;
            }
        };

        record.check_in = Some(check_in);
        record.check_out = Some(check_out);
        record.status = status;
        self.fill_party(raw, &mut record);

        if check_out <= check_in {
            let err = AssemblyError::InvalidDateRange { check_in, check_out };
            warn!("{}", err);
            record.mark_invalid(err);
            return record;
        }

        // Dates are authoritative over a stated night count
        let nights = (check_out - check_in).num_days() as u32;
        if stated_nights.is_some_and(|n| n != nights) {
            debug!("Stated nights {:?} replaced by {} from the dates", stated_nights, nights);
        }
        record.nights = Some(nights);
        record
    }

    fn parse_field(&self, raw: &RawFields, field: Field, language: Language) -> Option<NaiveDate> {
        let fragment = raw.get(field)?;
        match self.dates.parse(fragment, language) {
            Ok(date) => Some(date),
            Err(err) => {
                debug!("Dropping {:?}: {}", field, err);
                None
            }
        }
    }

    /// Resolve check-out against today first. A departure that then lands on
    /// or before the arrival, in an earlier month, belongs to the next year
    /// ("28 δεκ εως 3 ιαν").
    fn parse_departure(&self, raw: &RawFields, check_in: NaiveDate, language: Language) -> Option<NaiveDate> {
        let check_out = self.parse_field(raw, Field::CheckOut, language)?;
        if check_out > check_in {
            return Some(check_out);
        }
        let fragment = raw.get(Field::CheckOut)?;
        match self.dates.with_reference(check_in).parse(fragment, language) {
            Ok(later) if later > check_in && later.month() < check_in.month() => Some(later),
            _ => Some(check_out),
        }
    }

    /// Party size and room type, with defaults applied exactly once
    fn fill_party(&self, raw: &RawFields, record: &mut ReservationRequest) {
        record.adults = raw
            .get(Field::Adults)
            .and_then(parse_count)
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_ADULTS);
        record.children = raw.get(Field::Children).and_then(parse_count).unwrap_or(DEFAULT_CHILDREN);
        record.room_type = raw
            .get(Field::RoomType)
            .map(str::trim)
            .filter(|room| is_clean_room_type(room))
            .map(str::to_string);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn assembler() -> ReservationAssembler {
        ReservationAssembler::new(ymd(2024, 10, 1))
    }

    #[test]
    fn test_complete_record() {
        let raw = RawFields::default()
            .with(Field::CheckIn, "13 νοεμ")
            .with(Field::CheckOut, "18 νοεμ")
            .with(Field::RoomType, "διαμερισμα");
        let record = assembler().assemble(&raw, Language::Greek);
        assert_eq!(
            record,
            ReservationRequest {
                check_in: Some(ymd(2024, 11, 13)),
                check_out: Some(ymd(2024, 11, 18)),
                nights: Some(5),
                adults: 2,
                children: 0,
                room_type: Some("διαμερισμα".to_string()),
                language: Language::Greek,
                status: Status::Complete,
                error: None,
            }
        );
    }

    #[test]
    fn test_check_out_from_nights() {
        let raw = RawFields::default().with(Field::CheckIn, "2024-11-09").with(Field::Nights, "3");
        let record = assembler().assemble(&raw, Language::English);
        assert_eq!(record.check_out, Some(ymd(2024, 11, 12)));
        assert_eq!(record.nights, Some(3));
        assert_eq!(record.status, Status::Partial);
    }

    #[test]
    fn test_single_night_default() {
        let raw = RawFields::default().with(Field::CheckIn, "9/11");
        let record = assembler().assemble(&raw, Language::English);
        assert_eq!(record.check_out, Some(ymd(2024, 11, 10)));
        assert_eq!(record.nights, Some(1));
    }

    #[test]
    fn test_check_in_from_check_out() {
        let raw = RawFields::default().with(Field::CheckOut, "12/11");
        let record = assembler().assemble(&raw, Language::English);
        assert_eq!(record.check_in, Some(ymd(2024, 11, 11)));
        assert_eq!(record.status, Status::Partial);
    }

    #[test]
    fn test_dates_win_over_stated_nights() {
        let raw = RawFields::default()
            .with(Field::CheckIn, "9/11")
            .with(Field::CheckOut, "12/11")
            .with(Field::Nights, "7");
        assert_eq!(assembler().assemble(&raw, Language::English).nights, Some(3));
    }

    #[test]
    fn test_departure_crosses_new_year() {
        let raw = RawFields::default().with(Field::CheckIn, "28 δεκ").with(Field::CheckOut, "3 ιαν");
        let record = ReservationAssembler::new(ymd(2024, 1, 2)).assemble(&raw, Language::Greek);
        assert_eq!(record.check_in, Some(ymd(2024, 12, 28)));
        assert_eq!(record.check_out, Some(ymd(2025, 1, 3)));
        assert_eq!(record.nights, Some(6));
    }

    #[test]
    fn test_reversed_dates_are_invalid() {
        let raw = RawFields::default().with(Field::CheckIn, "12/11").with(Field::CheckOut, "9/11");
        let record = assembler().assemble(&raw, Language::English);
        assert_eq!(record.status, Status::Unparsed);
        assert_eq!(record.check_out, Some(ymd(2024, 11, 9)));
        assert!(record.error.is_some());
    }

    #[test]
    fn test_same_day_is_invalid() {
        let raw = RawFields::default().with(Field::CheckIn, "9/11/2024").with(Field::CheckOut, "09-11-2024");
        let record = assembler().assemble(&raw, Language::English);
        assert_eq!(record.status, Status::Unparsed);
        assert_eq!(
            record.error,
            Some(
                AssemblyError::InvalidDateRange { check_in: ymd(2024, 11, 9), check_out: ymd(2024, 11, 9) }
                    .to_string()
            )
        );
        assert!(record.stay().is_none());
    }

    #[test]
    fn test_bad_fragment_is_dropped() {
        let raw = RawFields::default()
            .with(Field::CheckIn, "sometime soon")
            .with(Field::CheckOut, "12/11")
            .with(Field::Adults, "0")
            .with(Field::Children, "2");
        let record = assembler().assemble(&raw, Language::English);
        assert_eq!(record.check_in, Some(ymd(2024, 11, 11)));
        assert_eq!(record.adults, 2);
        assert_eq!(record.children, 2);
    }

    #[test]
    fn test_no_dates() {
        let raw = RawFields::default().with(Field::Adults, "3").with(Field::RoomType, "loft 9/11");
        let record = assembler().assemble(&raw, Language::English);
        assert!(record.is_unparsed());
        assert_eq!(record.check_in, None);
        assert_eq!(record.adults, 3);
        assert_eq!(record.room_type, None);
        assert_eq!(record.error, None);
    }

    #[test]
    fn test_reassembly_is_stable() {
        let raw = RawFields::default().with(Field::CheckIn, "2024-11-09").with(Field::Nights, "3");
        let first = assembler().assemble(&raw, Language::English);
        let second = assembler().assemble(&RawFields::from(&first), Language::English);
        assert_eq!(second.check_in, first.check_in);
        assert_eq!(second.check_out, first.check_out);
        assert_eq!(second.nights, Some(3));
        assert_eq!((second.adults, second.children), (first.adults, first.children));
    }
}
