use chrono::NaiveDate;
use innkeeper::parser::{Field, RawFields, ReservationAssembler};
use innkeeper::{ExtractionPipeline, Language, ReservationRequest, Status};
use pretty_assertions::assert_eq;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn pipeline(today: NaiveDate) -> ExtractionPipeline {
    ExtractionPipeline::new().with_reference_date(today)
}

#[test]
fn test_greek_natural_phrase() {
    let record = pipeline(ymd(2024, 10, 1)).run("ενα διαμερισμα 13 νοεμ εως 18 νοεμ");
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
fn test_concise_english_rolls_into_next_year() {
    let record = pipeline(ymd(2024, 12, 1)).run("10/1 ONE APARTMENT 3 NIGHTS");
    assert_eq!(record.language, Language::English);
    assert_eq!(record.check_in, Some(ymd(2025, 1, 10)));
    assert_eq!(record.check_out, Some(ymd(2025, 1, 13)));
    assert_eq!(record.nights, Some(3));
    assert_eq!(record.room_type.as_deref(), Some("one apartment"));
    assert_eq!(record.status, Status::Partial);
}

#[test]
fn test_unparsable_body() {
    let record = pipeline(ymd(2024, 12, 1)).run("Hello, do you have availability?");
    assert_eq!(record.status, Status::Unparsed);
    assert_eq!(record.check_in, None);
    assert_eq!(record.check_out, None);
    assert_eq!(record.adults, 2);
    assert_eq!(record.children, 0);
}

#[test]
fn test_greeklish_range_with_party() {
    let record = pipeline(ymd(2024, 10, 1)).run("thelo ena diamerisma apo 13/11 mexri 18/11 gia 4 atoma");
    assert_eq!(record.language, Language::Greeklish);
    assert_eq!(record.stay(), Some((ymd(2024, 11, 13), ymd(2024, 11, 18))));
    assert_eq!(record.adults, 4);
}

#[test]
fn test_forwarded_headers_are_ignored() {
    let body = "---------- Forwarded message ---------\n\
                From: Guest <guest@example.com>\n\
                Date: Mon, 4 Nov 2024\n\
                Subject: Booking 1/1/2020\n\
                \n\
                Check-in: 9/11\n\
                Check-out: 12/11\n\
                Adults: 3\n\
                \n\
                Sent from my phone";
    let record = pipeline(ymd(2024, 11, 1)).run(body);
    assert_eq!(record.stay(), Some((ymd(2024, 11, 9), ymd(2024, 11, 12))));
    assert_eq!(record.adults, 3);
    assert_eq!(record.status, Status::Complete);
}

#[test]
fn test_nights_round_trip() {
    let assembler = ReservationAssembler::new(ymd(2024, 11, 1));
    let raw = RawFields::default().with(Field::CheckIn, "2024-11-09").with(Field::Nights, "3");
    let record = assembler.assemble(&raw, Language::English);
    assert_eq!(record.check_out, Some(ymd(2024, 11, 12)));

    let dates_only = RawFields::default()
        .with(Field::CheckIn, "2024-11-09")
        .with(Field::CheckOut, "2024-11-12");
    assert_eq!(assembler.assemble(&dates_only, Language::English).nights, Some(3));
}

#[test]
fn test_defaults_are_stable_on_reassembly() {
    let assembler = ReservationAssembler::new(ymd(2024, 11, 1));
    let raw = RawFields::default()
        .with(Field::CheckIn, "9/11")
        .with(Field::CheckOut, "12/11")
        .with(Field::Children, "1");
    let first = assembler.assemble(&raw, Language::English);
    let second = assembler.assemble(&RawFields::from(&first), Language::English);
    assert_eq!((second.adults, second.children), (first.adults, first.children));
    assert_eq!(second, first);
}

#[test]
fn test_same_day_is_invalid() {
    let record = pipeline(ymd(2024, 11, 1)).run("from 9/11 to 9/11");
    assert_eq!(record.status, Status::Unparsed);
    assert!(record.error.is_some());
    assert!(record.stay().is_none());
}

#[test]
fn test_labeled_check_in_with_night_count() {
    let record = pipeline(ymd(2024, 11, 1)).run("Check-in: 9/11 for 3 nights");
    assert_eq!(record.check_in, Some(ymd(2024, 11, 9)));
    assert_eq!(record.check_out, Some(ymd(2024, 11, 12)));
    assert_eq!(record.nights, Some(3));
    assert_eq!(record.room_type, None);
}

#[test]
fn test_night_count_on_its_own_line() {
    let record = pipeline(ymd(2024, 11, 1)).run("Arrival 9/11\n3 nights");
    assert_eq!(record.check_in, Some(ymd(2024, 11, 9)));
    assert_eq!(record.nights, Some(3));
    assert_eq!(record.check_out, Some(ymd(2024, 11, 12)));
}

#[test]
fn test_labeled_check_in_with_until() {
    let record = pipeline(ymd(2024, 11, 1)).run("Check-in: 9/11 until 12/11");
    assert_eq!(record.stay(), Some((ymd(2024, 11, 9), ymd(2024, 11, 12))));
    assert_eq!(record.status, Status::Complete);
}

#[test]
fn test_english_shared_month_range() {
    let record = pipeline(ymd(2024, 11, 1)).run("We would like a room from 10 to 15 December");
    assert_eq!(record.stay(), Some((ymd(2024, 12, 10), ymd(2024, 12, 15))));
    assert_eq!(record.nights, Some(5));
    assert_eq!(record.status, Status::Complete);
}

#[test]
fn test_english_words_that_start_like_months() {
    let record = pipeline(ymd(2024, 11, 1)).run("10/11 1 junior suite 3 nights");
    assert_eq!(record.check_in, Some(ymd(2024, 11, 10)));
    assert_eq!(record.room_type.as_deref(), Some("1 junior suite"));

    let record = pipeline(ymd(2024, 11, 1)).run("Room: 2 separate rooms");
    assert_eq!(record.room_type.as_deref(), Some("2 separate rooms"));
}

#[test]
fn test_clock_time_does_not_replace_the_date() {
    let record = pipeline(ymd(2024, 11, 1)).run("Arrival: 12 May, flight lands 11.05\nDeparture: 15 May");
    assert_eq!(record.stay(), Some((ymd(2025, 5, 12), ymd(2025, 5, 15))));
    assert_eq!(record.nights, Some(3));
}
