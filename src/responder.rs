//! Reply composition: one outbound message per inquiry

use crate::availability::{CancellationPolicy, PriceQuote};
use crate::config::Recipient;
use crate::mail::RawEmail;
use crate::notifier::OutboundMessage;
use crate::reservation::ReservationRequest;
use chrono::NaiveDate;
use log::debug;
use std::fmt::Write;

const UNKNOWN_SENDER: &str = "unknown sender";

/// Which template an inquiry gets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    /// Dates parsed and the provider returned rates
    Availability,
    /// Dates parsed but no rates could be fetched
    Partial,
    /// No usable dates, always sent to staff
    ManualReview,
}

impl ReplyKind {
    pub fn select(record: &ReservationRequest, quotes: &[PriceQuote]) -> Self {
        match record.stay() {
            None => ReplyKind::ManualReview,
            Some(_) if quotes.is_empty() => ReplyKind::Partial,
            Some(_) => ReplyKind::Availability,
        }
    }
}

pub struct Responder {
    staff_email: String,
    recipient: Recipient,
}

impl Responder {
    pub fn new(staff_email: impl Into<String>, recipient: Recipient) -> Self {
        Self { staff_email: staff_email.into(), recipient }
    }

    /// Compose the reply for one inquiry. `quotes` is empty when the lookup
    /// failed or was skipped.
    pub fn compose(&self, email: &RawEmail, record: &ReservationRequest, quotes: &[PriceQuote]) -> OutboundMessage {
        let kind = ReplyKind::select(record, quotes);
        let sender = email.sender.as_deref().unwrap_or(UNKNOWN_SENDER);
        let greek = record.language.replies_in_greek();
        debug!("Composing {:?} reply for {} (greek: {})", kind, sender, greek);

        let (to, subject, body) = match kind {
            ReplyKind::ManualReview => (
                self.staff_email.clone(),
                "Error Processing Reservation Request".to_string(),
                manual_review_body(record, &email.body),
            ),
            ReplyKind::Availability | ReplyKind::Partial => {
                let to_customer = self.recipient == Recipient::Customer && email.sender.is_some();
                let to = if to_customer { sender.to_string() } else { self.staff_email.clone() };
                let mut body = String::new();
                let audience = if to_customer { Audience::Customer } else { Audience::Staff(sender) };
                write_intro(&mut body, kind, audience, greek);
                write_details(&mut body, record, greek);
                if kind == ReplyKind::Availability {
                    write_quotes(&mut body, quotes, greek);
                }
                write_closing(&mut body, kind, audience, greek);
                (to, subject_line(kind, sender, greek), body)
            }
        };

        OutboundMessage { to, subject, body, original: Some(email.body.clone()) }
    }
}

#[derive(Clone, Copy)]
enum Audience<'a> {
    Staff(&'a str),
    Customer,
}

fn subject_line(kind: ReplyKind, sender: &str, greek: bool) -> String {
    match (kind, greek) {
        (ReplyKind::Partial, true) => format!("Νέο Αίτημα Κράτησης (Μερικές Πληροφορίες) - {sender}"),
        (ReplyKind::Partial, false) => format!("New Reservation Request (Partial Information) - {sender}"),
        (_, true) => format!("Νέο Αίτημα Κράτησης - {sender}"),
        (_, false) => format!("New Reservation Request - {sender}"),
    }
}

fn write_intro(body: &mut String, kind: ReplyKind, audience: Audience<'_>, greek: bool) {
    let line = match (audience, kind, greek) {
        (Audience::Staff(sender), ReplyKind::Partial, true) => format!(
            "Λήφθηκε νέο αίτημα κράτησης από {sender}, αλλά δεν ήταν δυνατή η παροχή πλήρων πληροφοριών διαθεσιμότητας."
        ),
        (Audience::Staff(sender), ReplyKind::Partial, false) => format!(
            "A new reservation request has been received from {sender}, but full availability information could not be provided."
        ),
        (Audience::Staff(sender), _, true) => format!("Λήφθηκε νέο αίτημα κράτησης από {sender}."),
        (Audience::Staff(sender), _, false) => {
            format!("A new reservation request has been received from {sender}.")
        }
        (Audience::Customer, _, true) => "Σας ευχαριστούμε για το αίτημα κράτησης.".to_string(),
        (Audience::Customer, _, false) => "Thank you for your reservation request.".to_string(),
    };
    let _ = writeln!(body, "{line}\n");
}

fn write_details(body: &mut String, record: &ReservationRequest, greek: bool) {
    let labels = if greek {
        ["Λεπτομέρειες κράτησης:", "Ημερομηνία άφιξης", "Ημερομηνία αναχώρησης", "Αριθμός ενηλίκων", "Αριθμός παιδιών"]
    } else {
        ["Reservation details:", "Check-in date", "Check-out date", "Number of adults", "Number of children"]
    };
    let _ = writeln!(body, "{}", labels[0]);
    let _ = writeln!(body, "{}: {}", labels[1], iso(record.check_in));
    let _ = writeln!(body, "{}: {}", labels[2], iso(record.check_out));
    let _ = writeln!(body, "{}: {}", labels[3], record.adults);
    let _ = writeln!(body, "{}: {}", labels[4], record.children);
    if let Some(room) = &record.room_type {
        let label = if greek { "Τύπος δωματίου" } else { "Room type" };
        let _ = writeln!(body, "{label}: {room}");
    }
}

/// Quotes grouped per currency, in the order the provider returned them
fn write_quotes(body: &mut String, quotes: &[PriceQuote], greek: bool) {
    let _ = writeln!(body, "\n{}", if greek { "Διαθέσιμες επιλογές:" } else { "Available options:" });

    let mut currencies: Vec<&str> = Vec::new();
    for quote in quotes {
        if !currencies.contains(&quote.currency.as_str()) {
            currencies.push(quote.currency.as_str());
        }
    }

    for currency in currencies {
        let heading = if greek { "Τιμές σε" } else { "Prices in" };
        let _ = writeln!(body, "\n{heading} {currency}:");
        let mut current_room: Option<&str> = None;
        for quote in quotes.iter().filter(|q| q.currency == currency) {
            if current_room != Some(quote.room_type.as_str()) {
                let label = if greek { "Τύπος δωματίου" } else { "Room type" };
                let _ = writeln!(body, "\n{label}: {}", quote.room_type);
                current_room = Some(quote.room_type.as_str());
            }
            let _ = writeln!(body, "  {}: {:.2} {}", if greek { "Τιμή" } else { "Price" }, quote.price, currency);
            let _ = writeln!(body, "  {}: {}", if greek { "Πολιτική ακύρωσης" } else { "Cancellation policy" }, policy_text(quote.policy, greek));
            if let Some(until) = quote.free_cancellation_until {
                let label = if greek { "Δωρεάν ακύρωση έως" } else { "Free cancellation until" };
                let _ = writeln!(body, "  {label}: {}", until.format("%d/%m/%Y"));
            }
        }
    }
}

fn write_closing(body: &mut String, kind: ReplyKind, audience: Audience<'_>, greek: bool) {
    let line = match (audience, kind, greek) {
        (Audience::Staff(_), ReplyKind::Partial, true) => {
            "Παρακαλώ επεξεργαστείτε αυτό το αίτημα χειροκίνητα και επικοινωνήστε με τον πελάτη το συντομότερο δυνατό."
        }
        (Audience::Staff(_), ReplyKind::Partial, false) => {
            "Please process this request manually and contact the customer as soon as possible."
        }
        (Audience::Staff(_), _, true) => {
            "Παρακαλώ επεξεργαστείτε αυτό το αίτημα και απαντήστε στον πελάτη αναλόγως."
        }
        (Audience::Staff(_), _, false) => {
            "Please process this request and respond to the customer as appropriate."
        }
        (Audience::Customer, ReplyKind::Partial, true) => {
            "Θα επικοινωνήσουμε μαζί σας σύντομα με τη διαθεσιμότητα για τις ημερομηνίες σας."
        }
        (Audience::Customer, ReplyKind::Partial, false) => {
            "We will contact you shortly with availability for your dates."
        }
        (Audience::Customer, _, true) => {
            "Απαντήστε σε αυτό το μήνυμα για να επιβεβαιώσετε την κράτησή σας."
        }
        (Audience::Customer, _, false) => "Reply to this message to confirm your booking.",
    };
    let _ = writeln!(body, "\n{line}");
}

fn manual_review_body(record: &ReservationRequest, raw_body: &str) -> String {
    let mut body = String::from(
        "An error occurred while processing a reservation request. The system was unable to parse the reservation dates.\n\n",
    );
    if let Some(reason) = &record.error {
        let _ = writeln!(body, "Reason: {reason}\n");
    }
    let _ = writeln!(body, "Parsed reservation info:");
    let _ = writeln!(body, "{}\n", serde_json::to_string_pretty(record).unwrap_or_else(|_| format!("{record:?}")));
    let _ = writeln!(body, "Original email body:\n{raw_body}\n");
    let _ = writeln!(body, "Please review this request manually and respond to the customer as appropriate.");
    body
}

fn policy_text(policy: CancellationPolicy, greek: bool) -> String {
    match (policy, greek) {
        (CancellationPolicy::NonRefundable, true) => "Χωρίς επιστροφή χρημάτων".to_string(),
        (CancellationPolicy::FreeCancellation, true) => "Δωρεάν ακύρωση".to_string(),
        (policy, false) => policy.to_string(),
    }
}

fn iso(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reservation::{Language, Status};
    use pretty_assertions::assert_eq;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn inquiry(body: &str) -> RawEmail {
        RawEmail {
            id: "1".to_string(),
            sender: Some("guest@example.com".to_string()),
            subject: Some("Booking".to_string()),
            body: body.to_string(),
            decode_error: None,
        }
    }

    fn complete(language: Language) -> ReservationRequest {
        ReservationRequest {
            check_in: Some(ymd(2024, 12, 30)),
            check_out: Some(ymd(2025, 1, 2)),
            nights: Some(3),
            room_type: Some("loft".to_string()),
            status: Status::Complete,
            ..ReservationRequest::empty(language)
        }
    }

    fn quote(room: &str, currency: &str, price: f64, policy: CancellationPolicy) -> PriceQuote {
        let until = (policy == CancellationPolicy::FreeCancellation).then(|| ymd(2024, 12, 10));
        PriceQuote {
            room_type: room.to_string(),
            currency: currency.to_string(),
            price,
            policy,
            free_cancellation_until: until,
        }
    }

    #[test]
    fn test_availability_reply_groups_currencies() {
        let quotes = vec![
            quote("Loft", "EUR", 1200.0, CancellationPolicy::NonRefundable),
            quote("Loft", "EUR", 1350.5, CancellationPolicy::FreeCancellation),
            quote("Loft", "USD", 1300.0, CancellationPolicy::NonRefundable),
        ];
        let responder = Responder::new("staff@hotel.gr", Recipient::Staff);
        let reply = responder.compose(&inquiry("from 30/12 to 2/1"), &complete(Language::English), &quotes);

        assert_eq!(reply.to, "staff@hotel.gr");
        assert_eq!(reply.subject, "New Reservation Request - guest@example.com");
        assert_eq!(reply.original.as_deref(), Some("from 30/12 to 2/1"));
        assert!(reply.body.contains("Check-in date: 2024-12-30"));
        assert!(reply.body.contains("Check-out date: 2025-01-02"));
        assert!(reply.body.contains("Prices in EUR:"));
        assert!(reply.body.contains("  Price: 1350.50 EUR"));
        assert!(reply.body.contains("  Free cancellation until: 10/12/2024"));
        assert!(reply.body.find("Prices in EUR:") < reply.body.find("Prices in USD:"));
        assert_eq!(reply.body.matches("Room type: Loft").count(), 2);
    }

    #[test]
    fn test_partial_reply_in_greek() {
        let responder = Responder::new("staff@hotel.gr", Recipient::Staff);
        let reply = responder.compose(&inquiry("apo 30/12 mexri 2/1"), &complete(Language::Greeklish), &[]);
        assert_eq!(reply.subject, "Νέο Αίτημα Κράτησης (Μερικές Πληροφορίες) - guest@example.com");
        assert!(reply.body.contains("Ημερομηνία άφιξης: 2024-12-30"));
        assert!(reply.body.contains("χειροκίνητα"));
        assert!(!reply.body.contains("Διαθέσιμες επιλογές"));
    }

    #[test]
    fn test_manual_review_always_goes_to_staff() {
        let mut record = ReservationRequest::empty(Language::English);
        record.error = Some("check-out must be after check-in".to_string());
        let responder = Responder::new("staff@hotel.gr", Recipient::Customer);
        let reply = responder.compose(&inquiry("hello there"), &record, &[]);

        assert_eq!(ReplyKind::select(&record, &[]), ReplyKind::ManualReview);
        assert_eq!(reply.to, "staff@hotel.gr");
        assert_eq!(reply.subject, "Error Processing Reservation Request");
        assert!(reply.body.contains("Reason: check-out must be after check-in"));
        assert!(reply.body.contains("Original email body:\nhello there"));
    }

    #[test]
    fn test_customer_recipient() {
        let quotes = vec![quote("Studio", "EUR", 300.0, CancellationPolicy::NonRefundable)];
        let responder = Responder::new("staff@hotel.gr", Recipient::Customer);
        let reply = responder.compose(&inquiry("30/12 - 2/1"), &complete(Language::English), &quotes);
        assert_eq!(reply.to, "guest@example.com");
        assert!(reply.body.starts_with("Thank you for your reservation request."));

        let mut anonymous = inquiry("30/12 - 2/1");
        anonymous.sender = None;
        let reply = responder.compose(&anonymous, &complete(Language::English), &quotes);
        assert_eq!(reply.to, "staff@hotel.gr");
    }
}
