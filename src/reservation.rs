//! The reservation record produced for every inquiry email

use crate::error::AssemblyError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_ADULTS: u32 = 2;
pub const DEFAULT_CHILDREN: u32 = 0;

/// Language of an inquiry, as detected by the router
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Greek,
    Greeklish,
    English,
}

impl Language {
    /// Greek and Greeklish writers both get Greek replies
    pub fn replies_in_greek(&self) -> bool {
        matches!(self, Language::Greek | Language::Greeklish)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Greek => "greek",
            Language::Greeklish => "greeklish",
            Language::English => "english",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Both dates were stated and form a valid range
    Complete,
    /// One date was stated, the other defaulted to a one-night stay
    Partial,
    /// No usable date, or the dates do not form a valid range
    Unparsed,
}

/// Structured reservation request extracted from one email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationRequest {
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub nights: Option<u32>,
    pub adults: u32,
    pub children: u32,
    pub room_type: Option<String>,
    pub language: Language,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ReservationRequest {
    /// Empty record, before any stage has run
    pub fn empty(language: Language) -> Self {
        Self {
            check_in: None,
            check_out: None,
            nights: None,
            adults: DEFAULT_ADULTS,
            children: DEFAULT_CHILDREN,
            room_type: None,
            language,
            status: Status::Unparsed,
            error: None,
        }
    }

    /// Dates usable for an availability lookup
    pub fn stay(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.status, self.check_in, self.check_out) {
            (Status::Complete | Status::Partial, Some(check_in), Some(check_out)) => {
                Some((check_in, check_out))
            }
            _ => None,
        }
    }

    pub fn is_unparsed(&self) -> bool {
        self.status == Status::Unparsed
    }

    pub(crate) fn mark_invalid(&mut self, err: AssemblyError) {
        self.status = Status::Unparsed;
        self.error = Some(err.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_record_defaults() {
        let record = ReservationRequest::empty(Language::English);
        assert_eq!(record.adults, 2);
        assert_eq!(record.children, 0);
        assert!(record.is_unparsed());
        assert!(record.stay().is_none());
    }

    #[test]
    fn test_stay_requires_usable_status() {
        let mut record = ReservationRequest::empty(Language::Greek);
        record.check_in = NaiveDate::from_ymd_opt(2024, 11, 9);
        record.check_out = NaiveDate::from_ymd_opt(2024, 11, 12);
        assert!(record.stay().is_none());

        record.status = Status::Partial;
        assert_eq!(record.stay(), Some((record.check_in.unwrap(), record.check_out.unwrap())));
    }

    #[test]
    fn test_language_serializes_lowercase() {
        let json = serde_json::to_string(&Language::Greeklish).unwrap();
        assert_eq!(json, "\"greeklish\"");
        assert!(Language::Greeklish.replies_in_greek());
        assert!(!Language::English.replies_in_greek());
    }
}
