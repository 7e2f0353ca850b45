//! Optional language-model front end to the cascade
//!
//! A [`TextStandardizer`] rewrites a free-form body into labeled lines; the
//! labeled strategy then reads those. Any model failure, or an answer without
//! dates, falls back to the regex cascade.

use crate::config::ExtractionConfig;
use crate::error::ModelError;
use crate::parser::fields::RawFields;
use crate::parser::strategies::LabeledStrategy;
use crate::parser::traits::{FieldExtractor, Strategy};
use crate::parser::utils::{normalize, sanitize_user_input};
use crate::reservation::Language;
use chrono::{Local, NaiveDate};
use log::{debug, warn};
use lru::LruCache;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};
use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::Duration;

const MAX_INPUT_CHARS: usize = 4000;

const SYSTEM_PROMPT: &str = r#"You read hotel reservation inquiries written in English, Greek or Greek written in Latin letters.
Answer with exactly these lines and nothing else, leaving out any line whose value the guest did not give:
Check-in: YYYY-MM-DD
Check-out: YYYY-MM-DD
Nights: <number>
Adults: <number>
Children: <number>
Room type: <text>
Rules:
1. The first line of the message gives today's date; when the guest gave no year, use the first such date that is not before today
2. Convert spelled-out numbers to digits
3. Do not guess missing values"#;

/// Rewrites an inquiry body into labeled lines
pub trait TextStandardizer: Send + Sync {
    fn standardize(&self, body: &str) -> Result<String, ModelError>;
}

/// Chat-completions client for any OpenAI-compatible endpoint
pub struct OpenAiStandardizer {
    api_url: String,
    model: String,
    api_key: SecretString,
    timeout: Duration,
    cache: Mutex<LruCache<String, String>>,
}

impl OpenAiStandardizer {
    pub fn new(config: &ExtractionConfig, api_key: Option<SecretString>) -> Result<Self, ModelError> {
        let api_key = api_key.ok_or(ModelError::MissingApiKey)?;
        let capacity = NonZeroUsize::new(config.cache_size).unwrap_or(NonZeroUsize::MIN);
        Ok(Self {
            api_url: config.api_url.clone(),
            model: config.model.clone(),
            api_key,
            timeout: Duration::from_secs(config.timeout_secs),
            cache: Mutex::new(LruCache::new(capacity)),
        })
    }

    fn cached(&self, key: &str) -> Option<String> {
        self.cache.lock().ok()?.get(key).cloned()
    }

    fn remember(&self, key: String, answer: String) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.put(key, answer);
        }
    }

    fn request(&self, input: &str) -> Result<String, ModelError> {
        // The blocking client owns a runtime, so it is built and dropped on
        // the calling (blocking) thread
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| ModelError::Request(e.to_string()))?;

        debug!("Requesting standardization from {}", self.api_url);
        let response = client
            .post(&self.api_url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&json!({
                "model": self.model,
                "messages": [
                    { "role": "system", "content": SYSTEM_PROMPT },
                    { "role": "user", "content": input }
                ],
                "temperature": 0.0,
                "max_tokens": 150
            }))
            .send()
            .map_err(|e| ModelError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ModelError::Status(response.status().as_u16()));
        }

        let body: Value = response.json().map_err(|e| ModelError::Request(e.to_string()))?;
        parse_completion(&body)
    }
}

/// User message: today's date, then the sanitized body
fn user_message(body: &str, today: NaiveDate) -> String {
    let body: String = sanitize_user_input(body).chars().take(MAX_INPUT_CHARS).collect();
    format!("Today: {}\n\n{}", today.format("%Y-%m-%d"), body)
}

impl TextStandardizer for OpenAiStandardizer {
    fn standardize(&self, body: &str) -> Result<String, ModelError> {
        let input = user_message(body, Local::now().date_naive());
        if let Some(answer) = self.cached(&input) {
            debug!("Using cached standardization");
            return Ok(answer);
        }
        let answer = self.request(&input)?;
        self.remember(input, answer.clone());
        Ok(answer)
    }
}

/// Content of the first choice of a chat-completions response
fn parse_completion(body: &Value) -> Result<String, ModelError> {
    body["choices"][0]["message"]["content"]
        .as_str()
        .map(|s| s.trim().to_string())
        .ok_or(ModelError::InvalidResponse)
}

/// Field extractor that standardizes first and falls back to another
/// extractor (the regex cascade) when that yields no dates
pub struct StandardizingExtractor<F: FieldExtractor> {
    standardizer: Box<dyn TextStandardizer>,
    fallback: F,
}

impl<F: FieldExtractor> StandardizingExtractor<F> {
    pub fn new(standardizer: Box<dyn TextStandardizer>, fallback: F) -> Self {
        Self { standardizer, fallback }
    }

    fn standardized(&self, input: &str, language: Language, cascade: impl Fn() -> RawFields) -> RawFields {
        match self.standardizer.standardize(input) {
            Ok(answer) => {
                debug!("Standardized body: {:?}", answer);
                let labeled = LabeledStrategy.try_extract(&normalize(&answer, language));
                match labeled {
                    Some(mut raw) if raw.has_date() => {
                        raw.fill_gaps_from(&cascade());
                        return raw;
                    }
                    _ => debug!("Standardized text has no dates, using the cascade"),
                }
            }
            Err(err) => warn!("Standardizer failed, using the cascade: {}", err),
        }
        cascade()
    }
}

impl<F: FieldExtractor> FieldExtractor for StandardizingExtractor<F> {
    fn extract(&self, text: &str, language: Language) -> RawFields {
        self.standardized(text, language, || self.fallback.extract(text, language))
    }

    /// The model gets the body with its case and accents intact
    fn extract_body(&self, body: &str, language: Language) -> RawFields {
        self.standardized(body, language, || self.fallback.extract_body(body, language))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::fields::Field;
    use crate::parser::CascadeExtractor;

    use crate::parser::ExtractionPipeline;
    use crate::reservation::Status;
    use std::sync::Arc;

    /// Answers with a fixed text and records what it was asked
    struct Canned {
        answer: Option<String>,
        seen: Arc<Mutex<Vec<String>>>,
    }

    impl TextStandardizer for Canned {
        fn standardize(&self, body: &str) -> Result<String, ModelError> {
            self.seen.lock().unwrap().push(body.to_string());
            self.answer.clone().ok_or(ModelError::InvalidResponse)
        }
    }

    fn canned(answer: Result<&str, ()>) -> Canned {
        Canned { answer: answer.ok().map(String::from), seen: Arc::default() }
    }

    fn extractor(answer: Result<&str, ()>) -> StandardizingExtractor<CascadeExtractor> {
        StandardizingExtractor::new(Box::new(canned(answer)), CascadeExtractor::new())
    }

    #[test]
    fn test_uses_model_answer() {
        let answer = "Check-in: 2024-11-13\nCheck-out: 2024-11-18\nAdults: 3\nRoom type: Apartment";
        let raw = extractor(Ok(answer)).extract("κατι ασαφες για 4 ατομα", Language::Greek);
        assert_eq!(raw.get(Field::CheckIn), Some("2024-11-13"));
        assert_eq!(raw.get(Field::CheckOut), Some("2024-11-18"));
        assert_eq!(raw.get(Field::Adults), Some("3"));
        assert_eq!(raw.get(Field::RoomType), Some("apartment"));
    }

    #[test]
    fn test_falls_back_on_error() {
        let raw = extractor(Err(())).extract("from 9/11 to 12/11", Language::English);
        assert_eq!(raw.get(Field::CheckIn), Some("9/11"));
    }

    #[test]
    fn test_falls_back_without_dates() {
        let raw = extractor(Ok("Adults: 2")).extract("10/1 one apartment 3 nights", Language::English);
        assert_eq!(raw.get(Field::CheckIn), Some("10/1"));
        assert_eq!(raw.get(Field::RoomType), Some("one apartment"));
    }

    #[test]
    fn test_model_reads_the_body_as_written() {
        let standardizer = canned(Ok("Check-in: 2024-11-13\nCheck-out: 2024-11-18"));
        let seen = Arc::clone(&standardizer.seen);
        let extractor = StandardizingExtractor::new(Box::new(standardizer), CascadeExtractor::new());
        let pipeline = ExtractionPipeline::new()
            .with_reference_date(NaiveDate::from_ymd_opt(2024, 11, 1).unwrap())
            .with_extractor(Box::new(extractor));

        let record = pipeline.run("Θέλουμε ένα Διαμέρισμα στις 13 Νοεμβρίου για πέντε βράδια");
        assert_eq!(
            *seen.lock().unwrap(),
            vec!["Θέλουμε ένα Διαμέρισμα στις 13 Νοεμβρίου για πέντε βράδια".to_string()]
        );
        assert_eq!(record.check_in, NaiveDate::from_ymd_opt(2024, 11, 13));
        assert_eq!(record.check_out, NaiveDate::from_ymd_opt(2024, 11, 18));
        assert_eq!(record.status, Status::Complete);
    }

    #[test]
    fn test_user_message_carries_today() {
        let today = NaiveDate::from_ymd_opt(2024, 11, 1).unwrap();
        assert_eq!(user_message("Room for 2\u{0007}", today), "Today: 2024-11-01\n\nRoom for 2");
    }

    #[test]
    fn test_parse_completion() {
        let body = json!({ "choices": [{ "message": { "content": " Check-in: 1/2 \n" } }] });
        assert_eq!(parse_completion(&body).unwrap(), "Check-in: 1/2");
        assert!(matches!(parse_completion(&json!({})), Err(ModelError::InvalidResponse)));
    }

    #[test]
    fn test_missing_api_key() {
        let result = OpenAiStandardizer::new(&ExtractionConfig::default(), None);
        assert!(matches!(result, Err(ModelError::MissingApiKey)));
    }
}
