//! Live availability and prices from the hotel's booking engine

use crate::config::BookingConfig;
use crate::error::ScrapeError;
use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use serde::Serialize;
use std::fmt;
use url::Url;

static PRICE: Lazy<Regex> = Lazy::new(|| Regex::new(r"([$€])([\d,]+(?:\.\d{2})?)").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CancellationPolicy {
    NonRefundable,
    FreeCancellation,
}

impl fmt::Display for CancellationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CancellationPolicy::NonRefundable => f.write_str("Non-refundable"),
            CancellationPolicy::FreeCancellation => f.write_str("Free cancellation"),
        }
    }
}

/// One bookable rate for one room type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceQuote {
    pub room_type: String,
    pub currency: String,
    pub price: f64,
    pub policy: CancellationPolicy,
    pub free_cancellation_until: Option<NaiveDate>,
}

#[async_trait]
pub trait AvailabilityProvider: Send + Sync {
    async fn query(
        &self,
        check_in: NaiveDate,
        check_out: NaiveDate,
        adults: u32,
        children: u32,
    ) -> Result<Vec<PriceQuote>, ScrapeError>;
}

/// Scrapes the rate table of a reserve-online booking page
pub struct ReserveOnlineProvider {
    client: reqwest::Client,
    config: BookingConfig,
}

impl ReserveOnlineProvider {
    pub fn new(config: BookingConfig) -> Result<Self, ScrapeError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    /// Booking page for one stay in one currency
    pub fn booking_url(
        &self,
        check_in: NaiveDate,
        check_out: NaiveDate,
        adults: u32,
        children: u32,
        currency: &str,
    ) -> Result<Url, ScrapeError> {
        let nights = (check_out - check_in).num_days();
        if nights <= 0 {
            return Err(ScrapeError::InvalidStay(format!("{} to {}", check_in, check_out)));
        }

        let mut url = Url::parse(&self.config.base_url)?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("checkin", &check_in.format("%Y-%m-%d").to_string())
                .append_pair("rooms", &self.config.rooms.to_string())
                .append_pair("nights", &nights.to_string())
                .append_pair("adults", &adults.to_string())
                .append_pair("src", &self.config.source_id);
            if children > 0 {
                query.append_pair("children", &children.to_string());
            }
            query.append_pair("currency", currency);
        }
        Ok(url)
    }

    async fn fetch_page(&self, url: Url) -> Result<String, ScrapeError> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ScrapeError::Status(response.status().as_u16()));
        }
        Ok(response.text().await?)
    }
}

#[async_trait]
impl AvailabilityProvider for ReserveOnlineProvider {
    async fn query(
        &self,
        check_in: NaiveDate,
        check_out: NaiveDate,
        adults: u32,
        children: u32,
    ) -> Result<Vec<PriceQuote>, ScrapeError> {
        let mut quotes = Vec::new();
        let mut last_error = None;

        for currency in &self.config.currencies {
            let url = self.booking_url(check_in, check_out, adults, children, currency)?;
            info!("Fetching availability in {} from {}", currency, url);
            match self.fetch_page(url).await {
                Ok(html) => {
                    let found = parse_rate_table(&html, currency, check_in, self.config.free_cancellation_days);
                    info!("Found {} rate(s) in {}", found.len(), currency);
                    quotes.extend(found);
                }
                Err(err) => {
                    warn!("Availability lookup in {} failed: {}", currency, err);
                    last_error = Some(err);
                }
            }
        }

        match last_error {
            Some(err) if quotes.is_empty() => Err(err),
            _ => Ok(quotes),
        }
    }
}

/// Room names come from `td.name`; each room owns the next two `td.price`
/// cells, non-refundable first
pub fn parse_rate_table(
    html: &str,
    currency: &str,
    check_in: NaiveDate,
    free_cancellation_days: i64,
) -> Vec<PriceQuote> {
    let document = Html::parse_document(html);
    let (Ok(name_sel), Ok(price_sel)) = (Selector::parse("td.name"), Selector::parse("td.price")) else {
        return Vec::new();
    };

    let names: Vec<String> = document
        .select(&name_sel)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .collect();
    let prices: Vec<String> = document.select(&price_sel).map(|el| el.text().collect::<String>()).collect();
    debug!("Rate table: {} room name(s), {} price cell(s)", names.len(), prices.len());

    let deadline = check_in - Duration::days(free_cancellation_days);
    let mut quotes = Vec::new();
    for (room_type, cells) in names.iter().zip(prices.chunks(2)) {
        let amounts = cells.iter().enumerate().filter_map(|(i, cell)| Some((i, parse_price(cell)?)));
        for (i, price) in amounts {
            let (policy, until) = if i == 0 {
                (CancellationPolicy::NonRefundable, None)
            } else {
                (CancellationPolicy::FreeCancellation, Some(deadline))
            };
            quotes.push(PriceQuote {
                room_type: room_type.clone(),
                currency: currency.to_string(),
                price,
                policy,
                free_cancellation_until: until,
            });
        }
    }
    quotes
}

/// "€1,234.50" -> 1234.5
fn parse_price(text: &str) -> Option<f64> {
    let caps = PRICE.captures(text)?;
    caps[2].replace(',', "").parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn provider() -> ReserveOnlineProvider {
        let config = BookingConfig { base_url: "https://hotel.reserve-online.net/".to_string(), ..Default::default() };
        ReserveOnlineProvider::new(config).unwrap()
    }

    #[test]
    fn test_booking_url() {
        let url = provider().booking_url(ymd(2024, 11, 9), ymd(2024, 11, 12), 2, 0, "EUR").unwrap();
        assert_eq!(
            url.as_str(),
            "https://hotel.reserve-online.net/?checkin=2024-11-09&rooms=1&nights=3&adults=2&src=107&currency=EUR"
        );

        let url = provider().booking_url(ymd(2024, 11, 9), ymd(2024, 11, 10), 2, 1, "USD").unwrap();
        assert!(url.as_str().contains("&children=1&currency=USD"));
    }

    #[test]
    fn test_booking_url_rejects_empty_stay() {
        let result = provider().booking_url(ymd(2024, 11, 9), ymd(2024, 11, 9), 2, 0, "EUR");
        assert!(matches!(result, Err(ScrapeError::InvalidStay(_))));
    }

    #[test]
    fn test_parse_rate_table() {
        let html = r#"<table>
            <tr><td class="name"> Loft </td><td class="price">€1,200.00</td><td class="price">€1,350.50</td></tr>
            <tr><td class="name">Studio</td><td class="price">€300</td><td class="price">sold out</td></tr>
        </table>"#;
        let quotes = parse_rate_table(html, "EUR", ymd(2024, 12, 30), 20);
        assert_eq!(quotes.len(), 3);
        assert_eq!(
            quotes[0],
            PriceQuote {
                room_type: "Loft".to_string(),
                currency: "EUR".to_string(),
                price: 1200.0,
                policy: CancellationPolicy::NonRefundable,
                free_cancellation_until: None,
            }
        );
        assert_eq!(quotes[1].price, 1350.5);
        assert_eq!(quotes[1].policy, CancellationPolicy::FreeCancellation);
        assert_eq!(quotes[1].free_cancellation_until, Some(ymd(2024, 12, 10)));
        assert_eq!(quotes[2].room_type, "Studio");
    }

    #[test]
    fn test_empty_page() {
        assert!(parse_rate_table("<html></html>", "USD", ymd(2024, 12, 30), 20).is_empty());
    }
}
