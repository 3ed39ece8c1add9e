//! # Treasury Rates
//!
//! Outbound adapter for the Fiscal Data Treasury "Rates of Exchange" API.
//!
//! Implements the [`RateExchangeProvider`] port by querying
//! `v1/accounting/od/rates_of_exchange`, filtered by country and record
//! date, sorted by effective date descending. The base URL is overridable
//! so tests and local stubs can point the client elsewhere.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use purchases_types::{RateExchangeProvider, RateLookupError, RateRecord};

/// Production endpoint of the Fiscal Data Treasury API.
pub const DEFAULT_BASE_URL: &str = "https://api.fiscaldata.treasury.gov/services/api/fiscal_service";

const RATES_OF_EXCHANGE_PATH: &str = "/v1/accounting/od/rates_of_exchange";

/// HTTP client for the Treasury rates-of-exchange dataset.
pub struct TreasuryRateClient {
    base_url: String,
    http: reqwest::Client,
}

impl TreasuryRateClient {
    /// Creates a client against the production Treasury API.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a client against a custom base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Builds the dataset filter expression for one country and cutoff date.
    fn country_filter(country: &str, cutoff: NaiveDate) -> String {
        format!(
            "country:eq:{},record_date:gt:{}",
            country,
            cutoff.format("%Y-%m-%d")
        )
    }
}

impl Default for TreasuryRateClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl RateExchangeProvider for TreasuryRateClient {
    async fn fetch_rates(
        &self,
        country: &str,
        cutoff: NaiveDate,
    ) -> Result<Vec<RateRecord>, RateLookupError> {
        let filter = Self::country_filter(country, cutoff);
        tracing::info!(country, cutoff = %cutoff, "fetching treasury exchange rates");

        let response = self
            .http
            .get(format!("{}{}", self.base_url, RATES_OF_EXCHANGE_PATH))
            .query(&[
                ("format", "json"),
                ("filter", filter.as_str()),
                ("sort", "-effective_date"),
            ])
            .send()
            .await
            .map_err(|e| RateLookupError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RateLookupError::ProviderStatus(status.as_u16()));
        }

        let body: RatesOfExchangeResponse = response
            .json()
            .await
            .map_err(|e| RateLookupError::Malformed(e.to_string()))?;

        Ok(body.data.into_iter().map(RateRow::into_record).collect())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Wire format
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level dataset response. Only the `data` array is consumed; the
/// accompanying `meta`/`links` objects are ignored.
#[derive(Debug, Deserialize)]
struct RatesOfExchangeResponse {
    #[serde(default)]
    data: Vec<RateRow>,
}

/// One row of the rates-of-exchange dataset. The API quotes numeric fields
/// as JSON strings; `Decimal` and `NaiveDate` parse them directly.
#[derive(Debug, Deserialize)]
struct RateRow {
    country_currency_desc: String,
    exchange_rate: Decimal,
    record_date: NaiveDate,
    effective_date: NaiveDate,
}

impl RateRow {
    fn into_record(self) -> RateRecord {
        RateRecord {
            country_currency: self.country_currency_desc,
            exchange_rate: self.exchange_rate,
            record_date: self.record_date,
            effective_date: self.effective_date,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const SAMPLE_BODY: &str = r#"{
        "data": [
            {
                "record_date": "2023-12-31",
                "country": "Brazil",
                "currency": "Real",
                "country_currency_desc": "Brazil-Real",
                "exchange_rate": "4.852",
                "effective_date": "2023-12-31"
            },
            {
                "record_date": "2023-09-30",
                "country": "Brazil",
                "currency": "Real",
                "country_currency_desc": "Brazil-Real",
                "exchange_rate": "5.033",
                "effective_date": "2023-09-30"
            }
        ],
        "meta": {"count": 2}
    }"#;

    #[test]
    fn test_parse_dataset_body() {
        let parsed: RatesOfExchangeResponse = serde_json::from_str(SAMPLE_BODY).unwrap();
        assert_eq!(parsed.data.len(), 2);

        let first = parsed.data.into_iter().next().unwrap().into_record();
        assert_eq!(first.country_currency, "Brazil-Real");
        assert_eq!(first.exchange_rate, dec!(4.852));
        assert_eq!(
            first.effective_date,
            NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()
        );
    }

    #[test]
    fn test_parse_empty_dataset() {
        let parsed: RatesOfExchangeResponse =
            serde_json::from_str(r#"{"data": [], "meta": {"count": 0}}"#).unwrap();
        assert!(parsed.data.is_empty());
    }

    #[test]
    fn test_parse_missing_data_field_defaults_empty() {
        let parsed: RatesOfExchangeResponse = serde_json::from_str(r#"{"meta": {}}"#).unwrap();
        assert!(parsed.data.is_empty());
    }

    #[test]
    fn test_country_filter_format() {
        let cutoff = NaiveDate::from_ymd_opt(2023, 7, 15).unwrap();
        assert_eq!(
            TreasuryRateClient::country_filter("Brazil", cutoff),
            "country:eq:Brazil,record_date:gt:2023-07-15"
        );
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = TreasuryRateClient::with_base_url("http://localhost:9000/");
        assert_eq!(client.base_url, "http://localhost:9000");
    }
}
