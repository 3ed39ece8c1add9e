//! Purchase Application Service
//!
//! Orchestrates domain operations through the repository and rate provider
//! ports. Contains NO infrastructure logic - pure business orchestration.

use chrono::{Months, NaiveDate, Utc};
use rust_decimal::RoundingStrategy;

use purchases_types::{
    AppError, ConversionResponse, CreatePurchaseRequest, Purchase, PurchaseId, PurchaseRepository,
    RateExchangeProvider, RateRecord,
};

/// Number of calendar months a rate may lag behind the purchase date.
const RATE_LOOKBACK_MONTHS: u32 = 6;

/// Caller-facing message when a purchase id resolves to nothing.
pub const PURCHASE_NOT_FOUND: &str = "The purchase cannot be found";

/// Caller-facing message when no rate exists in the lookback window.
pub const RATE_NOT_FOUND: &str = "The rate exchange data cannot be found";

/// Caller-facing message when conversion fails operationally.
pub const CONVERT_FAILED: &str = "Some error occurred while converting currency. Try again later.";

/// Caller-facing message when the store rejects a create.
pub const CREATE_FAILED: &str = "Some error occurred while creating the purchase";

/// Caller-facing message when conversion parameters are missing or blank.
pub const ID_AND_COUNTRY_REQUIRED: &str = "Purchase ID and country are required";

/// Application service for purchase operations.
///
/// Generic over `R: PurchaseRepository` and `X: RateExchangeProvider` -
/// both adapters are injected at compile time. This enables:
/// - Swapping the store or rate source without code changes
/// - Testing with in-memory implementations
/// - Compile-time checks for port implementation
pub struct PurchaseService<R: PurchaseRepository, X: RateExchangeProvider> {
    repo: R,
    rates: X,
}

impl<R: PurchaseRepository, X: RateExchangeProvider> PurchaseService<R, X> {
    /// Creates a new purchase service with the given collaborators.
    pub fn new(repo: R, rates: X) -> Self {
        Self { repo, rates }
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Purchase Creation
    // ─────────────────────────────────────────────────────────────────────────

    /// Records a new purchase.
    ///
    /// The request is validated against today's date before the store is
    /// touched; any violation is returned as the full message list.
    pub async fn create_purchase(&self, req: CreatePurchaseRequest) -> Result<Purchase, AppError> {
        let input = req
            .validate(Utc::now().date_naive())
            .map_err(AppError::Validation)?;

        match self.repo.create_purchase(input).await {
            Ok(purchase) => {
                tracing::info!(purchase_id = %purchase.id, "purchase recorded");
                Ok(purchase)
            }
            Err(e) => {
                // Cause stays in the log; the caller gets a generic message.
                tracing::error!(error = %e, "purchase creation failed");
                Err(AppError::Internal(CREATE_FAILED.into()))
            }
        }
    }

    /// Gets a purchase by ID.
    pub async fn get_purchase(&self, id: PurchaseId) -> Result<Purchase, AppError> {
        self.repo
            .get_purchase(id)
            .await
            .map_err(Into::into)
            .and_then(|opt| opt.ok_or_else(|| AppError::NotFound(PURCHASE_NOT_FOUND.into())))
    }

    /// Lists all purchases.
    pub async fn list_purchases(&self) -> Result<Vec<Purchase>, AppError> {
        self.repo.list_purchases().await.map_err(Into::into)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Currency Conversion
    // ─────────────────────────────────────────────────────────────────────────

    /// Converts a purchase's dollar price into `country`'s currency using
    /// the most recent rate within the 6-month lookback window.
    pub async fn convert_to_country_currency(
        &self,
        purchase_id: PurchaseId,
        country: &str,
    ) -> Result<ConversionResponse, AppError> {
        if country.trim().is_empty() {
            return Err(AppError::BadRequest(ID_AND_COUNTRY_REQUIRED.into()));
        }

        tracing::info!(%purchase_id, country, "converting purchase to country currency");

        let purchase = self.repo.get_purchase(purchase_id).await.map_err(|e| {
            tracing::error!(error = %e, %purchase_id, "purchase lookup failed");
            AppError::Internal(CONVERT_FAILED.into())
        })?;

        let Some(purchase) = purchase else {
            tracing::warn!(%purchase_id, "no purchase found");
            return Err(AppError::NotFound(PURCHASE_NOT_FOUND.into()));
        };

        let cutoff = rate_cutoff(purchase.purchase_date).ok_or_else(|| {
            tracing::error!(purchase_date = %purchase.purchase_date, "cutoff date out of range");
            AppError::Internal(CONVERT_FAILED.into())
        })?;

        let records = match self.rates.fetch_rates(country, cutoff).await {
            Ok(records) => records,
            Err(e) => {
                tracing::error!(error = %e, country, "rate lookup failed");
                return Err(AppError::Internal(CONVERT_FAILED.into()));
            }
        };

        let Some(record) = select_rate(&records, cutoff) else {
            tracing::warn!(country, cutoff = %cutoff, "no rate exchange data found");
            return Err(AppError::NotFound(RATE_NOT_FOUND.into()));
        };

        let converted_price = (purchase.dollar_price * record.exchange_rate)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        tracing::info!(%purchase_id, rate = %record.exchange_rate, "conversion completed");

        Ok(ConversionResponse {
            purchase_id: purchase.id,
            description: purchase.description,
            purchase_date: purchase.purchase_date,
            dollar_price: purchase.dollar_price,
            rate: record.exchange_rate,
            converted_price,
        })
    }
}

/// Purchase date minus the lookback window, day clamped at month end.
fn rate_cutoff(purchase_date: NaiveDate) -> Option<NaiveDate> {
    purchase_date.checked_sub_months(Months::new(RATE_LOOKBACK_MONTHS))
}

/// Picks the most recent record whose effective date is on or after the
/// cutoff. The provider already sorts by effective date descending; the
/// scan re-validates that instead of trusting `records[0]`, and keeps the
/// first record on effective-date ties.
fn select_rate(records: &[RateRecord], cutoff: NaiveDate) -> Option<&RateRecord> {
    let mut best: Option<&RateRecord> = None;
    for record in records {
        if record.effective_date < cutoff {
            continue;
        }
        match best {
            Some(b) if record.effective_date <= b.effective_date => {}
            _ => best = Some(record),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(rate: rust_decimal::Decimal, effective: NaiveDate) -> RateRecord {
        RateRecord {
            country_currency: "Brazil-Real".to_string(),
            exchange_rate: rate,
            record_date: effective,
            effective_date: effective,
        }
    }

    #[test]
    fn test_cutoff_is_six_calendar_months_back() {
        assert_eq!(rate_cutoff(date(2024, 1, 15)), Some(date(2023, 7, 15)));
    }

    #[test]
    fn test_cutoff_clamps_at_month_end() {
        // August 31st has no February 31st counterpart
        assert_eq!(rate_cutoff(date(2024, 8, 31)), Some(date(2024, 2, 29)));
        assert_eq!(rate_cutoff(date(2023, 8, 31)), Some(date(2023, 2, 28)));
    }

    #[test]
    fn test_select_rate_takes_most_recent() {
        let records = vec![
            record(dec!(4.85), date(2023, 12, 31)),
            record(dec!(5.03), date(2023, 9, 30)),
        ];
        let selected = select_rate(&records, date(2023, 7, 15)).unwrap();
        assert_eq!(selected.exchange_rate, dec!(4.85));
    }

    #[test]
    fn test_select_rate_revalidates_provider_order() {
        // Provider sort contract violated: oldest first
        let records = vec![
            record(dec!(5.03), date(2023, 9, 30)),
            record(dec!(4.85), date(2023, 12, 31)),
        ];
        let selected = select_rate(&records, date(2023, 7, 15)).unwrap();
        assert_eq!(selected.exchange_rate, dec!(4.85));
    }

    #[test]
    fn test_select_rate_tie_keeps_provider_order() {
        let records = vec![
            record(dec!(4.85), date(2023, 12, 31)),
            record(dec!(4.99), date(2023, 12, 31)),
        ];
        let selected = select_rate(&records, date(2023, 7, 15)).unwrap();
        assert_eq!(selected.exchange_rate, dec!(4.85));
    }

    #[test]
    fn test_select_rate_skips_records_before_cutoff() {
        let records = vec![record(dec!(4.85), date(2023, 6, 30))];
        assert!(select_rate(&records, date(2023, 7, 15)).is_none());
    }

    #[test]
    fn test_select_rate_empty() {
        assert!(select_rate(&[], date(2023, 7, 15)).is_none());
    }
}
