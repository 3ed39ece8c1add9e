//! Exchange rate record as returned by the rate provider.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One exchange rate quotation for a country.
///
/// Ephemeral - fetched per conversion request and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateRecord {
    /// Provider's country-currency description (e.g. "Brazil-Real")
    pub country_currency: String,
    /// US dollar to target currency rate
    pub exchange_rate: Decimal,
    /// Date the provider published the record
    pub record_date: NaiveDate,
    /// Date the rate takes effect; providers quote quarterly
    pub effective_date: NaiveDate,
}
