//! Exchange rate lookup port.
//!
//! This trait defines the interface for historical exchange rate sources.
//! Implementations can be HTTP clients, mock providers, etc.

use chrono::NaiveDate;

use crate::domain::RateRecord;

/// Error type for rate lookups.
///
/// A lookup failure is distinct from an empty result: an empty `Vec` from
/// [`RateExchangeProvider::fetch_rates`] means "no rate available in the
/// window", while any of these variants means the provider itself failed.
#[derive(Debug, thiserror::Error)]
pub enum RateLookupError {
    #[error("rate provider unreachable: {0}")]
    Unreachable(String),

    #[error("rate provider returned status {0}")]
    ProviderStatus(u16),

    #[error("malformed rate response: {0}")]
    Malformed(String),
}

/// Port trait for historical exchange rate providers.
#[async_trait::async_trait]
pub trait RateExchangeProvider: Send + Sync + 'static {
    /// Fetches rate records for `country` with record date after `cutoff`,
    /// most recent effective date first.
    async fn fetch_rates(
        &self,
        country: &str,
        cutoff: NaiveDate,
    ) -> Result<Vec<RateRecord>, RateLookupError>;
}
