//! Repository port trait.
//!
//! This is the primary port in our hexagonal architecture.
//! Adapters (Postgres, SQLite, InMemory) will implement this trait.

use crate::domain::{NewPurchase, Purchase, PurchaseId};
use crate::error::RepoError;

/// The purchase store port.
///
/// A purchase is written exactly once; there are no update operations.
#[async_trait::async_trait]
pub trait PurchaseRepository: Send + Sync + 'static {
    /// Persists a new purchase, assigning a fresh identifier.
    ///
    /// Returns the stored record, identifier included.
    async fn create_purchase(&self, input: NewPurchase) -> Result<Purchase, RepoError>;

    /// Looks a purchase up by identifier.
    ///
    /// An absent purchase is `Ok(None)`, not an error.
    async fn get_purchase(&self, id: PurchaseId) -> Result<Option<Purchase>, RepoError>;

    /// Lists all recorded purchases.
    async fn list_purchases(&self) -> Result<Vec<Purchase>, RepoError>;
}
