//! Shared database types with feature-gated fields for SQLite and PostgreSQL.

use sqlx::FromRow;

use purchases_types::{Purchase, PurchaseId, RepoError};

// ─────────────────────────────────────────────────────────────────────────────
// Feature-gated imports
// ─────────────────────────────────────────────────────────────────────────────

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

#[cfg(feature = "sqlite")]
use std::str::FromStr;

#[cfg(not(feature = "sqlite"))]
use uuid::Uuid;

// ─────────────────────────────────────────────────────────────────────────────
// Database row structs (derive FromRow for automatic mapping)
// ─────────────────────────────────────────────────────────────────────────────

/// Purchase row from database.
///
/// SQLite has no native UUID/DATE/NUMERIC types, so the sqlite variant
/// stores every column as text and parses on the way out.
#[derive(FromRow)]
pub struct DbPurchase {
    #[cfg(not(feature = "sqlite"))]
    pub id: Uuid,
    #[cfg(feature = "sqlite")]
    pub id: String,

    pub description: String,

    #[cfg(not(feature = "sqlite"))]
    pub purchase_date: NaiveDate,
    #[cfg(feature = "sqlite")]
    pub purchase_date: String,

    #[cfg(not(feature = "sqlite"))]
    pub dollar_price: Decimal,
    #[cfg(feature = "sqlite")]
    pub dollar_price: String,

    #[cfg(not(feature = "sqlite"))]
    pub created_at: DateTime<Utc>,
    #[cfg(feature = "sqlite")]
    pub created_at: String,
}

impl DbPurchase {
    /// Converts a database row into the domain model.
    #[cfg(feature = "sqlite")]
    pub fn try_into_purchase(self) -> Result<Purchase, RepoError> {
        let id: PurchaseId = self
            .id
            .parse()
            .map_err(|e| RepoError::Database(format!("invalid purchase id: {}", e)))?;

        let purchase_date = NaiveDate::parse_from_str(&self.purchase_date, "%Y-%m-%d")
            .map_err(|e| RepoError::Database(format!("invalid purchase date: {}", e)))?;

        let dollar_price = Decimal::from_str(&self.dollar_price)
            .map_err(|e| RepoError::Database(format!("invalid dollar price: {}", e)))?;

        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|e| RepoError::Database(format!("invalid created_at: {}", e)))?
            .with_timezone(&Utc);

        Ok(Purchase::from_parts(
            id,
            self.description,
            purchase_date,
            dollar_price,
            created_at,
        ))
    }

    /// Converts a database row into the domain model.
    #[cfg(not(feature = "sqlite"))]
    pub fn try_into_purchase(self) -> Result<Purchase, RepoError> {
        Ok(Purchase::from_parts(
            PurchaseId::from_uuid(self.id),
            self.description,
            self.purchase_date,
            self.dollar_price,
            self.created_at,
        ))
    }
}
