//! Purchase domain model.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum length of a purchase description, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 50;

/// Maximum number of integer digits in a dollar price.
pub const MAX_PRICE_INTEGER_DIGITS: usize = 12;

/// Maximum number of fractional digits in a dollar price.
pub const MAX_PRICE_FRACTION_DIGITS: u32 = 2;

/// Unique identifier for a Purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PurchaseId(Uuid);

impl PurchaseId {
    /// Creates a new random PurchaseId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a PurchaseId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Returns the UUID value.
    pub fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl Default for PurchaseId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PurchaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PurchaseId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Validated input for creating a purchase.
///
/// Constructed only by the boundary validation in
/// [`crate::dto::CreatePurchaseRequest::validate`], so a `NewPurchase`
/// always satisfies the description/date/price constraints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPurchase {
    pub description: String,
    pub purchase_date: NaiveDate,
    pub dollar_price: Decimal,
}

/// A recorded purchase.
///
/// Purchases are immutable once created - they represent a historical
/// record of a transaction in US dollars.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Purchase {
    /// Unique identifier, assigned by the store on creation
    pub id: PurchaseId,
    /// Free-form description, at most 50 characters
    pub description: String,
    /// Calendar date of the purchase, never in the future
    pub purchase_date: NaiveDate,
    /// Price in US dollars
    pub dollar_price: Decimal,
    /// When the record was stored
    pub created_at: DateTime<Utc>,
}

impl Purchase {
    /// Reconstructs a purchase from database fields.
    pub fn from_parts(
        id: PurchaseId,
        description: String,
        purchase_date: NaiveDate,
        dollar_price: Decimal,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            description,
            purchase_date,
            dollar_price,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purchase_id_roundtrip() {
        let id = PurchaseId::new();
        let parsed: PurchaseId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_purchase_id_rejects_garbage() {
        assert!("not-a-uuid".parse::<PurchaseId>().is_err());
    }

    #[test]
    fn test_purchase_id_serde_transparent() {
        let id = PurchaseId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));
    }
}
