//! Data Transfer Objects (DTOs) for requests and responses.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::purchase::{
    MAX_DESCRIPTION_CHARS, MAX_PRICE_FRACTION_DIGITS, MAX_PRICE_INTEGER_DIGITS,
};
use crate::domain::{NewPurchase, PurchaseId};

// ─────────────────────────────────────────────────────────────────────────────
// Purchase DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to record a new purchase.
///
/// All fields are optional at the wire level so that missing values surface
/// as field-validation messages rather than deserialization failures.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePurchaseRequest {
    /// Free-form description of the purchase
    pub description: Option<String>,
    /// Calendar date of the purchase (yyyy-MM-dd)
    pub purchase_date: Option<NaiveDate>,
    /// Price in US dollars
    pub dollar_price: Option<Decimal>,
}

impl CreatePurchaseRequest {
    /// Checks the declared constraints against `today` and produces a
    /// validated [`NewPurchase`], or the full list of violation messages.
    pub fn validate(&self, today: NaiveDate) -> Result<NewPurchase, Vec<String>> {
        let mut errors = Vec::new();

        let description = self.description.as_deref().unwrap_or("");
        if description.trim().is_empty() {
            errors.push("Description is required".to_string());
        } else if description.chars().count() > MAX_DESCRIPTION_CHARS {
            errors.push("Description must not exceed 50 characters".to_string());
        }

        match self.purchase_date {
            None => errors.push("Purchase date is required".to_string()),
            Some(date) if date > today => {
                errors.push("Purchase date must be in the past or present".to_string());
            }
            Some(_) => {}
        }

        match self.dollar_price {
            None => errors.push("Purchase amount is required".to_string()),
            Some(price) if price <= Decimal::ZERO => {
                errors.push("Purchase amount must be positive".to_string());
            }
            Some(price) if !price_digits_ok(price) => {
                errors.push(
                    "Purchase amount must have a maximum of 12 digits with 2 decimal places"
                        .to_string(),
                );
            }
            Some(_) => {}
        }

        match (self.purchase_date, self.dollar_price) {
            (Some(purchase_date), Some(dollar_price)) if errors.is_empty() => Ok(NewPurchase {
                description: description.to_string(),
                purchase_date,
                dollar_price,
            }),
            _ => Err(errors),
        }
    }
}

/// Digit-precision check: trailing zeros are not counted as fractional
/// digits, so `1.50` passes while `1.505` does not.
fn price_digits_ok(price: Decimal) -> bool {
    if price.normalize().scale() > MAX_PRICE_FRACTION_DIGITS {
        return false;
    }
    price.abs().trunc().to_string().len() <= MAX_PRICE_INTEGER_DIGITS
}

// ─────────────────────────────────────────────────────────────────────────────
// Conversion DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Result of converting a purchase's dollar price into a country's currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionResponse {
    /// Identifier of the converted purchase
    pub purchase_id: PurchaseId,
    /// Description of the purchase
    pub description: String,
    /// Date of the purchase
    pub purchase_date: NaiveDate,
    /// Original price in US dollars
    pub dollar_price: Decimal,
    /// Exchange rate that was applied
    pub rate: Decimal,
    /// `dollar_price * rate`, rounded half-up to 2 decimal places
    pub converted_price: Decimal,
}
