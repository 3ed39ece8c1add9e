//! Domain models for the purchase service.

pub mod purchase;
pub mod rate;

pub use purchase::{NewPurchase, Purchase, PurchaseId};
pub use rate::RateRecord;
