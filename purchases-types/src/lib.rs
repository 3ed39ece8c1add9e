//! # Purchases Types
//!
//! Domain types and port traits for the purchase service.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (Purchase, RateRecord)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Application and repository error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{NewPurchase, Purchase, PurchaseId, RateRecord};
pub use dto::*;
pub use error::{AppError, RepoError};
pub use ports::{PurchaseRepository, RateExchangeProvider, RateLookupError};
