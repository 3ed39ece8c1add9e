//! # Purchases Client SDK
//!
//! A typed Rust client for the Purchases API.

use chrono::NaiveDate;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;

use purchases_types::{ConversionResponse, CreatePurchaseRequest, Purchase, PurchaseId};

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Purchases API client.
pub struct PurchasesClient {
    base_url: String,
    http: Client,
}

impl PurchasesClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Records a new purchase.
    pub async fn create_purchase(
        &self,
        description: &str,
        purchase_date: NaiveDate,
        dollar_price: Decimal,
    ) -> Result<Purchase, ClientError> {
        let req = CreatePurchaseRequest {
            description: Some(description.to_string()),
            purchase_date: Some(purchase_date),
            dollar_price: Some(dollar_price),
        };
        self.post("/purchase", &req).await
    }

    /// Gets a purchase by ID.
    pub async fn get_purchase(&self, id: PurchaseId) -> Result<Purchase, ClientError> {
        self.get(&format!("/purchase/{}", id)).await
    }

    /// Lists all purchases.
    pub async fn list_purchases(&self) -> Result<Vec<Purchase>, ClientError> {
        self.get("/purchase").await
    }

    /// Converts a purchase's price into a country's currency.
    pub async fn convert(
        &self,
        id: PurchaseId,
        country: &str,
    ) -> Result<ConversionResponse, ClientError> {
        let resp = self
            .http
            .get(format!("{}/purchase/country_currency", self.base_url))
            .query(&[("purchase_id", id.to_string().as_str()), ("country", country)])
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| extract_error_message(&v))
                .unwrap_or(body);
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

/// Pulls a displayable message out of an error body: either the single
/// `error` string or the joined `errors` list from a validation failure.
fn extract_error_message(body: &serde_json::Value) -> Option<String> {
    if let Some(message) = body.get("error").and_then(|e| e.as_str()) {
        return Some(message.to_string());
    }
    body.get("errors").and_then(|e| e.as_array()).map(|errors| {
        errors
            .iter()
            .filter_map(|e| e.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = PurchasesClient::new("http://localhost:3000");
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_client_with_trailing_slash() {
        let client = PurchasesClient::new("http://localhost:3000/");
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_extract_single_error() {
        let body = serde_json::json!({ "error": "The purchase cannot be found", "code": 404 });
        assert_eq!(
            extract_error_message(&body).unwrap(),
            "The purchase cannot be found"
        );
    }

    #[test]
    fn test_extract_validation_errors() {
        let body = serde_json::json!({ "errors": ["Description is required", "Purchase amount is required"] });
        assert_eq!(
            extract_error_message(&body).unwrap(),
            "Description is required; Purchase amount is required"
        );
    }
}
