//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use purchases_types::{
    AppError, CreatePurchaseRequest, PurchaseId, PurchaseRepository, RateExchangeProvider,
};

use crate::PurchaseService;
use crate::service::ID_AND_COUNTRY_REQUIRED;

/// Application state shared across handlers.
pub struct AppState<R: PurchaseRepository, X: RateExchangeProvider> {
    pub service: PurchaseService<R, X>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self.0 {
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "errors": errors }),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, error_body(&msg, 400)),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, error_body(&msg, 404)),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, error_body(&msg, 500)),
        };

        (status, Json(body)).into_response()
    }
}

fn error_body(message: &str, code: u16) -> serde_json::Value {
    serde_json::json!({
        "error": message,
        "code": code
    })
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Record a new purchase.
#[tracing::instrument(skip(state, req))]
pub async fn create_purchase<R: PurchaseRepository, X: RateExchangeProvider>(
    State(state): State<Arc<AppState<R, X>>>,
    Json(req): Json<CreatePurchaseRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let purchase = state.service.create_purchase(req).await?;
    Ok((StatusCode::CREATED, Json(purchase)))
}

/// List all purchases.
#[tracing::instrument(skip(state))]
pub async fn list_purchases<R: PurchaseRepository, X: RateExchangeProvider>(
    State(state): State<Arc<AppState<R, X>>>,
) -> Result<impl IntoResponse, ApiError> {
    let purchases = state.service.list_purchases().await?;
    Ok(Json(purchases))
}

/// Get purchase by ID.
#[tracing::instrument(skip(state), fields(purchase_id = %id))]
pub async fn get_purchase<R: PurchaseRepository, X: RateExchangeProvider>(
    State(state): State<Arc<AppState<R, X>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let purchase_id: PurchaseId = id
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid purchase ID".into()))?;

    let purchase = state.service.get_purchase(purchase_id).await?;
    Ok(Json(purchase))
}

/// Query parameters for the conversion endpoint.
///
/// Both parameters are optional at the wire level so that a missing one
/// maps to the required-fields message instead of an extractor rejection.
#[derive(Debug, serde::Deserialize)]
pub struct ConvertQuery {
    pub purchase_id: Option<String>,
    pub country: Option<String>,
}

/// Convert a purchase's price into a country's currency.
#[tracing::instrument(skip(state))]
pub async fn convert_currency<R: PurchaseRepository, X: RateExchangeProvider>(
    State(state): State<Arc<AppState<R, X>>>,
    Query(query): Query<ConvertQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let (Some(id), Some(country)) = (query.purchase_id, query.country) else {
        return Err(AppError::BadRequest(ID_AND_COUNTRY_REQUIRED.into()).into());
    };

    let purchase_id: PurchaseId = id
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid purchase ID".into()))?;

    let result = state
        .service
        .convert_to_country_currency(purchase_id, &country)
        .await?;
    Ok(Json(result))
}
