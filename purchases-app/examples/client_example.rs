//! Client example demonstrating the purchase flows against a running server.
//!
//! Run with: cargo run -p purchases-app --example client_example --no-default-features --features sqlite

use std::net::SocketAddr;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal_macros::dec;
use tempfile::tempdir;
use tokio::net::TcpListener;

use purchases_client::PurchasesClient;
use purchases_hex::{PurchaseService, inbound::HttpServer};
use purchases_repo::build_repo;
use purchases_types::{RateExchangeProvider, RateLookupError, RateRecord};

/// Fixed-rate provider so the demo runs without network access.
struct FixedRates;

#[async_trait]
impl RateExchangeProvider for FixedRates {
    async fn fetch_rates(
        &self,
        _country: &str,
        cutoff: NaiveDate,
    ) -> Result<Vec<RateRecord>, RateLookupError> {
        Ok(vec![RateRecord {
            country_currency: "Brazil-Real".to_string(),
            exchange_rate: dec!(5.00),
            record_date: cutoff,
            effective_date: cutoff,
        }])
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt().with_env_filter("info").init();

    // Find an available port
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;
    let port = addr.port();
    drop(listener);

    // Use a temp file-backed SQLite DB
    let tmp = tempdir()?;
    let db_path = tmp.path().join("purchases.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    println!("🚀 Starting server on port {port}...");
    println!("   Database: {db_url}");

    // Build repository (handles connection and migration)
    let repo = build_repo(&db_url).await?;

    // Start server in background
    let service = PurchaseService::new(repo, FixedRates);
    let server = HttpServer::new(service);
    let router = server.router();

    let server_addr = format!("127.0.0.1:{port}");
    tokio::spawn(async move {
        axum::serve(
            TcpListener::bind(&server_addr).await.unwrap(),
            router.into_make_service(),
        )
        .await
        .unwrap();
    });

    // Wait for server to start
    tokio::time::sleep(std::time::Duration::from_millis(500)).await;

    // Create client
    let base_url = format!("http://127.0.0.1:{port}");
    let client = PurchasesClient::new(&base_url);

    // ─────────────────────────────────────────────────────────────────────────
    // Demo: Full purchase flow
    // ─────────────────────────────────────────────────────────────────────────

    println!("\n» Health check");
    println!("   healthy: {}", client.health().await?);

    println!("\n» Recording a purchase");
    let purchase = client
        .create_purchase(
            "Item description",
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            dec!(500.00),
        )
        .await?;
    println!("   id: {}", purchase.id);

    println!("\n» Fetching it back");
    let fetched = client.get_purchase(purchase.id).await?;
    println!(
        "   {} | {} | ${}",
        fetched.description, fetched.purchase_date, fetched.dollar_price
    );

    println!("\n» Converting to Brazil's currency");
    let conversion = client.convert(purchase.id, "Brazil").await?;
    println!(
        "   rate: {}  converted price: {}",
        conversion.rate, conversion.converted_price
    );

    println!("\n» Listing all purchases");
    let all = client.list_purchases().await?;
    println!("   {} purchase(s) recorded", all.len());

    Ok(())
}
