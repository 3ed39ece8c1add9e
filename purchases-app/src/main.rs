//! # Purchases Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the repository adapter
//! - Initialize the Treasury rate provider
//! - Create the purchase service
//! - Start the HTTP server

mod config;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use purchases_hex::{PurchaseService, inbound::HttpServer};
use purchases_repo::build_repo;
use treasury_rates::TreasuryRateClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,purchases_app=debug,purchases_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = config::Config::from_env()?;

    tracing::info!("Starting purchases server on port {}", config.port);
    tracing::info!("Using database: {}", config.database_url);

    // Build repository (handles connection and migration)
    let repo = build_repo(&config.database_url).await?;

    // Build the rate provider
    let rates = match &config.treasury_api_url {
        Some(url) => {
            tracing::info!("Using treasury API at {}", url);
            TreasuryRateClient::with_base_url(url)
        }
        None => TreasuryRateClient::new(),
    };

    // Create the purchase service
    let service = PurchaseService::new(repo, rates);

    // Create and run the HTTP server
    let server = HttpServer::new(service);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    Ok(())
}
