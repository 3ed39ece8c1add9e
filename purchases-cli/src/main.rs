//! Purchases CLI
//!
//! Command-line interface for the Purchases API.

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use purchases_client::PurchasesClient;
use purchases_types::PurchaseId;

#[derive(Parser)]
#[command(name = "purchases")]
#[command(author, version, about = "Purchases API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the Purchases API
    #[arg(
        long,
        env = "PURCHASES_API_URL",
        default_value = "http://localhost:3000"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a new purchase
    Create {
        /// Description of the purchase (max 50 characters)
        description: String,
        /// Purchase date (yyyy-MM-dd)
        #[arg(long)]
        date: String,
        /// Price in US dollars
        #[arg(long)]
        price: String,
    },
    /// Get purchase details
    Get {
        /// Purchase ID (UUID)
        id: String,
    },
    /// List all purchases
    List,
    /// Convert a purchase's price into a country's currency
    Convert {
        /// Purchase ID (UUID)
        id: String,
        /// Target country (e.g. Brazil)
        #[arg(long)]
        country: String,
    },
    /// Check API health
    Health,
}

fn parse_purchase_id(s: &str) -> Result<PurchaseId> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("Invalid purchase ID: {}", s))
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("Invalid date (expected yyyy-MM-dd): {}", s))
}

fn parse_price(s: &str) -> Result<Decimal> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("Invalid price: {}", s))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let client = PurchasesClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Create {
            description,
            date,
            price,
        } => {
            let date = parse_date(&date)?;
            let price = parse_price(&price)?;
            let purchase = client.create_purchase(&description, date, price).await?;
            println!("{}", serde_json::to_string_pretty(&purchase)?);
        }

        Commands::Get { id } => {
            let purchase_id = parse_purchase_id(&id)?;
            let purchase = client.get_purchase(purchase_id).await?;
            println!("{}", serde_json::to_string_pretty(&purchase)?);
        }

        Commands::List => {
            let purchases = client.list_purchases().await?;
            println!("{}", serde_json::to_string_pretty(&purchases)?);
        }

        Commands::Convert { id, country } => {
            let purchase_id = parse_purchase_id(&id)?;
            let result = client.convert(purchase_id, &country).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}
