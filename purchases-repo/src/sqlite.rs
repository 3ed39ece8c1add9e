//! SQLite repository adapter.

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;
use std::str::FromStr;
use uuid::Uuid;

use purchases_types::{NewPurchase, Purchase, PurchaseId, PurchaseRepository, RepoError};

use crate::types::DbPurchase;

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite repository implementation.
pub struct SqlitePurchaseRepo {
    pool: SqlitePool,
}

impl SqlitePurchaseRepo {
    /// Creates a new SQLite repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            // Remove query parameters
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;

        // Run migration from migration file
        let ddl = include_str!("../migrations/0001_create_purchases.sql");
        sqlx::query(ddl).execute(&pool).await?;

        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl PurchaseRepository for SqlitePurchaseRepo {
    async fn create_purchase(&self, input: NewPurchase) -> Result<Purchase, RepoError> {
        let id = Uuid::new_v4();
        let now = chrono::Utc::now();

        let id_str = id.to_string();
        let date_str = input.purchase_date.format("%Y-%m-%d").to_string();
        let price_str = input.dollar_price.to_string();
        let created_at_str = now.to_rfc3339();

        sqlx::query(
            r#"INSERT INTO purchases (id, description, purchase_date, dollar_price, created_at)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(&id_str)
        .bind(&input.description)
        .bind(&date_str)
        .bind(&price_str)
        .bind(&created_at_str)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(Purchase::from_parts(
            PurchaseId::from_uuid(id),
            input.description,
            input.purchase_date,
            input.dollar_price,
            now,
        ))
    }

    async fn get_purchase(&self, id: PurchaseId) -> Result<Option<Purchase>, RepoError> {
        let id_str = id.to_string();

        let row: Option<DbPurchase> = sqlx::query_as(
            r#"SELECT id, description, purchase_date, dollar_price, created_at
               FROM purchases WHERE id = ?"#,
        )
        .bind(&id_str)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        row.map(DbPurchase::try_into_purchase).transpose()
    }

    async fn list_purchases(&self) -> Result<Vec<Purchase>, RepoError> {
        let rows: Vec<DbPurchase> = sqlx::query_as(
            r#"SELECT id, description, purchase_date, dollar_price, created_at
               FROM purchases ORDER BY created_at"#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        rows.into_iter()
            .map(DbPurchase::try_into_purchase)
            .collect()
    }
}
