//! PostgreSQL repository adapter.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use purchases_types::{NewPurchase, Purchase, PurchaseId, PurchaseRepository, RepoError};

use crate::types::DbPurchase;

/// Executes a migration file statement by statement.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> Result<(), anyhow::Error> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    Ok(())
}

/// Runs all database migrations.
async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
    execute_migration(
        pool,
        include_str!("../migrations/0001_create_purchases_pg.sql"),
        "0001",
    )
    .await?;

    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL Repository
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL repository implementation.
pub struct PostgresPurchaseRepo {
    pool: PgPool,
}

impl PostgresPurchaseRepo {
    /// Creates a new PostgreSQL repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl PurchaseRepository for PostgresPurchaseRepo {
    async fn create_purchase(&self, input: NewPurchase) -> Result<Purchase, RepoError> {
        let id = Uuid::new_v4();
        let now = chrono::Utc::now();

        sqlx::query(
            r#"INSERT INTO purchases (id, description, purchase_date, dollar_price, created_at)
               VALUES ($1, $2, $3, $4, $5)"#,
        )
        .bind(id)
        .bind(&input.description)
        .bind(input.purchase_date)
        .bind(input.dollar_price)
        .bind(now)
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
        let row: Option<DbPurchase> = sqlx::query_as(
            r#"SELECT id, description, purchase_date, dollar_price, created_at
               FROM purchases WHERE id = $1"#,
        )
        .bind(id.into_uuid())
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
