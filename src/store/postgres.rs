use async_trait::async_trait;
use log::{debug, error, info};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::{RateStore, StoreError, StoreResult, UpsertSummary};
use crate::model::{AggregateReport, CurrencyAggregate, RateEntry, RateSnapshot};

#[derive(sqlx::FromRow)]
struct SnapshotRow {
    id: i64,
    sender_name: String,
    observation_date: String,
}

/// Postgres-backed store over `rate_snapshots` / `rate_entries`.
#[derive(Clone)]
pub struct PgRateStore {
    pool: PgPool,
}

impl PgRateStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        info!("Establishing connection to DB");
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;
        info!("Successfully connected to DB");

        Ok(Self::new(pool))
    }

    pub async fn migrate(&self) -> StoreResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Inserts one snapshot and its entries in a single transaction.
    /// Returns `false` when the date is already stored.
    async fn insert_if_absent(&self, snapshot: &RateSnapshot) -> StoreResult<bool> {
        let mut tx = self.pool.begin().await?;

        let id: Option<i64> = sqlx::query_scalar(
            r#"
            INSERT INTO rate_snapshots (sender_name, observation_date)
            VALUES ($1, $2)
            ON CONFLICT (observation_date) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(&snapshot.sender_name)
        .bind(&snapshot.observation_date)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(id) = id else {
            tx.rollback().await?;
            return Ok(false);
        };

        if !snapshot.rates.is_empty() {
            let mut builder: QueryBuilder<Postgres> =
                QueryBuilder::new("INSERT INTO rate_entries (snapshot_id, currency, rate) ");
            builder.push_values(&snapshot.rates, |mut b, entry| {
                b.push_bind(id).push_bind(&entry.currency).push_bind(entry.rate);
            });
            builder.build().execute(&mut *tx).await?;
        }

        tx.commit().await?;
        Ok(true)
    }

    async fn load_entries(&self, row: SnapshotRow) -> StoreResult<RateSnapshot> {
        let rates = sqlx::query_as::<_, RateEntry>(
            "SELECT currency, rate FROM rate_entries WHERE snapshot_id = $1 ORDER BY id",
        )
        .bind(row.id)
        .fetch_all(&self.pool)
        .await?;

        Ok(RateSnapshot {
            sender_name: row.sender_name,
            observation_date: row.observation_date,
            rates,
        })
    }
}

#[async_trait]
impl RateStore for PgRateStore {
    async fn upsert_all(&self, snapshots: &[RateSnapshot]) -> StoreResult<UpsertSummary> {
        let mut summary = UpsertSummary::default();

        for snapshot in snapshots {
            match self.insert_if_absent(snapshot).await {
                Ok(true) => summary.inserted += 1,
                Ok(false) => {
                    debug!("Snapshot {} already stored", snapshot.observation_date);
                    summary.skipped += 1;
                }
                Err(e) if e.is_connection_error() => {
                    error!("Lost connection while upserting snapshots: {}", e);
                    return Err(e);
                }
                Err(e) => {
                    error!(
                        "Failed to upsert snapshot {}: {}",
                        snapshot.observation_date, e
                    );
                    summary.failed += 1;
                }
            }
        }

        Ok(summary)
    }

    async fn get_latest(&self) -> StoreResult<RateSnapshot> {
        let row = sqlx::query_as::<_, SnapshotRow>(
            r#"
            SELECT id, sender_name, observation_date
            FROM rate_snapshots
            ORDER BY observation_date DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)?;

        self.load_entries(row).await
    }

    async fn get_by_date(&self, date: &str) -> StoreResult<RateSnapshot> {
        let row = sqlx::query_as::<_, SnapshotRow>(
            r#"
            SELECT id, sender_name, observation_date
            FROM rate_snapshots
            WHERE observation_date = $1
            LIMIT 1
            "#,
        )
        .bind(date)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)?;

        self.load_entries(row).await
    }

    async fn get_aggregate(&self) -> StoreResult<AggregateReport> {
        // Existence probe; its sender becomes `base` whatever rows are aggregated.
        let base: String = sqlx::query_scalar("SELECT sender_name FROM rate_snapshots LIMIT 1")
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound)?;

        let per_currency = sqlx::query_as::<_, CurrencyAggregate>(
            r#"
            SELECT currency, MIN(rate) AS min, MAX(rate) AS max, AVG(rate) AS avg
            FROM rate_entries
            GROUP BY currency
            ORDER BY currency
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(AggregateReport { base, per_currency })
    }
}
