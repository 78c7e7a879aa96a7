//! Persistence boundary for rate snapshots.

mod memory;
mod postgres;

pub use memory::MemoryRateStore;
pub use postgres::PgRateStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{AggregateReport, RateSnapshot};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Scale of the `rate_entries.rate` column.
pub const RATE_SCALE: u32 = 8;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UpsertSummary {
    pub inserted: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl StoreError {
    /// True when the store itself is unreachable, as opposed to one row
    /// being rejected.
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            StoreError::Database(
                sqlx::Error::Io(_)
                    | sqlx::Error::Tls(_)
                    | sqlx::Error::PoolTimedOut
                    | sqlx::Error::PoolClosed
                    | sqlx::Error::WorkerCrashed
            )
        )
    }
}

#[async_trait]
pub trait RateStore: Send + Sync {
    /// Insert-if-absent keyed on `observation_date`. An existing snapshot is
    /// left untouched, entries included. Each snapshot is applied on its own:
    /// a rejected snapshot is counted in `failed` and the rest still go in.
    /// Only a connection-level failure aborts the batch.
    async fn upsert_all(&self, snapshots: &[RateSnapshot]) -> StoreResult<UpsertSummary>;

    /// Snapshot with the greatest `observation_date`, entries loaded.
    async fn get_latest(&self) -> StoreResult<RateSnapshot>;

    async fn get_by_date(&self, date: &str) -> StoreResult<RateSnapshot>;

    /// Min/max/avg per currency over all stored entries.
    async fn get_aggregate(&self) -> StoreResult<AggregateReport>;
}
