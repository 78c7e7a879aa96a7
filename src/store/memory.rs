use std::collections::BTreeMap;

use async_trait::async_trait;
use log::debug;
use rust_decimal::{Decimal, RoundingStrategy};
use tokio::sync::RwLock;

use super::{RATE_SCALE, RateStore, StoreError, StoreResult, UpsertSummary};
use crate::model::{AggregateReport, CurrencyAggregate, RateSnapshot};

/// In-process store keyed by observation date. Rates are rounded to the
/// same scale the Postgres column keeps.
#[derive(Default)]
pub struct MemoryRateStore {
    // Insertion order; the aggregate probe reads the first element.
    inner: RwLock<Vec<RateSnapshot>>,
}

impl MemoryRateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[async_trait]
impl RateStore for MemoryRateStore {
    async fn upsert_all(&self, snapshots: &[RateSnapshot]) -> StoreResult<UpsertSummary> {
        let mut stored = self.inner.write().await;
        let mut summary = UpsertSummary::default();

        for snapshot in snapshots {
            if stored
                .iter()
                .any(|s| s.observation_date == snapshot.observation_date)
            {
                debug!("Snapshot {} already stored", snapshot.observation_date);
                summary.skipped += 1;
                continue;
            }
            let mut snapshot = snapshot.clone();
            for entry in &mut snapshot.rates {
                entry.rate = entry
                    .rate
                    .round_dp_with_strategy(RATE_SCALE, RoundingStrategy::MidpointAwayFromZero);
            }
            stored.push(snapshot);
            summary.inserted += 1;
        }

        Ok(summary)
    }

    async fn get_latest(&self) -> StoreResult<RateSnapshot> {
        self.inner
            .read()
            .await
            .iter()
            .max_by(|a, b| a.observation_date.cmp(&b.observation_date))
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn get_by_date(&self, date: &str) -> StoreResult<RateSnapshot> {
        self.inner
            .read()
            .await
            .iter()
            .find(|s| s.observation_date == date)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn get_aggregate(&self) -> StoreResult<AggregateReport> {
        let stored = self.inner.read().await;
        let base = stored
            .first()
            .map(|s| s.sender_name.clone())
            .ok_or(StoreError::NotFound)?;

        // currency -> (min, max, sum, count)
        let mut acc: BTreeMap<&str, (Decimal, Decimal, Decimal, u32)> = BTreeMap::new();
        for entry in stored.iter().flat_map(|s| s.rates.iter()) {
            acc.entry(entry.currency.as_str())
                .and_modify(|(min, max, sum, count)| {
                    *min = (*min).min(entry.rate);
                    *max = (*max).max(entry.rate);
                    *sum += entry.rate;
                    *count += 1;
                })
                .or_insert((entry.rate, entry.rate, entry.rate, 1));
        }

        let per_currency = acc
            .into_iter()
            .map(|(currency, (min, max, sum, count))| CurrencyAggregate {
                currency: currency.to_string(),
                min,
                max,
                avg: sum / Decimal::from(count),
            })
            .collect();

        Ok(AggregateReport { base, per_currency })
    }
}
