use anyhow::{Context, Result};
use log::{info, warn};

use crate::feed::{self, FeedError, FeedSource, ParsedFeed};
use crate::store::{RateStore, UpsertSummary};

/// Startup load of the feed into the store: fetch, parse, normalize, upsert.
pub struct IngestionPipeline<'a> {
    source: &'a FeedSource,
    store: &'a dyn RateStore,
}

impl<'a> IngestionPipeline<'a> {
    pub fn new(source: &'a FeedSource, store: &'a dyn RateStore) -> Self {
        Self { source, store }
    }

    /// Runs once. A remote failure (network, status, empty body or bad XML)
    /// falls back to the bundled document; if that one cannot be read or
    /// parsed the error is returned and startup must abort.
    pub async fn run(&self) -> Result<UpsertSummary> {
        info!("Upserting initial data started");

        let feed = match self.fetch_remote().await {
            Ok(feed) => feed,
            Err(e) => {
                warn!("Remote feed unavailable, falling back: {}", e);
                self.load_demo_data().await?
            }
        };

        let snapshots = feed::normalize(feed);
        info!("Upserting {} snapshots", snapshots.len());

        let summary = self
            .store
            .upsert_all(&snapshots)
            .await
            .context("Unable to store exchange rates")?;

        if summary.failed > 0 {
            warn!("{} snapshots could not be stored", summary.failed);
        }
        info!(
            "Upserting initial data completed: {} inserted, {} already present, {} failed",
            summary.inserted, summary.skipped, summary.failed
        );

        Ok(summary)
    }

    async fn fetch_remote(&self) -> Result<ParsedFeed, FeedError> {
        let raw = self.source.fetch().await?;
        feed::parse(&raw)
    }

    async fn load_demo_data(&self) -> Result<ParsedFeed> {
        warn!("Starting insertion of xml demo data");

        let raw = self
            .source
            .load_fallback()
            .await
            .context("Unable to read demo data")?;
        let feed = feed::parse(&raw).context("Unable to parse demo data")?;

        warn!("Currently using xml demo data");
        Ok(feed)
    }
}
