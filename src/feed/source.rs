use std::path::PathBuf;

use log::{info, warn};
use reqwest::{Client, StatusCode};

use super::FeedError;

/// Where the raw `eurofxref` document comes from: a remote URL, with a
/// bundled file on disk as the fallback.
pub struct FeedSource {
    client: Client,
    url: String,
    fallback_path: PathBuf,
}

impl FeedSource {
    pub fn new(url: impl Into<String>, fallback_path: impl Into<PathBuf>) -> Self {
        Self::with_client(Client::new(), url, fallback_path)
    }

    pub fn with_client(
        client: Client,
        url: impl Into<String>,
        fallback_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            client,
            url: url.into(),
            fallback_path: fallback_path.into(),
        }
    }

    /// Single GET against the feed URL. Anything but `200 OK` with a
    /// non-empty body is an error; there is no retry.
    pub async fn fetch(&self) -> Result<String, FeedError> {
        info!("Starting to download xml data from {}", self.url);

        let resp = self.client.get(&self.url).send().await?;
        let status = resp.status();
        if status != StatusCode::OK {
            return Err(FeedError::Status(status));
        }

        let text = resp.text().await?;
        if text.trim().is_empty() {
            return Err(FeedError::EmptyBody);
        }

        info!("Successfully downloaded xml data. Status code: {}", status);

        Ok(text)
    }

    /// Reads the bundled demo document.
    pub async fn load_fallback(&self) -> Result<String, FeedError> {
        warn!(
            "Loading xml demo data from {}",
            self.fallback_path.display()
        );

        tokio::fs::read_to_string(&self.fallback_path)
            .await
            .map_err(|source| FeedError::Io {
                path: self.fallback_path.display().to_string(),
                source,
            })
    }
}
