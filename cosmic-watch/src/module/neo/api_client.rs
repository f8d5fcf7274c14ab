///! NeoWs feed client
///!
///! The core only needs read access to a date-ranged feed, so the remote
///! service sits behind the `FeedSource` trait. No automatic retries: a
///! failed fetch is retried by the user.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Url;
use std::time::Duration;

use super::types::RawFeed;
use crate::error::{Result, WatchError};

/// A source of date-keyed raw NEO entries for an inclusive date range
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch_feed(&self, start: NaiveDate, end: NaiveDate) -> Result<RawFeed>;
}

/// HTTP adapter for the NASA NeoWs `feed` endpoint
pub struct NasaFeedClient {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
}

impl NasaFeedClient {
    pub fn new(api_base: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WatchError::transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_base: api_base.into(),
            api_key: api_key.into(),
        })
    }

    /// Build the feed URL for a date range
    pub fn feed_url(&self, start: NaiveDate, end: NaiveDate) -> Result<Url> {
        let base = format!("{}/feed", self.api_base.trim_end_matches('/'));
        let start = start.format("%Y-%m-%d").to_string();
        let end = end.format("%Y-%m-%d").to_string();

        Url::parse_with_params(
            &base,
            &[
                ("start_date", start.as_str()),
                ("end_date", end.as_str()),
                ("api_key", self.api_key.as_str()),
            ],
        )
        .map_err(|e| WatchError::Config(format!("Invalid feed URL '{}': {}", base, e)))
    }
}

#[async_trait]
impl FeedSource for NasaFeedClient {
    async fn fetch_feed(&self, start: NaiveDate, end: NaiveDate) -> Result<RawFeed> {
        let url = self.feed_url(start, end)?;
        tracing::debug!("Fetching NEO feed {} .. {}", start, end);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WatchError::transport(format!(
                "HTTP error {} for feed {} .. {}",
                status, start, end
            )));
        }

        let body = response.text().await?;
        let feed: RawFeed = serde_json::from_str(&body)
            .map_err(|e| WatchError::malformed(format!("Failed to decode feed body: {}", e)))?;

        tracing::debug!(
            "Feed returned {} entries across {} dates (element_count {})",
            feed.entry_count(),
            feed.near_earth_objects.len(),
            feed.element_count
        );

        Ok(feed)
    }
}
