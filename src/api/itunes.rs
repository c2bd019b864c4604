//! iTunes Search client used for high resolution cover artwork.
//!
//! No API key is required.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::converters;
use crate::error::{AdapterError, Result};
use crate::models::ArtworkMatch;

const SEARCH_URL: &str = "https://itunes.apple.com/search";

/// Upper bound for one artwork lookup.
pub const ARTWORK_TIMEOUT: Duration = Duration::from_secs(8);

#[derive(Debug, Clone)]
pub struct ItunesApi {
    client: Client,
}

impl ItunesApi {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(ARTWORK_TIMEOUT)
            .build()
            .map_err(|e| AdapterError::network(format!("Failed to create client: {}", e)))?;
        Ok(Self { client })
    }

    /// Look up the single best song match for a free-text term.
    ///
    /// Returns `Ok(None)` when the provider has no match.
    pub async fn search_artwork(&self, term: &str) -> Result<Option<ArtworkMatch>> {
        debug!("GET {} term={:?}", SEARCH_URL, term);

        let response = self
            .client
            .get(SEARCH_URL)
            .query(&[
                ("term", term),
                ("media", "music"),
                ("entity", "song"),
                ("limit", "1"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdapterError::rejected(format!(
                "iTunes search returned HTTP {}",
                status
            )));
        }

        let data: Value = response.json().await?;
        debug!(
            "iTunes search returned {} results",
            data.get("resultCount").and_then(|c| c.as_u64()).unwrap_or(0)
        );

        Ok(converters::parse_artwork_match(&data))
    }
}
