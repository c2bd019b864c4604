//! lyrics.ovh client, used as the fallback lyrics source.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use tracing::debug;

use crate::error::{AdapterError, Result};

const API_BASE_URL: &str = "https://api.lyrics.ovh/v1/";

/// Kept short so a slow provider does not hold the request.
pub const LYRICS_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct LyricsOvhApi {
    client: Client,
}

impl LyricsOvhApi {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(LYRICS_TIMEOUT)
            .build()
            .map_err(|e| AdapterError::network(format!("Failed to create client: {}", e)))?;
        Ok(Self { client })
    }

    /// Build `/v1/{artist}/{title}` with both parts percent-encoded.
    fn lyrics_url(artist: &str, title: &str) -> Result<Url> {
        let mut url = Url::parse(API_BASE_URL)
            .map_err(|e| AdapterError::malformed(format!("Invalid base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| AdapterError::malformed("Base URL cannot carry a path"))?
            .pop_if_empty()
            .push(artist)
            .push(title);
        Ok(url)
    }

    /// Plain lyrics text, or `None` when the provider has none.
    pub async fn get_lyrics(&self, artist: &str, title: &str) -> Result<Option<String>> {
        let url = Self::lyrics_url(artist, title)?;
        debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(AdapterError::rejected(format!(
                "lyrics.ovh returned HTTP {}",
                status
            )));
        }

        let data: Value = response.json().await?;
        Ok(data
            .get("lyrics")
            .and_then(|l| l.as_str())
            .filter(|l| !l.trim().is_empty())
            .map(|l| l.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lyrics_url_encodes_segments() {
        let url = LyricsOvhApi::lyrics_url("AC/DC", "Back In Black").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.lyrics.ovh/v1/AC%2FDC/Back%20In%20Black"
        );
    }
}
