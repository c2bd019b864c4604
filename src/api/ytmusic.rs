//! YouTube Music client.
//!
//! This module provides a client for the InnerTube API used by the
//! music.youtube.com web player (`youtubei/v1/*`). No authentication is
//! required for the public endpoints used here.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{cookie::Jar, Client, StatusCode, Url};
use serde_json::{json, Value};
use tracing::{debug, error};

use crate::converters;
use crate::error::{AdapterError, Result};
use crate::models::SearchKind;

/// Base URL for the InnerTube API.
const API_BASE_URL: &str = "https://music.youtube.com/youtubei/v1/";

const ORIGIN: &str = "https://music.youtube.com";

const CLIENT_NAME: &str = "WEB_REMIX";

const CLIENT_VERSION: &str = "1.20241023.01.00";

/// Consent cookie that skips the EU consent interstitial.
const CONSENT_COOKIE: &str = "SOCS=CAI";

/// Browse id of the charts page.
const CHARTS_BROWSE_ID: &str = "FEmusic_charts";

/// Desktop browser user agent sent to upstream providers.
pub const DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Locale and transport settings for [`YtMusicApi`].
#[derive(Debug, Clone)]
pub struct YtMusicOptions {
    /// Interface language (`hl`).
    pub language: String,
    /// Content region (`gl`).
    pub region: String,
    /// Optional per-request timeout. `None` leaves requests bounded only by
    /// the provider.
    pub timeout: Option<Duration>,
}

impl Default for YtMusicOptions {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            region: "US".to_string(),
            timeout: None,
        }
    }
}

/// YouTube Music metadata client.
///
/// Constructed once at startup and shared by every request.
///
/// # Example
///
/// ```rust,no_run
/// use tunebridge::YtMusicApi;
/// use tunebridge::models::SearchKind;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let api = YtMusicApi::new()?;
///     let songs = api.search("adele hello", SearchKind::Songs, 5).await?;
///     println!("{} songs", songs.len());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct YtMusicApi {
    client: Client,
    language: String,
    region: String,
}

impl YtMusicApi {
    /// Create a client with default locale and no local timeout.
    pub fn new() -> Result<Self> {
        Self::with_options(YtMusicOptions::default())
    }

    pub fn with_options(options: YtMusicOptions) -> Result<Self> {
        let jar = Arc::new(Jar::default());
        let origin = ORIGIN
            .parse::<Url>()
            .map_err(|e| AdapterError::malformed(format!("Invalid origin URL: {}", e)))?;
        jar.add_cookie_str(CONSENT_COOKIE, &origin);

        let mut builder = Client::builder()
            .user_agent(DESKTOP_USER_AGENT)
            .cookie_provider(jar);
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AdapterError::network(format!("Failed to create client: {}", e)))?;

        Ok(Self {
            client,
            language: options.language,
            region: options.region,
        })
    }

    fn context(&self) -> Value {
        json!({
            "client": {
                "clientName": CLIENT_NAME,
                "clientVersion": CLIENT_VERSION,
                "hl": self.language,
                "gl": self.region,
            },
            "user": {}
        })
    }

    /// POST a request body to an InnerTube endpoint.
    async fn call_api(&self, endpoint: &str, mut body: Value) -> Result<Value> {
        if let Some(obj) = body.as_object_mut() {
            obj.insert("context".to_string(), self.context());
        }

        let url = format!("{}{}", API_BASE_URL, endpoint);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .query(&[("alt", "json"), ("prettyPrint", "false")])
            .header("Origin", ORIGIN)
            .header("X-Origin", ORIGIN)
            .header("Referer", ORIGIN)
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;

        if status == StatusCode::NOT_FOUND {
            return Err(AdapterError::not_found(format!("{} returned 404", endpoint)));
        }

        let result: Value = match serde_json::from_str(&text) {
            Ok(v) => v,
            Err(e) => {
                let preview: String = text.chars().take(500).collect();
                error!(
                    "Failed to parse YouTube Music response (status {}): {}",
                    status, preview
                );
                return Err(AdapterError::malformed(format!(
                    "Invalid JSON response (status {}): {}",
                    status, e
                )));
            }
        };

        if let Some(err) = result.get("error") {
            let message = err
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("Unknown error");
            error!("YouTube Music API error on {}: {}", endpoint, message);
            return Err(AdapterError::rejected(message.to_string()));
        }

        if !status.is_success() {
            return Err(AdapterError::rejected(format!(
                "{} returned HTTP {}",
                endpoint, status
            )));
        }

        Ok(result)
    }

    async fn browse(&self, body: Value) -> Result<Value> {
        self.call_api("browse", body).await
    }

    /// Search, filtered to one result kind.
    ///
    /// "No results" is an empty list.
    pub async fn search(&self, query: &str, kind: SearchKind, limit: u32) -> Result<Vec<Value>> {
        let response = self
            .call_api(
                "search",
                json!({ "query": query, "params": kind.filter_params() }),
            )
            .await?;

        let results = converters::parse_search_results(&response, kind, limit as usize);
        debug!("Search '{}' ({:?}) -> {} items", query, kind, results.len());
        Ok(results)
    }

    /// Player metadata for a video.
    pub async fn get_song(&self, video_id: &str) -> Result<Value> {
        let response = self
            .call_api("player", json!({ "videoId": video_id }))
            .await?;
        Ok(converters::strip_noise(response))
    }

    /// Artist page. Accepts channel ids and `MPLA`-prefixed artist browse ids.
    pub async fn get_artist(&self, browse_id: &str) -> Result<Value> {
        let channel_id = browse_id.strip_prefix("MPLA").unwrap_or(browse_id);
        let response = self.browse(json!({ "browseId": channel_id })).await?;
        Ok(converters::strip_noise(response))
    }

    pub async fn get_album(&self, browse_id: &str) -> Result<Value> {
        let response = self.browse(json!({ "browseId": browse_id })).await?;
        Ok(converters::strip_noise(response))
    }

    /// Playlist page with at most `limit` tracks.
    pub async fn get_playlist(&self, playlist_id: &str, limit: u32) -> Result<Value> {
        let browse_id = if playlist_id.starts_with("VL") {
            playlist_id.to_string()
        } else {
            format!("VL{}", playlist_id)
        };
        let mut response = self.browse(json!({ "browseId": browse_id })).await?;
        converters::truncate_playlist_tracks(&mut response, limit as usize);
        Ok(converters::strip_noise(response))
    }

    /// Charts for a country code (`ZZ` is global).
    pub async fn get_charts(&self, country: &str) -> Result<Value> {
        let response = self
            .browse(json!({
                "browseId": CHARTS_BROWSE_ID,
                "formData": { "selectedValues": [country] }
            }))
            .await?;
        Ok(converters::strip_noise(response))
    }

    /// Lyrics by lyrics browse id.
    ///
    /// Returns `None` when the page carries no lyrics.
    pub async fn get_lyrics(&self, browse_id: &str) -> Result<Option<Value>> {
        let response = self.browse(json!({ "browseId": browse_id })).await?;
        Ok(converters::parse_lyrics(&response))
    }

    /// Lyrics browse id advertised by the watch context of a video, if any.
    pub async fn get_lyrics_handle(&self, video_id: &str) -> Result<Option<String>> {
        let response = self
            .call_api(
                "next",
                json!({
                    "videoId": video_id,
                    "enablePersistentPlaylistPanel": true,
                    "isAudioOnly": true,
                    "tunerSettingValue": "AUTOMIX_SETTING_NORMAL"
                }),
            )
            .await?;
        Ok(converters::extract_lyrics_handle(&response))
    }
}
