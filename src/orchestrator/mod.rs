//! Request orchestration across the upstream providers.
//!
//! [`Orchestrator`] exposes one operation per API capability and decides,
//! per operation, which provider to call, in what order, and how a failure
//! is reported:
//!
//! - search and stream resolution never fail; they degrade to an empty list
//!   or a link to the watch page,
//! - lyrics and artwork searches distinguish "not found" from failure,
//! - direct lookups pass provider failures through.

pub mod fallback;

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::api::{ArtworkProvider, LyricsProvider, MediaExtractor, MetadataProvider};
use crate::converters;
use crate::error::Result;
use crate::models::{
    ArtworkResult, ExtractionInfo, LyricsRequest, LyricsResult, LyricsSource, SearchQuery,
    StreamResolution,
};

use fallback::{first_hit, Tier};

/// Result of an operation where "nothing matched" is a valid answer.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
}

impl<T> Lookup<T> {
    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::NotFound => None,
        }
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::Found(value),
            None => Self::NotFound,
        }
    }
}

/// Link returned when no direct stream could be extracted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LinkStyle {
    /// Watch page URL, reported with method `youtube`.
    #[default]
    Watch,
    /// Embeddable player URL, reported with method `embed`.
    Embed,
}

/// Fallback orchestrator shared by all request handlers.
///
/// Holds no per-request state; every operation builds its values fresh.
#[derive(Clone)]
pub struct Orchestrator {
    metadata: Arc<dyn MetadataProvider>,
    extractor: Arc<dyn MediaExtractor>,
    artwork: Arc<dyn ArtworkProvider>,
    lyrics: Arc<dyn LyricsProvider>,
    link_style: LinkStyle,
}

impl Orchestrator {
    pub fn new(
        metadata: Arc<dyn MetadataProvider>,
        extractor: Arc<dyn MediaExtractor>,
        artwork: Arc<dyn ArtworkProvider>,
        lyrics: Arc<dyn LyricsProvider>,
    ) -> Self {
        Self {
            metadata,
            extractor,
            artwork,
            lyrics,
            link_style: LinkStyle::default(),
        }
    }

    pub fn with_link_style(mut self, link_style: LinkStyle) -> Self {
        self.link_style = link_style;
        self
    }

    // ==================
    // SEARCH
    // ==================

    /// Search the metadata provider.
    ///
    /// Blank queries return an empty list without calling the provider, and
    /// provider failures are logged and turned into an empty list.
    pub async fn search(&self, query: &SearchQuery) -> Vec<Value> {
        if query.is_empty() {
            return Vec::new();
        }

        info!(
            "Searching '{}' ({:?}, limit {})",
            query.text, query.kind, query.limit
        );
        match self.metadata.search(query).await {
            Ok(results) => {
                info!("Found {} results for '{}'", results.len(), query.text);
                results
            }
            Err(e) => {
                warn!("Search for '{}' failed, returning no results: {}", query.text, e);
                Vec::new()
            }
        }
    }

    // ==================
    // STREAMS
    // ==================

    /// Resolve something playable for a video.
    ///
    /// Tries a direct audio stream first and falls back to a link, so this
    /// always produces a resolution.
    pub async fn resolve_stream(&self, video_id: &str) -> StreamResolution {
        let extractor = self.extractor.as_ref();
        let link_style = self.link_style;

        let tiers = vec![
            Tier::new("direct", move || direct_tier(extractor, video_id)),
            Tier::new("link", move || link_tier(video_id, link_style)),
        ];

        let resolution = first_hit(tiers)
            .await
            .into_value()
            .unwrap_or_else(|| link_resolution(video_id, link_style));
        info!("Stream for {} resolved via {}", video_id, resolution.method());
        resolution
    }

    // ==================
    // LYRICS
    // ==================

    /// Find lyrics, first through the metadata provider's watch context
    /// (when a video id is given), then through the fallback provider
    /// (when both artist and title are given).
    ///
    /// Provider failures count as misses.
    pub async fn resolve_lyrics(&self, request: &LyricsRequest) -> Lookup<LyricsResult> {
        let mut tiers = Vec::new();

        if let Some(video_id) = request.video_id.as_deref() {
            let metadata = self.metadata.as_ref();
            tiers.push(Tier::new("ytmusic", move || {
                watch_lyrics_tier(metadata, video_id)
            }));
        }

        if let Some((artist, title)) = request.artist_and_title() {
            let provider = self.lyrics.as_ref();
            tiers.push(Tier::new("lyrics.ovh", move || {
                fallback_lyrics_tier(provider, artist, title)
            }));
        }

        let found = first_hit(tiers).await.into_value();
        if found.is_none() {
            info!("No lyrics found for {:?}", request);
        }
        found.into()
    }

    // ==================
    // ARTWORK
    // ==================

    /// Look up cover artwork for a free-text term.
    ///
    /// Provider failures are returned as errors; no match is `NotFound`.
    pub async fn resolve_artwork(&self, term: &str) -> Result<Lookup<ArtworkResult>> {
        let provider = self.artwork.as_ref();
        let outcome = first_hit(vec![Tier::new("itunes", move || provider.lookup(term))]).await;

        let artwork = outcome.into_result()?.map(converters::derive_artwork);
        match &artwork {
            Some(found) => info!("Cover found for '{}': {}", term, found.xl),
            None => info!("No cover found for '{}'", term),
        }
        Ok(artwork.into())
    }

    // ==================
    // DIRECT LOOKUPS
    // ==================

    pub async fn song(&self, video_id: &str) -> Result<Value> {
        self.metadata.song(video_id).await
    }

    pub async fn artist(&self, browse_id: &str) -> Result<Value> {
        self.metadata.artist(browse_id).await
    }

    pub async fn album(&self, browse_id: &str) -> Result<Value> {
        self.metadata.album(browse_id).await
    }

    pub async fn playlist(&self, playlist_id: &str, limit: u32) -> Result<Value> {
        self.metadata.playlist(playlist_id, limit).await
    }

    pub async fn charts(&self, country: &str) -> Result<Value> {
        self.metadata.charts(country).await
    }

    /// Lyrics by lyrics browse id.
    pub async fn lyrics(&self, browse_id: &str) -> Result<Lookup<Value>> {
        Ok(self.metadata.lyrics(browse_id).await?.into())
    }

    /// Home feed. The provider rejects this request for anonymous clients,
    /// so it is served as a stable empty list.
    pub fn home(&self) -> Vec<Value> {
        debug!("Home feed is disabled, returning an empty list");
        Vec::new()
    }
}

async fn direct_tier(
    extractor: &dyn MediaExtractor,
    video_id: &str,
) -> Result<Option<StreamResolution>> {
    let info = extractor.extract(video_id).await?;
    Ok(direct_resolution(video_id, &info))
}

async fn link_tier(video_id: &str, link_style: LinkStyle) -> Result<Option<StreamResolution>> {
    Ok(Some(link_resolution(video_id, link_style)))
}

async fn watch_lyrics_tier(
    metadata: &dyn MetadataProvider,
    video_id: &str,
) -> Result<Option<LyricsResult>> {
    let Some(handle) = metadata.lyrics_handle(video_id).await? else {
        debug!("No lyrics handle in watch context of {}", video_id);
        return Ok(None);
    };
    let lyrics = metadata.lyrics(&handle).await?;
    Ok(lyrics_text(lyrics.as_ref()).map(|text| LyricsResult {
        text,
        source: LyricsSource::YtMusic,
    }))
}

async fn fallback_lyrics_tier(
    provider: &dyn LyricsProvider,
    artist: &str,
    title: &str,
) -> Result<Option<LyricsResult>> {
    let text = provider.lookup(artist, title).await?;
    Ok(text.map(|text| LyricsResult {
        text,
        source: LyricsSource::LyricsOvh,
    }))
}

fn direct_resolution(video_id: &str, info: &ExtractionInfo) -> Option<StreamResolution> {
    let Some(format) = converters::select_best_audio(&info.formats) else {
        warn!("No audio-only format extracted for {}", video_id);
        return None;
    };
    let url = format.url.clone()?;
    debug!(
        "Selected format {} ({} kbit/s) for {}",
        format.format_id.as_deref().unwrap_or("?"),
        format.bitrate(),
        video_id
    );
    Some(StreamResolution::direct(
        video_id,
        url,
        info.title.clone().unwrap_or_default(),
        info.duration_seconds(),
    ))
}

fn link_resolution(video_id: &str, link_style: LinkStyle) -> StreamResolution {
    match link_style {
        LinkStyle::Watch => StreamResolution::youtube_link(video_id),
        LinkStyle::Embed => StreamResolution::embed(video_id),
    }
}

fn lyrics_text(lyrics: Option<&Value>) -> Option<String> {
    lyrics?
        .get("lyrics")
        .and_then(Value::as_str)
        .filter(|text| !text.trim().is_empty())
        .map(str::to_string)
}
