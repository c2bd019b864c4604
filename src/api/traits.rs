//! Ports the orchestrator depends on.
//!
//! Each upstream provider sits behind one of these traits so the
//! orchestrator can be built with the real clients in production and with
//! test doubles in tests.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::models::{ArtworkMatch, ExtractionInfo, SearchQuery};

use super::{ItunesApi, LyricsOvhApi, YtDlpExtractor, YtMusicApi};

/// Primary metadata provider.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Normalized search items; an empty list when nothing matches.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Value>>;

    async fn song(&self, video_id: &str) -> Result<Value>;

    async fn artist(&self, browse_id: &str) -> Result<Value>;

    async fn album(&self, browse_id: &str) -> Result<Value>;

    async fn playlist(&self, playlist_id: &str, limit: u32) -> Result<Value>;

    async fn charts(&self, country: &str) -> Result<Value>;

    /// Lyrics by lyrics browse id; `None` when the page has none.
    async fn lyrics(&self, browse_id: &str) -> Result<Option<Value>>;

    /// Lyrics browse id from the watch context of a video, if one exists.
    async fn lyrics_handle(&self, video_id: &str) -> Result<Option<String>>;
}

/// Resolves playable media for a video.
#[async_trait]
pub trait MediaExtractor: Send + Sync {
    async fn extract(&self, video_id: &str) -> Result<ExtractionInfo>;
}

/// Cover artwork lookup.
#[async_trait]
pub trait ArtworkProvider: Send + Sync {
    /// Best single match for a free-text term; `None` when nothing matches.
    async fn lookup(&self, term: &str) -> Result<Option<ArtworkMatch>>;
}

/// Lyrics lookup by artist and title.
#[async_trait]
pub trait LyricsProvider: Send + Sync {
    /// Lyrics text; `None` when the provider has none.
    async fn lookup(&self, artist: &str, title: &str) -> Result<Option<String>>;
}

// Implement traits for real clients

#[async_trait]
impl MetadataProvider for YtMusicApi {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Value>> {
        YtMusicApi::search(self, &query.text, query.kind, query.limit).await
    }

    async fn song(&self, video_id: &str) -> Result<Value> {
        self.get_song(video_id).await
    }

    async fn artist(&self, browse_id: &str) -> Result<Value> {
        self.get_artist(browse_id).await
    }

    async fn album(&self, browse_id: &str) -> Result<Value> {
        self.get_album(browse_id).await
    }

    async fn playlist(&self, playlist_id: &str, limit: u32) -> Result<Value> {
        self.get_playlist(playlist_id, limit).await
    }

    async fn charts(&self, country: &str) -> Result<Value> {
        self.get_charts(country).await
    }

    async fn lyrics(&self, browse_id: &str) -> Result<Option<Value>> {
        self.get_lyrics(browse_id).await
    }

    async fn lyrics_handle(&self, video_id: &str) -> Result<Option<String>> {
        self.get_lyrics_handle(video_id).await
    }
}

#[async_trait]
impl MediaExtractor for YtDlpExtractor {
    async fn extract(&self, video_id: &str) -> Result<ExtractionInfo> {
        self.extract_info(video_id).await
    }
}

#[async_trait]
impl ArtworkProvider for ItunesApi {
    async fn lookup(&self, term: &str) -> Result<Option<ArtworkMatch>> {
        self.search_artwork(term).await
    }
}

#[async_trait]
impl LyricsProvider for LyricsOvhApi {
    async fn lookup(&self, artist: &str, title: &str) -> Result<Option<String>> {
        self.get_lyrics(artist, title).await
    }
}
