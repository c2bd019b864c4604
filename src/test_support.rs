//! In-memory providers for orchestrator and server tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::api::{ArtworkProvider, LyricsProvider, MediaExtractor, MetadataProvider};
use crate::error::{AdapterError, Result};
use crate::models::{ArtworkMatch, ExtractionInfo, MediaFormat, SearchQuery};
use crate::orchestrator::Orchestrator;

#[derive(Default)]
pub struct Calls(AtomicUsize);

impl Calls {
    fn hit(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Metadata provider answering from canned results.
pub struct FakeMetadata {
    pub search: Result<Vec<Value>>,
    pub lookup: Result<Value>,
    pub lyrics_handle: Result<Option<String>>,
    pub lyrics: Result<Option<Value>>,
    pub search_calls: Calls,
    pub lyrics_calls: Calls,
}

impl Default for FakeMetadata {
    fn default() -> Self {
        Self {
            search: Ok(Vec::new()),
            lookup: Ok(json!({})),
            lyrics_handle: Ok(None),
            lyrics: Ok(None),
            search_calls: Calls::default(),
            lyrics_calls: Calls::default(),
        }
    }
}

#[async_trait]
impl MetadataProvider for FakeMetadata {
    async fn search(&self, _query: &SearchQuery) -> Result<Vec<Value>> {
        self.search_calls.hit();
        self.search.clone()
    }

    async fn song(&self, _video_id: &str) -> Result<Value> {
        self.lookup.clone()
    }

    async fn artist(&self, _browse_id: &str) -> Result<Value> {
        self.lookup.clone()
    }

    async fn album(&self, _browse_id: &str) -> Result<Value> {
        self.lookup.clone()
    }

    async fn playlist(&self, _playlist_id: &str, _limit: u32) -> Result<Value> {
        self.lookup.clone()
    }

    async fn charts(&self, _country: &str) -> Result<Value> {
        self.lookup.clone()
    }

    async fn lyrics(&self, _browse_id: &str) -> Result<Option<Value>> {
        self.lyrics.clone()
    }

    async fn lyrics_handle(&self, _video_id: &str) -> Result<Option<String>> {
        self.lyrics_calls.hit();
        self.lyrics_handle.clone()
    }
}

pub struct FakeExtractor {
    pub result: Result<ExtractionInfo>,
    pub calls: Calls,
}

impl Default for FakeExtractor {
    fn default() -> Self {
        Self {
            result: Err(AdapterError::network("extraction timed out")),
            calls: Calls::default(),
        }
    }
}

#[async_trait]
impl MediaExtractor for FakeExtractor {
    async fn extract(&self, _video_id: &str) -> Result<ExtractionInfo> {
        self.calls.hit();
        self.result.clone()
    }
}

pub struct FakeArtwork {
    pub result: Result<Option<ArtworkMatch>>,
    pub calls: Calls,
}

impl Default for FakeArtwork {
    fn default() -> Self {
        Self {
            result: Ok(None),
            calls: Calls::default(),
        }
    }
}

#[async_trait]
impl ArtworkProvider for FakeArtwork {
    async fn lookup(&self, _term: &str) -> Result<Option<ArtworkMatch>> {
        self.calls.hit();
        self.result.clone()
    }
}

pub struct FakeLyrics {
    pub result: Result<Option<String>>,
    pub calls: Calls,
}

impl Default for FakeLyrics {
    fn default() -> Self {
        Self {
            result: Ok(None),
            calls: Calls::default(),
        }
    }
}

#[async_trait]
impl LyricsProvider for FakeLyrics {
    async fn lookup(&self, _artist: &str, _title: &str) -> Result<Option<String>> {
        self.calls.hit();
        self.result.clone()
    }
}

/// Shared handles to every fake, so tests can inspect call counts after
/// handing them to an orchestrator.
#[derive(Default)]
pub struct Fakes {
    pub metadata: Arc<FakeMetadata>,
    pub extractor: Arc<FakeExtractor>,
    pub artwork: Arc<FakeArtwork>,
    pub lyrics: Arc<FakeLyrics>,
}

impl Fakes {
    pub fn orchestrator(&self) -> Orchestrator {
        Orchestrator::new(
            self.metadata.clone(),
            self.extractor.clone(),
            self.artwork.clone(),
            self.lyrics.clone(),
        )
    }
}

pub fn audio_format(format_id: &str, abr: f64) -> MediaFormat {
    MediaFormat {
        format_id: Some(format_id.to_string()),
        url: Some(format!("https://media.example/{}", format_id)),
        acodec: Some("opus".to_string()),
        vcodec: Some("none".to_string()),
        abr: Some(abr),
    }
}

pub fn video_format(format_id: &str) -> MediaFormat {
    MediaFormat {
        format_id: Some(format_id.to_string()),
        url: Some(format!("https://media.example/{}", format_id)),
        acodec: Some("mp4a.40.2".to_string()),
        vcodec: Some("avc1.42001E".to_string()),
        abr: Some(96.0),
    }
}
