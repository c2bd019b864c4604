//! Upstream clients.
//!
//! This module provides one client per external provider:
//! - [`YtMusicApi`]: YouTube Music metadata (search, songs, artists, albums, playlists, charts, lyrics)
//! - [`YtDlpExtractor`]: audio stream extraction through `yt-dlp`
//! - [`ItunesApi`]: cover artwork
//! - [`LyricsOvhApi`]: fallback lyrics
//!
//! The orchestrator only sees them through the ports in [`traits`].

pub mod extractor;
pub mod itunes;
pub mod lyrics_ovh;
pub mod traits;
pub mod ytmusic;

pub use extractor::{ExtractionProfile, YtDlpExtractor};
pub use itunes::ItunesApi;
pub use lyrics_ovh::LyricsOvhApi;
pub use traits::{ArtworkProvider, LyricsProvider, MediaExtractor, MetadataProvider};
pub use ytmusic::{YtMusicApi, YtMusicOptions};
