//! # Tunebridge
//!
//! A backend for web music players that puts YouTube Music metadata,
//! `yt-dlp` audio streams, iTunes cover art and lyrics.ovh lyrics behind a
//! single JSON API.
//!
//! ## Quick Start
//!
//! The easiest way to use this library is through the [`Orchestrator`], built
//! from a [`Config`]:
//!
//! ```rust,no_run
//! use clap::Parser;
//! use tunebridge::models::{SearchKind, SearchQuery};
//! use tunebridge::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let orchestrator = Config::parse().build_orchestrator()?;
//!
//!     // Search never fails; upstream errors become an empty list
//!     let songs = orchestrator
//!         .search(&SearchQuery::new("adele hello", SearchKind::Songs, Some(5)))
//!         .await;
//!     println!("{} songs", songs.len());
//!
//!     // Always resolves, to a direct stream or a link
//!     let stream = orchestrator.resolve_stream("YQHsXMglC9A").await;
//!     println!("Resolved via {}", stream.method());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Search** songs, albums, artists and playlists
//! - **Direct audio streams** with a watch-page fallback
//! - **Lyrics** from YouTube Music, falling back to lyrics.ovh
//! - **Cover art** at four sizes
//!
//! ## Low-Level APIs
//!
//! For more control, you can use the upstream clients directly:
//!
//! - [`YtMusicApi`] - YouTube Music metadata
//! - [`YtDlpExtractor`] - Stream extraction
//! - [`ItunesApi`] - Cover artwork
//! - [`LyricsOvhApi`] - Fallback lyrics

pub mod api;
pub mod config;
pub mod converters;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod server;

#[cfg(test)]
mod test_support;

// Main interface (recommended)
pub use config::Config;
pub use orchestrator::{LinkStyle, Lookup, Orchestrator};

// Low-level APIs
pub use api::{ItunesApi, LyricsOvhApi, YtDlpExtractor, YtMusicApi};

// Error types
pub use error::{AdapterError, AdapterErrorKind, Result};
