//! Value types exchanged between the adapters, the orchestrator and the HTTP layer.
//!
//! Every type here lives for a single request only.

pub mod artwork;
pub mod lyrics;
pub mod search;
pub mod stream;

// Re-exports for convenience
pub use artwork::{ArtworkMatch, ArtworkResult};
pub use lyrics::{LyricsRequest, LyricsResult, LyricsSource};
pub use search::{SearchKind, SearchQuery, DEFAULT_SEARCH_LIMIT};
pub use stream::{ExtractionInfo, MediaFormat, StreamOutcome, StreamResolution};
