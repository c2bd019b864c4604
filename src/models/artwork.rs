//! Cover artwork types.

use serde::Serialize;

/// Resolution token present in artwork URLs returned by the artwork provider.
pub const BASE_RESOLUTION_TOKEN: &str = "100x100";

/// Sizes requested for the four output URLs, smallest first.
pub const ARTWORK_SIZES: [&str; 4] = ["200x200", "400x400", "600x600", "1200x1200"];

/// Single best match reported by the artwork provider.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArtworkMatch {
    /// Artwork URL at [`BASE_RESOLUTION_TOKEN`].
    pub base_url: String,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
}

/// Cover URLs at four sizes, all derived from the same base image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtworkResult {
    #[serde(rename = "cover_small")]
    pub small: String,
    #[serde(rename = "cover_medium")]
    pub medium: String,
    #[serde(rename = "cover_big")]
    pub big: String,
    #[serde(rename = "cover_xl")]
    pub xl: String,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
}
