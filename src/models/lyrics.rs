//! Lyrics types.

use serde::{Deserialize, Serialize};

/// Which provider satisfied a lyrics request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LyricsSource {
    #[serde(rename = "ytmusic")]
    YtMusic,
    #[serde(rename = "lyrics.ovh")]
    LyricsOvh,
}

/// Lyrics text together with the provider it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LyricsResult {
    #[serde(rename = "lyrics")]
    pub text: String,
    pub source: LyricsSource,
}

/// Parameters of a lyrics search. Blank strings are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LyricsRequest {
    pub video_id: Option<String>,
    pub artist: Option<String>,
    pub title: Option<String>,
}

impl LyricsRequest {
    pub fn new(video_id: Option<String>, artist: Option<String>, title: Option<String>) -> Self {
        Self {
            video_id: non_blank(video_id),
            artist: non_blank(artist),
            title: non_blank(title),
        }
    }

    /// Artist and title, when both are present.
    pub fn artist_and_title(&self) -> Option<(&str, &str)> {
        match (&self.artist, &self.title) {
            (Some(artist), Some(title)) => Some((artist.as_str(), title.as_str())),
            _ => None,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_source_serialization() {
        let result = LyricsResult {
            text: "la la".to_string(),
            source: LyricsSource::LyricsOvh,
        };
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"lyrics": "la la", "source": "lyrics.ovh"})
        );
    }

    #[test]
    fn test_blank_fields_dropped() {
        let request = LyricsRequest::new(Some("".into()), Some("X".into()), Some("  ".into()));
        assert_eq!(request.video_id, None);
        assert_eq!(request.artist_and_title(), None);
    }
}
