//! Stream resolution types and the media-extraction payload they are built from.

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// Canonical watch page for a video.
pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}

/// Embeddable player page for a video.
pub fn embed_url(video_id: &str) -> String {
    format!("https://www.youtube.com/embed/{}", video_id)
}

/// How a stream was resolved. Exactly one variant is ever produced per request.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamOutcome {
    /// A playable audio URL extracted from the video.
    Direct {
        url: String,
        title: String,
        duration_seconds: u64,
    },
    /// An embeddable player the frontend can load instead.
    Embed { embed_url: String },
    /// A plain link to the watch page.
    YoutubeLink { url: String },
}

/// Result of resolving a stream for a video.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamResolution {
    pub video_id: String,
    pub outcome: StreamOutcome,
}

impl StreamResolution {
    pub fn direct(video_id: &str, url: String, title: String, duration_seconds: u64) -> Self {
        Self {
            video_id: video_id.to_string(),
            outcome: StreamOutcome::Direct {
                url,
                title,
                duration_seconds,
            },
        }
    }

    pub fn embed(video_id: &str) -> Self {
        Self {
            video_id: video_id.to_string(),
            outcome: StreamOutcome::Embed {
                embed_url: embed_url(video_id),
            },
        }
    }

    pub fn youtube_link(video_id: &str) -> Self {
        Self {
            video_id: video_id.to_string(),
            outcome: StreamOutcome::YoutubeLink {
                url: watch_url(video_id),
            },
        }
    }

    /// Value of the `method` field sent to the frontend.
    pub fn method(&self) -> &'static str {
        match self.outcome {
            StreamOutcome::Direct { .. } => "direct",
            StreamOutcome::Embed { .. } => "embed",
            StreamOutcome::YoutubeLink { .. } => "youtube",
        }
    }
}

// Flat shape read by the frontend: `streamUrl` for direct playback, `embedUrl` otherwise.
impl Serialize for StreamResolution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("videoId", &self.video_id)?;
        match &self.outcome {
            StreamOutcome::Direct {
                url,
                title,
                duration_seconds,
            } => {
                map.serialize_entry("streamUrl", url)?;
                map.serialize_entry("method", self.method())?;
                map.serialize_entry("title", title)?;
                map.serialize_entry("duration", duration_seconds)?;
            }
            StreamOutcome::Embed { embed_url } => {
                map.serialize_entry("embedUrl", embed_url)?;
                map.serialize_entry("method", self.method())?;
            }
            StreamOutcome::YoutubeLink { url } => {
                map.serialize_entry("embedUrl", url)?;
                map.serialize_entry("method", self.method())?;
            }
        }
        map.end()
    }
}

/// Subset of the `yt-dlp -J` document used for stream selection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtractionInfo {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    /// Seconds; yt-dlp reports this as a float for some extractors.
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub formats: Vec<MediaFormat>,
}

impl ExtractionInfo {
    pub fn duration_seconds(&self) -> u64 {
        self.duration
            .filter(|d| d.is_finite() && *d > 0.0)
            .map(|d| d.round() as u64)
            .unwrap_or(0)
    }
}

/// One downloadable format from the extraction result.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaFormat {
    #[serde(default)]
    pub format_id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub acodec: Option<String>,
    #[serde(default)]
    pub vcodec: Option<String>,
    /// Average audio bitrate in kbit/s.
    #[serde(default)]
    pub abr: Option<f64>,
}

impl MediaFormat {
    /// True when the format carries audio and no video track.
    pub fn is_audio_only(&self) -> bool {
        let no_video = codec_absent(self.vcodec.as_deref());
        let has_audio = !codec_absent(self.acodec.as_deref());
        no_video && has_audio
    }

    pub fn bitrate(&self) -> f64 {
        self.abr.filter(|b| b.is_finite()).unwrap_or(0.0)
    }
}

fn codec_absent(codec: Option<&str>) -> bool {
    match codec {
        None => true,
        Some(c) => c.is_empty() || c.eq_ignore_ascii_case("none"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_direct_serialization() {
        let resolution = StreamResolution::direct(
            "abc123",
            "https://rr1.example/audio".to_string(),
            "Hello".to_string(),
            295,
        );
        let value = serde_json::to_value(&resolution).unwrap();
        assert_eq!(
            value,
            json!({
                "videoId": "abc123",
                "streamUrl": "https://rr1.example/audio",
                "method": "direct",
                "title": "Hello",
                "duration": 295
            })
        );
    }

    #[test]
    fn test_youtube_link_serialization() {
        let value = serde_json::to_value(StreamResolution::youtube_link("abc123")).unwrap();
        assert_eq!(
            value,
            json!({
                "videoId": "abc123",
                "embedUrl": "https://www.youtube.com/watch?v=abc123",
                "method": "youtube"
            })
        );
    }

    #[test]
    fn test_embed_serialization() {
        let value = serde_json::to_value(StreamResolution::embed("abc123")).unwrap();
        assert_eq!(value["embedUrl"], "https://www.youtube.com/embed/abc123");
        assert_eq!(value["method"], "embed");
        assert!(value.get("streamUrl").is_none());
    }

    #[test]
    fn test_audio_only_detection() {
        let audio: MediaFormat = serde_json::from_value(json!({
            "format_id": "251", "url": "u", "acodec": "opus", "vcodec": "none", "abr": 130.5
        }))
        .unwrap();
        let muxed: MediaFormat = serde_json::from_value(json!({
            "format_id": "18", "url": "u", "acodec": "mp4a.40.2", "vcodec": "avc1.42001E"
        }))
        .unwrap();
        let storyboard: MediaFormat = serde_json::from_value(json!({
            "format_id": "sb0", "url": "u", "acodec": "none", "vcodec": "none"
        }))
        .unwrap();
        assert!(audio.is_audio_only());
        assert!(!muxed.is_audio_only());
        assert!(!storyboard.is_audio_only());
    }

    #[test]
    fn test_duration_rounding() {
        let info = ExtractionInfo {
            duration: Some(212.6),
            ..Default::default()
        };
        assert_eq!(info.duration_seconds(), 213);
        assert_eq!(ExtractionInfo::default().duration_seconds(), 0);
    }
}
