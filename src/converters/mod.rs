//! Response normalization.
//!
//! This module turns raw provider payloads into the small set of shapes the
//! frontend reads. The metadata provider's list items are flattened into
//! objects carrying `resultType`, `title`, ids, `artists`, `album`,
//! `duration` and `thumbnails`; everything else is passed through.

use serde_json::{json, Map, Value};

use crate::models::artwork::{ArtworkMatch, ArtworkResult, ARTWORK_SIZES, BASE_RESOLUTION_TOKEN};
use crate::models::{MediaFormat, SearchKind};

const SEARCH_SECTIONS: &str =
    "/contents/tabbedSearchResultsRenderer/tabs/0/tabRenderer/content/sectionListRenderer/contents";

const WATCH_TABS: &str = "/contents/singleColumnMusicWatchNextResultsRenderer/tabbedRenderer/watchNextTabbedResultsRenderer/tabs";

const LYRICS_SHELF: &str = "/contents/sectionListRenderer/contents/0/musicDescriptionShelfRenderer";

const PLAYLIST_TRACKS: [&str; 2] = [
    "/contents/twoColumnBrowseResultsRenderer/secondaryContents/sectionListRenderer/contents/0/musicPlaylistShelfRenderer/contents",
    "/contents/singleColumnBrowseResultsRenderer/tabs/0/tabRenderer/content/sectionListRenderer/contents/0/musicPlaylistShelfRenderer/contents",
];

const OVERLAY_VIDEO_ID: &str = "/overlay/musicItemThumbnailOverlayRenderer/content/musicPlayButtonRenderer/playNavigationEndpoint/watchEndpoint/videoId";

/// Top-level keys that only matter to the provider's own web client.
const NOISE_KEYS: [&str; 9] = [
    "responseContext",
    "trackingParams",
    "playerAds",
    "playbackTracking",
    "adPlacements",
    "annotations",
    "playerConfig",
    "attestation",
    "frameworkUpdates",
];

const SEPARATOR: &str = " • ";

const TYPE_LABELS: [&str; 8] = [
    "Song", "Video", "Album", "Single", "EP", "Playlist", "Artist", "Episode",
];

// ==================
// SEARCH
// ==================

/// Flatten a search response into at most `limit` frontend items.
///
/// A response without result shelves yields an empty list.
pub fn parse_search_results(response: &Value, kind: SearchKind, limit: usize) -> Vec<Value> {
    let Some(sections) = response.pointer(SEARCH_SECTIONS).and_then(Value::as_array) else {
        return Vec::new();
    };

    sections
        .iter()
        .filter_map(|section| {
            section
                .pointer("/musicShelfRenderer/contents")
                .and_then(Value::as_array)
        })
        .flatten()
        .filter_map(|item| item.get("musicResponsiveListItemRenderer"))
        .filter_map(|renderer| parse_list_item(renderer, kind))
        .take(limit)
        .collect()
}

fn parse_list_item(renderer: &Value, kind: SearchKind) -> Option<Value> {
    let title = column_runs(renderer, 0)
        .first()
        .and_then(|run| run.get("text"))
        .and_then(Value::as_str)?;
    let subtitle = Subtitle::parse(column_runs(renderer, 1), kind);

    let mut item = Map::new();
    item.insert("resultType".to_string(), json!(kind.result_type()));
    item.insert("title".to_string(), json!(title));

    match kind {
        SearchKind::Songs => {
            // Unplayable rows carry no video id.
            let video_id = renderer
                .pointer("/playlistItemData/videoId")
                .or_else(|| renderer.pointer(OVERLAY_VIDEO_ID))
                .and_then(Value::as_str)?;
            item.insert("videoId".to_string(), json!(video_id));
            item.insert("artists".to_string(), Value::Array(subtitle.artists));
            item.insert("album".to_string(), subtitle.album.unwrap_or(Value::Null));
            if let Some(duration) = subtitle.duration {
                item.insert(
                    "duration_seconds".to_string(),
                    json!(parse_duration(&duration)),
                );
                item.insert("duration".to_string(), json!(duration));
            }
        }
        SearchKind::Albums => {
            item.insert("browseId".to_string(), json!(browse_id(renderer)));
            item.insert(
                "type".to_string(),
                json!(subtitle.type_label.unwrap_or_else(|| "Album".to_string())),
            );
            item.insert("artists".to_string(), Value::Array(subtitle.artists));
            item.insert("year".to_string(), json!(subtitle.year));
        }
        SearchKind::Artists => {
            item.insert("browseId".to_string(), json!(browse_id(renderer)));
            item.insert("artist".to_string(), json!(title));
            let subscribers = subtitle
                .other
                .iter()
                .find(|text| text.contains("subscriber"))
                .map(|text| text.split(' ').next().unwrap_or_default().to_string());
            item.insert("subscribers".to_string(), json!(subscribers));
        }
        SearchKind::Playlists => {
            let browse = browse_id(renderer);
            let playlist_id = browse
                .as_deref()
                .map(|id| id.strip_prefix("VL").unwrap_or(id).to_string());
            item.insert("browseId".to_string(), json!(browse));
            item.insert("playlistId".to_string(), json!(playlist_id));
            let author = subtitle
                .artists
                .first()
                .and_then(|a| a.get("name"))
                .and_then(Value::as_str)
                .map(str::to_string);
            item.insert("author".to_string(), json!(author));
            item.insert("itemCount".to_string(), json!(subtitle.other.last()));
        }
    }

    item.insert("thumbnails".to_string(), thumbnails(renderer));
    Some(Value::Object(item))
}

/// Text runs of the n-th flex column of a list item.
fn column_runs(renderer: &Value, column: usize) -> &[Value] {
    renderer
        .get("flexColumns")
        .and_then(|cols| cols.get(column))
        .and_then(|col| col.pointer("/musicResponsiveListItemFlexColumnRenderer/text/runs"))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn browse_id(renderer: &Value) -> Option<String> {
    renderer
        .pointer("/navigationEndpoint/browseEndpoint/browseId")
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn thumbnails(renderer: &Value) -> Value {
    renderer
        .pointer("/thumbnail/musicThumbnailRenderer/thumbnail/thumbnails")
        .filter(|t| t.is_array())
        .cloned()
        .unwrap_or_else(|| json!([]))
}

/// Pieces of the second column of a list item, split on the bullet separator.
#[derive(Debug, Default)]
struct Subtitle {
    type_label: Option<String>,
    artists: Vec<Value>,
    album: Option<Value>,
    duration: Option<String>,
    year: Option<String>,
    other: Vec<String>,
}

impl Subtitle {
    fn parse(runs: &[Value], kind: SearchKind) -> Self {
        let mut subtitle = Self::default();
        let segments = runs.split(|run| run_text(run) == SEPARATOR);

        for (index, segment) in segments.enumerate() {
            let mut linked = false;
            for run in segment {
                let text = run_text(run);
                let id = run
                    .pointer("/navigationEndpoint/browseEndpoint/browseId")
                    .and_then(Value::as_str);
                match id {
                    Some(id) if id.starts_with("MPRE") => {
                        subtitle.album = Some(json!({"name": text, "id": id}));
                        linked = true;
                    }
                    Some(id) => {
                        subtitle.artists.push(json!({"name": text, "id": id}));
                        linked = true;
                    }
                    None => {}
                }
            }
            if linked {
                continue;
            }

            let text: String = segment.iter().map(run_text).collect();
            let text = text.trim();
            if text.is_empty() {
                continue;
            }
            if index == 0 && TYPE_LABELS.contains(&text) {
                subtitle.type_label = Some(text.to_string());
            } else if is_duration(text) {
                subtitle.duration = Some(text.to_string());
            } else if text.len() == 4 && text.chars().all(|c| c.is_ascii_digit()) {
                subtitle.year = Some(text.to_string());
            } else if kind != SearchKind::Artists
                && subtitle.artists.is_empty()
                && subtitle.other.is_empty()
            {
                // Unlinked artist names appear before any other metadata.
                subtitle
                    .artists
                    .extend(text.split(", ").map(|name| json!({"name": name, "id": null})));
            } else {
                subtitle.other.push(text.to_string());
            }
        }

        subtitle
    }
}

fn run_text(run: &Value) -> &str {
    run.get("text").and_then(Value::as_str).unwrap_or("")
}

fn is_duration(text: &str) -> bool {
    let parts: Vec<&str> = text.split(':').collect();
    (2..=3).contains(&parts.len())
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
}

/// Convert `m:ss` or `h:mm:ss` to seconds.
pub fn parse_duration(text: &str) -> u64 {
    text.split(':')
        .map(|part| part.parse::<u64>().unwrap_or(0))
        .fold(0, |acc, part| acc * 60 + part)
}

// ==================
// LYRICS
// ==================

/// Find the lyrics browse id advertised in a watch-next response.
pub fn extract_lyrics_handle(watch_next: &Value) -> Option<String> {
    watch_next
        .pointer(WATCH_TABS)
        .and_then(Value::as_array)?
        .iter()
        .filter_map(|tab| tab.pointer("/tabRenderer/endpoint/browseEndpoint/browseId"))
        .filter_map(Value::as_str)
        .find(|id| id.starts_with("MPLY"))
        .map(str::to_string)
}

/// Extract `{lyrics, source}` from a lyrics browse response.
///
/// Returns `None` when the response has no lyrics text.
pub fn parse_lyrics(response: &Value) -> Option<Value> {
    let shelf = response.pointer(LYRICS_SHELF)?;
    let text: String = shelf
        .pointer("/description/runs")
        .and_then(Value::as_array)?
        .iter()
        .map(run_text)
        .collect();
    if text.trim().is_empty() {
        return None;
    }

    let source = shelf
        .pointer("/footer/runs/0/text")
        .and_then(Value::as_str);

    Some(json!({
        "lyrics": text,
        "source": source,
        "hasTimestamps": false,
    }))
}

// ==================
// PASS-THROUGH
// ==================

/// Drop provider bookkeeping from a response before it is passed through.
pub fn strip_noise(mut response: Value) -> Value {
    if let Some(obj) = response.as_object_mut() {
        for key in NOISE_KEYS {
            obj.remove(key);
        }
    }
    response
}

/// Keep at most `limit` tracks in a playlist browse response.
pub fn truncate_playlist_tracks(response: &mut Value, limit: usize) {
    for path in PLAYLIST_TRACKS {
        if let Some(tracks) = response.pointer_mut(path).and_then(Value::as_array_mut) {
            tracks.truncate(limit);
            return;
        }
    }
}

// ==================
// STREAMS
// ==================

/// Pick the audio-only format with the highest average bitrate.
///
/// Formats without a URL are skipped, a missing bitrate counts as 0 and the
/// first format wins a tie.
pub fn select_best_audio(formats: &[MediaFormat]) -> Option<&MediaFormat> {
    formats
        .iter()
        .filter(|f| f.is_audio_only())
        .filter(|f| f.url.as_deref().is_some_and(|u| !u.is_empty()))
        .fold(None, |best: Option<&MediaFormat>, candidate| match best {
            Some(current) if current.bitrate() >= candidate.bitrate() => Some(current),
            _ => Some(candidate),
        })
}

// ==================
// ARTWORK
// ==================

/// Parse the first result of an artwork search response.
///
/// A result without an artwork URL counts as no match.
pub fn parse_artwork_match(response: &Value) -> Option<ArtworkMatch> {
    let result = response
        .get("results")
        .and_then(Value::as_array)
        .and_then(|results| results.first())?;

    let base_url = result
        .get("artworkUrl100")
        .and_then(Value::as_str)
        .filter(|url| !url.is_empty())?;

    let field = |key: &str| result.get(key).and_then(Value::as_str).map(str::to_string);

    Some(ArtworkMatch {
        base_url: base_url.to_string(),
        title: field("trackName"),
        artist: field("artistName"),
        album: field("collectionName"),
    })
}

/// Replace the last occurrence of `token` in `url` with `size`.
///
/// The URL is returned unchanged when it does not contain the token.
pub fn substitute_resolution(url: &str, token: &str, size: &str) -> String {
    match url.rfind(token) {
        Some(pos) => format!("{}{}{}", &url[..pos], size, &url[pos + token.len()..]),
        None => url.to_string(),
    }
}

/// Derive the four cover sizes from a single match.
pub fn derive_artwork(artwork: ArtworkMatch) -> ArtworkResult {
    let [small, medium, big, xl] = ARTWORK_SIZES
        .map(|size| substitute_resolution(&artwork.base_url, BASE_RESOLUTION_TOKEN, size));

    ArtworkResult {
        small,
        medium,
        big,
        xl,
        title: artwork.title,
        artist: artwork.artist,
        album: artwork.album,
    }
}
