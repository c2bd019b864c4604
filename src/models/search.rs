//! Search request types.

use serde::{Deserialize, Serialize};

/// Default number of results returned by a search.
pub const DEFAULT_SEARCH_LIMIT: u32 = 20;

/// Kind of item a search is filtered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    #[default]
    Songs,
    Albums,
    Artists,
    Playlists,
}

impl SearchKind {
    /// Parse the `type` query value used by the frontend.
    ///
    /// Unknown values fall back to [`SearchKind::Songs`].
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "albums" | "album" => Self::Albums,
            "artists" | "artist" => Self::Artists,
            "playlists" | "playlist" => Self::Playlists,
            _ => Self::Songs,
        }
    }

    /// Filter token sent to the metadata provider in the `params` field.
    pub fn filter_params(&self) -> &'static str {
        match self {
            Self::Songs => "EgWKAQIIAWoMEA4QChADEAQQCRAF",
            Self::Albums => "EgWKAQIYAWoMEA4QChADEAQQCRAF",
            Self::Artists => "EgWKAQIgAWoMEA4QChADEAQQCRAF",
            Self::Playlists => "EgWKAQIoAWoMEA4QChADEAQQCRAF",
        }
    }

    /// Value of `resultType` on normalized items of this kind.
    pub fn result_type(&self) -> &'static str {
        match self {
            Self::Songs => "song",
            Self::Albums => "album",
            Self::Artists => "artist",
            Self::Playlists => "playlist",
        }
    }
}

/// A search request as received from the frontend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub kind: SearchKind,
    /// Always positive.
    pub limit: u32,
}

impl SearchQuery {
    /// Build a query. A missing or zero limit becomes [`DEFAULT_SEARCH_LIMIT`].
    pub fn new(text: impl Into<String>, kind: SearchKind, limit: Option<u32>) -> Self {
        Self {
            text: text.into(),
            kind,
            limit: limit.filter(|l| *l > 0).unwrap_or(DEFAULT_SEARCH_LIMIT),
        }
    }

    /// Whether the query has no searchable text.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("songs", SearchKind::Songs)]
    #[case("albums", SearchKind::Albums)]
    #[case("Artists", SearchKind::Artists)]
    #[case("playlists", SearchKind::Playlists)]
    #[case("videos", SearchKind::Songs)]
    #[case("", SearchKind::Songs)]
    fn test_parse_kind(#[case] raw: &str, #[case] expected: SearchKind) {
        assert_eq!(SearchKind::parse(raw), expected);
    }

    #[test]
    fn test_zero_limit_uses_default() {
        let query = SearchQuery::new("adele", SearchKind::Songs, Some(0));
        assert_eq!(query.limit, DEFAULT_SEARCH_LIMIT);
        let query = SearchQuery::new("adele", SearchKind::Songs, Some(5));
        assert_eq!(query.limit, 5);
    }

    #[test]
    fn test_blank_text_is_empty() {
        assert!(SearchQuery::new("   ", SearchKind::Songs, None).is_empty());
        assert!(!SearchQuery::new("adele", SearchKind::Songs, None).is_empty());
    }
}
