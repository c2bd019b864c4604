//! Request handlers.
//!
//! ```text
//! GET /api/search?q=&type=&limit=
//! GET /api/song/{videoId}
//! GET /api/stream/{videoId}
//! GET /api/artist/{browseId}
//! GET /api/album/{browseId}
//! GET /api/playlist/{playlistId}?limit=
//! GET /api/home
//! GET /api/charts?country=
//! GET /api/lyrics/search?videoId=&artist=&title=
//! GET /api/lyrics/{browseId}
//! GET /api/cover/search?q=
//! GET /health
//! ```

use std::collections::HashMap;

use actix_web::{get, web, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::error::{ApiError, ApiResult};
use crate::models::{LyricsRequest, SearchKind, SearchQuery};
use crate::orchestrator::{Lookup, Orchestrator};

const DEFAULT_PLAYLIST_LIMIT: u32 = 100;
const DEFAULT_COUNTRY: &str = "US";

type State = web::Data<Orchestrator>;

/// Parse an optional numeric parameter; anything unparsable counts as absent.
fn parse_limit(value: Option<&str>) -> Option<u32> {
    value.and_then(|v| v.trim().parse().ok())
}

/// Query parameters of routes that must not reject a request over its
/// query string. Repeated keys keep their first value.
#[derive(Debug)]
struct LenientQuery(HashMap<String, String>);

impl LenientQuery {
    fn from_request(req: &HttpRequest) -> Self {
        let pairs = match web::Query::<Vec<(String, String)>>::from_query(req.query_string()) {
            Ok(pairs) => pairs.into_inner(),
            Err(e) => {
                warn!("Ignoring unparsable query string for {}: {}", req.path(), e);
                Vec::new()
            }
        };

        let mut values = HashMap::new();
        for (key, value) in pairs {
            values.entry(key).or_insert(value);
        }
        Self(values)
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    fn take(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }
}

/// Always answers 200 with a list, whatever the query string holds.
#[get("/api/search")]
pub async fn search(state: State, req: HttpRequest) -> HttpResponse {
    let mut params = LenientQuery::from_request(&req);
    let kind = params.get("type").map(SearchKind::parse).unwrap_or_default();
    let limit = parse_limit(params.get("limit"));
    let query = SearchQuery::new(params.take("q").unwrap_or_default(), kind, limit);
    HttpResponse::Ok().json(state.search(&query).await)
}

#[get("/api/song/{video_id}")]
pub async fn song(state: State, path: web::Path<String>) -> ApiResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.song(&path).await?))
}

#[get("/api/stream/{video_id}")]
pub async fn stream(state: State, path: web::Path<String>) -> HttpResponse {
    HttpResponse::Ok().json(state.resolve_stream(&path).await)
}

#[get("/api/artist/{browse_id}")]
pub async fn artist(state: State, path: web::Path<String>) -> ApiResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.artist(&path).await?))
}

#[get("/api/album/{browse_id}")]
pub async fn album(state: State, path: web::Path<String>) -> ApiResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.album(&path).await?))
}

#[derive(Debug, Deserialize)]
pub struct PlaylistParams {
    limit: Option<String>,
}

#[get("/api/playlist/{playlist_id}")]
pub async fn playlist(
    state: State,
    path: web::Path<String>,
    params: web::Query<PlaylistParams>,
) -> ApiResult<HttpResponse> {
    let limit = parse_limit(params.limit.as_deref())
        .filter(|limit| *limit > 0)
        .unwrap_or(DEFAULT_PLAYLIST_LIMIT);
    Ok(HttpResponse::Ok().json(state.playlist(&path, limit).await?))
}

#[get("/api/home")]
pub async fn home(state: State) -> HttpResponse {
    HttpResponse::Ok().json(state.home())
}

#[derive(Debug, Deserialize)]
pub struct ChartsParams {
    country: Option<String>,
}

#[get("/api/charts")]
pub async fn charts(state: State, params: web::Query<ChartsParams>) -> ApiResult<HttpResponse> {
    let country = params
        .country
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_COUNTRY);
    Ok(HttpResponse::Ok().json(state.charts(country).await?))
}

/// Answers 200 or 404 only. Must be registered before [`lyrics`], whose
/// path would also match.
#[get("/api/lyrics/search")]
pub async fn lyrics_search(state: State, req: HttpRequest) -> ApiResult<HttpResponse> {
    let mut params = LenientQuery::from_request(&req);
    let request = LyricsRequest::new(
        params.take("videoId"),
        params.take("artist"),
        params.take("title"),
    );
    match state.resolve_lyrics(&request).await {
        Lookup::Found(found) => Ok(HttpResponse::Ok().json(found)),
        Lookup::NotFound => Err(ApiError::not_found("Lyrics not found")),
    }
}

/// A page without lyrics is answered with `null`.
#[get("/api/lyrics/{browse_id}")]
pub async fn lyrics(state: State, path: web::Path<String>) -> ApiResult<HttpResponse> {
    let page = state.lyrics(&path).await?.found();
    if page.is_none() {
        debug!("No lyrics on page {}", path.as_str());
    }
    Ok(HttpResponse::Ok().json(page.unwrap_or(Value::Null)))
}

#[derive(Debug, Deserialize)]
pub struct CoverParams {
    q: Option<String>,
}

#[get("/api/cover/search")]
pub async fn cover_search(
    state: State,
    params: web::Query<CoverParams>,
) -> ApiResult<HttpResponse> {
    let term = params
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ApiError::bad_request("Query parameter required"))?;

    match state.resolve_artwork(term).await? {
        Lookup::Found(found) => Ok(HttpResponse::Ok().json(found)),
        Lookup::NotFound => Err(ApiError::not_found("No cover found")),
    }
}

#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}
