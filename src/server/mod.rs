//! HTTP boundary.
//!
//! Routes requests to [`Orchestrator`] operations and renders their results
//! as JSON. The orchestrator is built once at startup and shared by every
//! worker through `web::Data`.

pub mod error;
pub mod handlers;

use actix_web::middleware::{DefaultHeaders, Logger};
use actix_web::{error::QueryPayloadError, web, App, HttpRequest, HttpServer};
use tracing::{info, warn};

use crate::config::Config;
use crate::orchestrator::Orchestrator;

pub use error::{ApiError, ApiResult};

/// Headers added to every response so browser frontends on other origins
/// can call the API.
pub fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new().add(("Access-Control-Allow-Origin", "*"))
}

fn query_error(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    warn!("Rejected query string for {}: {}", req.path(), err);
    ApiError::bad_request(err.to_string()).into()
}

/// Register every route and the query extractor configuration.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(query_error))
        .service(handlers::search)
        .service(handlers::song)
        .service(handlers::stream)
        .service(handlers::artist)
        .service(handlers::album)
        .service(handlers::playlist)
        .service(handlers::home)
        .service(handlers::charts)
        .service(handlers::lyrics_search)
        .service(handlers::lyrics)
        .service(handlers::cover_search)
        .service(handlers::health);
}

/// Serve the API until the process is stopped.
pub async fn run(config: &Config, orchestrator: Orchestrator) -> std::io::Result<()> {
    let state = web::Data::new(orchestrator);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(cors_headers())
            .wrap(Logger::default())
            .configure(configure)
    })
    .bind((config.host.as_str(), config.port))?;

    info!("Listening on {}:{}", config.host, config.port);
    server.run().await
}
