//! Runtime configuration.
//!
//! Every option can be given as a command line flag or through the
//! environment variable named next to it.

use std::sync::Arc;
use std::time::Duration;

use clap::{ArgAction, Parser, ValueEnum};
use tracing::warn;

use crate::api::{
    ExtractionProfile, ItunesApi, LyricsOvhApi, YtDlpExtractor, YtMusicApi, YtMusicOptions,
};
use crate::error::Result;
use crate::orchestrator::{LinkStyle, Orchestrator};

#[derive(Debug, Clone, Parser)]
#[command(name = "tunebridge")]
#[command(about = "Music metadata, stream and lyrics proxy for a web player", long_about = None)]
pub struct Config {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind
    #[arg(long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Path to the yt-dlp executable
    #[arg(long, env = "YTDLP_PATH", default_value = "yt-dlp")]
    pub ytdlp_path: String,

    /// Upper bound for one stream extraction, in seconds
    #[arg(long, env = "EXTRACT_TIMEOUT_SECS", default_value_t = 20)]
    pub extract_timeout_secs: u64,

    /// Skip TLS certificate validation during extraction
    #[arg(
        long,
        env = "EXTRACT_NO_CHECK_CERTIFICATES",
        default_value_t = true,
        action = ArgAction::Set
    )]
    pub extract_no_check_certificates: bool,

    /// Timeout for YouTube Music requests, in seconds (unbounded when unset)
    #[arg(long, env = "METADATA_TIMEOUT_SECS")]
    pub metadata_timeout_secs: Option<u64>,

    /// Interface language sent to YouTube Music
    #[arg(long, env = "YTMUSIC_LANGUAGE", default_value = "en")]
    pub language: String,

    /// Content region sent to YouTube Music
    #[arg(long, env = "YTMUSIC_REGION", default_value = "US")]
    pub region: String,

    /// Link returned when no direct stream can be extracted
    #[arg(long, env = "STREAM_FALLBACK", value_enum, default_value_t = StreamFallback::Youtube)]
    pub stream_fallback: StreamFallback,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum StreamFallback {
    /// Watch page link
    Youtube,
    /// Embeddable player link
    Embed,
}

impl From<StreamFallback> for LinkStyle {
    fn from(value: StreamFallback) -> Self {
        match value {
            StreamFallback::Youtube => LinkStyle::Watch,
            StreamFallback::Embed => LinkStyle::Embed,
        }
    }
}

impl Config {
    pub fn metadata_options(&self) -> YtMusicOptions {
        YtMusicOptions {
            language: self.language.clone(),
            region: self.region.clone(),
            timeout: self.metadata_timeout_secs.map(Duration::from_secs),
        }
    }

    pub fn extraction_profile(&self) -> ExtractionProfile {
        ExtractionProfile {
            no_check_certificates: self.extract_no_check_certificates,
            ..ExtractionProfile::enhanced()
        }
    }

    /// Build every upstream client and the orchestrator that drives them.
    pub fn build_orchestrator(&self) -> Result<Orchestrator> {
        if self.extract_no_check_certificates {
            warn!("TLS certificate checks are disabled for stream extraction");
        }

        let metadata = YtMusicApi::with_options(self.metadata_options())?;
        let extractor = YtDlpExtractor::new(&self.ytdlp_path)
            .with_timeout(Duration::from_secs(self.extract_timeout_secs))
            .with_profile(self.extraction_profile());

        Ok(Orchestrator::new(
            Arc::new(metadata),
            Arc::new(extractor),
            Arc::new(ItunesApi::new()?),
            Arc::new(LyricsOvhApi::new()?),
        )
        .with_link_style(self.stream_fallback.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["tunebridge"]).unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.extract_timeout_secs, 20);
        assert!(config.extract_no_check_certificates);
        assert_eq!(config.metadata_timeout_secs, None);
        assert_eq!(config.stream_fallback, StreamFallback::Youtube);
    }

    #[test]
    fn test_certificate_checks_can_be_enabled() {
        let config = Config::try_parse_from([
            "tunebridge",
            "--extract-no-check-certificates",
            "false",
            "--stream-fallback",
            "embed",
        ])
        .unwrap();
        assert!(!config.extraction_profile().no_check_certificates);
        assert_eq!(LinkStyle::from(config.stream_fallback), LinkStyle::Embed);
    }

    #[test]
    fn test_metadata_timeout() {
        let config =
            Config::try_parse_from(["tunebridge", "--metadata-timeout-secs", "7"]).unwrap();
        assert_eq!(config.metadata_options().timeout, Some(Duration::from_secs(7)));
    }
}
