//! Media extraction through the `yt-dlp` command line tool.
//!
//! The tool is run once per request with `-J`, which prints the extraction
//! document (title, duration and every available format) without
//! downloading anything.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, warn};

use crate::api::ytmusic::DESKTOP_USER_AGENT;
use crate::error::{AdapterError, Result};
use crate::models::stream::{watch_url, ExtractionInfo};

/// Default upper bound for one extraction run.
pub const DEFAULT_EXTRACT_TIMEOUT: Duration = Duration::from_secs(20);

/// Request options passed to the extraction tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionProfile {
    /// User agent presented to the video site.
    pub user_agent: String,
    /// Skip TLS certificate validation.
    pub no_check_certificates: bool,
    /// Spoof the forwarded-for header to get around geo restrictions.
    pub geo_bypass: bool,
}

impl ExtractionProfile {
    /// Profile tuned to reduce bot-detection rejections: realistic user
    /// agent, certificate checks disabled and geo bypass enabled.
    pub fn enhanced() -> Self {
        Self {
            user_agent: DESKTOP_USER_AGENT.to_string(),
            no_check_certificates: true,
            geo_bypass: true,
        }
    }

    fn args(&self) -> Vec<String> {
        let mut args = vec!["--user-agent".to_string(), self.user_agent.clone()];
        if self.no_check_certificates {
            args.push("--no-check-certificates".to_string());
        }
        if self.geo_bypass {
            args.push("--geo-bypass".to_string());
        }
        args
    }
}

/// Runs `yt-dlp` as a child process bounded by a timeout.
#[derive(Debug, Clone)]
pub struct YtDlpExtractor {
    binary: PathBuf,
    timeout: Duration,
    profile: ExtractionProfile,
}

impl YtDlpExtractor {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            timeout: DEFAULT_EXTRACT_TIMEOUT,
            profile: ExtractionProfile::enhanced(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_profile(mut self, profile: ExtractionProfile) -> Self {
        self.profile = profile;
        self
    }

    fn command_args(&self, video_id: &str) -> Vec<String> {
        let mut args = vec![
            "-J".to_string(),
            "--no-playlist".to_string(),
            "--no-warnings".to_string(),
            "--quiet".to_string(),
        ];
        args.extend(self.profile.args());
        args.push(watch_url(video_id));
        args
    }

    /// Run the tool and decode its extraction document.
    ///
    /// A timeout kills the child and is reported as a network error.
    pub async fn extract_info(&self, video_id: &str) -> Result<ExtractionInfo> {
        debug!("Running {} for {}", self.binary.display(), video_id);

        let child = Command::new(&self.binary)
            .args(self.command_args(video_id))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                AdapterError::network(format!(
                    "Failed to launch {}: {}",
                    self.binary.display(),
                    e
                ))
            })?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await?
            .map_err(|e| AdapterError::network(format!("Extraction I/O error: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = stderr
                .lines()
                .rev()
                .find(|line| !line.trim().is_empty())
                .unwrap_or("no diagnostic output");
            warn!("Extraction for {} failed ({}): {}", video_id, output.status, reason);
            return Err(AdapterError::rejected(reason.to_string()));
        }

        let info: ExtractionInfo = serde_json::from_slice(&output.stdout)?;
        debug!(
            "Extracted {} formats for {}",
            info.formats.len(),
            info.id.as_deref().unwrap_or(video_id)
        );
        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AdapterErrorKind;

    #[test]
    fn test_enhanced_profile_args() {
        let extractor = YtDlpExtractor::new("yt-dlp");
        let args = extractor.command_args("abc123");
        assert_eq!(args.first().map(String::as_str), Some("-J"));
        assert!(args.contains(&"--no-check-certificates".to_string()));
        assert!(args.contains(&"--geo-bypass".to_string()));
        assert!(args.contains(&DESKTOP_USER_AGENT.to_string()));
        assert_eq!(
            args.last().map(String::as_str),
            Some("https://www.youtube.com/watch?v=abc123")
        );
    }

    #[test]
    fn test_certificate_checks_can_be_restored() {
        let extractor = YtDlpExtractor::new("yt-dlp").with_profile(ExtractionProfile {
            no_check_certificates: false,
            ..ExtractionProfile::enhanced()
        });
        let args = extractor.command_args("abc123");
        assert!(!args.contains(&"--no-check-certificates".to_string()));
    }

    /// Write an executable shell script standing in for the extraction tool.
    #[cfg(unix)]
    fn fake_tool(name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = std::env::temp_dir().join(format!(
            "tunebridge-{}-{}.sh",
            name,
            std::process::id()
        ));
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_slow_tool_times_out_as_network_error() {
        let tool = fake_tool("slow", "sleep 10");
        let extractor = YtDlpExtractor::new(&tool).with_timeout(Duration::from_millis(50));

        let started = std::time::Instant::now();
        let err = extractor.extract_info("abc123").await.unwrap_err();
        std::fs::remove_file(&tool).ok();

        assert_eq!(err.kind(), AdapterErrorKind::Network);
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failing_tool_reports_last_stderr_line() {
        let tool = fake_tool(
            "failing",
            "echo 'WARNING: retrying' >&2\necho 'ERROR: Video unavailable' >&2\nexit 1",
        );
        let err = YtDlpExtractor::new(&tool)
            .extract_info("abc123")
            .await
            .unwrap_err();
        std::fs::remove_file(&tool).ok();

        assert_eq!(err.kind(), AdapterErrorKind::UpstreamRejected);
        assert_eq!(err.message(), "ERROR: Video unavailable");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_tool_output_is_decoded() {
        let tool = fake_tool(
            "ok",
            r#"echo '{"id":"abc123","title":"Hello","duration":295.0,"formats":[{"format_id":"251","url":"https://media.example/251","acodec":"opus","vcodec":"none","abr":135.2}]}'"#,
        );
        let info = YtDlpExtractor::new(&tool).extract_info("abc123").await.unwrap();
        std::fs::remove_file(&tool).ok();

        assert_eq!(info.title.as_deref(), Some("Hello"));
        assert_eq!(info.duration_seconds(), 295);
        assert_eq!(info.formats.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_binary_is_network_error() {
        let extractor = YtDlpExtractor::new("/nonexistent/tunebridge-yt-dlp");
        let err = extractor.extract_info("abc123").await.unwrap_err();
        assert_eq!(err.kind(), AdapterErrorKind::Network);
    }
}
