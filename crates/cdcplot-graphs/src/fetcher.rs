//! Conditional, streamed download of the source CSV.

use cdcplot_common::{CdcPlotError, Result};
use cdcplot_config::SourceConfig;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, warn};

/// What [`DataFetcher::fetch`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The destination already existed; no request was made.
    Skipped,
    /// The resource was downloaded.
    Downloaded {
        /// Bytes written to the destination.
        bytes: u64,
    },
}

/// HTTP client that downloads a resource once and reuses the local copy afterwards.
pub struct DataFetcher {
    client: reqwest::Client,
}

impl DataFetcher {
    /// Creates a fetcher that gives up if no connection is made within
    /// `connect_timeout`. The body transfer itself is never cut off.
    pub fn new(connect_timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CdcPlotError::config_with_source("Failed to build HTTP client", e))?;
        Ok(Self { client })
    }

    /// Creates a fetcher from the `source` configuration section.
    pub fn from_config(source: &SourceConfig) -> Result<Self> {
        Self::new(Duration::from_secs(source.connect_timeout_seconds))
    }

    /// Downloads `url` to `destination` unless `destination` already exists.
    ///
    /// The body is streamed chunk by chunk into `<destination>.part`, which is
    /// renamed onto `destination` only once the whole body has been written.
    /// A failed download leaves no file behind. There is exactly one attempt.
    pub async fn fetch(&self, url: &str, destination: &Path) -> Result<FetchOutcome> {
        if destination.exists() {
            info!("'{}' already exists. Skipping download.", destination.display());
            return Ok(FetchOutcome::Skipped);
        }

        info!("Downloading '{}' from {url}...", destination.display());
        let part = part_path(destination);

        let result = async {
            let bytes = self.stream_to(url, destination, &part).await?;
            tokio::fs::rename(&part, destination).await?;
            Ok::<u64, CdcPlotError>(bytes)
        }
        .await;

        match result {
            Ok(bytes) => {
                info!(bytes, "Downloaded '{}' successfully.", destination.display());
                Ok(FetchOutcome::Downloaded { bytes })
            }
            Err(e) => {
                if let Err(cleanup) = tokio::fs::remove_file(&part).await {
                    if cleanup.kind() != std::io::ErrorKind::NotFound {
                        warn!("Failed to remove partial download '{}': {cleanup}", part.display());
                    }
                }
                Err(e)
            }
        }
    }

    async fn stream_to(&self, url: &str, destination: &Path, part: &Path) -> Result<u64> {
        let transport = |e: reqwest::Error| CdcPlotError::from_transport(e, url, destination);

        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(transport)?
            .error_for_status()
            .map_err(transport)?;

        debug!(status = %response.status(), content_length = ?response.content_length(), "Response received");

        if let Some(parent) = part.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut writer = BufWriter::new(tokio::fs::File::create(part).await?);
        let mut written = 0u64;
        while let Some(chunk) = response.chunk().await.map_err(transport)? {
            writer.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        writer.flush().await?;

        Ok(written)
    }
}

/// Sibling path the body is streamed into before the final rename.
pub fn part_path(destination: &Path) -> PathBuf {
    let mut name = destination
        .file_name()
        .map(std::ffi::OsStr::to_os_string)
        .unwrap_or_default();
    name.push(".part");
    destination.with_file_name(name)
}
