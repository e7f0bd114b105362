//! Configuration schema definitions using serde.

use cdcplot_common::{FilterCriteria, LoggingConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for cdcplot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the dataset comes from and where it is cached.
    pub source: SourceConfig,
    /// Row filter applied before aggregation.
    pub filter: FilterCriteria,
    /// Chart output settings.
    pub render: RenderConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl Config {
    /// Names of the sections that differ from the built-in defaults.
    ///
    /// Logging is left out since it never changes what the run produces.
    pub fn customized_sections(&self) -> Vec<&'static str> {
        let defaults = Self::default();
        let mut sections = Vec::new();
        if self.source != defaults.source {
            sections.push("source");
        }
        if self.filter != defaults.filter {
            sections.push("filter");
        }
        if self.render != defaults.render {
            sections.push("render");
        }
        sections
    }
}

/// Dataset source configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Remote CSV URL.
    pub url: String,
    /// Local path of the downloaded CSV. An existing file skips the download.
    pub csv_path: PathBuf,
    /// Time allowed to establish the connection. Streaming the body has no
    /// deadline, so a slow but live transfer always completes.
    pub connect_timeout_seconds: u64,
}

/// Chart output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// PNG file to write.
    pub output_path: PathBuf,
    /// Figure width in inches.
    pub width_inches: f64,
    /// Figure height in inches.
    pub height_inches: f64,
    /// Pixels per inch of the saved image.
    pub dpi: u32,
    /// Open the saved image in the platform viewer.
    pub show: bool,
}

impl RenderConfig {
    /// Pixel dimensions of the saved image.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn pixel_size(&self) -> (u32, u32) {
        let dpi = f64::from(self.dpi);
        (
            (self.width_inches * dpi).round() as u32,
            (self.height_inches * dpi).round() as u32,
        )
    }
}
