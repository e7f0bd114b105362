//! Default values matching the fixed constants of the CDC age-group chart.

use crate::schema::{Config, RenderConfig, SourceConfig};
use cdcplot_common::{FilterCriteria, LoggingConfig};
use std::path::PathBuf;

/// CDC "Provisional COVID-19 Deaths by Sex and Age" CSV export.
pub const DEFAULT_SOURCE_URL: &str = "https://data.cdc.gov/api/views/9bhg-hcku/rows.csv";
/// Local cache file for the export.
pub const DEFAULT_CSV_PATH: &str = "rows.csv";
/// Chart output file.
pub const DEFAULT_OUTPUT_PATH: &str = "result.png";
/// Connect timeout for the download.
pub const DEFAULT_CONNECT_TIMEOUT_SECONDS: u64 = 30;
/// Saved image resolution.
pub const DEFAULT_DPI: u32 = 300;

impl Default for Config {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            filter: FilterCriteria::default(),
            render: RenderConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SOURCE_URL.to_string(),
            csv_path: PathBuf::from(DEFAULT_CSV_PATH),
            connect_timeout_seconds: DEFAULT_CONNECT_TIMEOUT_SECONDS,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            width_inches: 14.0,
            height_inches: 8.0,
            dpi: DEFAULT_DPI,
            show: true,
        }
    }
}
