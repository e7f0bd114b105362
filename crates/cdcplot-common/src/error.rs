//! Error types and utilities for cdcplot

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for cdcplot operations
pub type Result<T> = std::result::Result<T, CdcPlotError>;

/// Boxed error used as the source of wrapped failures
pub type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for cdcplot operations.
///
/// Every variant is fatal for a run. The binary reports the diagnostic and
/// exits with [`CdcPlotError::exit_code`].
#[derive(Error, Debug)]
pub enum CdcPlotError {
    /// The server answered the download request with a non-success status
    #[error("HTTP error occurred while downloading '{}' from {url}: status {status}", destination.display())]
    Http {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
        /// File the download was meant to produce
        destination: PathBuf,
    },

    /// Transport failure other than an HTTP status (DNS, connect, timeout, body)
    #[error("An error occurred while downloading '{}' from {url}: {message}", destination.display())]
    Network {
        /// Requested URL
        url: String,
        /// File the download was meant to produce
        destination: PathBuf,
        /// Short classification of the failure
        message: String,
        /// Underlying transport error
        #[source]
        source: Option<BoxedSource>,
    },

    /// The input file does not exist
    #[error("Error: '{}' file not found", path.display())]
    FileNotFound {
        /// Offending path
        path: PathBuf,
    },

    /// The input file exists but has no content
    #[error("Error: '{}' is empty", path.display())]
    EmptyInput {
        /// Offending path
        path: PathBuf,
    },

    /// The input file could not be parsed as the expected CSV table
    #[error("Error: '{}' is malformed or contains parsing errors: {message}", path.display())]
    Malformed {
        /// Offending path
        path: PathBuf,
        /// Parser diagnostic
        message: String,
        /// Underlying CSV error, if any
        #[source]
        source: Option<BoxedSource>,
    },

    /// No row survived the filter
    #[error("No data available for the specified filters in '{}'", path.display())]
    NoMatchingRows {
        /// File that was filtered
        path: PathBuf,
    },

    /// Local I/O failure (writing the download, creating directories)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation failure
    #[error("Configuration error: {message}")]
    Config {
        /// What was wrong with the configuration
        message: String,
        /// Underlying loader or parser error, if any
        #[source]
        source: Option<BoxedSource>,
    },

    /// Graph generation and plotting errors
    #[error("Graph error: {message}")]
    Graph {
        /// What failed while drawing
        message: String,
        /// Underlying plotters error, if any
        #[source]
        source: Option<BoxedSource>,
    },
}

impl CdcPlotError {
    /// Create an HTTP status error
    pub fn http(url: impl Into<String>, status: u16, destination: impl Into<PathBuf>) -> Self {
        Self::Http {
            url: url.into(),
            status,
            destination: destination.into(),
        }
    }

    /// Create a network error with source
    pub fn network_with_source(
        url: impl Into<String>,
        destination: impl Into<PathBuf>,
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Network {
            url: url.into(),
            destination: destination.into(),
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Classify a reqwest failure for a download of `url` into `destination`
    pub fn from_transport(err: reqwest::Error, url: &str, destination: &Path) -> Self {
        if let Some(status) = err.status() {
            return Self::http(url, status.as_u16(), destination);
        }

        let message = if err.is_timeout() {
            "Request timeout"
        } else if err.is_connect() {
            "Connection failed"
        } else if err.is_body() || err.is_decode() {
            "Failed to read response body"
        } else {
            "Network request failed"
        };
        Self::network_with_source(url, destination, message, err)
    }

    /// Create a file-not-found error
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create an empty-input error
    pub fn empty_input(path: impl Into<PathBuf>) -> Self {
        Self::EmptyInput { path: path.into() }
    }

    /// Create a malformed-input error
    pub fn malformed(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::Malformed {
            path: path.into(),
            message: msg.into(),
            source: None,
        }
    }

    /// Create a malformed-input error with source
    pub fn malformed_with_source(
        path: impl Into<PathBuf>,
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Malformed {
            path: path.into(),
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an empty-filter-result error
    pub fn no_matching_rows(path: impl Into<PathBuf>) -> Self {
        Self::NoMatchingRows { path: path.into() }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new graph error
    pub fn graph(msg: impl Into<String>) -> Self {
        Self::Graph {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new graph error with source
    pub fn graph_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Graph {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Short, stable name of the failure category for structured logs
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Http { .. } => "http",
            Self::Network { .. } => "network",
            Self::FileNotFound { .. } => "file_not_found",
            Self::EmptyInput { .. } => "empty_input",
            Self::Malformed { .. } => "malformed",
            Self::NoMatchingRows { .. } => "no_matching_rows",
            Self::Io(_) => "io",
            Self::Config { .. } => "config",
            Self::Graph { .. } => "graph",
        }
    }

    /// Process exit status for this failure. Every failure is fatal.
    pub const fn exit_code(&self) -> u8 {
        1
    }
}

/// Convert from serde_yaml::Error to CdcPlotError
impl From<serde_yaml::Error> for CdcPlotError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::config_with_source("YAML parsing error", err)
    }
}

#[cfg(feature = "plotters")]
/// Convert from plotters drawing errors to CdcPlotError
impl<T> From<plotters::drawing::DrawingAreaErrorKind<T>> for CdcPlotError
where
    T: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        Self::graph_with_source("Graph rendering failed", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{error::Error, io};

    #[test]
    fn test_error_display_names_the_file() {
        let err = CdcPlotError::file_not_found("rows.csv");
        assert_eq!(err.to_string(), "Error: 'rows.csv' file not found");

        let err = CdcPlotError::empty_input("rows.csv");
        assert_eq!(err.to_string(), "Error: 'rows.csv' is empty");

        let err = CdcPlotError::malformed("rows.csv", "found record with 3 fields");
        assert!(err.to_string().contains("'rows.csv' is malformed"));
        assert!(err.to_string().contains("3 fields"));

        let err = CdcPlotError::no_matching_rows("rows.csv");
        assert!(err.to_string().starts_with("No data available for the specified filters"));
    }

    #[test]
    fn test_http_error_formatting() {
        let err = CdcPlotError::http("https://example.org/rows.csv", 404, "rows.csv");
        let display = err.to_string();
        assert!(display.contains("HTTP error"));
        assert!(display.contains("'rows.csv'"));
        assert!(display.contains("status 404"));
        assert_eq!(err.category(), "http");
    }

    #[test]
    fn test_network_error_with_source() {
        let io_error = io::Error::new(io::ErrorKind::ConnectionReset, "reset by peer");
        let err = CdcPlotError::network_with_source(
            "https://example.org/rows.csv",
            "rows.csv",
            "Failed to read response body",
            io_error,
        );

        assert!(err.to_string().contains("An error occurred while downloading"));
        assert!(err.source().is_some());
        assert_eq!(err.category(), "network");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err: CdcPlotError = io_error.into();

        assert!(err.to_string().contains("I/O error"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_error = serde_yaml::from_str::<u32>("[not, a, number]").unwrap_err();
        let err: CdcPlotError = yaml_error.into();

        assert!(err.to_string().contains("Configuration error"));
        assert_eq!(err.category(), "config");
    }

    #[test]
    fn test_every_category_exits_with_one() {
        let errors = vec![
            CdcPlotError::http("u", 500, "f"),
            CdcPlotError::network_with_source(
                "u",
                "f",
                "Connection failed",
                io::Error::new(io::ErrorKind::ConnectionRefused, "refused"),
            ),
            CdcPlotError::file_not_found("f"),
            CdcPlotError::empty_input("f"),
            CdcPlotError::malformed("f", "bad"),
            CdcPlotError::no_matching_rows("f"),
            CdcPlotError::config("bad"),
            CdcPlotError::graph("bad"),
        ];

        for err in errors {
            assert_eq!(err.exit_code(), 1, "{} should exit with 1", err.category());
        }
    }

    #[test]
    fn test_error_chain_preservation() {
        let root_error = io::Error::new(io::ErrorKind::InvalidData, "Root cause");
        let err = CdcPlotError::malformed_with_source("rows.csv", "Middle layer", root_error);

        let mut current_error: &dyn std::error::Error = &err;
        let mut error_count = 0;

        while let Some(source) = current_error.source() {
            current_error = source;
            error_count += 1;
        }

        assert_eq!(error_count, 1);
    }
}
