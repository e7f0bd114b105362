//! Structured logging infrastructure for cdcplot

use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Output style of the console log layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line, colored output
    Pretty,
    /// Single-line output
    Compact,
    /// Default `tracing-subscriber` layout
    Full,
}

/// Configuration for the logging system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "cdcplot_graphs=trace").
    /// `RUST_LOG` takes precedence when set.
    pub level: String,
    /// Layout of each event
    pub format: LogFormat,
    /// Whether to emit ANSI colors when stderr is a terminal
    pub ansi: bool,
    /// Whether to include span open/close events
    pub include_spans: bool,
    /// Whether to include target module information
    pub include_targets: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
            ansi: true,
            include_spans: false,
            include_targets: false,
        }
    }
}

impl LoggingConfig {
    /// Build the environment filter, preferring `RUST_LOG` over the configured level
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.level))
            .unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Initialize the tracing subscriber with the given configuration.
///
/// Events go to stderr so that diagnostics stay separate from any piped output.
pub fn init_logging(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let span_events = if config.include_spans {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let registry = tracing_subscriber::registry().with(config.env_filter());

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_span_events(span_events)
        .with_ansi(config.ansi && std::io::stderr().is_terminal())
        .with_target(config.include_targets);

    match config.format {
        LogFormat::Pretty => registry.with(layer.pretty()).try_init()?,
        LogFormat::Compact => registry.with(layer.compact()).try_init()?,
        LogFormat::Full => registry.with(layer).try_init()?,
    }

    Ok(())
}

/// Initialize logging with default configuration
pub fn init_default_logging() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_logging(&LoggingConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Compact);
        assert!(config.ansi);
        assert!(!config.include_spans);
        assert!(!config.include_targets);
    }

    #[test]
    fn test_format_deserializes_lowercase() {
        let config: LoggingConfig = serde_yaml::from_str("format: pretty\nlevel: debug\n").unwrap();
        assert_eq!(config.format, LogFormat::Pretty);
        assert_eq!(config.level, "debug");
        // Unspecified fields fall back to defaults
        assert!(config.ansi);
    }
}
