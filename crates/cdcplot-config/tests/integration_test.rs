//! Integration tests for cdcplot-config crate.

use cdcplot_config::{Config, ConfigError, ConfigLoader};
use std::io::Write;

#[test]
fn test_load_config_from_yaml_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "source:\n  csv_path: cache/rows.csv\nfilter:\n  state: Texas\nrender:\n  dpi: 100\n  show: false\nlogging:\n  level: warn\n"
    )
    .unwrap();

    let config = ConfigLoader::load_config(file.path()).unwrap();

    assert_eq!(config.source.csv_path.to_str(), Some("cache/rows.csv"));
    assert_eq!(config.filter.state, "Texas");
    // Unspecified filter fields keep their defaults
    assert_eq!(config.filter.sex, "All Sexes");
    assert_eq!(config.render.pixel_size(), (1400, 800));
    assert_eq!(config.logging.level, "warn");
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ConfigLoader::load_config(dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::IoError { .. }));
    assert!(err.to_string().contains("absent.yaml"));
}

#[test]
fn test_invalid_yaml_is_parse_error() {
    let err = ConfigLoader::parse_str("render: [unclosed").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError(_)));
}

#[test]
fn test_invalid_values_fail_validation() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "filter:\n  end_date: not-a-date\n").unwrap();

    let err = ConfigLoader::load_config(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError(_)));
}

#[test]
fn test_config_error_converts_to_common_error() {
    let err: cdcplot_common::CdcPlotError = ConfigError::ValidationError(vec!["bad".into()]).into();
    assert_eq!(err.category(), "config");
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn test_default_round_trips_through_yaml() {
    let yaml = serde_yaml::to_string(&Config::default()).unwrap();
    assert_eq!(ConfigLoader::parse_str(&yaml).unwrap(), Config::default());
}
