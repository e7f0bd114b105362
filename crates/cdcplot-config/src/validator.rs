//! Runtime validation of a loaded configuration.

use crate::{loader::ConfigError, schema::Config};
use chrono::NaiveDate;

/// Date layout used by the CDC export's `Start Date` / `End Date` columns.
pub const FILTER_DATE_FORMAT: &str = "%m/%d/%Y";

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, reporting every problem at once.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let mut issues = Vec::new();

        match url::Url::parse(&config.source.url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => issues.push(format!(
                "source.url must use http or https, got '{}'",
                url.scheme()
            )),
            Err(e) => issues.push(format!("source.url '{}' is invalid: {e}", config.source.url)),
        }

        if config.source.csv_path.as_os_str().is_empty() {
            issues.push("source.csv_path must not be empty".to_string());
        }
        if config.source.connect_timeout_seconds == 0 {
            issues.push("source.connect_timeout_seconds must be positive".to_string());
        }

        let start = parse_filter_date("filter.start_date", &config.filter.start_date, &mut issues);
        let end = parse_filter_date("filter.end_date", &config.filter.end_date, &mut issues);
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                issues.push(format!(
                    "filter.start_date {} is after filter.end_date {}",
                    config.filter.start_date, config.filter.end_date
                ));
            }
        }
        if config.filter.state.trim().is_empty() {
            issues.push("filter.state must not be empty".to_string());
        }
        if config.filter.sex.trim().is_empty() {
            issues.push("filter.sex must not be empty".to_string());
        }

        let render = &config.render;
        if render.output_path.as_os_str().is_empty() {
            issues.push("render.output_path must not be empty".to_string());
        }
        if !(render.width_inches.is_finite() && render.width_inches > 0.0)
            || !(render.height_inches.is_finite() && render.height_inches > 0.0)
        {
            issues.push("render figure size must be positive".to_string());
        }
        if render.dpi == 0 {
            issues.push("render.dpi must be positive".to_string());
        } else {
            let (width, height) = render.pixel_size();
            if width == 0 || height == 0 {
                issues.push("render figure is smaller than one pixel".to_string());
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::ValidationError(issues))
        }
    }
}

fn parse_filter_date(field: &str, value: &str, issues: &mut Vec<String>) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(value, FILTER_DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            issues.push(format!("{field} '{value}' is not a MM/DD/YYYY date"));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ConfigValidator::validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let mut config = Config::default();
        config.source.url = "ftp://data.cdc.gov/rows.csv".to_string();
        let err = ConfigValidator::validate(&config).unwrap_err();
        assert!(err.to_string().contains("http or https"));
    }

    #[test]
    fn test_rejects_reversed_date_range() {
        let mut config = Config::default();
        config.filter.start_date = "12/31/2023".to_string();
        config.filter.end_date = "01/01/2020".to_string();
        let err = ConfigValidator::validate(&config).unwrap_err();
        assert!(err.to_string().contains("is after"));
    }

    #[test]
    fn test_collects_every_issue() {
        let mut config = Config::default();
        config.filter.start_date = "2020-01-01".to_string();
        config.render.dpi = 0;
        config.filter.sex = "  ".to_string();

        match ConfigValidator::validate(&config) {
            Err(ConfigError::ValidationError(issues)) => assert_eq!(issues.len(), 3),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
