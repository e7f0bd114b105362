//! Application-wide error types using thiserror.

use cdcplot_common::CdcPlotError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Any failure of configuration, fetch, transform, or render.
    #[error(transparent)]
    Pipeline(#[from] CdcPlotError),

    /// The tracing subscriber could not be installed.
    #[error("Failed to initialize logging: {0}")]
    Logging(String),
}

impl AppError {
    /// Process exit status for this error.
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Pipeline(e) => e.exit_code(),
            Self::Logging(_) => 1,
        }
    }
}

/// Result type for the application.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_failure_exits_with_one() {
        let errors = [
            AppError::from(CdcPlotError::no_matching_rows("rows.csv")),
            AppError::from(CdcPlotError::config("bad url")),
            AppError::Logging("already set".to_string()),
        ];
        for err in errors {
            assert_eq!(err.exit_code(), 1, "{err}");
        }
    }

    #[test]
    fn test_pipeline_errors_display_unchanged() {
        let inner = CdcPlotError::file_not_found("rows.csv");
        let expected = inner.to_string();
        assert_eq!(AppError::from(inner).to_string(), expected);
    }
}
