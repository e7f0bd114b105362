//! One run of the application.

use crate::error::{AppError, AppResult};
use cdcplot_common::init_logging;
use cdcplot_config::{Config, ConfigLoader};
use cdcplot_graphs::{Pipeline, PipelineReport};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Main application structure.
pub struct CdcPlotApp {
    config: Config,
    config_file: Option<PathBuf>,
}

impl CdcPlotApp {
    /// Creates an application instance with an explicit configuration.
    pub const fn new(config: Config) -> Self {
        Self {
            config,
            config_file: None,
        }
    }

    /// Creates an application from the config file and `CDCPLOT_*` variables.
    pub fn from_env() -> AppResult<Self> {
        let (config, config_file) = ConfigLoader::load_with_source()?;
        Ok(Self {
            config,
            config_file,
        })
    }

    /// The configuration this application runs with.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The configuration file that was read, if any.
    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    /// Installs the tracing subscriber described by the logging section.
    pub fn init_logging(&self) -> AppResult<()> {
        init_logging(&self.config.logging).map_err(|e| AppError::Logging(e.to_string()))
    }

    /// Runs the pipeline to completion.
    pub async fn run(&self) -> AppResult<PipelineReport> {
        info!("Starting cdcplot");
        self.log_effective_settings();

        let pipeline = Pipeline::new(self.config.clone())?;
        let report = pipeline.run().await?;
        info!(
            total = report.series.total(),
            "Finished; chart written to '{}'",
            report.output_path.display()
        );
        Ok(report)
    }

    fn log_effective_settings(&self) {
        if let Some(path) = &self.config_file {
            info!("Configuration loaded from '{}'", path.display());
        }

        let customized = self.config.customized_sections();
        if customized.is_empty() {
            debug!("Running with the built-in defaults");
            return;
        }

        let Config {
            source,
            filter,
            render,
            ..
        } = &self.config;
        info!(
            url = %source.url,
            csv_path = %source.csv_path.display(),
            start_date = %filter.start_date,
            end_date = %filter.end_date,
            state = %filter.state,
            sex = %filter.sex,
            output = %render.output_path.display(),
            show = render.show,
            "Settings differ from the built-in defaults in: {}",
            customized.join(", ")
        );
    }
}
