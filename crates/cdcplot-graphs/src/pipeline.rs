//! Download → aggregate → render pipeline.

use crate::{
    show_best_effort, AgeGroupLineChart, DataFetcher, FetchOutcome, GraphConfig, GraphRenderer,
    ImageViewer, SystemViewer, TransformReport, Transformer,
};
use cdcplot_common::{AgeGroupSeries, Result};
use cdcplot_config::Config;
use std::path::PathBuf;
use tracing::{info, info_span, Instrument};

/// Everything one successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    /// Whether the CSV was downloaded or reused.
    pub fetch: FetchOutcome,
    /// Row accounting of the aggregation.
    pub transform: TransformReport,
    /// Totals per age group, in bucket order.
    pub series: AgeGroupSeries,
    /// Path of the written image.
    pub output_path: PathBuf,
}

/// The three stages, run strictly in sequence.
///
/// Each stage consumes the complete output of the previous one. No stage
/// exits the process; every failure is returned to the caller.
pub struct Pipeline<R = AgeGroupLineChart, V = SystemViewer> {
    config: Config,
    fetcher: DataFetcher,
    transformer: Transformer,
    renderer: R,
    viewer: V,
}

impl Pipeline {
    /// Creates the standard pipeline: plotters line chart, system image viewer.
    pub fn new(config: Config) -> Result<Self> {
        Self::with_components(config, AgeGroupLineChart::new(), SystemViewer)
    }
}

impl<R, V> Pipeline<R, V>
where
    R: GraphRenderer<Data = AgeGroupSeries>,
    V: ImageViewer,
{
    /// Creates a pipeline with a custom renderer and viewer.
    pub fn with_components(config: Config, renderer: R, viewer: V) -> Result<Self> {
        let fetcher = DataFetcher::from_config(&config.source)?;
        let transformer = Transformer::new(config.filter.clone());
        Ok(Self {
            config,
            fetcher,
            transformer,
            renderer,
            viewer,
        })
    }

    /// The configuration this pipeline runs with.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Runs fetch, transform, and render, then shows the image if enabled.
    pub async fn run(&self) -> Result<PipelineReport> {
        let source = &self.config.source;
        let render = &self.config.render;

        let fetch = self
            .fetcher
            .fetch(&source.url, &source.csv_path)
            .instrument(info_span!("fetch"))
            .await?;

        let (series, transform) = info_span!("transform")
            .in_scope(|| self.transformer.transform(&source.csv_path))?;
        info!(
            rows_read = transform.rows_read,
            rows_matched = transform.rows_matched,
            rows_dropped = transform.rows_dropped,
            "Aggregated COVID-19 Deaths by Age Group:\n{series}"
        );

        let graph_config = GraphConfig::age_group_chart(render, &self.config.filter);
        self.renderer
            .render_to_file(&graph_config, &series, &render.output_path)
            .instrument(info_span!("render", renderer = self.renderer.name()))
            .await?;
        info!("Graph has been saved as '{}'.", render.output_path.display());

        if render.show {
            show_best_effort(&self.viewer, &render.output_path);
        }

        Ok(PipelineReport {
            fetch,
            transform,
            series,
            output_path: render.output_path.clone(),
        })
    }
}
