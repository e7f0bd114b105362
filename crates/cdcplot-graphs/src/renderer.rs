//! Line chart of total deaths per age group, rendered with plotters.

use crate::{GraphConfig, GraphRenderer, GraphUtils, GridStyle};
use async_trait::async_trait;
use cdcplot_common::{AgeGroup, AgeGroupSeries, CdcPlotError, Result};
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

/// Upper bound on horizontal grid lines.
const MAX_Y_GRID_LINES: usize = 10;

/// Space between the x axis and the start of a bucket label, in points.
const TICK_LABEL_GAP: f64 = 6.0;

/// A value label drawn above a marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub text: String,
    pub x: i32,
    pub y: f64,
}

/// Pixel positions of the x axis in a rendered chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartLayout {
    /// Image row of the x axis.
    pub x_axis_y: i32,
    /// Image column of each bucket tick, in bucket order.
    pub tick_xs: Vec<i32>,
}

/// Black line chart with one marker and one value label per age group.
///
/// The x axis is categorical: bucket `i` sits at x = `i`, and the axis spans
/// one extra slot on each side so the outer labels are not clipped.
#[derive(Debug, Default)]
pub struct AgeGroupLineChart;

impl AgeGroupLineChart {
    /// Create a new line chart renderer
    pub const fn new() -> Self {
        Self
    }

    /// Marker positions in bucket order.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_precision_loss)]
    pub fn plot_points(series: &AgeGroupSeries) -> Vec<(i32, f64)> {
        series
            .iter()
            .map(|(group, total)| (group.index() as i32, total as f64))
            .collect()
    }

    /// Literal value labels, lifted 1% of the maximum above each marker.
    pub fn annotations(series: &AgeGroupSeries) -> Vec<Annotation> {
        let offset = GraphUtils::annotation_offset(series.max_value());
        Self::plot_points(series)
            .into_iter()
            .zip(series.values())
            .map(|((x, y), total)| Annotation {
                text: total.to_string(),
                x,
                y: y + offset,
            })
            .collect()
    }

    /// Tick label for x position `x`; empty outside the bucket range.
    pub fn bucket_label(x: i32) -> String {
        usize::try_from(x)
            .ok()
            .and_then(|i| AgeGroup::ALL.get(i))
            .map(|group| group.label().to_string())
            .unwrap_or_default()
    }

    /// Draws the chart and returns where its x axis landed in the image.
    pub fn draw(config: &GraphConfig, series: &AgeGroupSeries, path: &Path) -> Result<ChartLayout> {
        let style = &config.style;
        let px = |points: f64| GraphUtils::px(points, config.dpi);
        let font_px = |points: f64| f64::from(px(points));

        let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
        root.fill(&GraphUtils::parse_color(&style.background_color))?;

        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let x_end = AgeGroup::COUNT as i32;
        let y_max = GraphUtils::y_axis_max(series.max_value());

        let title_font = (style.title_font.family.as_str(), font_px(style.title_font.size));
        let mut chart = ChartBuilder::on(&root)
            .caption(&config.title, title_font)
            .margin(px(style.margins.top))
            .margin_right(px(style.margins.right))
            .x_label_area_size(px(style.margins.bottom))
            .y_label_area_size(px(style.margins.left))
            .build_cartesian_2d(-1i32..x_end, 0f64..y_max)?;

        let tick_font = (style.tick_font.family.as_str(), font_px(style.tick_font.size));
        // Bucket names are drawn below; the mesh only supplies the tick marks.
        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(AgeGroup::COUNT + 2)
            .x_label_formatter(&|_| String::new())
            .y_label_formatter(&|y| format!("{y:.0}"))
            .y_label_style(tick_font)
            .axis_desc_style((style.axis_font.family.as_str(), font_px(style.axis_font.size)))
            .x_desc(config.x_label.as_str())
            .y_desc(config.y_label.as_str())
            .draw()?;

        let layout = ChartLayout {
            x_axis_y: chart.backend_coord(&(0, 0.0)).1,
            tick_xs: (0..x_end).map(|x| chart.backend_coord(&(x, 0.0)).0).collect(),
        };

        // Plotters centres axis labels on their tick whatever the anchor, so a
        // rotated label would straddle the axis. Anchoring at the start of the
        // text makes it hang below the axis instead.
        let label_style = TextStyle::from(tick_font.into_font())
            .transform(FontTransform::Rotate90)
            .pos(Pos::new(HPos::Left, VPos::Center));
        let label_gap = i32::try_from(px(TICK_LABEL_GAP)).unwrap_or(0);
        for (group, x) in AgeGroup::ALL.iter().zip(&layout.tick_xs) {
            root.draw(&Text::new(
                group.label(),
                (*x, layout.x_axis_y + label_gap),
                label_style.clone(),
            ))?;
        }

        if style.grid.show {
            let grid_style = GraphUtils::parse_color(&style.grid.color)
                .mix(style.grid.alpha)
                .stroke_width(px(style.grid.width));
            let dash = px(style.grid.width * 8.0);
            let gap = px(style.grid.width * 4.0);

            let horizontal = GraphUtils::grid_ticks(y_max, MAX_Y_GRID_LINES)
                .into_iter()
                .map(|y| [(-1, y), (x_end, y)]);
            let vertical = (0..x_end).map(|x| [(x, 0.0), (x, y_max)]);

            for segment in horizontal.chain(vertical) {
                match style.grid.style {
                    GridStyle::Dashed => {
                        chart.draw_series(DashedLineSeries::new(segment, dash, gap, grid_style))?;
                    }
                    GridStyle::Solid => {
                        chart.draw_series(LineSeries::new(segment, grid_style))?;
                    }
                }
            }
        }

        let line_color = GraphUtils::parse_color(&style.line_color);
        let points = Self::plot_points(series);
        chart.draw_series(LineSeries::new(
            points.iter().copied(),
            line_color.stroke_width(px(style.line_width)),
        ))?;
        let radius = px(style.marker_size / 2.0);
        chart.draw_series(
            points
                .iter()
                .map(|point| Circle::new(*point, radius, line_color.filled())),
        )?;

        let value_style = TextStyle::from(
            (
                style.annotation_font.family.as_str(),
                font_px(style.annotation_font.size),
            )
                .into_font(),
        )
        .pos(Pos::new(HPos::Center, VPos::Bottom))
        .color(&line_color);
        chart.draw_series(
            Self::annotations(series)
                .into_iter()
                .map(|a| Text::new(a.text, (a.x, a.y), value_style.clone())),
        )?;

        root.present()?;
        Ok(layout)
    }
}

#[async_trait]
impl GraphRenderer for AgeGroupLineChart {
    type Data = AgeGroupSeries;

    async fn render_to_file(
        &self,
        config: &GraphConfig,
        data: &Self::Data,
        path: &Path,
    ) -> Result<()> {
        if config.width == 0 || config.height == 0 {
            return Err(CdcPlotError::graph("Image dimensions must be positive"));
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        // The drawing area and its backend are dropped inside `draw`, releasing
        // the bitmap as soon as the file is written.
        let layout = Self::draw(config, data, path)?;
        tracing::debug!(x_axis_y = layout.x_axis_y, "Chart layout");

        tracing::info!("Successfully rendered age group chart to {}", path.display());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "deaths_by_age_group"
    }

    fn description(&self) -> &'static str {
        "Total COVID-19 deaths by age group"
    }
}
