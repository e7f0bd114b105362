//! Graph configuration and styling.

use cdcplot_common::FilterCriteria;
use cdcplot_config::RenderConfig;
use serde::{Deserialize, Serialize};

/// Graph configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphConfig {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Pixels per inch; converts point sizes in [`StyleConfig`] to pixels
    pub dpi: u32,
    pub style: StyleConfig,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            title: "Graph".to_string(),
            x_label: String::new(),
            y_label: String::new(),
            width: 1400,
            height: 800,
            dpi: 100,
            style: StyleConfig::default(),
        }
    }
}

impl GraphConfig {
    /// The deaths-by-age-group chart for the given output settings and filter.
    pub fn age_group_chart(render: &RenderConfig, criteria: &FilterCriteria) -> Self {
        let (width, height) = render.pixel_size();
        Self {
            title: format!(
                "Total COVID-19 Deaths by Age Group ({})",
                criteria.date_range()
            ),
            x_label: "Age Group".to_string(),
            y_label: "Total COVID-19 Deaths".to_string(),
            width,
            height,
            dpi: render.dpi,
            style: StyleConfig::default(),
        }
    }
}

/// Font configuration; sizes are in points
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontConfig {
    pub family: String,
    pub size: f64,
}

impl FontConfig {
    fn sans(size: f64) -> Self {
        Self {
            family: "sans-serif".to_string(),
            size,
        }
    }
}

impl Default for FontConfig {
    fn default() -> Self {
        Self::sans(12.0)
    }
}

/// Margin configuration, in points.
///
/// `top` is the outer margin on every side except the right; `bottom` and
/// `left` size the x and y label areas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarginConfig {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for MarginConfig {
    fn default() -> Self {
        Self {
            top: 12.0,
            right: 24.0,
            bottom: 150.0,
            left: 80.0,
        }
    }
}

/// Grid line styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridStyle {
    Solid,
    Dashed,
}

/// Grid line configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    pub show: bool,
    pub color: String,
    /// Opacity between 0 and 1
    pub alpha: f64,
    /// Line width in points
    pub width: f64,
    pub style: GridStyle,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            show: true,
            color: "#b0b0b0".to_string(),
            alpha: 0.7,
            width: 0.5,
            style: GridStyle::Dashed,
        }
    }
}

/// Comprehensive styling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleConfig {
    pub background_color: String,
    pub line_color: String,
    /// Line width in points
    pub line_width: f64,
    /// Marker diameter in points
    pub marker_size: f64,
    pub title_font: FontConfig,
    pub axis_font: FontConfig,
    pub tick_font: FontConfig,
    pub annotation_font: FontConfig,
    pub margins: MarginConfig,
    pub grid: GridConfig,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: "#ffffff".to_string(),
            line_color: "#000000".to_string(),
            line_width: 2.0,
            marker_size: 6.0,
            title_font: FontConfig::sans(16.0),
            axis_font: FontConfig::sans(14.0),
            tick_font: FontConfig::sans(12.0),
            annotation_font: FontConfig::sans(10.0),
            margins: MarginConfig::default(),
            grid: GridConfig::default(),
        }
    }
}
