//! Graph utility functions and helpers.

use plotters::style::RGBColor;

/// Utility functions for graph generation.
pub struct GraphUtils;

impl GraphUtils {
    /// Converts a size in points (1/72 inch) to pixels at `dpi`.
    pub fn points_to_pixels(points: f64, dpi: u32) -> f64 {
        points * f64::from(dpi) / 72.0
    }

    /// [`Self::points_to_pixels`] rounded to a whole pixel, at least 1.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn px(points: f64, dpi: u32) -> u32 {
        Self::points_to_pixels(points, dpi).round().max(1.0) as u32
    }

    /// Parse a `#rrggbb` color string, defaulting to black if parsing fails.
    pub fn parse_color(color_str: &str) -> RGBColor {
        if let Some(hex) = color_str.strip_prefix('#') {
            if hex.len() == 6 {
                if let (Ok(r), Ok(g), Ok(b)) = (
                    u8::from_str_radix(&hex[0..2], 16),
                    u8::from_str_radix(&hex[2..4], 16),
                    u8::from_str_radix(&hex[4..6], 16),
                ) {
                    return RGBColor(r, g, b);
                }
            }
        }
        RGBColor(0, 0, 0)
    }

    /// Upper bound of the y axis: the data maximum plus 10% head-room for
    /// the value labels, and never below 1 so an all-zero series still has
    /// a drawable range.
    #[allow(clippy::cast_precision_loss)]
    pub fn y_axis_max(max_value: i64) -> f64 {
        (max_value.max(0) as f64 * 1.1).max(1.0)
    }

    /// Vertical distance between a marker and its value label: 1% of the
    /// data maximum.
    #[allow(clippy::cast_precision_loss)]
    pub fn annotation_offset(max_value: i64) -> f64 {
        max_value.max(0) as f64 * 0.01
    }

    /// A 1/2/5 x 10^k step giving at most `max_ticks` intervals over `0..=upper`.
    pub fn nice_step(upper: f64, max_ticks: usize) -> f64 {
        if !(upper.is_finite() && upper > 0.0) || max_ticks == 0 {
            return 1.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let raw = upper / max_ticks as f64;
        let magnitude = 10f64.powf(raw.log10().floor());
        [1.0, 2.0, 5.0, 10.0]
            .into_iter()
            .map(|m| m * magnitude)
            .find(|step| *step >= raw)
            .unwrap_or(10.0 * magnitude)
    }

    /// Y values for horizontal grid lines: multiples of [`Self::nice_step`]
    /// from zero up to `upper`.
    pub fn grid_ticks(upper: f64, max_ticks: usize) -> Vec<f64> {
        let step = Self::nice_step(upper, max_ticks);
        let mut ticks = Vec::new();
        let mut value = 0.0;
        while value <= upper + step * 1e-9 {
            ticks.push(value);
            value += step;
        }
        ticks
    }
}
