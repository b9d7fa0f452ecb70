//! Compiled-in tunables for the background grid.

use std::ops::{Range, RangeInclusive};

/// Every constant the animator uses. There is no runtime configuration
/// surface; the browser entry point always uses [`GridConfig::default`].
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    /// Dimensions of the grid built at mount time.
    pub initial_columns: u32,
    pub initial_rows: u32,
    /// Inclusive range new dimensions are drawn from on a reshuffle.
    pub dimension_range: RangeInclusive<u32>,
    /// Largest span a cell may take on either axis.
    pub max_span: u32,
    /// Fraction of the remaining distance covered per frame.
    pub lerp_rate: f64,
    /// Chance per frame of drawing new grid dimensions.
    pub reshuffle_probability: f64,
    /// Re-target interval for freshly generated cells, in milliseconds.
    pub initial_retarget_ms: Range<f64>,
    /// Re-target interval after the first re-target, in milliseconds.
    pub retarget_ms: Range<f64>,
    /// Multiplier from wall-clock milliseconds to animation time.
    pub time_scale: f64,
    /// CSS transition applied once to every cell element.
    pub transition: &'static str,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            initial_columns: 10,
            initial_rows: 10,
            dimension_range: 6..=14,
            max_span: 3,
            lerp_rate: 0.03,
            reshuffle_probability: 0.01,
            initial_retarget_ms: 2000.0..5000.0,
            retarget_ms: 3000.0..7000.0,
            time_scale: 0.0003,
            transition: "all 1.2s cubic-bezier(0.4, 0, 0.2, 1)",
        }
    }
}

/// Uniform draw from a half-open millisecond range.
pub(crate) fn draw_ms(rng: &mut fastrand::Rng, range: &Range<f64>) -> f64 {
    range.start + rng.f64() * (range.end - range.start)
}
