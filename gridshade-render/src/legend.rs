//! Color-bar legend

use crate::raster::fill_rect;
use crate::surface::PixelSink;
use gridshade_core::ColorRamp;
use serde::{Deserialize, Serialize};

/// Placement of the vertical color bar along the right edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorBarConfig {
    pub enabled: bool,
    /// Bar width in pixels
    pub width: u32,
    /// Gap between the bar and the right edge of the surface
    pub right_offset: u32,
    /// Gap above and below the bar
    pub vertical_margin: u32,
}

impl Default for ColorBarConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            width: 20,
            right_offset: 10,
            vertical_margin: 10,
        }
    }
}

impl ColorBarConfig {
    /// Left column and top row of the bar with its height, if it fits
    pub fn placement(&self, width: usize, height: usize) -> Option<(i32, i32, u32)> {
        let left = width as i64 - self.right_offset as i64 - self.width as i64;
        let bar_height = height as i64 - 2 * self.vertical_margin as i64;
        if !self.enabled || self.width == 0 || left < 0 || bar_height <= 0 {
            return None;
        }
        Some((left as i32, self.vertical_margin as i32, bar_height as u32))
    }
}

/// Draw the ramp from 1.0 at the top of the bar to 0.0 at the bottom.
///
/// Returns `false` when the bar is disabled or the surface is too small.
pub fn draw_color_bar<S: PixelSink + ?Sized>(
    sink: &mut S,
    ramp: &ColorRamp,
    width: usize,
    height: usize,
    config: &ColorBarConfig,
) -> bool {
    let Some((left, top, bar_height)) = config.placement(width, height) else {
        return false;
    };

    let last_row = (bar_height - 1).max(1) as f64;
    for row in 0..bar_height {
        let t = 1.0 - row as f64 / last_row;
        fill_rect(sink, left, top + row as i32, config.width, 1, ramp.lookup(t));
    }
    true
}
