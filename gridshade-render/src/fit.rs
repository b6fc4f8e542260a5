//! Fitting projected geometry onto the surface

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// A uniform scale and offset mapping projected points to pixels.
///
/// The projected bounding box is scaled to fill the surface minus a margin
/// on its tighter axis and centered on the middle pixel center, which sits
/// at `(width - 1) / 2`. Screen Y grows downwards, so projected Y is flipped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenFit {
    pub scale: f64,
    /// Center of the projected bounding box
    pub center: Point2<f64>,
    pub min: Point2<f64>,
    pub max: Point2<f64>,
    pub screen_width: usize,
    pub screen_height: usize,
}

impl ScreenFit {
    /// Compute the fit for `points`, or `None` when there is nothing to fit
    pub fn compute(points: &[Point2<f64>], width: usize, height: usize, margin: u32) -> Option<Self> {
        let first = points.first()?;
        let (min, max) = points.iter().fold((*first, *first), |(lo, hi), p| {
            (
                Point2::new(lo.x.min(p.x), lo.y.min(p.y)),
                Point2::new(hi.x.max(p.x), hi.y.max(p.y)),
            )
        });

        let margin = 2.0 * margin as f64;
        let available_w = (width as f64 - margin).max(1.0);
        let available_h = (height as f64 - margin).max(1.0);
        let span_w = max.x - min.x;
        let span_h = max.y - min.y;

        let scale = match (span_w > f64::EPSILON, span_h > f64::EPSILON) {
            (true, true) => (available_w / span_w).min(available_h / span_h),
            (true, false) => available_w / span_w,
            (false, true) => available_h / span_h,
            (false, false) => 1.0,
        };

        Some(Self {
            scale,
            center: Point2::new((min.x + max.x) / 2.0, (min.y + max.y) / 2.0),
            min,
            max,
            screen_width: width,
            screen_height: height,
        })
    }

    /// Map a projected point to (sub)pixel coordinates
    pub fn to_screen(&self, projected: &Point2<f64>) -> Point2<f64> {
        let mid_x = (self.screen_width as f64 - 1.0) / 2.0;
        let mid_y = (self.screen_height as f64 - 1.0) / 2.0;
        Point2::new(
            (projected.x - self.center.x) * self.scale + mid_x,
            (self.center.y - projected.y) * self.scale + mid_y,
        )
    }

    /// Map and round to the nearest pixel
    pub fn to_pixel(&self, projected: &Point2<f64>) -> Point2<i32> {
        let screen = self.to_screen(projected);
        Point2::new(screen.x.round() as i32, screen.y.round() as i32)
    }
}
