//! Sutherland–Hodgman polygon clipping

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Closed axis-aligned clip rectangle in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipRect {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl ClipRect {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// The pixel centers of a `width` x `height` surface
    pub fn for_surface(width: usize, height: usize) -> Self {
        Self::new(0.0, width as f64 - 1.0, 0.0, height as f64 - 1.0)
    }

    pub fn contains(&self, point: &Point2<f64>) -> bool {
        point.x >= self.x_min && point.x <= self.x_max && point.y >= self.y_min && point.y <= self.y_max
    }
}

/// Clip a polygon against one half-plane.
///
/// `inside` decides which side a vertex is on and `intersect` returns the
/// crossing point of an edge whose endpoints straddle the boundary.
pub fn clip_half_plane<P, I, X>(input: &[P], inside: I, intersect: X) -> Vec<P>
where
    P: Copy,
    I: Fn(&P) -> bool,
    X: Fn(&P, &P) -> P,
{
    let Some(&last) = input.last() else {
        return Vec::new();
    };

    let mut output = Vec::with_capacity(input.len() + 1);
    let mut start = last;
    for &end in input {
        match (inside(&start), inside(&end)) {
            (true, true) => output.push(end),
            (true, false) => output.push(intersect(&start, &end)),
            (false, true) => {
                output.push(intersect(&start, &end));
                output.push(end);
            }
            (false, false) => {}
        }
        start = end;
    }
    output
}

fn cross_vertical(a: &Point2<f64>, b: &Point2<f64>, x: f64) -> Point2<f64> {
    let t = (x - a.x) / (b.x - a.x);
    Point2::new(x, a.y + t * (b.y - a.y))
}

fn cross_horizontal(a: &Point2<f64>, b: &Point2<f64>, y: f64) -> Point2<f64> {
    let t = (y - a.y) / (b.y - a.y);
    Point2::new(a.x + t * (b.x - a.x), y)
}

/// Clip a polygon to `rect`, one edge at a time: left, right, top, bottom
pub fn clip_polygon_to_rect(polygon: &[Point2<f64>], rect: &ClipRect) -> Vec<Point2<f64>> {
    let clipped = clip_half_plane(
        polygon,
        |p| p.x >= rect.x_min,
        |a, b| cross_vertical(a, b, rect.x_min),
    );
    let clipped = clip_half_plane(
        &clipped,
        |p| p.x <= rect.x_max,
        |a, b| cross_vertical(a, b, rect.x_max),
    );
    let clipped = clip_half_plane(
        &clipped,
        |p| p.y >= rect.y_min,
        |a, b| cross_horizontal(a, b, rect.y_min),
    );
    clip_half_plane(
        &clipped,
        |p| p.y <= rect.y_max,
        |a, b| cross_horizontal(a, b, rect.y_max),
    )
}
