//! Scanline polygon filling with an active-edge table

use crate::raster::clip::{clip_polygon_to_rect, ClipRect};
use crate::raster::line::draw_polygon_outline;
use crate::surface::PixelSink;
use gridshade_core::Rgba8;
use itertools::Itertools;
use nalgebra::Point2;

/// Slack for span endpoints that land a rounding error away from a pixel
const SPAN_EPSILON: f64 = 1e-9;

/// One non-horizontal polygon edge
#[derive(Debug, Clone, Copy)]
struct EdgeEntry {
    /// X where the edge crosses the current scanline
    x: f64,
    /// X step per scanline
    dx: f64,
    /// Scanlines left to cover, including the current one
    remaining: i64,
}

/// Fill a simple polygon with even-odd spans.
///
/// Scanline `y` is covered when `ceil(y_top) <= y < ceil(y_bottom)` for some
/// edge, and on each scanline the pixels from `ceil(x_left)` to
/// `floor(x_right)` are written. Horizontal edges never enter the table.
/// Callers should clip first; the loop runs over every scanline the polygon
/// spans.
pub fn fill_polygon<S: PixelSink + ?Sized>(sink: &mut S, vertices: &[Point2<f64>], color: Rgba8) {
    if vertices.len() < 3 {
        return;
    }
    if vertices.iter().any(|v| !v.x.is_finite() || !v.y.is_finite()) {
        log::warn!("skipping polygon with non-finite vertices");
        return;
    }

    let y_min = vertices.iter().map(|v| v.y).fold(f64::INFINITY, f64::min).ceil() as i64;
    let y_max = vertices.iter().map(|v| v.y).fold(f64::NEG_INFINITY, f64::max).ceil() as i64;
    if y_max <= y_min {
        return;
    }

    // edge table: bucket each edge under the first scanline it affects
    let mut table: Vec<Vec<EdgeEntry>> = vec![Vec::new(); (y_max - y_min) as usize];
    for (a, b) in vertices.iter().circular_tuple_windows() {
        if a.y == b.y {
            continue;
        }
        let (top, bottom) = if a.y < b.y { (a, b) } else { (b, a) };
        let first = top.y.ceil() as i64;
        let end = bottom.y.ceil() as i64;
        if end <= first {
            continue;
        }
        let dx = (bottom.x - top.x) / (bottom.y - top.y);
        table[(first - y_min) as usize].push(EdgeEntry {
            x: top.x + (first as f64 - top.y) * dx,
            dx,
            remaining: end - first,
        });
    }

    let mut active: Vec<EdgeEntry> = Vec::new();
    for (offset, bucket) in table.into_iter().enumerate() {
        let y = y_min + offset as i64;
        active.extend(bucket);
        active.retain(|edge| edge.remaining > 0);
        active.sort_by(|a, b| a.x.total_cmp(&b.x));

        for pair in active.chunks_exact(2) {
            let start = (pair[0].x - SPAN_EPSILON).ceil() as i64;
            let end = (pair[1].x + SPAN_EPSILON).floor() as i64;
            for x in start..=end {
                sink.set_pixel(x as i32, y as i32, color);
            }
        }

        for edge in &mut active {
            edge.x += edge.dx;
            edge.remaining -= 1;
        }
    }
}

/// Fill a pixel-snapped polygon together with its boundary.
///
/// The interior is clipped to `clip` and scanline filled, then the outline is
/// traced with [`draw_polygon_outline`]. The bottom row and left boundary
/// pixels that the half-open fill leaves out are covered by the outline, so
/// the result is exactly the outline plus every pixel it encloses.
pub fn fill_polygon_outlined<S: PixelSink + ?Sized>(
    sink: &mut S,
    vertices: &[Point2<i32>],
    clip: &ClipRect,
    color: Rgba8,
) {
    let polygon: Vec<Point2<f64>> = vertices
        .iter()
        .map(|p| Point2::new(p.x as f64, p.y as f64))
        .collect();
    fill_polygon(sink, &clip_polygon_to_rect(&polygon, clip), color);
    draw_polygon_outline(sink, vertices, color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::testing::Recorder;
    use std::collections::BTreeSet;

    fn fill(vertices: &[(f64, f64)]) -> Recorder {
        let points: Vec<Point2<f64>> = vertices.iter().map(|&(x, y)| Point2::new(x, y)).collect();
        let mut recorder = Recorder::default();
        fill_polygon(&mut recorder, &points, Rgba8::GREEN);
        recorder
    }

    #[test]
    fn test_degenerate_input_is_noop() {
        assert!(fill(&[]).writes.is_empty());
        assert!(fill(&[(0.0, 0.0), (5.0, 5.0)]).writes.is_empty());
        // zero height
        assert!(fill(&[(0.0, 2.0), (4.0, 2.0), (8.0, 2.0)]).writes.is_empty());
        assert!(fill(&[(0.0, 0.0), (f64::NAN, 3.0), (3.0, 3.0)]).writes.is_empty());
    }

    #[test]
    fn test_square_is_half_open_vertically() {
        let square = fill(&[(0.0, 0.0), (3.0, 0.0), (3.0, 3.0), (0.0, 3.0)]);
        let expected: BTreeSet<(i32, i32)> =
            (0..3).flat_map(|y| (0..=3).map(move |x| (x, y))).collect();
        assert_eq!(square.pixels(), expected);
        assert!(square.writes.values().all(|&count| count == 1));
    }

    #[test]
    fn test_right_triangle_rows() {
        let triangle = fill(&[(0.0, 0.0), (8.0, 0.0), (0.0, 8.0)]);
        for y in 0..8 {
            let row: Vec<i32> = triangle
                .pixels()
                .into_iter()
                .filter(|p| p.1 == y)
                .map(|p| p.0)
                .collect();
            assert_eq!(row, (0..=8 - y).collect::<Vec<_>>(), "row {}", y);
        }
        assert!(triangle.pixels().iter().all(|p| p.1 < 8));
    }

    #[test]
    fn test_fractional_vertices() {
        let quad = fill(&[(0.5, 0.5), (3.5, 0.5), (3.5, 2.5), (0.5, 2.5)]);
        let expected: BTreeSet<(i32, i32)> =
            (1..3).flat_map(|y| (1..=3).map(move |x| (x, y))).collect();
        assert_eq!(quad.pixels(), expected);
    }

    #[test]
    fn test_concave_polygon_even_odd() {
        // a "U": the notch between x=2 and x=4 stays empty on rows 0 and 1
        let shape = fill(&[
            (0.0, 0.0),
            (2.0, 0.0),
            (2.0, 2.0),
            (4.0, 2.0),
            (4.0, 0.0),
            (6.0, 0.0),
            (6.0, 4.0),
            (0.0, 4.0),
        ]);
        assert!(shape.writes.contains_key(&(1, 1)));
        assert!(!shape.writes.contains_key(&(3, 0)));
        assert!(!shape.writes.contains_key(&(3, 1)));
        assert!(shape.writes.contains_key(&(3, 2)));
        assert!(shape.writes.contains_key(&(5, 3)));
    }

    #[test]
    fn test_outlined_fill_covers_boundary_rows() {
        let square = [
            Point2::new(0, 0),
            Point2::new(3, 0),
            Point2::new(3, 3),
            Point2::new(0, 3),
        ];
        let mut recorder = Recorder::default();
        fill_polygon_outlined(&mut recorder, &square, &ClipRect::for_surface(10, 10), Rgba8::RED);
        let expected: BTreeSet<(i32, i32)> =
            (0..=3).flat_map(|y| (0..=3).map(move |x| (x, y))).collect();
        assert_eq!(recorder.pixels(), expected);
    }

    #[test]
    fn test_outlined_fill_interior_respects_clip() {
        let triangle = [Point2::new(-20, -20), Point2::new(30, 2), Point2::new(2, 30)];
        let mut recorder = Recorder::default();
        fill_polygon_outlined(&mut recorder, &triangle, &ClipRect::for_surface(8, 8), Rgba8::RED);
        // interior pixels stay inside the clip rectangle; only the outline leaves it
        assert!(recorder.writes.contains_key(&(4, 4)));
        assert!(!recorder.writes.contains_key(&(9, 9)));
    }
}
