//! Bresenham line drawing

use crate::surface::PixelSink;
use gridshade_core::Rgba8;
use itertools::Itertools;
use nalgebra::Point2;

/// Draw the line from `start` to `end`, both endpoints included.
///
/// Shallow lines (`|dy| < |dx|`) step along X and steep lines along Y, always
/// in the increasing direction of the driving axis, so swapping the
/// endpoints touches exactly the same pixels. Each pixel is written once.
pub fn draw_line<S: PixelSink + ?Sized>(
    sink: &mut S,
    start: Point2<i32>,
    end: Point2<i32>,
    color: Rgba8,
) {
    if start.x == end.x {
        for y in start.y.min(end.y)..=start.y.max(end.y) {
            sink.set_pixel(start.x, y, color);
        }
        return;
    }
    if start.y == end.y {
        for x in start.x.min(end.x)..=start.x.max(end.x) {
            sink.set_pixel(x, start.y, color);
        }
        return;
    }

    let dx = (end.x as i64 - start.x as i64).abs();
    let dy = (end.y as i64 - start.y as i64).abs();

    if dy < dx {
        let (a, b) = if start.x < end.x { (start, end) } else { (end, start) };
        let step = (b.y - a.y).signum();
        let (k1, k2) = (2 * dy, 2 * dy - 2 * dx);
        let mut p = 2 * dy - dx;
        let (mut x, mut y) = (a.x, a.y);
        sink.set_pixel(x, y, color);
        while x < b.x {
            x += 1;
            if p > 0 {
                y += step;
                p += k2;
            } else {
                p += k1;
            }
            sink.set_pixel(x, y, color);
        }
    } else {
        let (a, b) = if start.y < end.y { (start, end) } else { (end, start) };
        let step = (b.x - a.x).signum();
        let (k1, k2) = (2 * dx, 2 * dx - 2 * dy);
        let mut p = 2 * dx - dy;
        let (mut x, mut y) = (a.x, a.y);
        sink.set_pixel(x, y, color);
        while y < b.y {
            y += 1;
            if p > 0 {
                x += step;
                p += k2;
            } else {
                p += k1;
            }
            sink.set_pixel(x, y, color);
        }
    }
}

/// Outline a closed polygon, joining the last vertex back to the first
pub fn draw_polygon_outline<S: PixelSink + ?Sized>(
    sink: &mut S,
    vertices: &[Point2<i32>],
    color: Rgba8,
) {
    match vertices {
        [] => {}
        [only] => sink.set_pixel(only.x, only.y, color),
        _ => {
            for (a, b) in vertices.iter().circular_tuple_windows() {
                draw_line(sink, *a, *b, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::testing::Recorder;
    use std::collections::BTreeSet;

    fn line_pixels(a: (i32, i32), b: (i32, i32)) -> Recorder {
        let mut recorder = Recorder::default();
        draw_line(&mut recorder, Point2::new(a.0, a.1), Point2::new(b.0, b.1), Rgba8::BLACK);
        recorder
    }

    #[test]
    fn test_horizontal_and_vertical() {
        let h = line_pixels((5, 3), (1, 3));
        assert_eq!(h.pixels(), (1..=5).map(|x| (x, 3)).collect::<BTreeSet<_>>());

        let v = line_pixels((2, -4), (2, 1));
        assert_eq!(v.pixels(), (-4..=1).map(|y| (2, y)).collect::<BTreeSet<_>>());

        let dot = line_pixels((7, 7), (7, 7));
        assert_eq!(dot.pixels().len(), 1);
    }

    #[test]
    fn test_shallow_line_pixels() {
        let line = line_pixels((0, 0), (10, 5));
        let expected: BTreeSet<(i32, i32)> = [
            (0, 0), (1, 0), (2, 1), (3, 1), (4, 2), (5, 2),
            (6, 3), (7, 3), (8, 4), (9, 4), (10, 5),
        ]
        .into_iter()
        .collect();
        assert_eq!(line.pixels(), expected);
    }

    #[test]
    fn test_diagonals() {
        let down = line_pixels((0, 0), (4, 4));
        assert_eq!(down.pixels(), (0..=4).map(|i| (i, i)).collect::<BTreeSet<_>>());

        let up = line_pixels((0, 4), (4, 0));
        assert_eq!(up.pixels(), (0..=4).map(|i| (i, 4 - i)).collect::<BTreeSet<_>>());
    }

    #[test]
    fn test_all_octants_connect_endpoints_once() {
        let center = (0, 0);
        let targets = [
            (9, 2), (2, 9), (-2, 9), (-9, 2), (-9, -2), (-2, -9), (2, -9), (9, -2),
            (7, 7), (-7, 7), (13, -1), (-1, 13),
        ];
        for &target in &targets {
            let line = line_pixels(center, target);
            assert!(line.writes.contains_key(&center));
            assert!(line.writes.contains_key(&target));
            assert!(line.writes.values().all(|&count| count == 1));

            let expected_len = target.0.abs().max(target.1.abs()) as usize + 1;
            assert_eq!(line.writes.len(), expected_len);

            // 8-connected: consecutive pixels along the driving axis touch
            let mut pixels: Vec<(i32, i32)> = line.pixels().into_iter().collect();
            if target.1.abs() > target.0.abs() {
                pixels.sort_by_key(|p| p.1);
            }
            for pair in pixels.windows(2) {
                assert!((pair[0].0 - pair[1].0).abs() <= 1);
                assert!((pair[0].1 - pair[1].1).abs() <= 1);
            }
        }
    }

    #[test]
    fn test_symmetry() {
        let cases = [
            ((0, 0), (10, 5)),
            ((3, 8), (-6, 1)),
            ((-4, -4), (5, 20)),
            ((12, -3), (0, 4)),
            ((1, 1), (8, 8)),
            ((0, 0), (6, -6)),
            ((-10, 3), (10, 4)),
        ];
        for &(a, b) in &cases {
            assert_eq!(line_pixels(a, b).pixels(), line_pixels(b, a).pixels(), "{:?} {:?}", a, b);
        }
    }

    #[test]
    fn test_polygon_outline_closes() {
        let mut recorder = Recorder::default();
        let square = [
            Point2::new(0, 0),
            Point2::new(3, 0),
            Point2::new(3, 3),
            Point2::new(0, 3),
        ];
        draw_polygon_outline(&mut recorder, &square, Rgba8::RED);
        assert_eq!(recorder.pixels().len(), 12);
        assert!(recorder.writes.contains_key(&(0, 2)));
        assert_eq!(recorder.last_color, Some(Rgba8::RED));
    }
}
