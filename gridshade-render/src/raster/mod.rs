//! Rasterizer primitives
//!
//! Everything here writes through [`PixelSink`], so the same primitives draw
//! into host surfaces, owned frame buffers and test recorders.

pub mod line;
pub mod fill;
pub mod clip;

pub use line::*;
pub use fill::*;
pub use clip::*;

use crate::surface::PixelSink;
use gridshade_core::Rgba8;

/// Fill the axis-aligned rectangle with top-left `(x, y)` and the given size
pub fn fill_rect<S: PixelSink + ?Sized>(
    sink: &mut S,
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    color: Rgba8,
) {
    for row in 0..height as i32 {
        for col in 0..width as i32 {
            sink.set_pixel(x + col, y + row, color);
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::HashMap;

    /// Records every write, counting repeats
    #[derive(Default)]
    pub struct Recorder {
        pub writes: HashMap<(i32, i32), usize>,
        pub last_color: Option<Rgba8>,
    }

    impl Recorder {
        pub fn pixels(&self) -> std::collections::BTreeSet<(i32, i32)> {
            self.writes.keys().copied().collect()
        }
    }

    impl PixelSink for Recorder {
        fn set_pixel(&mut self, x: i32, y: i32, color: Rgba8) {
            *self.writes.entry((x, y)).or_insert(0) += 1;
            self.last_color = Some(color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::Recorder;
    use super::*;

    #[test]
    fn test_fill_rect() {
        let mut recorder = Recorder::default();
        fill_rect(&mut recorder, -1, 2, 3, 2, Rgba8::RED);
        assert_eq!(recorder.writes.len(), 6);
        assert!(recorder.writes.contains_key(&(-1, 2)));
        assert!(recorder.writes.contains_key(&(1, 3)));
        assert!(!recorder.writes.contains_key(&(2, 3)));
    }
}
