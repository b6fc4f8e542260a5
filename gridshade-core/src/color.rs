//! Colors and piecewise-linear color ramps

use serde::{Deserialize, Serialize};

/// An 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);

    /// Create an opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Multiply the color channels by `factor`, clamping each to `0..=255`.
    /// Alpha is left untouched.
    pub fn scaled(self, factor: f64) -> Self {
        let scale = |c: u8| (c as f64 * factor).round().clamp(0.0, 255.0) as u8;
        Self {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
            a: self.a,
        }
    }

    /// Channels in the B, G, R, A byte order used by pixel surfaces
    pub fn to_bgra(self) -> [u8; 4] {
        [self.b, self.g, self.r, self.a]
    }

    /// Inverse of [`Rgba8::to_bgra`]
    pub fn from_bgra(bytes: [u8; 4]) -> Self {
        Self {
            r: bytes[2],
            g: bytes[1],
            b: bytes[0],
            a: bytes[3],
        }
    }
}

impl Default for Rgba8 {
    fn default() -> Self {
        Self::BLACK
    }
}

/// A control point of a [`ColorRamp`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub key: f64,
    pub color: Rgba8,
}

/// Piecewise-linear mapping from a normalized scalar to a color.
///
/// Stops are kept sorted ascending by key after every insertion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorRamp {
    stops: Vec<ColorStop>,
}

impl ColorRamp {
    /// Create an empty ramp
    pub fn new() -> Self {
        Self::default()
    }

    /// Navy, green, yellow, red: the default ramp for terrain heights
    pub fn height_default() -> Self {
        let mut ramp = Self::new();
        ramp.insert(0.0, Rgba8::rgb(0, 0, 128));
        ramp.insert(0.3, Rgba8::rgb(0, 255, 0));
        ramp.insert(0.6, Rgba8::rgb(255, 255, 0));
        ramp.insert(1.0, Rgba8::rgb(255, 0, 0));
        ramp
    }

    /// Insert a stop, keeping the stops sorted by key
    pub fn insert(&mut self, key: f64, color: Rgba8) {
        let index = self.stops.partition_point(|stop| stop.key <= key);
        self.stops.insert(index, ColorStop { key, color });
    }

    /// Get the sorted stops
    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Check if the ramp has no stops
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Look up the color for `x`.
    ///
    /// Values outside the key range clamp to the first or last stop; values
    /// inside interpolate the RGB channels of the two bracketing stops. An
    /// empty ramp yields black.
    pub fn lookup(&self, x: f64) -> Rgba8 {
        let (first, last) = match (self.stops.first(), self.stops.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Rgba8::BLACK,
        };

        if x <= first.key {
            return first.color;
        }
        if x >= last.key {
            return last.color;
        }

        for pair in self.stops.windows(2) {
            let (left, right) = (&pair[0], &pair[1]);
            if x >= left.key && x <= right.key {
                let span = right.key - left.key;
                if span <= f64::EPSILON {
                    return left.color;
                }
                let t = (x - left.key) / span;
                return Rgba8::rgb(
                    lerp_channel(left.color.r, right.color.r, t),
                    lerp_channel(left.color.g, right.color.g, t),
                    lerp_channel(left.color.b, right.color.b, t),
                );
            }
        }

        // NaN never brackets
        Rgba8::BLACK
    }
}

fn lerp_channel(from: u8, to: u8, t: f64) -> u8 {
    let from = from as f64;
    let to = to as f64;
    (from + t * (to - from)).round().clamp(0.0, 255.0) as u8
}
