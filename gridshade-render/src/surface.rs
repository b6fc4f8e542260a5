//! Pixel surfaces
//!
//! A surface is a byte buffer of `height` rows, each `stride` bytes long,
//! holding 4-byte pixels in B, G, R, A order. Pixel `(x, y)` starts at byte
//! `y * stride + x * 4`. Writes outside the surface are ignored.

use gridshade_core::{Error, Result, Rgba8};

/// Destination for rasterized pixels
pub trait PixelSink {
    /// Write one pixel; coordinates outside the sink are ignored
    fn set_pixel(&mut self, x: i32, y: i32, color: Rgba8);
}

fn required_len(width: usize, height: usize, stride: usize) -> usize {
    if height == 0 {
        0
    } else {
        stride * (height - 1) + width * 4
    }
}

fn validate(len: usize, width: usize, height: usize, stride: usize) -> Result<()> {
    if stride < width * 4 {
        return Err(Error::InvalidSurface(format!(
            "stride {} is smaller than {} pixels of 4 bytes",
            stride, width
        )));
    }
    let required = required_len(width, height, stride);
    if len < required {
        return Err(Error::InvalidSurface(format!(
            "buffer of {} bytes is too small for {}x{} with stride {} ({} bytes needed)",
            len, width, height, stride, required
        )));
    }
    Ok(())
}

fn pixel_offset(x: i32, y: i32, width: usize, height: usize, stride: usize) -> Option<usize> {
    if x < 0 || y < 0 {
        return None;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= width || y >= height {
        return None;
    }
    Some(y * stride + x * 4)
}

fn clear_rows(data: &mut [u8], width: usize, height: usize, stride: usize, color: Rgba8) {
    if width == 0 || height == 0 {
        return;
    }
    let bgra = color.to_bgra();
    for row in data.chunks_mut(stride).take(height) {
        let pixels: &mut [[u8; 4]] = bytemuck::cast_slice_mut(&mut row[..width * 4]);
        pixels.fill(bgra);
    }
}

/// A borrowed pixel buffer supplied by the host
#[derive(Debug)]
pub struct Surface<'a> {
    data: &'a mut [u8],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a> Surface<'a> {
    /// Wrap a host buffer, checking that it holds `height` rows of `stride` bytes
    pub fn new(data: &'a mut [u8], width: usize, height: usize, stride: usize) -> Result<Self> {
        validate(data.len(), width, height, stride)?;
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Bytes per row
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Read a pixel back
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgba8> {
        let offset = pixel_offset(x, y, self.width, self.height, self.stride)?;
        let bytes = &self.data[offset..offset + 4];
        Some(Rgba8::from_bgra([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Fill every pixel with `color`, leaving row padding untouched
    pub fn clear(&mut self, color: Rgba8) {
        clear_rows(self.data, self.width, self.height, self.stride, color);
    }
}

impl PixelSink for Surface<'_> {
    fn set_pixel(&mut self, x: i32, y: i32, color: Rgba8) {
        if let Some(offset) = pixel_offset(x, y, self.width, self.height, self.stride) {
            self.data[offset..offset + 4].copy_from_slice(&color.to_bgra());
        }
    }
}

/// An owned off-screen pixel buffer
#[derive(Debug, Clone)]
pub struct Framebuffer {
    data: Vec<u8>,
    width: usize,
    height: usize,
    stride: usize,
}

impl Framebuffer {
    /// Create a tightly packed buffer filled with white
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Self::with_stride(width, height, width * 4)
    }

    /// Create a buffer whose rows are `stride` bytes apart
    pub fn with_stride(width: usize, height: usize, stride: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidSurface(format!(
                "framebuffer size {}x{} is empty",
                width, height
            )));
        }
        validate(stride * height, width, height, stride)?;
        let mut frame = Self {
            data: vec![0; stride * height],
            width,
            height,
            stride,
        };
        frame.clear(Rgba8::WHITE);
        Ok(frame)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Raw bytes in B, G, R, A order
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Borrow the buffer as a [`Surface`] for one redraw
    pub fn surface(&mut self) -> Surface<'_> {
        Surface {
            data: &mut self.data,
            width: self.width,
            height: self.height,
            stride: self.stride,
        }
    }

    /// Read a pixel back
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgba8> {
        let offset = pixel_offset(x, y, self.width, self.height, self.stride)?;
        let bytes = &self.data[offset..offset + 4];
        Some(Rgba8::from_bgra([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Fill every pixel with `color`
    pub fn clear(&mut self, color: Rgba8) {
        clear_rows(&mut self.data, self.width, self.height, self.stride, color);
    }

    /// Iterate over `(x, y, color)` for every pixel
    pub fn pixels(&self) -> impl Iterator<Item = (i32, i32, Rgba8)> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width).map(move |x| {
                let offset = y * self.stride + x * 4;
                let bytes = &self.data[offset..offset + 4];
                (
                    x as i32,
                    y as i32,
                    Rgba8::from_bgra([bytes[0], bytes[1], bytes[2], bytes[3]]),
                )
            })
        })
    }
}

impl PixelSink for Framebuffer {
    fn set_pixel(&mut self, x: i32, y: i32, color: Rgba8) {
        if let Some(offset) = pixel_offset(x, y, self.width, self.height, self.stride) {
            self.data[offset..offset + 4].copy_from_slice(&color.to_bgra());
        }
    }
}
