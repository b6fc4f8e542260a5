//! Software rendering for height-field meshes
//!
//! This crate turns a [`GridMesh`](gridshade_core::GridMesh) into pixels
//! without any GPU pipeline:
//! - Pinhole camera with an orthographic screen projection
//! - Bresenham line drawing and scanline polygon filling
//! - Sutherland–Hodgman clipping against the surface rectangle
//! - Flat shading from a height color ramp and a diffuse light
//! - A [`Viewer`] facade that repaints on every parameter change
//!
//! Rendering is single-threaded. A redraw holds the surface by `&mut` for
//! its whole duration, so two redraws of the same buffer cannot overlap.

pub mod camera;
pub mod surface;
pub mod raster;
pub mod fit;
pub mod legend;
pub mod renderer;
pub mod viewer;

pub use camera::*;
pub use surface::*;
pub use raster::*;
pub use fit::*;
pub use legend::*;
pub use renderer::*;
pub use viewer::*;
