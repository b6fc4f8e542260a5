//! Height-field viewer
//!
//! [`Viewer`] holds the model state a windowing layer would otherwise keep
//! and repaints its frame after every change, so the frame always reflects
//! the current parameters when a method returns.

use crate::camera::{Camera, SphericalAngles};
use crate::renderer::{FrameStats, RenderConfig, RenderMode, Renderer, Scene};
use crate::surface::Framebuffer;
use gridshade_core::{Axis, ColorRamp, GridMesh, GridPoint, ModelTransform, Result};
use gridshade_io::SkippedLine;
use std::path::Path;

/// Owns a mesh, its view parameters and an off-screen frame
#[derive(Debug, Clone)]
pub struct Viewer {
    mesh: GridMesh,
    camera: Camera,
    transform: ModelTransform,
    ramp: ColorRamp,
    renderer: Renderer,
    frame: Framebuffer,
    last_stats: FrameStats,
}

impl Viewer {
    /// Create a viewer with the default configuration and an empty mesh
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Self::with_config(width, height, RenderConfig::default())
    }

    pub fn with_config(width: usize, height: usize, config: RenderConfig) -> Result<Self> {
        let mut viewer = Self {
            mesh: GridMesh::new(),
            camera: Camera::default(),
            transform: ModelTransform::default(),
            ramp: ColorRamp::height_default(),
            renderer: Renderer::new(config),
            frame: Framebuffer::new(width, height)?,
            last_stats: FrameStats::default(),
        };
        viewer.redraw();
        Ok(viewer)
    }

    /// Replace the points, rebuild topology and repaint
    pub fn load_points(&mut self, points: Vec<GridPoint>) {
        self.mesh.set_points(points);
        self.redraw();
    }

    /// Replace the points with a grid of known dimensions and repaint
    pub fn load_grid(&mut self, points: Vec<GridPoint>, rows: usize, cols: usize) -> Result<()> {
        self.mesh = GridMesh::with_dimensions(points, rows, cols)?;
        self.redraw();
        Ok(())
    }

    /// Load an `x y z` point file and repaint, returning the lines that were
    /// skipped
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<Vec<SkippedLine>> {
        let load = gridshade_io::read_points(path)?;
        self.load_points(load.points);
        Ok(load.skipped)
    }

    /// Set the rotation about one axis, in degrees
    pub fn set_rotation(&mut self, axis: Axis, degrees: f64) {
        self.transform.set_rotation(axis, degrees);
        self.redraw();
    }

    pub fn set_rotation_x(&mut self, degrees: f64) {
        self.set_rotation(Axis::X, degrees);
    }

    pub fn set_rotation_y(&mut self, degrees: f64) {
        self.set_rotation(Axis::Y, degrees);
    }

    pub fn set_rotation_z(&mut self, degrees: f64) {
        self.set_rotation(Axis::Z, degrees);
    }

    pub fn set_z_scale(&mut self, z_scale: f64) {
        self.transform.set_z_scale(z_scale);
        self.redraw();
    }

    pub fn set_camera_angles(&mut self, angles: SphericalAngles) {
        self.camera.set_angles(angles);
        self.redraw();
    }

    pub fn set_color_ramp(&mut self, ramp: ColorRamp) {
        self.ramp = ramp;
        self.redraw();
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.renderer.config_mut().mode = mode;
        self.redraw();
    }

    /// Replace the whole render configuration
    pub fn set_config(&mut self, config: RenderConfig) {
        self.renderer = Renderer::new(config);
        self.redraw();
    }

    /// Reallocate the frame at the new size and repaint
    pub fn resize(&mut self, width: usize, height: usize) -> Result<()> {
        self.frame = Framebuffer::new(width, height)?;
        self.redraw();
        Ok(())
    }

    /// Clear the frame and draw the current state into it
    pub fn redraw(&mut self) -> FrameStats {
        let scene = Scene {
            mesh: &self.mesh,
            transform: &self.transform,
            camera: &self.camera,
            ramp: &self.ramp,
        };
        self.last_stats = self.renderer.render(&scene, &mut self.frame.surface());
        self.last_stats
    }

    pub fn frame(&self) -> &Framebuffer {
        &self.frame
    }

    pub fn mesh(&self) -> &GridMesh {
        &self.mesh
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn transform(&self) -> &ModelTransform {
        &self.transform
    }

    pub fn ramp(&self) -> &ColorRamp {
        &self.ramp
    }

    pub fn config(&self) -> &RenderConfig {
        self.renderer.config()
    }

    /// Statistics of the most recent redraw
    pub fn last_stats(&self) -> FrameStats {
        self.last_stats
    }
}
