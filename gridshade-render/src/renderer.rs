//! Frame compositor
//!
//! Projects a grid mesh through the model transform and camera, fits it onto
//! the surface and rasterizes every face with flat shading.

use crate::camera::Camera;
use crate::fit::ScreenFit;
use crate::legend::{draw_color_bar, ColorBarConfig};
use crate::raster::{draw_polygon_outline, fill_polygon_outlined, ClipRect};
use crate::surface::{PixelSink, Surface};
use gridshade_core::{ColorRamp, GridMesh, ModelTransform, Point3d, QuadFace, Rgba8, Vector3d};
use itertools::Itertools;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// How faces are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RenderMode {
    /// Scanline-filled, flat-shaded faces
    #[default]
    Filled,
    /// Face outlines in the shaded color
    Wireframe,
    /// One pixel per grid point
    Points,
}

/// Order in which faces are painted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DrawOrder {
    /// Farthest faces first, by mean view depth
    #[default]
    BackToFront,
    /// Face index order
    Index,
}

/// Point light used for diffuse shading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lighting {
    pub position: Point3d,
    /// Lower bound of the diffuse factor, so faces turned away stay visible
    pub ambient_floor: f64,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            position: Point3d::new(0.0, 0.0, 200.0),
            ambient_floor: 0.35,
        }
    }
}

impl Lighting {
    /// Diffuse factor for a surface element, clamped into `[ambient_floor, 1]`
    pub fn diffuse(&self, centroid: &Point3d, normal: &Vector3d) -> f64 {
        let to_light = (self.position - centroid)
            .try_normalize(f64::EPSILON)
            .unwrap_or_else(Vector3d::zeros);
        normal
            .dot(&to_light)
            .max(0.0)
            .clamp(self.ambient_floor.min(1.0), 1.0)
    }

    /// Scale `base` by the diffuse factor
    pub fn shade(&self, base: Rgba8, centroid: &Point3d, normal: &Vector3d) -> Rgba8 {
        base.scaled(self.diffuse(centroid, normal))
    }
}

/// Rendering configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    pub mode: RenderMode,
    pub draw_order: DrawOrder,
    /// Empty border kept around the fitted mesh, in pixels
    pub margin: u32,
    pub background: Rgba8,
    pub lighting: Lighting,
    pub color_bar: ColorBarConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            mode: RenderMode::Filled,
            draw_order: DrawOrder::BackToFront,
            margin: 20,
            background: Rgba8::WHITE,
            lighting: Lighting::default(),
            color_bar: ColorBarConfig::default(),
        }
    }
}

/// Everything a frame is drawn from
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub mesh: &'a GridMesh,
    pub transform: &'a ModelTransform,
    pub camera: &'a Camera,
    pub ramp: &'a ColorRamp,
}

/// What a redraw did
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    pub faces_drawn: usize,
    /// Faces with invalid indices or fewer than 3 distinct screen vertices
    pub faces_skipped: usize,
    pub points_drawn: usize,
    pub color_bar_drawn: bool,
    /// `None` when the mesh was empty
    pub fit: Option<ScreenFit>,
}

/// Software renderer for grid meshes
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut RenderConfig {
        &mut self.config
    }

    /// Clear `surface` and draw the scene into it
    pub fn render(&self, scene: &Scene<'_>, surface: &mut Surface<'_>) -> FrameStats {
        let (width, height) = (surface.width(), surface.height());
        surface.clear(self.config.background);

        let mut stats = FrameStats::default();
        let model = scene.transform.to_transform();
        let view: Vec<Point3d> = scene
            .mesh
            .points()
            .iter()
            .map(|p| scene.camera.transform(&model.transform_point(&p.position)))
            .collect();
        let projected: Vec<Point2<f64>> = view.iter().map(|v| scene.camera.project(v)).collect();

        let Some(fit) = ScreenFit::compute(&projected, width, height, self.config.margin) else {
            log::debug!("nothing to draw: empty mesh");
            return stats;
        };
        stats.fit = Some(fit);
        let pixels: Vec<Point2<i32>> = projected.iter().map(|p| fit.to_pixel(p)).collect();

        match self.config.mode {
            RenderMode::Points => {
                for (point, pixel) in scene.mesh.points().iter().zip(&pixels) {
                    let color = scene.ramp.lookup(scene.mesh.normalize_z(point.position.z));
                    surface.set_pixel(pixel.x, pixel.y, color);
                    stats.points_drawn += 1;
                }
            }
            RenderMode::Filled | RenderMode::Wireframe => {
                let clip = ClipRect::for_surface(width, height);
                for face in self.face_order(scene.mesh, &view) {
                    if self.draw_face(scene, face, &pixels, &clip, surface) {
                        stats.faces_drawn += 1;
                    } else {
                        stats.faces_skipped += 1;
                    }
                }
            }
        }

        stats.color_bar_drawn =
            draw_color_bar(surface, scene.ramp, width, height, &self.config.color_bar);

        log::debug!(
            "frame {}x{}: {} faces drawn, {} skipped, {} points, scale {:.3}",
            width,
            height,
            stats.faces_drawn,
            stats.faces_skipped,
            stats.points_drawn,
            fit.scale
        );
        stats
    }

    fn face_order<'m>(&self, mesh: &'m GridMesh, view: &[Point3d]) -> Vec<&'m QuadFace> {
        let faces = mesh.faces().iter();
        match self.config.draw_order {
            DrawOrder::Index => faces.collect(),
            DrawOrder::BackToFront => faces
                .map(|face| {
                    let depth = face
                        .iter()
                        .filter_map(|&i| view.get(i))
                        .map(|v| v.z)
                        .sum::<f64>()
                        / 4.0;
                    (face, depth)
                })
                .sorted_by(|a, b| a.1.total_cmp(&b.1))
                .map(|(face, _)| face)
                .collect(),
        }
    }

    fn draw_face(
        &self,
        scene: &Scene<'_>,
        face: &QuadFace,
        pixels: &[Point2<i32>],
        clip: &ClipRect,
        surface: &mut Surface<'_>,
    ) -> bool {
        let (Some(centroid), Some(normal)) =
            (scene.mesh.face_centroid(face), scene.mesh.face_normal(face))
        else {
            log::warn!("skipping face {:?} with out-of-range indices", face);
            return false;
        };
        if face.iter().any(|&i| i >= pixels.len()) {
            return false;
        }

        let mut corners: Vec<Point2<i32>> = Vec::with_capacity(4);
        for pixel in face.iter().map(|&i| pixels[i]) {
            if corners.last() != Some(&pixel) {
                corners.push(pixel);
            }
        }
        while corners.len() > 1 && corners.first() == corners.last() {
            corners.pop();
        }
        if corners.iter().map(|p| (p.x, p.y)).unique().count() < 3 {
            return false;
        }

        let base = scene.ramp.lookup(scene.mesh.normalize_z(centroid.z));
        let color = self.config.lighting.shade(base, &centroid, &normal);

        match self.config.mode {
            RenderMode::Wireframe => draw_polygon_outline(surface, &corners, color),
            _ => fill_polygon_outlined(surface, &corners, clip, color),
        }
        true
    }
}
