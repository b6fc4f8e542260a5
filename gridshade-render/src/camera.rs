//! Camera utilities for height-field rendering

use gridshade_core::{Point3d, Vector3d};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Look directions closer to vertical than this switch the helper up vector
const VERTICAL_THRESHOLD: f64 = 0.99;

/// Viewing direction in spherical coordinates, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphericalAngles {
    /// Angle from the +Z axis
    pub zenith: f64,
    /// Angle in the XY plane from the +X axis
    pub azimuth: f64,
}

impl SphericalAngles {
    pub fn new(zenith: f64, azimuth: f64) -> Self {
        Self { zenith, azimuth }
    }
}

impl Default for SphericalAngles {
    fn default() -> Self {
        Self::new(45.0, 45.0)
    }
}

/// A camera with an orthonormal view basis derived from spherical angles.
///
/// `forward` (n) points from the scene towards the eye, `right` (u) and `up`
/// (v) span the image plane. View-space depth therefore grows towards the
/// viewer.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Point3d,
    angles: SphericalAngles,
    forward: Vector3d,
    right: Vector3d,
    up: Vector3d,
}

impl Camera {
    /// Create a new camera
    pub fn new(position: Point3d, angles: SphericalAngles) -> Self {
        let mut camera = Self {
            position,
            angles,
            forward: Vector3d::z(),
            right: Vector3d::x(),
            up: Vector3d::y(),
        };
        camera.update_basis();
        camera
    }

    /// Set position and angles and recompute the basis
    pub fn configure(&mut self, position: Point3d, angles: SphericalAngles) {
        self.position = position;
        self.angles = angles;
        self.update_basis();
    }

    /// Change the viewing angles and recompute the basis
    pub fn set_angles(&mut self, angles: SphericalAngles) {
        self.angles = angles;
        self.update_basis();
    }

    /// Move the camera; the basis only depends on the angles
    pub fn set_position(&mut self, position: Point3d) {
        self.position = position;
    }

    fn update_basis(&mut self) {
        let zenith = self.angles.zenith.to_radians();
        let azimuth = self.angles.azimuth.to_radians();

        let forward = Vector3d::new(
            zenith.sin() * azimuth.cos(),
            zenith.sin() * azimuth.sin(),
            zenith.cos(),
        )
        .normalize();

        // keep the helper vector away from the look direction
        let helper = if forward.z.abs() > VERTICAL_THRESHOLD {
            Vector3d::y()
        } else {
            Vector3d::z()
        };

        let right = helper.cross(&forward).normalize();
        let up = forward.cross(&right).normalize();

        self.forward = forward;
        self.right = right;
        self.up = up;

        log::debug!(
            "camera basis for zenith {} azimuth {}: n={:?} u={:?} v={:?}",
            self.angles.zenith,
            self.angles.azimuth,
            forward,
            right,
            up
        );
    }

    pub fn position(&self) -> Point3d {
        self.position
    }

    pub fn angles(&self) -> SphericalAngles {
        self.angles
    }

    /// The n axis
    pub fn forward(&self) -> Vector3d {
        self.forward
    }

    /// The u axis
    pub fn right(&self) -> Vector3d {
        self.right
    }

    /// The v axis
    pub fn up(&self) -> Vector3d {
        self.up
    }

    /// World to view space: `(lateral, vertical, depth)` along `(u, v, n)`
    pub fn transform(&self, world: &Point3d) -> Point3d {
        let offset = world - self.position;
        Point3d::new(
            offset.dot(&self.right),
            offset.dot(&self.up),
            offset.dot(&self.forward),
        )
    }

    /// Orthographic projection: drop the depth component
    pub fn project(&self, view: &Point3d) -> Point2<f64> {
        Point2::new(view.x, view.y)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Point3d::new(0.0, 0.0, 200.0), SphericalAngles::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn assert_orthonormal(camera: &Camera) {
        let (n, u, v) = (camera.forward(), camera.right(), camera.up());
        assert_abs_diff_eq!(n.norm(), 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(u.norm(), 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(v.norm(), 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(n.dot(&u), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(n.dot(&v), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(u.dot(&v), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_basis_orthonormal_over_angle_sweep() {
        let mut camera = Camera::default();
        let mut zenith = -360.0;
        while zenith <= 360.0 {
            let mut azimuth = -180.0;
            while azimuth <= 540.0 {
                camera.set_angles(SphericalAngles::new(zenith, azimuth));
                assert_orthonormal(&camera);
                azimuth += 17.5;
            }
            zenith += 7.5;
        }
    }

    #[test]
    fn test_basis_orthonormal_near_poles() {
        let mut camera = Camera::default();
        for &zenith in &[0.0, 1e-9, 0.5, 4.0, 176.0, 179.5, 180.0, 180.0 - 1e-9] {
            for &azimuth in &[0.0, 33.0, 90.0, 270.0] {
                camera.set_angles(SphericalAngles::new(zenith, azimuth));
                assert_orthonormal(&camera);
            }
        }
    }

    #[test]
    fn test_top_down_view_maps_world_xy() {
        let camera = Camera::new(Point3d::new(0.0, 0.0, 200.0), SphericalAngles::new(0.0, 0.0));
        assert_relative_eq!(camera.forward(), Vector3d::new(0.0, 0.0, 1.0), epsilon = 1e-12);
        assert_relative_eq!(camera.right(), Vector3d::new(1.0, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(camera.up(), Vector3d::new(0.0, 1.0, 0.0), epsilon = 1e-12);

        let view = camera.transform(&Point3d::new(3.0, -2.0, 5.0));
        assert_relative_eq!(view, Point3d::new(3.0, -2.0, -195.0), epsilon = 1e-12);
        assert_relative_eq!(camera.project(&view), Point2::new(3.0, -2.0), epsilon = 1e-12);
    }

    #[test]
    fn test_side_view() {
        // looking from +X: right is +Y, up is +Z
        let camera = Camera::new(Point3d::origin(), SphericalAngles::new(90.0, 0.0));
        assert_relative_eq!(camera.forward(), Vector3d::new(1.0, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(camera.right(), Vector3d::new(0.0, 1.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(camera.up(), Vector3d::new(0.0, 0.0, 1.0), epsilon = 1e-12);

        let view = camera.transform(&Point3d::new(2.0, 3.0, 4.0));
        assert_relative_eq!(view, Point3d::new(3.0, 4.0, 2.0), epsilon = 1e-12);
    }

    #[test]
    fn test_depth_grows_towards_viewer() {
        let camera = Camera::default();
        let near = camera.transform(&(Point3d::origin() + camera.forward() * 10.0));
        let far = camera.transform(&Point3d::origin());
        assert!(near.z > far.z);
    }

    #[test]
    fn test_configure_and_position() {
        let mut camera = Camera::default();
        camera.configure(Point3d::new(1.0, 1.0, 1.0), SphericalAngles::new(0.0, 0.0));
        assert_eq!(camera.position(), Point3d::new(1.0, 1.0, 1.0));
        assert_eq!(camera.angles(), SphericalAngles::new(0.0, 0.0));
        let view = camera.transform(&Point3d::new(1.0, 1.0, 1.0));
        assert_relative_eq!(view, Point3d::origin(), epsilon = 1e-12);

        camera.set_position(Point3d::new(0.0, 0.0, 0.0));
        assert_relative_eq!(camera.right(), Vector3d::x(), epsilon = 1e-12);
    }
}
