//! 3D transformation utilities

use crate::point::*;
use nalgebra::{Matrix4, Rotation3, Vector3};
use serde::{Deserialize, Serialize};

/// A 3D affine transformation stored as a homogeneous matrix
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    pub matrix: Matrix4<f64>,
}

impl Transform3D {
    /// Create an identity transformation
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Create a translation transformation
    pub fn translation(translation: Vector3<f64>) -> Self {
        Self {
            matrix: Matrix4::new_translation(&translation),
        }
    }

    /// Create a rotation about one of the coordinate axes, in degrees
    pub fn rotation_about(axis: Axis, degrees: f64) -> Self {
        let unit = match axis {
            Axis::X => Vector3::x_axis(),
            Axis::Y => Vector3::y_axis(),
            Axis::Z => Vector3::z_axis(),
        };
        Self {
            matrix: Rotation3::from_axis_angle(&unit, degrees.to_radians()).to_homogeneous(),
        }
    }

    /// Create a scaling transformation
    pub fn scaling(scale: Vector3<f64>) -> Self {
        Self {
            matrix: Matrix4::new_nonuniform_scaling(&scale),
        }
    }

    /// Apply the transformation to a point
    pub fn transform_point(&self, point: &Point3d) -> Point3d {
        let homogeneous = self.matrix * point.to_homogeneous();
        Point3d::from_homogeneous(homogeneous).unwrap_or(*point)
    }

    /// Return the transformation that applies `self` first and `next` after it
    pub fn then(self, next: Self) -> Self {
        Self {
            matrix: next.matrix * self.matrix,
        }
    }
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<Matrix4<f64>> for Transform3D {
    fn from(matrix: Matrix4<f64>) -> Self {
        Self { matrix }
    }
}

/// Coordinate axis selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Model-level placement applied to every point before the camera.
///
/// The pipeline order is fixed: rotate about X, then Y, then Z, then scale
/// (uniform `scale`, with Z additionally multiplied by `z_scale`), then
/// translate. Reordering these steps changes the rendered image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelTransform {
    /// Rotation about the X, Y and Z axes, in degrees
    pub rotation: Vector3d,
    pub translation: Vector3d,
    pub scale: f64,
    pub z_scale: f64,
}

impl ModelTransform {
    pub fn set_rotation(&mut self, axis: Axis, degrees: f64) {
        match axis {
            Axis::X => self.rotation.x = degrees,
            Axis::Y => self.rotation.y = degrees,
            Axis::Z => self.rotation.z = degrees,
        }
    }

    pub fn set_translation(&mut self, translation: Vector3d) {
        self.translation = translation;
    }

    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale;
    }

    pub fn set_z_scale(&mut self, z_scale: f64) {
        self.z_scale = z_scale;
    }

    /// Compose the fixed pipeline into a single transformation
    pub fn to_transform(&self) -> Transform3D {
        Transform3D::rotation_about(Axis::X, self.rotation.x)
            .then(Transform3D::rotation_about(Axis::Y, self.rotation.y))
            .then(Transform3D::rotation_about(Axis::Z, self.rotation.z))
            .then(Transform3D::scaling(Vector3::new(
                self.scale,
                self.scale,
                self.scale * self.z_scale,
            )))
            .then(Transform3D::translation(self.translation))
    }

    /// Apply the pipeline to a single point
    pub fn apply(&self, point: &Point3d) -> Point3d {
        self.to_transform().transform_point(point)
    }
}

impl Default for ModelTransform {
    fn default() -> Self {
        Self {
            rotation: Vector3d::zeros(),
            translation: Vector3d::zeros(),
            scale: 1.0,
            z_scale: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_default() {
        let transform = ModelTransform::default();
        let p = Point3d::new(1.5, -2.0, 3.25);
        assert_relative_eq!(transform.apply(&p), p, epsilon = 1e-12);
    }

    #[test]
    fn test_single_axis_rotations() {
        let p = Point3d::new(1.0, 0.0, 0.0);

        let mut transform = ModelTransform::default();
        transform.set_rotation(Axis::Z, 90.0);
        assert_relative_eq!(transform.apply(&p), Point3d::new(0.0, 1.0, 0.0), epsilon = 1e-12);

        let mut transform = ModelTransform::default();
        transform.set_rotation(Axis::Y, 90.0);
        assert_relative_eq!(transform.apply(&p), Point3d::new(0.0, 0.0, -1.0), epsilon = 1e-12);

        let mut transform = ModelTransform::default();
        transform.set_rotation(Axis::X, 90.0);
        let q = Point3d::new(0.0, 1.0, 0.0);
        assert_relative_eq!(transform.apply(&q), Point3d::new(0.0, 0.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn test_rotation_order_is_x_then_y_then_z() {
        let mut transform = ModelTransform::default();
        transform.set_rotation(Axis::X, 90.0);
        transform.set_rotation(Axis::Z, 90.0);

        // X first: (0,1,0) -> (0,0,1); Z then leaves it on the Z axis
        let p = Point3d::new(0.0, 1.0, 0.0);
        assert_relative_eq!(transform.apply(&p), Point3d::new(0.0, 0.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn test_scale_after_rotation_then_translate() {
        let mut transform = ModelTransform::default();
        transform.set_rotation(Axis::X, 90.0);
        transform.set_scale(2.0);
        transform.set_z_scale(3.0);
        transform.set_translation(Vector3d::new(10.0, 0.0, 0.0));

        // rotated onto Z, then scaled by 2 * 3, then translated
        let p = Point3d::new(0.0, 1.0, 0.0);
        assert_relative_eq!(transform.apply(&p), Point3d::new(10.0, 0.0, 6.0), epsilon = 1e-12);
    }

    #[test]
    fn test_then_composes_in_application_order() {
        let shift = Transform3D::translation(Vector3::new(1.0, 0.0, 0.0));
        let double = Transform3D::scaling(Vector3::new(2.0, 2.0, 2.0));
        let p = Point3d::new(1.0, 1.0, 1.0);
        assert_relative_eq!(shift.then(double).transform_point(&p), Point3d::new(4.0, 2.0, 2.0));
        assert_relative_eq!(double.then(shift).transform_point(&p), Point3d::new(3.0, 2.0, 2.0));
    }
}
