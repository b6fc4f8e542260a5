//! Point types and related functionality

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A 3D point with double precision coordinates
pub type Point3d = Point3<f64>;

/// A 3D vector with double precision components
pub type Vector3d = Vector3<f64>;

/// A height-field sample: a position plus an optional per-vertex normal.
///
/// Points are identified by their index in the owning [`GridMesh`](crate::GridMesh).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridPoint {
    pub position: Point3d,
    pub normal: Option<Vector3d>,
}

impl GridPoint {
    /// Create a point without a normal
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: Point3d::new(x, y, z),
            normal: None,
        }
    }
}

impl Default for GridPoint {
    fn default() -> Self {
        Self {
            position: Point3d::origin(),
            normal: None,
        }
    }
}

impl From<Point3d> for GridPoint {
    fn from(position: Point3d) -> Self {
        Self {
            position,
            normal: None,
        }
    }
}

impl From<GridPoint> for Point3d {
    fn from(point: GridPoint) -> Self {
        point.position
    }
}
