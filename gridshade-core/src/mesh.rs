//! Grid mesh data structures and topology reconstruction
//!
//! A [`GridMesh`] owns an ordered sequence of height samples and derives its
//! edges and quadrilateral faces from adjacency. Edges and faces store point
//! indices, so the point vector can be rebuilt or reallocated without leaving
//! dangling references; every derived structure is recomputed from scratch on
//! each rebuild.
//!
//! # Row-major precondition
//!
//! When no explicit dimensions are given, rows are detected by comparing the
//! Y coordinate of consecutive points (within [`ROW_EPSILON`]). The length of
//! the first row fixes the column count for the whole grid. Input that is not
//! row-major with a uniform row length yields undefined face geometry; the
//! builder logs the mismatch and stays in bounds, but does not try to repair it.

use crate::error::{Error, Result};
use crate::point::*;
use serde::{Deserialize, Serialize};

/// Absolute tolerance used to decide that two consecutive points share a row
pub const ROW_EPSILON: f64 = 1e-6;

/// Normals shorter than this are treated as degenerate
const DEGENERATE_NORMAL: f64 = 1e-12;

/// An edge between two points, stored as indices into the point sequence
pub type GridEdge = [usize; 2];

/// A quadrilateral face, stored as four point indices in winding order
pub type QuadFace = [usize; 4];

/// Normal used for faces whose geometric normal cannot be computed
pub fn default_up() -> Vector3d {
    Vector3d::new(0.0, 0.0, 1.0)
}

/// Closed range of heights found in a mesh
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZRange {
    pub min: f64,
    pub max: f64,
}

impl ZRange {
    /// Map a height into `[0, 1]` relative to this range.
    ///
    /// A flat range maps every height to `0.0`.
    pub fn normalize(&self, z: f64) -> f64 {
        let span = self.max - self.min;
        if span.abs() < f64::EPSILON {
            0.0
        } else {
            (z - self.min) / span
        }
    }
}

impl Default for ZRange {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}

/// A height-field mesh laid out as a row-major grid of points
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GridMesh {
    points: Vec<GridPoint>,
    edges: Vec<GridEdge>,
    faces: Vec<QuadFace>,
    rows: usize,
    cols: usize,
    z_range: ZRange,
}

impl GridMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mesh from row-major points, inferring rows and columns from
    /// changes in the Y coordinate.
    pub fn from_points(points: Vec<GridPoint>) -> Self {
        let mut mesh = Self {
            points,
            ..Self::default()
        };
        mesh.rebuild_topology();
        mesh
    }

    /// Build a mesh from row-major points with explicit grid dimensions.
    pub fn with_dimensions(points: Vec<GridPoint>, rows: usize, cols: usize) -> Result<Self> {
        if rows.checked_mul(cols) != Some(points.len()) {
            return Err(Error::InvalidTopology(format!(
                "{} x {} grid needs {} points, got {}",
                rows,
                cols,
                rows.saturating_mul(cols),
                points.len()
            )));
        }

        let mut mesh = Self {
            points,
            ..Self::default()
        };
        for i in 0..rows {
            for j in 0..cols.saturating_sub(1) {
                let idx = i * cols + j;
                mesh.edges.push([idx, idx + 1]);
            }
        }
        mesh.finish_grid(rows, cols);
        Ok(mesh)
    }

    /// Generate a flat synthetic grid with `rows x cols` points.
    ///
    /// Point `(i, j)` sits at `x = j * spacing`, `y = i * spacing`, `z = 0`.
    pub fn test_grid(rows: usize, cols: usize, spacing: f64) -> Self {
        let points = (0..rows)
            .flat_map(|i| {
                (0..cols).map(move |j| GridPoint::new(j as f64 * spacing, i as f64 * spacing, 0.0))
            })
            .collect();
        // rows * cols points were generated, so the dimensions always match
        Self::with_dimensions(points, rows, cols).unwrap_or_default()
    }

    /// Replace the point sequence and rebuild topology from scratch
    pub fn set_points(&mut self, points: Vec<GridPoint>) {
        self.points = points;
        self.rebuild_topology();
    }

    /// Re-derive edges, faces and the height range from the current points
    /// using row detection on the Y coordinate.
    pub fn rebuild_topology(&mut self) {
        self.edges.clear();
        self.faces.clear();
        self.rows = 0;
        self.cols = 0;

        let count = self.points.len();
        if count == 0 {
            self.z_range = ZRange::default();
            return;
        }

        let mut row_length = None;
        let mut boundaries = 0usize;
        for i in 0..count - 1 {
            let first = &self.points[i].position;
            let second = &self.points[i + 1].position;

            if (first.y - second.y).abs() < ROW_EPSILON {
                self.edges.push([i, i + 1]);
            } else {
                boundaries += 1;
                if row_length.is_none() {
                    row_length = Some(i + 1);
                }
            }
        }

        let cols = row_length.unwrap_or(count);
        let rows = count / cols;
        if count % cols != 0 || boundaries + 1 != rows {
            log::warn!(
                "point layout is not a uniform row-major grid: {} points, {} row boundaries, first row has {} points",
                count,
                boundaries,
                cols
            );
        }

        self.finish_grid(rows, cols);
    }

    /// Add vertical edges and faces for a `rows x cols` grid, then cache the
    /// height range.
    fn finish_grid(&mut self, rows: usize, cols: usize) {
        self.rows = rows;
        self.cols = cols;

        for i in 0..rows.saturating_sub(1) {
            for j in 0..cols {
                let idx = i * cols + j;
                self.edges.push([idx, idx + cols]);
            }
        }

        self.faces.reserve(rows.saturating_sub(1) * cols.saturating_sub(1));
        for i in 0..rows.saturating_sub(1) {
            for j in 0..cols.saturating_sub(1) {
                let idx = i * cols + j;
                self.faces.push([idx, idx + 1, idx + cols + 1, idx + cols]);
            }
        }

        self.compute_z_range();
        log::debug!(
            "grid topology: {} rows x {} cols, {} edges, {} faces",
            rows,
            cols,
            self.edges.len(),
            self.faces.len()
        );
    }

    fn compute_z_range(&mut self) {
        let mut iter = self.points.iter().map(|p| p.position.z);
        self.z_range = match iter.next() {
            Some(first) => iter.fold(ZRange { min: first, max: first }, |range, z| ZRange {
                min: range.min.min(z),
                max: range.max.max(z),
            }),
            None => ZRange::default(),
        };
    }

    /// Get the point sequence
    pub fn points(&self) -> &[GridPoint] {
        &self.points
    }

    /// Get the derived edges
    pub fn edges(&self) -> &[GridEdge] {
        &self.edges
    }

    /// Get the derived faces
    pub fn faces(&self) -> &[QuadFace] {
        &self.faces
    }

    /// Number of detected rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of detected columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Height range cached by the last rebuild
    pub fn z_range(&self) -> ZRange {
        self.z_range
    }

    /// Get the number of points
    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    /// Get the number of faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if the mesh has no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Get a point by index
    pub fn point(&self, index: usize) -> Option<&GridPoint> {
        self.points.get(index)
    }

    /// Resolve the four corner positions of a face, or `None` if any index is
    /// out of bounds.
    pub fn face_points(&self, face: &QuadFace) -> Option<[Point3d; 4]> {
        Some([
            self.points.get(face[0])?.position,
            self.points.get(face[1])?.position,
            self.points.get(face[2])?.position,
            self.points.get(face[3])?.position,
        ])
    }

    /// Mean position of the four corners of a face
    pub fn face_centroid(&self, face: &QuadFace) -> Option<Point3d> {
        let corners = self.face_points(face)?;
        let sum = corners
            .iter()
            .fold(Vector3d::zeros(), |acc, p| acc + p.coords);
        Some(Point3d::from(sum / 4.0))
    }

    /// Unit normal of a face from its first three corners
    pub fn face_normal(&self, face: &QuadFace) -> Option<Vector3d> {
        let corners = self.face_points(face)?;
        Some(triangle_normal(&corners[0], &corners[1], &corners[2]))
    }

    /// Map a height into `[0, 1]` using the cached height range
    pub fn normalize_z(&self, z: f64) -> f64 {
        self.z_range.normalize(z)
    }

    /// Get the axis-aligned bounding box of all points
    pub fn bounding_box(&self) -> Option<(Point3d, Point3d)> {
        let first = self.points.first()?.position;
        Some(self.points.iter().fold((first, first), |(min, max), p| {
            (min.inf(&p.position), max.sup(&p.position))
        }))
    }

    /// Fill every point's normal slot with the average of the normals of the
    /// faces it belongs to. Points outside every face get the default up.
    pub fn compute_vertex_normals(&mut self) {
        let mut sums = vec![Vector3d::zeros(); self.points.len()];
        for face in &self.faces {
            if let Some(normal) = self.face_normal(face) {
                for &idx in face {
                    sums[idx] += normal;
                }
            }
        }

        for (point, sum) in self.points.iter_mut().zip(sums) {
            point.normal = Some(sum.try_normalize(DEGENERATE_NORMAL).unwrap_or_else(default_up));
        }
    }
}

/// Unit normal of the triangle `(a, b, c)`, `(b - a) x (c - a)`.
///
/// Near-colinear input falls back to [`default_up`].
pub fn triangle_normal(a: &Point3d, b: &Point3d, c: &Point3d) -> Vector3d {
    (b - a)
        .cross(&(c - a))
        .try_normalize(DEGENERATE_NORMAL)
        .unwrap_or_else(default_up)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn grid_points(rows: usize, cols: usize) -> Vec<GridPoint> {
        let mut points = Vec::new();
        for i in 0..rows {
            for j in 0..cols {
                points.push(GridPoint::new(j as f64, 10.0 + i as f64 * 2.5, (i * j) as f64));
            }
        }
        points
    }

    #[test]
    fn test_topology_face_count_and_corners() {
        for &(rows, cols) in &[(2, 2), (3, 5), (6, 4), (7, 7)] {
            let mesh = GridMesh::from_points(grid_points(rows, cols));
            assert_eq!(mesh.rows(), rows);
            assert_eq!(mesh.cols(), cols);
            assert_eq!(mesh.face_count(), (rows - 1) * (cols - 1));

            for i in 0..rows - 1 {
                for j in 0..cols - 1 {
                    let face = mesh.faces()[i * (cols - 1) + j];
                    assert_eq!(
                        face,
                        [i * cols + j, i * cols + j + 1, (i + 1) * cols + j + 1, (i + 1) * cols + j]
                    );
                }
            }
        }
    }

    #[test]
    fn test_edges_cover_grid() {
        let mesh = GridMesh::from_points(grid_points(3, 4));
        // 3 rows of 3 horizontal edges, 2 row gaps of 4 vertical edges
        assert_eq!(mesh.edges().len(), 3 * 3 + 2 * 4);
        assert!(mesh.edges().contains(&[0, 1]));
        assert!(mesh.edges().contains(&[0, 4]));
        assert!(mesh.edges().contains(&[7, 11]));
        assert!(!mesh.edges().contains(&[3, 4]));
    }

    #[test]
    fn test_row_detection_uses_epsilon() {
        let points = vec![
            GridPoint::new(0.0, 1.0, 0.0),
            GridPoint::new(1.0, 1.0 + 1e-9, 0.0),
            GridPoint::new(0.0, 2.0, 0.0),
            GridPoint::new(1.0, 2.0, 0.0),
        ];
        let mesh = GridMesh::from_points(points);
        assert_eq!(mesh.cols(), 2);
        assert_eq!(mesh.rows(), 2);
        assert_eq!(mesh.face_count(), 1);
    }

    #[test]
    fn test_single_row_and_empty() {
        let mesh = GridMesh::from_points(grid_points(1, 5));
        assert_eq!(mesh.rows(), 1);
        assert_eq!(mesh.cols(), 5);
        assert_eq!(mesh.face_count(), 0);
        assert_eq!(mesh.edges().len(), 4);

        let empty = GridMesh::from_points(Vec::new());
        assert!(empty.is_empty());
        assert_eq!(empty.face_count(), 0);
        assert!(empty.bounding_box().is_none());
    }

    #[test]
    fn test_partial_trailing_row_stays_in_bounds() {
        let mut points = grid_points(3, 4);
        points.push(GridPoint::new(0.0, 100.0, 0.0));
        let mesh = GridMesh::from_points(points);
        assert_eq!(mesh.cols(), 4);
        assert_eq!(mesh.rows(), 3);
        for face in mesh.faces() {
            assert!(mesh.face_points(face).is_some());
        }
    }

    #[test]
    fn test_with_dimensions() {
        let mesh = GridMesh::with_dimensions(grid_points(3, 4), 3, 4).unwrap();
        assert_eq!(mesh.face_count(), 6);
        assert_eq!(mesh.faces()[0], [0, 1, 5, 4]);

        let err = GridMesh::with_dimensions(grid_points(3, 4), 4, 4);
        assert!(matches!(err, Err(Error::InvalidTopology(_))));
    }

    #[test]
    fn test_explicit_dimensions_ignore_y_values() {
        // All points share one Y value, which the heuristic would read as a single row
        let points: Vec<GridPoint> = (0..6).map(|k| GridPoint::new(k as f64, 0.0, 0.0)).collect();
        let heuristic = GridMesh::from_points(points.clone());
        assert_eq!(heuristic.face_count(), 0);

        let explicit = GridMesh::with_dimensions(points, 2, 3).unwrap();
        assert_eq!(explicit.face_count(), 2);
    }

    #[test]
    fn test_test_grid() {
        let mesh = GridMesh::test_grid(5, 5, 1.0);
        assert_eq!(mesh.vertex_count(), 25);
        assert_eq!(mesh.face_count(), 16);
        assert_eq!(mesh.point(6).unwrap().position, Point3d::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_z_range_and_normalize() {
        let mesh = GridMesh::from_points(grid_points(3, 3));
        assert_relative_eq!(mesh.z_range().min, 0.0);
        assert_relative_eq!(mesh.z_range().max, 4.0);
        assert_relative_eq!(mesh.normalize_z(2.0), 0.5);

        let flat = GridMesh::test_grid(2, 2, 1.0);
        assert_eq!(flat.normalize_z(0.0), 0.0);
    }

    #[test]
    fn test_face_normal_and_centroid() {
        let mesh = GridMesh::test_grid(2, 2, 1.0);
        let face = mesh.faces()[0];
        let normal = mesh.face_normal(&face).unwrap();
        assert_relative_eq!(normal, Vector3d::new(0.0, 0.0, 1.0));

        let centroid = mesh.face_centroid(&face).unwrap();
        assert_relative_eq!(centroid, Point3d::new(0.5, 0.5, 0.0));
    }

    #[test]
    fn test_degenerate_normal_falls_back_to_up() {
        let a = Point3d::new(0.0, 0.0, 0.0);
        let b = Point3d::new(1.0, 1.0, 1.0);
        let c = Point3d::new(2.0, 2.0, 2.0);
        assert_eq!(triangle_normal(&a, &b, &c), default_up());
    }

    #[test]
    fn test_face_points_out_of_bounds() {
        let mesh = GridMesh::test_grid(2, 2, 1.0);
        assert!(mesh.face_points(&[0, 1, 2, 99]).is_none());
        assert!(mesh.face_centroid(&[99, 1, 2, 3]).is_none());
    }

    #[test]
    fn test_vertex_normals() {
        let mut mesh = GridMesh::test_grid(3, 3, 1.0);
        mesh.compute_vertex_normals();
        for point in mesh.points() {
            assert_relative_eq!(point.normal.unwrap(), Vector3d::new(0.0, 0.0, 1.0));
        }
    }

    #[test]
    fn test_bounding_box() {
        let mesh = GridMesh::from_points(grid_points(2, 3));
        let (min, max) = mesh.bounding_box().unwrap();
        assert_relative_eq!(min, Point3d::new(0.0, 10.0, 0.0));
        assert_relative_eq!(max, Point3d::new(2.0, 12.5, 2.0));
    }
}
