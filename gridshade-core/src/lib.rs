//! Core data structures for gridshade
//!
//! This crate provides the fundamental types for height-field rendering:
//! grid points, the grid mesh and its derived topology, color ramps,
//! model transforms and the shared error type.

pub mod point;
pub mod mesh;
pub mod color;
pub mod transform;
pub mod error;

pub use point::*;
pub use mesh::*;
pub use color::*;
pub use transform::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point2, Point3, Vector3, Matrix4};
