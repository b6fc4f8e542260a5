//! Point source I/O for gridshade
//!
//! Height fields arrive as plain-text point lists: one whitespace-separated
//! `x y z` triple per line. Malformed lines are skipped and reported rather
//! than failing the whole load.

pub mod xyz;

pub use xyz::{PointLoad, SkippedLine, XyzReader, XyzWriter};

use gridshade_core::{Error, GridPoint, Result};
use std::path::Path;

/// Trait for reading height samples from files
pub trait PointReader {
    /// Read all valid points from the given path
    fn read_points(&self, path: &Path) -> Result<PointLoad>;

    /// Check if this reader handles the given file, judged by its extension
    fn can_read(&self, path: &Path) -> bool;

    /// Get the format name this reader handles
    fn format_name(&self) -> &'static str;
}

/// Trait for writing height samples to files
pub trait PointWriter {
    /// Write the points to the given path
    fn write_points(&self, points: &[GridPoint], path: &Path) -> Result<()>;

    /// Get the format name this writer handles
    fn format_name(&self) -> &'static str;
}

/// Read points from a file.
///
/// Every point source is an `x y z` list, so files with an unrecognised
/// extension are read with [`XyzReader`] too.
pub fn read_points<P: AsRef<Path>>(path: P) -> Result<PointLoad> {
    let path = path.as_ref();
    let reader = XyzReader;
    if !reader.can_read(path) {
        log::debug!("reading {} as an xyz point list", path.display());
    }
    PointReader::read_points(&reader, path)
}

/// Auto-detect format and write points
pub fn write_points<P: AsRef<Path>>(points: &[GridPoint], path: P) -> Result<()> {
    let path = path.as_ref();
    if XyzReader.can_read(path) {
        PointWriter::write_points(&XyzWriter, points, path)
    } else {
        Err(Error::UnsupportedFormat(format!(
            "Unsupported point format: {:?}",
            path.extension()
        )))
    }
}
