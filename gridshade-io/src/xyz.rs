//! XYZ point list support
//!
//! The format is one point per line, three whitespace-separated floating
//! point fields `x y z`. Blank lines are ignored. A line with the wrong
//! number of fields or a non-numeric field is skipped with a warning; the
//! load continues with the next line.

use gridshade_core::{GridPoint, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// A line that was not turned into a point
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedLine {
    /// 1-based line number
    pub line_number: usize,
    pub content: String,
    pub reason: String,
}

/// Result of a partial-success load
#[derive(Debug, Clone, Default)]
pub struct PointLoad {
    pub points: Vec<GridPoint>,
    pub skipped: Vec<SkippedLine>,
}

impl PointLoad {
    /// Check if every non-blank line parsed
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// XYZ reader implementation
pub struct XyzReader;

impl XyzReader {
    /// Read points from an XYZ file
    pub fn read_points<P: AsRef<Path>>(path: P) -> Result<PointLoad> {
        let file = File::open(path.as_ref())?;
        let load = Self::read_from(BufReader::new(file))?;
        log::info!(
            "loaded {} points from {} ({} lines skipped)",
            load.points.len(),
            path.as_ref().display(),
            load.skipped.len()
        );
        Ok(load)
    }

    /// Read points from any buffered source.
    ///
    /// Only failures of the underlying reader abort the load; a line that is
    /// not valid UTF-8 is skipped like any other malformed line.
    pub fn read_from<R: BufRead>(mut reader: R) -> Result<PointLoad> {
        let mut load = PointLoad::default();
        let mut buffer = Vec::new();
        let mut line_number = 0;

        loop {
            buffer.clear();
            if reader.read_until(b'\n', &mut buffer)? == 0 {
                break;
            }
            line_number += 1;

            let parsed = match std::str::from_utf8(&buffer) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    Self::parse_line(trimmed).map_err(|reason| (trimmed.to_string(), reason))
                }
                Err(_) => Err((
                    String::from_utf8_lossy(&buffer).trim().to_string(),
                    "line is not valid UTF-8".to_string(),
                )),
            };

            match parsed {
                Ok(point) => load.points.push(point),
                Err((content, reason)) => {
                    log::warn!("skipping line {}: {} ({:?})", line_number, reason, content);
                    load.skipped.push(SkippedLine {
                        line_number,
                        content,
                        reason,
                    });
                }
            }
        }

        Ok(load)
    }

    /// Parse a single `x y z` line
    fn parse_line(line: &str) -> std::result::Result<GridPoint, String> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() != 3 {
            return Err(format!("expected 3 fields, found {}", parts.len()));
        }

        let mut coords = [0.0f64; 3];
        for (coord, (part, name)) in coords.iter_mut().zip(parts.iter().zip(["x", "y", "z"])) {
            *coord = part
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or_else(|| format!("invalid {} coordinate {:?}", name, part))?;
        }

        Ok(GridPoint::new(coords[0], coords[1], coords[2]))
    }
}

impl crate::PointReader for XyzReader {
    fn read_points(&self, path: &Path) -> Result<PointLoad> {
        Self::read_points(path)
    }

    fn can_read(&self, path: &Path) -> bool {
        if let Some(ext) = path.extension().and_then(|s| s.to_str()) {
            matches!(ext.to_lowercase().as_str(), "xyz" | "txt" | "asc")
        } else {
            false
        }
    }

    fn format_name(&self) -> &'static str {
        "xyz"
    }
}

/// XYZ writer implementation
pub struct XyzWriter;

impl XyzWriter {
    /// Write points to an XYZ file
    pub fn write_points<P: AsRef<Path>>(points: &[GridPoint], path: P) -> Result<()> {
        let file = File::create(path)?;
        Self::write_to(points, BufWriter::new(file))
    }

    /// Write points to any sink, one `x y z` line per point
    pub fn write_to<W: Write>(points: &[GridPoint], mut writer: W) -> Result<()> {
        for point in points {
            let p = &point.position;
            writeln!(writer, "{} {} {}", p.x, p.y, p.z)?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl crate::PointWriter for XyzWriter {
    fn write_points(&self, points: &[GridPoint], path: &Path) -> Result<()> {
        Self::write_points(points, path)
    }

    fn format_name(&self) -> &'static str {
        "xyz"
    }
}
