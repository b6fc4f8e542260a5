//! Error types for gridshade

use thiserror::Error;

/// Main error type for gridshade operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Invalid topology: {0}")]
    InvalidTopology(String),

    #[error("Invalid surface: {0}")]
    InvalidSurface(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Result type alias for gridshade operations
pub type Result<T> = std::result::Result<T, Error>;
