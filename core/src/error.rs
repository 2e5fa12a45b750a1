//! Core error types.

use std::fmt;
use std::path::PathBuf;

/// Errors raised while validating or decoding CPU-side asset data.
#[derive(Debug)]
pub enum CoreError {
    /// Mesh arrays are inconsistent (empty, mismatched lengths, index out of range).
    InvalidMeshData(String),
    /// Pixel data does not match the declared dimensions.
    InvalidImageData(String),
    /// An image file could not be decoded.
    ImageDecode { path: PathBuf, reason: String },
    /// An I/O error while reading a file.
    Io { path: PathBuf, source: std::io::Error },
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMeshData(msg) => write!(f, "invalid mesh data: {msg}"),
            Self::InvalidImageData(msg) => write!(f, "invalid image data: {msg}"),
            Self::ImageDecode { path, reason } => {
                write!(f, "failed to decode image {}: {reason}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "i/o error reading {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for CoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
