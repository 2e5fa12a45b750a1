//! Graphics error types.

use std::fmt;

use whirligig_core::error::CoreError;
use whirligig_media::MediaError;

/// Errors that can occur in the graphics system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphicsError {
    /// Failed to initialize the graphics system.
    InitializationFailed(String),
    /// Failed to create a resource.
    ResourceCreationFailed(String),
    /// An invalid parameter was provided.
    InvalidParameter(String),
    /// A media file referenced by name could not be located.
    ///
    /// Carries the original (unresolved) filename so callers can report
    /// which asset is missing.
    MediaNotFound(String),
    /// The requested backend is not compiled in or cannot start.
    BackendUnavailable(String),
}

impl fmt::Display for GraphicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InitializationFailed(msg) => write!(f, "initialization failed: {msg}"),
            Self::ResourceCreationFailed(msg) => write!(f, "resource creation failed: {msg}"),
            Self::InvalidParameter(msg) => write!(f, "invalid parameter: {msg}"),
            Self::MediaNotFound(filename) => write!(f, "media file not found: {filename}"),
            Self::BackendUnavailable(msg) => write!(f, "backend not available: {msg}"),
        }
    }
}

impl std::error::Error for GraphicsError {}

impl From<MediaError> for GraphicsError {
    fn from(err: MediaError) -> Self {
        match err {
            MediaError::NotFound(filename) => Self::MediaNotFound(filename),
            MediaError::InvalidFilename(reason) => Self::InvalidParameter(reason),
            MediaError::Io(err) => Self::ResourceCreationFailed(err.to_string()),
        }
    }
}

impl From<CoreError> for GraphicsError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidMeshData(msg) | CoreError::InvalidImageData(msg) => {
                Self::InvalidParameter(msg)
            }
            decode @ (CoreError::ImageDecode { .. } | CoreError::Io { .. }) => {
                Self::ResourceCreationFailed(decode.to_string())
            }
        }
    }
}
