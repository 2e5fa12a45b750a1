use std::fmt;

/// Errors that can occur while resolving media files.
#[derive(Debug)]
pub enum MediaError {
    /// Every candidate location was probed and none contained the file.
    /// Carries the original, unresolved filename so callers can name the
    /// missing asset in their own diagnostics.
    NotFound(String),
    /// The filename is unusable (empty).
    InvalidFilename(String),
    /// An IO error occurred while querying the environment.
    Io(std::io::Error),
}

impl fmt::Display for MediaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaError::NotFound(filename) => write!(f, "media file not found: {filename}"),
            MediaError::InvalidFilename(reason) => write!(f, "invalid media filename: {reason}"),
            MediaError::Io(err) => write!(f, "IO error: {err}"),
        }
    }
}

impl std::error::Error for MediaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MediaError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for MediaError {
    fn from(err: std::io::Error) -> Self {
        MediaError::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_file() {
        let err = MediaError::NotFound("fan_normal.png".to_string());
        assert_eq!(err.to_string(), "media file not found: fan_normal.png");
    }

    #[test]
    fn io_error_has_source() {
        let err = MediaError::from(std::io::Error::from(std::io::ErrorKind::PermissionDenied));
        assert!(std::error::Error::source(&err).is_some());
    }
}
