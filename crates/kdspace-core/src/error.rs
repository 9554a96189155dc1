//! Error types for kdspace-core
//!
//! Index queries themselves never fail. Errors come from:
//! - Constructing points or rectangles from invalid coordinates
//! - Parsing point files
//! - Reading point files from disk

use thiserror::Error;

/// Main error type for kdspace operations
#[derive(Error, Debug)]
pub enum SpatialError {
    /// A point or rectangle could not be formed from the given values
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Malformed point file
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for kdspace operations
pub type SpatialResult<T> = Result<T, SpatialError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_display() {
        let err = SpatialError::InvalidArgument("x is NaN".to_string());
        assert_eq!(err.to_string(), "Invalid argument: x is NaN");
    }

    #[test]
    fn test_parse_error_display() {
        let err = SpatialError::Parse {
            line: 7,
            message: "expected a number".to_string(),
        };
        assert!(err.to_string().contains("line 7"));
        assert!(err.to_string().contains("expected a number"));
    }

    #[test]
    fn test_io_error_from() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: SpatialError = io.into();
        assert!(matches!(err, SpatialError::Io(_)));
    }
}
