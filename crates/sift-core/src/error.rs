//! Error types for sift.

use thiserror::Error;

/// Result type alias using sift's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for sift operations.
///
/// Query rewriting itself never fails; these errors come from the edges:
/// scanning for display, result shaping, and loading CLI input files.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Query could not be scanned
    #[error("Scan error: {0}")]
    Scan(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_invalid_input() {
        let err = Error::InvalidInput("bad timestamp".to_string());
        assert_eq!(err.to_string(), "Invalid input: bad timestamp");
    }

    #[test]
    fn test_error_display_scan() {
        let err = Error::Scan("unterminated quote at byte 5".to_string());
        assert_eq!(err.to_string(), "Scan error: unterminated quote at byte 5");
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number").unwrap_err();
        let err: Error = json_err.into();
        match err {
            Error::Serialization(msg) => assert!(!msg.is_empty()),
            _ => panic!("Expected Serialization error"),
        }
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("I/O error:"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }
}
