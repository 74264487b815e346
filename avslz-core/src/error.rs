//! Error types for AVS-LZ operations.
//!
//! The stream adapters in the `avslz` crate implement `std::io::Read` and
//! `std::io::Write`, so they report failures as [`io::Error`]. This module
//! provides the richer error type used by the one-shot helpers and by
//! configuration validation, together with the conversions between the two.

use std::io;
use thiserror::Error;

/// The main error type for AVS-LZ operations.
#[derive(Debug, Error)]
pub enum AvsLzError {
    /// I/O error from the underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The compressed stream ended before the end-of-stream marker.
    #[error("Truncated stream: input ended at offset {offset} before the end marker")]
    UnexpectedEof {
        /// Number of compressed bytes consumed when the input ran out.
        offset: u64,
    },

    /// Structural parameters that cannot describe a valid stream.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the inconsistency.
        message: String,
    },
}

/// Result type alias for AVS-LZ operations.
pub type Result<T> = std::result::Result<T, AvsLzError>;

impl AvsLzError {
    /// Create a truncated stream error.
    pub fn unexpected_eof(offset: u64) -> Self {
        Self::UnexpectedEof { offset }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Recover a structured error from an `io::Error` produced by a stream
    /// adapter.
    ///
    /// Truncation is reported through `ErrorKind::UnexpectedEof`; `offset` is
    /// the number of compressed bytes the adapter had consumed at that point.
    pub fn from_io(err: io::Error, offset: u64) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Self::unexpected_eof(offset)
        } else {
            Self::Io(err)
        }
    }
}

impl From<AvsLzError> for io::Error {
    fn from(err: AvsLzError) -> Self {
        match err {
            AvsLzError::Io(e) => e,
            AvsLzError::UnexpectedEof { .. } => io::Error::new(io::ErrorKind::UnexpectedEof, err),
            AvsLzError::InvalidConfig { .. } => io::Error::new(io::ErrorKind::InvalidInput, err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AvsLzError::unexpected_eof(42);
        assert!(err.to_string().contains("offset 42"));

        let err = AvsLzError::invalid_config("window too large");
        assert!(err.to_string().contains("window too large"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: AvsLzError = io_err.into();
        assert!(matches!(err, AvsLzError::Io(_)));
    }

    #[test]
    fn test_into_io_error_kinds() {
        let err: io::Error = AvsLzError::unexpected_eof(3).into();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);

        let err: io::Error = AvsLzError::invalid_config("bad").into();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);

        let err: io::Error = AvsLzError::Io(io::Error::other("sink closed")).into();
        assert_eq!(err.kind(), io::ErrorKind::Other);
    }

    #[test]
    fn test_from_io_truncation() {
        let err = AvsLzError::from_io(io::Error::from(io::ErrorKind::UnexpectedEof), 17);
        assert!(matches!(err, AvsLzError::UnexpectedEof { offset: 17 }));

        let err = AvsLzError::from_io(io::Error::from(io::ErrorKind::BrokenPipe), 17);
        assert!(matches!(err, AvsLzError::Io(_)));
    }
}
