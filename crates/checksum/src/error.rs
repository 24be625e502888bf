//! Error types for the checksum crate.

use thiserror::Error;

/// Result type alias for checksum operations.
pub type Result<T> = std::result::Result<T, ChecksumError>;

/// Errors that can occur while computing a checksum.
///
/// Request checksums never fail; only the callback digest, which consumes its
/// payload as a byte stream, has a failure path.
#[derive(Debug, Error)]
pub enum ChecksumError {
    /// The payload could not be fed into the hash
    #[error("Encoding error: {0}")]
    Encoding(String),
}

impl From<std::io::Error> for ChecksumError {
    fn from(err: std::io::Error) -> Self {
        Self::Encoding(err.to_string())
    }
}
