//! VP9 parser error types.

use thiserror::Error;

/// Result type for VP9 parsing operations.
pub type Result<T> = std::result::Result<T, Vp9Error>;

/// VP9 parsing errors.
#[derive(Error, Debug)]
pub enum Vp9Error {
    /// Unexpected end of data.
    #[error("Unexpected end of data at position {0}")]
    UnexpectedEof(u64),

    /// Invalid data encountered.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Insufficient data for operation.
    #[error("Insufficient data: expected {expected} bytes, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// Parse error at specific offset.
    #[error("Parse error at offset {offset}: {message}")]
    Parse { offset: u64, message: String },

    /// A recognized but unimplemented feature (e.g. 12-bit colour depth).
    #[error("Unsupported: {0}")]
    Unsupported(String),
}
