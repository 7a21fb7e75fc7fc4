//! JPEG parser error types.

use thiserror::Error;
use vparse_core::CoreError;

pub type Result<T> = std::result::Result<T, JpegError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JpegError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("invalid data at offset {offset}: {message}")]
    InvalidData { offset: usize, message: String },

    #[error("unsupported marker: {0}")]
    Unsupported(String),

    #[error("duplicate {0} marker")]
    Duplicate(&'static str),
}
