//! VP8 parser error types.

use thiserror::Error;
use vparse_core::CoreError;

pub type Result<T> = std::result::Result<T, Vp8Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Vp8Error {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("invalid data: {0}")]
    InvalidData(String),

    /// An inter frame arrived before any key frame was observed (§4.7, §8).
    #[error("inter frame arrived before any key frame")]
    MissingKeyframe,
}
