//! VC-1 parser error types.

use thiserror::Error;
use vparse_core::CoreError;

pub type Result<T> = std::result::Result<T, Vc1Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Vc1Error {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("unsupported: {0}")]
    Unsupported(String),
}
