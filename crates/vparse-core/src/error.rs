//! Error kinds shared by every codec parser in the workspace.

use thiserror::Error;

/// Core error type returned by the bit/boolean readers and reused by every
/// per-codec error enum via `#[from]`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("short read: needed {needed} more bits at bit offset {offset}")]
    ShortRead { offset: u64, needed: u64 },

    #[error("value out of range at bit offset {offset}: {message}")]
    OutOfRange { offset: u64, message: String },

    #[error("invalid data at bit offset {offset}: {message}")]
    InvalidData { offset: u64, message: String },
}

pub type Result<T> = std::result::Result<T, CoreError>;
