//! Error kinds for reference-picture management.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DpbError {
    #[error("DPB overflow: no picture could be bumped to make room (capacity {capacity})")]
    BufferOverflow { capacity: usize },

    #[error("slot index {index} out of range for a {capacity}-slot table")]
    SlotOutOfRange { index: usize, capacity: usize },
}

pub type Result<T> = std::result::Result<T, DpbError>;
