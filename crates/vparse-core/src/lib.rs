//! Shared bit/boolean readers, error kinds, and codec-neutral descriptors
//! used by every per-codec parser crate in the workspace.

pub mod bitreader;
pub mod boolean;
pub mod descriptors;
pub mod error;
pub mod paramset;

pub use bitreader::{remove_emulation_prevention_bytes, BitReader, LsbBitReader};
pub use boolean::BoolDecoder;
pub use descriptors::{PicOrderCnt, PictureStructure, ReferenceMark, ScalingMatrix};
pub use error::{CoreError, Result};
pub use paramset::ParamSetTable;
