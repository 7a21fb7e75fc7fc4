//! Codec-neutral value types shared across the per-codec parser crates.

use serde::{Deserialize, Serialize};

/// A square scaling (quantization) matrix of side `SIZE`, stored in
/// zig-zag/up-right-diagonal scan order as read from the bitstream (H.264
/// 4x4/8x8, H.265 4x4/8x8/16x16/32x32).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalingMatrix<const SIZE: usize> {
    pub coefficients: [u8; SIZE],
    /// DC coefficient override, used by H.265 16x16/32x32 matrices only.
    pub dc_value: Option<u8>,
}

impl<const SIZE: usize> ScalingMatrix<SIZE> {
    pub fn flat(value: u8) -> Self {
        Self {
            coefficients: [value; SIZE],
            dc_value: None,
        }
    }
}

/// Picture structure for a coded picture (frame vs. one field of a field pair).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PictureStructure {
    Frame,
    TopField,
    BottomField,
}

/// Reference-picture marking state shared by DPB-style reference management.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferenceMark {
    NotUsed,
    ShortTerm,
    LongTerm,
}

/// Picture order count, used by H.264/H.265 to order pictures for output and
/// reference-list construction independent of decoding order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PicOrderCnt(pub i32);
