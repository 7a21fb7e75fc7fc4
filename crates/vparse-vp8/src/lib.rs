//! VP8 bitstream parser for vparse.
//!
//! Parses the uncompressed chunk and compressed first-partition header of
//! a VP8 frame (component C8, spec §4.7), carrying entropy/quantization
//! state and reference-frame roles across frames the way the driver (C14)
//! needs for an accelerator submission.
//!
//! # Example
//!
//! ```ignore
//! use vparse_vp8::Vp8Parser;
//!
//! let mut parser = Vp8Parser::new();
//! let frame = parser.decode(&data, 0)?;
//! ```

pub mod error;
pub mod frame_header;
pub mod frames;

pub use error::{Result, Vp8Error};
pub use frame_header::{
    CompressedHeader, EntropyHeader, FrameKind, LoopFilterHeader, QuantizationHeader,
    SegmentationHeader, UncompressedHeader,
};
pub use frames::{ReferenceSlots, ReferenceState};

use frame_header::{parse_compressed_header, parse_uncompressed_header};
use serde::{Deserialize, Serialize};
use vparse_core::BoolDecoder;

/// A fully parsed VP8 frame: uncompressed header, compressed header, and
/// the caller-supplied timestamp threaded through unchanged (§3
/// "Timestamp").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vp8Frame {
    pub uncompressed_header: UncompressedHeader,
    pub compressed_header: CompressedHeader,
    pub timestamp: i64,
    /// Byte offset of the first DCT partition (after the first partition's
    /// compressed header).
    pub picture_index: usize,
}

/// Per-stream VP8 parser state: entropy probabilities and reference roles
/// carried from frame to frame (§4.7 "State carry").
#[derive(Debug, Clone, Default)]
pub struct Vp8Parser {
    entropy: EntropyHeader,
    reference_state: ReferenceState,
    frame_count: usize,
    current_width: Option<u16>,
    current_height: Option<u16>,
}

impl Vp8Parser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reference_slots(&self) -> ReferenceSlots {
        self.reference_state.slots
    }

    /// Parses one VP8 frame (the driver treats each input buffer as one
    /// frame, §4.13). On success, advances entropy and reference state for
    /// the next call.
    pub fn decode(&mut self, data: &[u8], timestamp: i64) -> Result<Vp8Frame> {
        let uncompressed_header = parse_uncompressed_header(data)?;

        if uncompressed_header.frame_kind == FrameKind::Inter && !self.reference_state.seen_keyframe {
            return Err(Vp8Error::MissingKeyframe);
        }

        let first_partition = &data[uncompressed_header.first_part_offset..];
        let mut decoder = BoolDecoder::new(first_partition)?;
        let compressed_header =
            parse_compressed_header(&mut decoder, uncompressed_header.frame_kind, &self.entropy)?;

        if compressed_header.refresh_entropy_probs {
            self.entropy = compressed_header.entropy_hdr.clone();
        }

        if let Some(w) = uncompressed_header.width {
            self.current_width = Some(w);
        }
        if let Some(h) = uncompressed_header.height {
            self.current_height = Some(h);
        }

        let picture_index = self.frame_count;
        self.reference_state
            .advance(uncompressed_header.frame_kind, &compressed_header, picture_index)?;
        self.frame_count += 1;

        Ok(Vp8Frame {
            uncompressed_header,
            compressed_header,
            timestamp,
            picture_index,
        })
    }

    pub fn current_dimensions(&self) -> Option<(u16, u16)> {
        match (self.current_width, self.current_height) {
            (Some(w), Some(h)) => Some((w, h)),
            _ => None,
        }
    }

    /// Discards all carried state (§6 `reset`).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
