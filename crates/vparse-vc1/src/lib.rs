//! VC-1 bitstream parser for vparse.
//!
//! Covers Annex-E byte-stream-format VC-1 (component C9, spec §4.9):
//! start-code scanning, EBDU/RBDU conversion, sequence/entry-point headers
//! for simple, main and advanced profile, bit-plane decoding, and a
//! progressive-profile picture-layer parse sufficient to classify frame
//! type and reference roles for an accelerator submission.
//!
//! # Example
//!
//! ```ignore
//! use vparse_vc1::Vc1Parser;
//!
//! let mut parser = Vc1Parser::new();
//! parser.parse_codec_data(&codec_data)?;
//! let frame = parser.decode(&frame_data, 0)?;
//! ```

pub mod bitplane;
pub mod codec_data;
pub mod entrypoint;
pub mod error;
pub mod picture;
pub mod sequence;

pub use bitplane::BitPlaneMode;
pub use codec_data::{convert_to_rbdu, search_start_code, StartCode};
pub use entrypoint::EntryPointHeader;
pub use error::{Result, Vc1Error};
pub use picture::{FrameType, PictureHeader};
pub use sequence::{Profile, SequenceHeader};

use entrypoint::parse_entry_point_header;
use picture::parse_picture_header;
use sequence::parse_sequence_header;
use serde::{Deserialize, Serialize};

/// A parsed VC-1 frame: its picture header plus the caller-supplied
/// timestamp threaded through unchanged (§3 "Timestamp").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vc1Frame {
    pub picture_header: PictureHeader,
    pub timestamp: i64,
}

/// Per-stream VC-1 parser state. Advanced-profile streams carry a
/// sequence header and (optionally several) entry-point headers before any
/// frame data; simple/main-profile streams carry only the sequence header,
/// re-sent at the head of the codec-data blob handed to the driver.
#[derive(Debug, Clone, Default)]
pub struct Vc1Parser {
    sequence_header: Option<SequenceHeader>,
    entry_point_header: Option<EntryPointHeader>,
    frame_count: usize,
}

impl Vc1Parser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sequence_header(&self) -> Option<&SequenceHeader> {
        self.sequence_header.as_ref()
    }

    pub fn entry_point_header(&self) -> Option<&EntryPointHeader> {
        self.entry_point_header.as_ref()
    }

    /// Parses out-of-band codec data (the `AVCDecoderConfigurationRecord`
    /// analogue for VC-1): a raw STRUCT_C sequence header for simple/main
    /// profile, or one or more start-code-prefixed sequence/entry-point
    /// units for advanced profile.
    pub fn parse_codec_data(&mut self, data: &[u8]) -> Result<()> {
        if let Some((offset, _code)) = search_start_code(data, 0) {
            let mut pos = offset;
            while let Some((start, code)) = search_start_code(data, pos) {
                let unit_start = start + 4;
                let unit_end = search_start_code(data, unit_start)
                    .map(|(next, _)| next)
                    .unwrap_or(data.len());
                let rbdu = convert_to_rbdu(&data[unit_start..unit_end]);
                match code {
                    StartCode::SequenceHeader => {
                        self.sequence_header = Some(parse_sequence_header(&rbdu)?);
                    }
                    StartCode::EntryPoint => {
                        let seq = self
                            .sequence_header
                            .as_mut()
                            .ok_or_else(|| Vc1Error::InvalidData("entry point before sequence header".into()))?;
                        self.entry_point_header = Some(parse_entry_point_header(&rbdu, seq)?);
                    }
                    _ => {}
                }
                pos = unit_end;
            }
        } else {
            let rbdu = convert_to_rbdu(data);
            self.sequence_header = Some(parse_sequence_header(&rbdu)?);
        }
        Ok(())
    }

    fn mb_dimensions(&self) -> Result<(usize, usize)> {
        let seq = self
            .sequence_header
            .as_ref()
            .ok_or_else(|| Vc1Error::InvalidData("no sequence header parsed yet".into()))?;
        let (width, height) = (seq.coded_width, seq.coded_height);
        if width == 0 || height == 0 {
            return Err(Vc1Error::InvalidData("sequence header carries no dimensions".into()));
        }
        Ok((
            (width as usize).div_ceil(16),
            (height as usize).div_ceil(16),
        ))
    }

    /// Decodes one frame-layer unit. For advanced profile the caller must
    /// pass the payload following the `FRM` start code; for simple/main
    /// profile the caller passes the raw frame buffer directly (there are
    /// no start codes in that byte-stream variant).
    pub fn decode(&mut self, data: &[u8], timestamp: i64) -> Result<Vc1Frame> {
        let seq = self
            .sequence_header
            .as_ref()
            .ok_or_else(|| Vc1Error::InvalidData("no sequence header parsed yet".into()))?
            .clone();
        let (mb_width, mb_height) = self.mb_dimensions()?;
        let rbdu = convert_to_rbdu(data);
        let picture_header = parse_picture_header(&rbdu, &seq, mb_width, mb_height)?;
        self.frame_count += 1;
        Ok(Vc1Frame {
            picture_header,
            timestamp,
        })
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Discards all carried state (§6 `reset`).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
