//! VC-1 picture (frame) layer header parsing (§6.2 progressive frame
//! headers for simple/main profile, spec §4.9).

use crate::bitplane::{decode_bitplane, BitPlaneMode};
use crate::error::Result;
use crate::sequence::SequenceHeader;
use serde::{Deserialize, Serialize};
use vparse_core::BitReader;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameType {
    I,
    P,
    B,
    Bi,
    Skipped,
}

/// Table 36: PQINDEX -> PQUANT, used whenever the sequence/entry point
/// selects implicit (non-uniform) quantizer signaling.
pub const QUANTIZER_TRANSLATION_TABLE: [u8; 32] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23,
    24, 25, 27, 29, 31,
];

/// Frame-type VLC, progressive-profile ordering (§7.1.1.4 Table 9, the row
/// used whenever dqprofile selects a B-frame-capable sequence).
const FRAME_TYPE_PROGRESSIVE: [FrameType; 8] = [
    FrameType::I,
    FrameType::I,
    FrameType::P,
    FrameType::P,
    FrameType::B,
    FrameType::B,
    FrameType::Bi,
    FrameType::Bi,
];

/// Simple/main profile frame-type VLC: PTYPE is a single flag (0 = P, 1 =
/// I) and B/BI/skipped are signaled separately via max_b_frames context, so
/// this table only covers the four codes actually emitted on the wire.
const FRAME_TYPE_SIMPLE: [FrameType; 5] = [
    FrameType::P,
    FrameType::B,
    FrameType::I,
    FrameType::Bi,
    FrameType::Skipped,
];

fn pquant_from_pqindex(pqindex: u8, quantizer_mode: u8) -> (u8, bool) {
    // quantizer_mode 0/1 (simple/main: 5-bit-uniform, implicit) mirrors
    // the original getRefDist/quantizer dispatch: implicit (mode 0) always
    // goes through the translation table; the other modes pass PQINDEX
    // through directly as PQUANT.
    if quantizer_mode == 0 {
        (QUANTIZER_TRANSLATION_TABLE[(pqindex & 0x1F) as usize], pqindex < 9)
    } else {
        (pqindex, false)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PictureHeader {
    pub frame_type: FrameType,
    pub pqindex: u8,
    pub pquant: u8,
    pub halfqp: bool,
    pub pquantizer_uniform: bool,
    pub mv_mode_intensity_compensation: bool,
    pub skip_mb_plane: Option<Vec<u8>>,
    pub skip_mb_mode: BitPlaneMode,
}

/// Parses a progressive simple/main-profile picture header. Interlace and
/// advanced-profile picture layers (field/frame coding mode selection,
/// range-reduction, BFRACTION) are out of scope: the driver (C14) treats
/// them as opaque accelerator payload past the fields decoded here, which
/// is enough to classify frame type and quantizer for reference management.
pub fn parse_picture_header(
    data: &[u8],
    seq_hdr: &SequenceHeader,
    mb_width: usize,
    mb_height: usize,
) -> Result<PictureHeader> {
    let mut br = BitReader::new(data);

    let frame_type = if seq_hdr.max_b_frames > 0 {
        let mut code = 0u32;
        let mut len = 0u8;
        loop {
            code = (code << 1) | br.read_bits(1)?;
            len += 1;
            if len == 1 && code == 0 {
                break FRAME_TYPE_PROGRESSIVE[0];
            }
            if len >= 2 {
                let idx = code as usize;
                if len == 2 && idx < 2 {
                    // need a 3rd bit to disambiguate the I/P pair
                    continue;
                }
                if len <= 3 {
                    break FRAME_TYPE_PROGRESSIVE[idx.min(7)];
                }
            }
            if len >= 8 {
                break FrameType::I;
            }
        }
    } else {
        let is_intra = br.read_flag()?;
        if is_intra {
            FRAME_TYPE_SIMPLE[2]
        } else {
            FRAME_TYPE_SIMPLE[0]
        }
    };

    if seq_hdr.rangered {
        let _range_red_frm = br.read_flag()?;
    }

    let pqindex = br.read_bits(5)? as u8;
    let (pquant, halfqp) = pquant_from_pqindex(pqindex, seq_hdr.quantizer);

    let pquantizer_uniform = if seq_hdr.quantizer == 1 {
        br.read_flag()?
    } else {
        false
    };

    let mv_mode_intensity_compensation = if frame_type == FrameType::P {
        br.read_flag()?
    } else {
        false
    };

    let (skip_mb_mode, skip_mb_plane) = if frame_type == FrameType::P || frame_type == FrameType::B {
        let (mode, plane) = decode_bitplane(&mut br, mb_width, mb_height)?;
        (mode, plane)
    } else {
        (BitPlaneMode::Raw, None)
    };

    Ok(PictureHeader {
        frame_type,
        pqindex,
        pquant,
        halfqp,
        pquantizer_uniform,
        mv_mode_intensity_compensation,
        skip_mb_plane,
        skip_mb_mode,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantizer_translation_table_low_index_is_identity() {
        assert_eq!(QUANTIZER_TRANSLATION_TABLE[0], 0);
        assert_eq!(QUANTIZER_TRANSLATION_TABLE[8], 8);
        assert_eq!(QUANTIZER_TRANSLATION_TABLE[31], 31);
    }

    #[test]
    fn test_simple_profile_intra_frame_type() {
        let seq = SequenceHeader {
            max_b_frames: 0,
            quantizer: 1,
            ..Default::default()
        };
        // is_intra=1, pqindex=00101, pquantizer_uniform=0
        let data = [0b1_00101_0_0];
        let hdr = parse_picture_header(&data, &seq, 1, 1).unwrap();
        assert_eq!(hdr.frame_type, FrameType::I);
        assert_eq!(hdr.pqindex, 5);
    }

    #[test]
    fn test_simple_profile_inter_frame_type() {
        let seq = SequenceHeader {
            max_b_frames: 0,
            quantizer: 0,
            ..Default::default()
        };
        // is_intra=0, pqindex=01000, mv_mode_intensity_compensation bit,
        // then a raw skip-mb bitplane (invert=0, imode Raw=0001).
        let data = [0b0_01000_0_0, 0b0010_0000];
        let hdr = parse_picture_header(&data, &seq, 2, 2).unwrap();
        assert_eq!(hdr.frame_type, FrameType::P);
    }
}
