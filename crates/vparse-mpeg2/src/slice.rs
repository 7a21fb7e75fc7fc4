//! MPEG-2 Video slice header parsing.

use crate::bitreader::BitReader;
use crate::error::Result;
use crate::mb_vlc::read_macroblock_address_increment;
use serde::{Deserialize, Serialize};

/// Non-linear quantiser scale lookup table (Table 7-6).
const NON_LINEAR_QSCALE: [u8; 32] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 10, 12, 14, 16, 18, 20, 22, 24, 28, 32, 36, 40, 44, 48, 52, 56, 64,
    72, 80, 88, 96, 104, 112,
];

/// Slice header (§6.2.4), plus the derived first-macroblock column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SliceHeader {
    /// Macroblock row, 0-based: `start_code_value - 1`, or folded with
    /// `slice_vertical_position_extension` when `vertical_size > 2800`.
    pub macroblock_row: u32,
    /// slice_vertical_position_extension (3 bits), present only when the
    /// encoded vertical size exceeds 2800.
    pub slice_vertical_position_extension: Option<u8>,
    /// priority_breakpoint (sequence_scalable_extension data-partitioning only)
    pub priority_breakpoint: Option<u8>,
    /// quantiser_scale_code (5 bits)
    pub quantiser_scale_code: u8,
    /// intra_slice_flag
    pub intra_slice_flag: bool,
    /// intra_slice
    pub intra_slice: bool,
    /// reserved_bits (7 bits)
    pub reserved_bits: u8,
    /// extra_bit_slice count
    pub extra_information_count: u32,
    /// First macroblock column in the slice, from the macroblock-address-
    /// increment VLC scan (§6.2.5.1, Table B-1).
    pub first_mb_column: u32,
}

impl SliceHeader {
    /// Get quantiser scale value based on q_scale_type.
    pub fn quantiser_scale(&self, q_scale_type: bool) -> u8 {
        if !q_scale_type {
            self.quantiser_scale_code * 2
        } else {
            NON_LINEAR_QSCALE[self.quantiser_scale_code as usize]
        }
    }
}

/// Parse a slice header from the data after a slice start code.
///
/// `start_code_value` is the byte following `0x000001` (1..=0xAF);
/// `vertical_size` is the encoded vertical size from the active sequence
/// header/extension, needed to decide whether a 3-bit row extension is read.
pub fn parse_slice_header(
    data: &[u8],
    start_code_value: u8,
    vertical_size: u32,
) -> Result<SliceHeader> {
    let mut reader = BitReader::new(data);

    let base_row = (start_code_value.saturating_sub(1)) as u32;

    let slice_vertical_position_extension = if vertical_size > 2800 {
        Some(reader.read_bits(3)? as u8)
    } else {
        None
    };
    let macroblock_row = match slice_vertical_position_extension {
        Some(ext) => base_row + (ext as u32) * 128,
        None => base_row,
    };

    // priority_breakpoint only appears under sequence_scalable_extension
    // data-partitioning mode; the driver supplies that context separately,
    // so this field is populated by a higher layer and left absent here.
    let priority_breakpoint = None;

    let quantiser_scale_code = reader.read_bits(5)? as u8;

    let mut intra_slice_flag = false;
    let mut intra_slice = false;
    let mut reserved_bits = 0u8;

    if reader.peek_bits(1)? == 1 {
        intra_slice_flag = reader.read_flag()?;
        intra_slice = reader.read_flag()?;
        reserved_bits = reader.read_bits(7)? as u8;
    }

    const MAX_SLICE_EXTRA_COUNT: u32 = 1000;
    let mut extra_information_count = 0;
    while extra_information_count < MAX_SLICE_EXTRA_COUNT && reader.has_more_data() {
        if let Ok(extra_bit) = reader.read_flag() {
            if extra_bit {
                let _ = reader.read_bits(8)?;
                extra_information_count += 1;
            } else {
                break;
            }
        } else {
            break;
        }
    }

    let first_mb_column = if reader.has_more_data() {
        read_macroblock_address_increment(&mut reader).unwrap_or(1) - 1
    } else {
        0
    };

    Ok(SliceHeader {
        macroblock_row,
        slice_vertical_position_extension,
        priority_breakpoint,
        quantiser_scale_code,
        intra_slice_flag,
        intra_slice,
        reserved_bits,
        extra_information_count,
        first_mb_column,
    })
}
