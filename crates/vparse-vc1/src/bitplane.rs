//! VC-1 bit-plane decoding (component C10, spec §4.9).
//!
//! A bit plane carries one flag per macroblock (skip, direct, field-tx,
//! ac-pred, ...) encoded in one of seven compact modes. `Raw` leaves the
//! plane to be read one bit per macroblock by the caller; the other six
//! modes are fully decoded here into a `width * height` byte grid, one
//! entry per macroblock, 0 or 1.

use crate::error::{Result, Vc1Error};
use serde::{Deserialize, Serialize};
use vparse_core::BitReader;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BitPlaneMode {
    Norm2,
    Norm6,
    RowSkip,
    ColSkip,
    Diff2,
    Diff6,
    Raw,
}

/// `(code, length)` entries of a canonical VLC table, matched MSB-first by
/// trying successive code lengths.
#[derive(Debug, Clone, Copy)]
struct VlcEntry {
    code: u32,
    len: u8,
}

/// Table 69: IMODE VLC code table (7 entries, selects the bit-plane mode).
const IMODE_VLC: [VlcEntry; 7] = [
    VlcEntry { code: 0b10, len: 2 },
    VlcEntry { code: 0b11, len: 2 },
    VlcEntry { code: 0b010, len: 3 },
    VlcEntry { code: 0b011, len: 3 },
    VlcEntry { code: 0b001, len: 3 },
    VlcEntry { code: 0b0001, len: 4 },
    VlcEntry { code: 0b0000, len: 4 },
];

const IMODE_ORDER: [BitPlaneMode; 7] = [
    BitPlaneMode::Norm2,
    BitPlaneMode::Norm6,
    BitPlaneMode::RowSkip,
    BitPlaneMode::ColSkip,
    BitPlaneMode::Diff2,
    BitPlaneMode::Diff6,
    BitPlaneMode::Raw,
];

/// Decodes a single VLC symbol by reading one bit at a time and matching
/// against `table`'s `(code, len)` entries, shortest codes first.
fn decode_vlc(br: &mut BitReader, table: &[VlcEntry]) -> Result<usize> {
    let mut code: u32 = 0;
    let mut len: u8 = 0;
    loop {
        code = (code << 1) | br.read_bit()? as u32;
        len += 1;
        if let Some(idx) = table
            .iter()
            .position(|e| e.len == len && e.code == code)
        {
            return Ok(idx);
        }
        if len > 16 {
            return Err(Vc1Error::InvalidData("VLC code not found in table".to_string()));
        }
    }
}

fn read_imode(br: &mut BitReader) -> Result<BitPlaneMode> {
    let idx = decode_vlc(br, &IMODE_VLC)?;
    Ok(IMODE_ORDER[idx])
}

/// Table 81 codes for 3x2/2x3 tiles used by Norm-6 mode, built inline so
/// the (code, length) pairs stay adjacent to the bit patterns from the
/// VC-1 specification rather than needing a lookup elsewhere.
fn norm6_table() -> Vec<VlcEntry> {
    // (value, code, length) condensed from Table 81; only (code, length)
    // matter for matching, `decode_vlc` returns the table index, which is
    // the 6-bit tile pattern directly.
    const RAW: [(u32, u8); 64] = [
        (1, 1),
        (2, 4), (3, 4), (0, 8), (4, 4), (1, 8), (2, 8), ((2 << 5) | 7, 10),
        (5, 4), (3, 8), (4, 8), ((2 << 5) | 11, 10), (5, 8), ((2 << 5) | 13, 10), ((2 << 5) | 14, 10), ((3 << 8) | 14, 13),
        (6, 4), (6, 8), (7, 8), ((2 << 5) | 19, 10), (8, 8), ((2 << 5) | 21, 10), ((2 << 5) | 22, 10), ((3 << 8) | 13, 13),
        (9, 8), ((2 << 5) | 25, 10), ((2 << 5) | 26, 10), ((3 << 8) | 12, 13), ((2 << 5) | 28, 10), ((3 << 8) | 11, 13), ((3 << 8) | 10, 13), ((3 << 4) | 7, 9),
        (7, 4), (10, 8), (11, 8), ((2 << 5) | 3, 10), (12, 8), ((2 << 5) | 5, 10), ((2 << 5) | 6, 10), ((3 << 8) | 9, 13),
        (13, 8), ((2 << 5) | 9, 10), ((2 << 5) | 10, 10), ((3 << 8) | 8, 13), ((2 << 5) | 12, 10), ((3 << 8) | 7, 13), ((3 << 8) | 6, 13), ((3 << 4) | 6, 9),
        (14, 8), ((2 << 5) | 17, 10), ((2 << 5) | 18, 10), ((3 << 8) | 5, 13), ((2 << 5) | 20, 10), ((3 << 8) | 4, 13), ((3 << 8) | 3, 13), ((3 << 4) | 5, 9),
        ((2 << 5) | 24, 10), ((3 << 8) | 2, 13), ((3 << 8) | 1, 13), ((3 << 4) | 4, 9), ((3 << 8) | 0, 13), ((3 << 4) | 3, 9), ((3 << 4) | 2, 9), ((3 << 1) | 1, 6),
    ];
    RAW.iter().map(|&(code, len)| VlcEntry { code, len }).collect()
}

/// 8.7.3.7 / 8.7.3.6 row/column-skip modes: one flag bit per row (or
/// column) selects whether that row/column is read raw or set to zero.
fn decode_rowskip(br: &mut BitReader, data: &mut [u8], width: usize, height: usize, stride: usize) -> Result<()> {
    for j in 0..height {
        if br.read_flag()? {
            for i in 0..width {
                data[j * stride + i] = br.read_flag()? as u8;
            }
        } else {
            for i in 0..width {
                data[j * stride + i] = 0;
            }
        }
    }
    Ok(())
}

fn decode_colskip(br: &mut BitReader, data: &mut [u8], width: usize, height: usize, stride: usize) -> Result<()> {
    for i in 0..width {
        if br.read_flag()? {
            for j in 0..height {
                data[j * stride + i] = br.read_flag()? as u8;
            }
        } else {
            for j in 0..height {
                data[j * stride + i] = 0;
            }
        }
    }
    Ok(())
}

/// Table 80 Norm-2/Diff-2 code table: 1 bit for "00", else 2-3 more bits
/// distinguish "11", "10", "01".
fn decode_norm2(br: &mut BitReader, data: &mut [u8], width: usize, height: usize) -> Result<()> {
    let total = width * height;
    let mut idx = 0usize;
    if total & 1 != 0 {
        data[0] = br.read_flag()? as u8;
        idx = 1;
    }
    while idx < total {
        if !br.read_flag()? {
            data[idx] = 0;
            data[idx + 1] = 0;
        } else if br.read_flag()? {
            data[idx] = 1;
            data[idx + 1] = 1;
        } else if !br.read_flag()? {
            data[idx] = 1;
            data[idx + 1] = 0;
        } else {
            data[idx] = 0;
            data[idx + 1] = 1;
        }
        idx += 2;
    }
    Ok(())
}

fn decode_norm6(br: &mut BitReader, data: &mut [u8], width: usize, height: usize) -> Result<()> {
    let table = norm6_table();
    let is_2x3_tiled = (width % 3 != 0) && (height % 3 == 0);
    if is_2x3_tiled {
        let mut row = 0usize;
        while row < height {
            let mut i = width & 1;
            while i < width {
                let temp = decode_vlc(br, &table)? as u32;
                data[row * width + i] = (temp & 1) as u8;
                data[row * width + i + 1] = ((temp & 2) >> 1) as u8;
                data[(row + 1) * width + i] = ((temp & 4) >> 2) as u8;
                data[(row + 1) * width + i + 1] = ((temp & 8) >> 3) as u8;
                data[(row + 2) * width + i] = ((temp & 16) >> 4) as u8;
                data[(row + 2) * width + i + 1] = ((temp & 32) >> 5) as u8;
                i += 2;
            }
            row += 3;
        }
        if width & 1 != 0 {
            decode_colskip(br, data, width & 1, height, width)?;
        }
    } else {
        let col_rem = width % 3;
        let mut row = height & 1;
        while row < height {
            let mut i = col_rem;
            while i < width {
                let temp = decode_vlc(br, &table)? as u32;
                data[row * width + i] = (temp & 1) as u8;
                data[row * width + i + 1] = ((temp & 2) >> 1) as u8;
                data[row * width + i + 2] = ((temp & 4) >> 2) as u8;
                data[(row + 1) * width + i] = ((temp & 8) >> 3) as u8;
                data[(row + 1) * width + i + 1] = ((temp & 16) >> 4) as u8;
                data[(row + 1) * width + i + 2] = ((temp & 32) >> 5) as u8;
                i += 3;
            }
            row += 2;
        }
        if col_rem != 0 {
            decode_colskip(br, data, col_rem, height, width)?;
        }
        if height & 1 != 0 {
            // leftover single row covering the remaining columns
            let mut tail = vec![0u8; width - col_rem];
            decode_rowskip(br, &mut tail, width - col_rem, 1, width - col_rem)?;
            for (k, v) in tail.into_iter().enumerate() {
                data[col_rem + k] = v;
            }
        }
    }
    Ok(())
}

/// 8.7.3.8 inverse differential decoding, applied after Norm-2/Norm-6 for
/// Diff-2/Diff-6 modes.
fn inverse_diff(data: &mut [u8], width: usize, height: usize, invert: u8) {
    for j in 0..height {
        for i in 0..width {
            let idx = j * width + i;
            if i == 0 && j == 0 {
                data[idx] ^= invert;
            } else if i == 0 {
                let above = data[(j - 1) * width];
                data[idx] ^= above;
            } else if j > 0 && data[(j - 1) * width + i] != data[j * width + i - 1] {
                data[idx] ^= invert;
            } else {
                data[idx] ^= data[j * width + i - 1];
            }
        }
    }
}

/// Decodes one bit plane of `width * height` macroblock flags. Returns
/// `None` when the mode is `Raw` (the caller reads one bit per macroblock
/// itself); otherwise returns the fully decoded grid.
pub fn decode_bitplane(br: &mut BitReader, width: usize, height: usize) -> Result<(BitPlaneMode, Option<Vec<u8>>)> {
    let invert = br.read_flag()? as u8;
    let mode = read_imode(br)?;
    if mode == BitPlaneMode::Raw {
        return Ok((mode, None));
    }

    let mut data = vec![0u8; width * height];
    match mode {
        BitPlaneMode::Norm2 => decode_norm2(br, &mut data, width, height)?,
        BitPlaneMode::Norm6 => decode_norm6(br, &mut data, width, height)?,
        BitPlaneMode::Diff2 => {
            decode_norm2(br, &mut data, width, height)?;
            inverse_diff(&mut data, width, height, invert);
        }
        BitPlaneMode::Diff6 => {
            decode_norm6(br, &mut data, width, height)?;
            inverse_diff(&mut data, width, height, invert);
        }
        BitPlaneMode::RowSkip => decode_rowskip(br, &mut data, width, height, width)?,
        BitPlaneMode::ColSkip => decode_colskip(br, &mut data, width, height, width)?,
        BitPlaneMode::Raw => unreachable!(),
    }

    // 8.7.1 INVERT: applied to the whole plane except for Diff-2/Diff-6,
    // which already consumed `invert` inside the differential pass.
    if invert != 0 && !matches!(mode, BitPlaneMode::Diff2 | BitPlaneMode::Diff6) {
        for v in data.iter_mut() {
            *v = (*v == 0) as u8;
        }
    }

    Ok((mode, Some(data)))
}
