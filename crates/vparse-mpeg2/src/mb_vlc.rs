//! Macroblock-address-increment VLC (Table B-1 / ISO-IEC 13818-2 Table B-1).
//!
//! Slice parsing uses this to locate the first macroblock column: the scan
//! walks the table's 34 real codes plus an escape (adds 33 and repeats) and a
//! macroblock-stuffing code (consumed and ignored, pre-MPEG-2 streams only).

use crate::bitreader::BitReader;
use crate::error::{Mpeg2Error, Result};

/// One entry of Table B-1: `(code_length_in_bits, code_value, increment)`.
/// `increment == 0` marks the two non-terminal codes: index 34 is the escape
/// (macroblock_address_increment += 33, continue scanning) and index 35 is
/// macroblock_stuffing (ignored, pre-MPEG-2 only).
const TABLE: &[(u8, u16, u8)] = &[
    (1, 0b1, 1),
    (3, 0b011, 2),
    (3, 0b010, 3),
    (4, 0b0011, 4),
    (4, 0b0010, 5),
    (5, 0b0001_1, 6),
    (5, 0b0001_0, 7),
    (7, 0b0000_111, 8),
    (7, 0b0000_110, 9),
    (8, 0b0000_1011, 10),
    (8, 0b0000_1010, 11),
    (8, 0b0000_1001, 12),
    (8, 0b0000_1000, 13),
    (8, 0b0000_0111, 14),
    (8, 0b0000_0110, 15),
    (10, 0b0000_0101_11, 16),
    (10, 0b0000_0101_10, 17),
    (10, 0b0000_0101_01, 18),
    (10, 0b0000_0101_00, 19),
    (10, 0b0000_0100_11, 20),
    (10, 0b0000_0100_10, 21),
    (11, 0b0000_0100_011, 22),
    (11, 0b0000_0100_010, 23),
    (11, 0b0000_0100_001, 24),
    (11, 0b0000_0100_000, 25),
    (11, 0b0000_0011_111, 26),
    (11, 0b0000_0011_110, 27),
    (11, 0b0000_0011_101, 28),
    (11, 0b0000_0011_100, 29),
    (11, 0b0000_0011_011, 30),
    (11, 0b0000_0011_010, 31),
    (11, 0b0000_0011_001, 32),
    (11, 0b0000_0011_000, 33),
    // escape: macroblock_address_increment += 33, rescan
    (11, 0b0000_0001_000, 0),
    // macroblock_stuffing (discarded)
    (11, 0b0000_0111_111, 0),
];

const ESCAPE_INDEX: usize = 33;
const STUFFING_INDEX: usize = 34;

/// Decodes one macroblock_address_increment VLC code, following escapes.
/// Returns the total increment (sum of all escape steps plus the terminal
/// value), skipping any macroblock_stuffing codes along the way.
pub fn read_macroblock_address_increment(reader: &mut BitReader) -> Result<u32> {
    let mut total: u32 = 0;
    loop {
        let (idx, _len) = match_code(reader)?;
        if idx == STUFFING_INDEX {
            continue;
        }
        if idx == ESCAPE_INDEX {
            total += 33;
            continue;
        }
        total += TABLE[idx].2 as u32;
        return Ok(total);
    }
}

/// Reads bits one at a time, growing the candidate code until it matches a
/// table entry of that exact bit length. Returns the matched table index.
fn match_code(reader: &mut BitReader) -> Result<(usize, u8)> {
    let mut code: u16 = 0;
    let mut len: u8 = 0;
    loop {
        code = (code << 1) | (reader.read_flag()? as u16);
        len += 1;
        if len > 11 {
            return Err(Mpeg2Error::InvalidSliceHeader(
                "macroblock_address_increment VLC overran Table B-1".into(),
            ));
        }
        if let Some(idx) = TABLE
            .iter()
            .position(|&(l, c, _)| l == len && c == code)
        {
            return Ok((idx, len));
        }
    }
}
