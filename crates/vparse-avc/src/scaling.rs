//! H.264/AVC scaling list parsing (ITU-T H.264 §7.3.2.1.1.1) and the
//! fall-back-rule default tables a `seq_scaling_matrix()`/`pic_scaling_matrix()`
//! uses when a list is not explicitly coded (Table 7-2).

use crate::bitreader::BitReader;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use vparse_core::ScalingMatrix;

/// Table 7-3: default intra/inter 4x4 scaling lists, in the up-right
/// diagonal scan order the bitstream itself uses.
pub const DEFAULT_4X4_INTRA: [u8; 16] = [
    6, 13, 13, 20, 20, 20, 28, 28, 28, 28, 32, 32, 32, 37, 37, 42,
];
pub const DEFAULT_4X4_INTER: [u8; 16] = [
    10, 14, 14, 20, 20, 20, 24, 24, 24, 24, 27, 27, 27, 30, 30, 34,
];

/// Table 7-4: default intra/inter 8x8 scaling lists.
pub const DEFAULT_8X8_INTRA: [u8; 64] = [
    6, 10, 10, 13, 11, 13, 16, 16, 16, 16, 18, 18, 18, 18, 18, 23, 23, 23, 23, 23, 23, 25, 25, 25,
    25, 25, 25, 25, 27, 27, 27, 27, 27, 27, 27, 27, 29, 29, 29, 29, 29, 29, 29, 29, 29, 31, 31, 31,
    31, 31, 31, 31, 31, 31, 33, 33, 33, 33, 33, 33, 33, 33, 33, 36,
];
pub const DEFAULT_8X8_INTER: [u8; 64] = [
    9, 13, 13, 15, 13, 15, 17, 17, 17, 17, 19, 19, 19, 19, 19, 21, 21, 21, 21, 21, 21, 22, 22, 22,
    22, 22, 22, 22, 24, 24, 24, 24, 24, 24, 24, 24, 25, 25, 25, 25, 25, 25, 25, 25, 25, 27, 27, 27,
    27, 27, 27, 27, 27, 27, 28, 28, 28, 28, 28, 28, 28, 28, 28, 31,
];

/// All scaling lists decoded from one `seq_scaling_matrix()` or
/// `pic_scaling_matrix()`, ordered per Table 7-2 (up to 6 4x4 lists, then
/// up to 6 8x8 lists).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalingLists {
    pub lists_4x4: Vec<ScalingMatrix<16>>,
    pub lists_8x8: Vec<ScalingMatrix<64>>,
}

/// Parses `num_lists` scaling lists applying fall-back rule set A: an absent
/// list is either a codec default (index 0 and 3 of each size class) or a
/// copy of the previous list of the same size class. This is the rule used
/// unconditionally inside an SPS, and inside a PPS whose SPS carries no
/// scaling matrix of its own.
pub fn parse_scaling_matrix_rule_a(reader: &mut BitReader, num_lists: usize) -> Result<ScalingLists> {
    let mut lists_4x4 = Vec::with_capacity(num_lists.min(6));
    let mut lists_8x8 = Vec::with_capacity(num_lists.saturating_sub(6));

    for i in 0..num_lists {
        let is_4x4 = i < 6;
        let size = if is_4x4 { 16 } else { 64 };
        let present = reader.read_flag()?;

        let coeffs = if present {
            let (values, use_default) = parse_scaling_list_values(reader, size)?;
            if use_default {
                default_for_index(i, is_4x4).to_vec()
            } else {
                values
            }
        } else {
            fallback_rule_a(i, is_4x4, &lists_4x4, &lists_8x8)
        };

        push_list(&mut lists_4x4, &mut lists_8x8, is_4x4, coeffs);
    }

    Ok(ScalingLists {
        lists_4x4,
        lists_8x8,
    })
}

/// Parses `num_lists` scaling lists applying fall-back rule set B: an
/// absent list copies the corresponding list from the referenced SPS's own
/// scaling matrix, or (for the very first list of each size class with
/// nothing preceding it in this PPS) falls back to that SPS list directly.
/// Used inside a PPS whose SPS did carry a scaling matrix.
pub fn parse_scaling_matrix_rule_b(
    reader: &mut BitReader,
    num_lists: usize,
    sps_lists: &ScalingLists,
) -> Result<ScalingLists> {
    let mut lists_4x4 = Vec::with_capacity(num_lists.min(6));
    let mut lists_8x8 = Vec::with_capacity(num_lists.saturating_sub(6));

    for i in 0..num_lists {
        let is_4x4 = i < 6;
        let size = if is_4x4 { 16 } else { 64 };
        let present = reader.read_flag()?;

        let coeffs = if present {
            let (values, use_default) = parse_scaling_list_values(reader, size)?;
            if use_default {
                default_for_index(i, is_4x4).to_vec()
            } else {
                values
            }
        } else {
            fallback_rule_b(i, is_4x4, &lists_4x4, &lists_8x8, sps_lists)
        };

        push_list(&mut lists_4x4, &mut lists_8x8, is_4x4, coeffs);
    }

    Ok(ScalingLists {
        lists_4x4,
        lists_8x8,
    })
}

/// Reads one `scaling_list(scalingList, sizeOfScalingList, useDefaultScalingMatrixFlag)`
/// and returns the raw coefficient values along with whether the bitstream
/// signaled `useDefaultScalingMatrixFlag` (meaning the caller should discard
/// `values` and substitute the size/type-appropriate default table).
fn parse_scaling_list_values(reader: &mut BitReader, size: usize) -> Result<(Vec<u8>, bool)> {
    let mut last_scale = 8i32;
    let mut next_scale = 8i32;
    let mut use_default = false;
    let mut values = vec![0u8; size];

    for (j, value) in values.iter_mut().enumerate() {
        if next_scale != 0 {
            let delta_scale = reader.read_se()?;
            next_scale = (last_scale + delta_scale + 256) % 256;
            if j == 0 && next_scale == 0 {
                use_default = true;
            }
        }
        let scale = if next_scale == 0 { last_scale } else { next_scale };
        *value = scale as u8;
        last_scale = scale;
    }

    Ok((values, use_default))
}

fn push_list(
    lists_4x4: &mut Vec<ScalingMatrix<16>>,
    lists_8x8: &mut Vec<ScalingMatrix<64>>,
    is_4x4: bool,
    coeffs: Vec<u8>,
) {
    if is_4x4 {
        lists_4x4.push(ScalingMatrix {
            coefficients: coeffs.try_into().unwrap_or([16u8; 16]),
            dc_value: None,
        });
    } else {
        lists_8x8.push(ScalingMatrix {
            coefficients: coeffs.try_into().unwrap_or([16u8; 64]),
            dc_value: None,
        });
    }
}

/// Intra lists sit at position 0 (4x4: indices 0-2; 8x8 group: even offset).
fn default_for_index(i: usize, is_4x4: bool) -> &'static [u8] {
    if is_4x4 {
        if i < 3 {
            &DEFAULT_4X4_INTRA
        } else {
            &DEFAULT_4X4_INTER
        }
    } else {
        let group_offset = (i - 6) % 2;
        if group_offset == 0 {
            &DEFAULT_8X8_INTRA
        } else {
            &DEFAULT_8X8_INTER
        }
    }
}

fn fallback_rule_a(
    i: usize,
    is_4x4: bool,
    lists_4x4: &[ScalingMatrix<16>],
    lists_8x8: &[ScalingMatrix<64>],
) -> Vec<u8> {
    if is_4x4 {
        match i {
            0 => DEFAULT_4X4_INTRA.to_vec(),
            3 => DEFAULT_4X4_INTER.to_vec(),
            _ => lists_4x4[i - 1].coefficients.to_vec(),
        }
    } else {
        let group = i - 6;
        match group {
            0 => DEFAULT_8X8_INTRA.to_vec(),
            1 => DEFAULT_8X8_INTER.to_vec(),
            _ => lists_8x8[group - 2].coefficients.to_vec(),
        }
    }
}

fn fallback_rule_b(
    i: usize,
    is_4x4: bool,
    lists_4x4: &[ScalingMatrix<16>],
    lists_8x8: &[ScalingMatrix<64>],
    sps_lists: &ScalingLists,
) -> Vec<u8> {
    if is_4x4 {
        match i {
            0 | 3 => sps_lists
                .lists_4x4
                .get(i)
                .map(|m| m.coefficients.to_vec())
                .unwrap_or_else(|| default_for_index(i, true).to_vec()),
            _ => lists_4x4[i - 1].coefficients.to_vec(),
        }
    } else {
        let group = i - 6;
        match group {
            0 | 1 => sps_lists
                .lists_8x8
                .get(group)
                .map(|m| m.coefficients.to_vec())
                .unwrap_or_else(|| default_for_index(i, false).to_vec()),
            _ => lists_8x8[group - 2].coefficients.to_vec(),
        }
    }
}
