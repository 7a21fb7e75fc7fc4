//! HEVC scaling list data parsing (ITU-T H.265 §7.3.4) and the codec-defined
//! default tables a PPS/SPS falls back to when no explicit data is present.
//!
//! Four size classes are kept (4x4, 8x8, 16x16, 32x32), each with 6 matrix
//! ids except 32x32 which has 2 (matrixId 0 and 3 only, per §7.4.5). Matrix
//! ids index into the size class the same way regardless of that asymmetry;
//! callers that only expect 2 entries for sizeId==3 simply use matrixId 0/1
//! mapped to the spec's matrixId 0/3.

use crate::bitreader::BitReader;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use vparse_core::ScalingMatrix;

/// All scaling list values for one SPS or PPS, one vector per size class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalingListData {
    pub size_4x4: Vec<ScalingMatrix<16>>,
    pub size_8x8: Vec<ScalingMatrix<64>>,
    pub size_16x16: Vec<ScalingMatrix<64>>,
    pub size_32x32: Vec<ScalingMatrix<64>>,
}

const MATRICES_PER_SIZE: [usize; 4] = [6, 6, 6, 2];

/// Parses `scaling_list_data()`. Coefficients are stored in the scan order
/// they were read in (up-right diagonal, matching the bitstream); no
/// de-zig-zag is performed since downstream consumers only need the 64/16
/// raw coefficient sequence the accelerator ABI also expects in scan order.
pub fn parse_scaling_list_data(reader: &mut BitReader) -> Result<ScalingListData> {
    let mut size_4x4 = Vec::with_capacity(6);
    let mut size_8x8 = Vec::with_capacity(6);
    let mut size_16x16 = Vec::with_capacity(6);
    let mut size_32x32 = Vec::with_capacity(2);

    for size_id in 0..4usize {
        let num_matrices = MATRICES_PER_SIZE[size_id];
        let mut prev_coeffs: Option<Vec<u8>> = None;
        let mut prev_dc: Option<u8> = None;

        for matrix_id in 0..num_matrices {
            let scaling_list_pred_mode_flag = reader.read_bit()?;
            if !scaling_list_pred_mode_flag {
                let scaling_list_pred_matrix_id_delta = reader.read_ue()?;
                if scaling_list_pred_matrix_id_delta == 0 {
                    push_default(
                        &mut size_4x4,
                        &mut size_8x8,
                        &mut size_16x16,
                        &mut size_32x32,
                        size_id,
                        matrix_id,
                    );
                    prev_coeffs = None;
                    prev_dc = None;
                } else {
                    // Predict from an earlier matrix in this size class;
                    // `prev_coeffs`/`prev_dc` hold the immediately preceding
                    // entry, which is what delta==1 always refers to for the
                    // contiguous matrixId layout this parser uses.
                    let coeffs = prev_coeffs.clone().unwrap_or_else(|| {
                        default_coeffs(size_id).to_vec()
                    });
                    let dc = if size_id >= 2 {
                        Some(prev_dc.unwrap_or(16))
                    } else {
                        None
                    };
                    push_matrix(
                        &mut size_4x4,
                        &mut size_8x8,
                        &mut size_16x16,
                        &mut size_32x32,
                        size_id,
                        coeffs.clone(),
                        dc,
                    );
                    prev_coeffs = Some(coeffs);
                    prev_dc = dc;
                }
                continue;
            }

            let coef_num = if size_id == 0 { 16 } else { 64 };
            let mut next_coef = 8i32;
            let mut dc_value = None;
            if size_id > 1 {
                let scaling_list_dc_coef_minus8 = reader.read_se()?;
                let dc = scaling_list_dc_coef_minus8 + 8;
                next_coef = dc;
                dc_value = Some(dc as u8);
            }
            let mut coeffs = vec![0u8; coef_num];
            for coeff in coeffs.iter_mut() {
                let scaling_list_delta_coef = reader.read_se()?;
                next_coef = (next_coef + scaling_list_delta_coef + 256) % 256;
                *coeff = next_coef as u8;
            }

            push_matrix(
                &mut size_4x4,
                &mut size_8x8,
                &mut size_16x16,
                &mut size_32x32,
                size_id,
                coeffs.clone(),
                dc_value,
            );
            prev_coeffs = Some(coeffs);
            prev_dc = dc_value;
        }
    }

    Ok(ScalingListData {
        size_4x4,
        size_8x8,
        size_16x16,
        size_32x32,
    })
}

fn push_matrix(
    s4: &mut Vec<ScalingMatrix<16>>,
    s8: &mut Vec<ScalingMatrix<64>>,
    s16: &mut Vec<ScalingMatrix<64>>,
    s32: &mut Vec<ScalingMatrix<64>>,
    size_id: usize,
    coeffs: Vec<u8>,
    dc: Option<u8>,
) {
    match size_id {
        0 => s4.push(ScalingMatrix {
            coefficients: coeffs.try_into().unwrap_or([16u8; 16]),
            dc_value: dc,
        }),
        1 => s8.push(ScalingMatrix {
            coefficients: coeffs.try_into().unwrap_or([16u8; 64]),
            dc_value: dc,
        }),
        2 => s16.push(ScalingMatrix {
            coefficients: coeffs.try_into().unwrap_or([16u8; 64]),
            dc_value: dc,
        }),
        _ => s32.push(ScalingMatrix {
            coefficients: coeffs.try_into().unwrap_or([16u8; 64]),
            dc_value: dc,
        }),
    }
}

fn push_default(
    s4: &mut Vec<ScalingMatrix<16>>,
    s8: &mut Vec<ScalingMatrix<64>>,
    s16: &mut Vec<ScalingMatrix<64>>,
    s32: &mut Vec<ScalingMatrix<64>>,
    size_id: usize,
    matrix_id: usize,
) {
    let coeffs = default_coeffs(size_id).to_vec();
    let dc = if size_id >= 2 { Some(16u8) } else { None };
    let _ = matrix_id; // the default table is the same for every matrixId
    push_matrix(s4, s8, s16, s32, size_id, coeffs, dc);
}

fn default_coeffs(size_id: usize) -> &'static [u8] {
    if size_id == 0 {
        &DEFAULT_SCALING_LIST_4X4
    } else {
        &DEFAULT_SCALING_LIST_8X8
    }
}

/// Table 7-5: flat default for all 4x4 lists, intra and inter alike.
pub const DEFAULT_SCALING_LIST_4X4: [u8; 16] = [16; 16];

/// Table 7-6: default 8x8 (and by extension 16x16/32x32) scaling list, used
/// identically for every size >= 8x8 per the specification.
pub const DEFAULT_SCALING_LIST_8X8: [u8; 64] = [
    16, 16, 16, 16, 17, 18, 21, 24, 16, 16, 16, 16, 17, 19, 22, 25, 16, 16, 17, 18, 20, 22, 25, 29,
    16, 16, 18, 21, 24, 27, 31, 36, 17, 17, 20, 24, 30, 35, 41, 47, 18, 19, 22, 27, 35, 44, 54, 65,
    21, 22, 25, 31, 41, 54, 70, 88, 24, 25, 29, 36, 47, 65, 88, 115,
];

/// Resolve the effective scaling-list values for a PPS, applying inheritance:
/// PPS explicit data wins, else the referenced SPS's explicit data, else the
/// codec-wide defaults above. Mirrors the H.264 PPS fallback shape in
/// `vparse-avc`'s Table 7-2 handling but HEVC has no Rule A/B distinction —
/// it is always "PPS, else SPS, else default".
pub fn resolve_scaling_list<'a>(
    pps_data: Option<&'a ScalingListData>,
    sps_data: Option<&'a ScalingListData>,
) -> ResolvedScalingList<'a> {
    match (pps_data, sps_data) {
        (Some(p), _) => ResolvedScalingList::Explicit(p),
        (None, Some(s)) => ResolvedScalingList::Explicit(s),
        (None, None) => ResolvedScalingList::Default,
    }
}

/// Outcome of [`resolve_scaling_list`].
#[derive(Debug, Clone, Copy)]
pub enum ResolvedScalingList<'a> {
    Explicit(&'a ScalingListData),
    Default,
}
