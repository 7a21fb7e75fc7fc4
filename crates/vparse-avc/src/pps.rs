//! H.264/AVC Picture Parameter Set (PPS) parsing.

use crate::bitreader::BitReader;
use crate::error::Result;
use crate::scaling::{parse_scaling_matrix_rule_a, parse_scaling_matrix_rule_b, ScalingLists};
use crate::sps::Sps;
use serde::{Deserialize, Serialize};

/// Picture Parameter Set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pps {
    /// pic_parameter_set_id
    pub pic_parameter_set_id: u8,
    /// seq_parameter_set_id
    pub seq_parameter_set_id: u8,
    /// entropy_coding_mode_flag (0=CAVLC, 1=CABAC)
    pub entropy_coding_mode_flag: bool,
    /// bottom_field_pic_order_in_frame_present_flag
    pub bottom_field_pic_order_in_frame_present_flag: bool,
    /// num_slice_groups_minus1
    pub num_slice_groups_minus1: u32,
    /// slice_group_map_type
    pub slice_group_map_type: u32,
    /// num_ref_idx_l0_default_active_minus1
    pub num_ref_idx_l0_default_active_minus1: u32,
    /// num_ref_idx_l1_default_active_minus1
    pub num_ref_idx_l1_default_active_minus1: u32,
    /// weighted_pred_flag
    pub weighted_pred_flag: bool,
    /// weighted_bipred_idc
    pub weighted_bipred_idc: u8,
    /// pic_init_qp_minus26
    pub pic_init_qp_minus26: i32,
    /// pic_init_qs_minus26
    pub pic_init_qs_minus26: i32,
    /// chroma_qp_index_offset
    pub chroma_qp_index_offset: i32,
    /// deblocking_filter_control_present_flag
    pub deblocking_filter_control_present_flag: bool,
    /// constrained_intra_pred_flag
    pub constrained_intra_pred_flag: bool,
    /// redundant_pic_cnt_present_flag
    pub redundant_pic_cnt_present_flag: bool,
    /// transform_8x8_mode_flag (high profile)
    pub transform_8x8_mode_flag: bool,
    /// pic_scaling_matrix_present_flag
    pub pic_scaling_matrix_present_flag: bool,
    /// Scaling lists read under `pic_scaling_matrix()`, present only when
    /// `pic_scaling_matrix_present_flag` is set.
    pub scaling_lists: Option<ScalingLists>,
    /// second_chroma_qp_index_offset
    pub second_chroma_qp_index_offset: i32,
}

impl Pps {
    /// Check if CABAC is used.
    pub fn is_cabac(&self) -> bool {
        self.entropy_coding_mode_flag
    }

    /// Get initial QP.
    pub fn initial_qp(&self) -> i32 {
        26 + self.pic_init_qp_minus26
    }
}

/// Parse PPS from NAL unit payload. Any scaling matrix present falls back
/// to Table 7-2 rule A for absent lists, since no referenced SPS is
/// available here; use [`parse_pps_with_sps`] when the SPS is known.
pub fn parse_pps(data: &[u8]) -> Result<Pps> {
    parse_pps_with_sps(data, None)
}

/// Parse PPS from NAL unit payload, looking up the SPS it references (by
/// `seq_parameter_set_id`, decoded from the payload itself) in `sps_map` to
/// resolve Table 7-2 rule B for an absent scaling list.
pub fn parse_pps_with_sps_map(
    data: &[u8],
    sps_map: &std::collections::HashMap<u8, Sps>,
) -> Result<Pps> {
    let mut peek = BitReader::new(data);
    let _pic_parameter_set_id = peek.read_ue()?;
    let seq_parameter_set_id = peek.read_ue()? as u8;
    parse_pps_with_sps(data, sps_map.get(&seq_parameter_set_id))
}

/// Parse PPS from NAL unit payload, resolving an absent scaling list
/// against the referenced SPS's own scaling matrix (Table 7-2 rule B) when
/// `referenced_sps` carries one; falls back to rule A otherwise.
pub fn parse_pps_with_sps(data: &[u8], referenced_sps: Option<&Sps>) -> Result<Pps> {
    let mut reader = BitReader::new(data);

    let pic_parameter_set_id = reader.read_ue()? as u8;
    let seq_parameter_set_id = reader.read_ue()? as u8;
    let entropy_coding_mode_flag = reader.read_flag()?;
    let bottom_field_pic_order_in_frame_present_flag = reader.read_flag()?;

    let num_slice_groups_minus1 = reader.read_ue()?;
    let mut slice_group_map_type = 0;

    if num_slice_groups_minus1 > 0 {
        slice_group_map_type = reader.read_ue()?;

        match slice_group_map_type {
            0 => {
                for _ in 0..=num_slice_groups_minus1 {
                    let _run_length_minus1 = reader.read_ue()?;
                }
            }
            2 => {
                for _ in 0..num_slice_groups_minus1 {
                    let _top_left = reader.read_ue()?;
                    let _bottom_right = reader.read_ue()?;
                }
            }
            3 | 4 | 5 => {
                let _slice_group_change_direction_flag = reader.read_flag()?;
                let _slice_group_change_rate_minus1 = reader.read_ue()?;
            }
            6 => {
                let pic_size_in_map_units_minus1 = reader.read_ue()?;
                let bits = ((num_slice_groups_minus1 + 1) as f64).log2().ceil() as u8;
                for _ in 0..=pic_size_in_map_units_minus1 {
                    let _slice_group_id = reader.read_bits(bits)?;
                }
            }
            _ => {}
        }
    }

    let num_ref_idx_l0_default_active_minus1 = reader.read_ue()?;
    let num_ref_idx_l1_default_active_minus1 = reader.read_ue()?;
    let weighted_pred_flag = reader.read_flag()?;
    let weighted_bipred_idc = reader.read_bits(2)? as u8;
    let pic_init_qp_minus26 = reader.read_se()?;
    let pic_init_qs_minus26 = reader.read_se()?;
    let chroma_qp_index_offset = reader.read_se()?;
    let deblocking_filter_control_present_flag = reader.read_flag()?;
    let constrained_intra_pred_flag = reader.read_flag()?;
    let redundant_pic_cnt_present_flag = reader.read_flag()?;

    // Extended syntax for high profiles
    let mut transform_8x8_mode_flag = false;
    let mut pic_scaling_matrix_present_flag = false;
    let mut scaling_lists: Option<ScalingLists> = None;
    let mut second_chroma_qp_index_offset = chroma_qp_index_offset;

    if reader.more_rbsp_data() {
        transform_8x8_mode_flag = reader.read_flag()?;
        pic_scaling_matrix_present_flag = reader.read_flag()?;

        if pic_scaling_matrix_present_flag {
            let num_lists = 6 + if transform_8x8_mode_flag { 2 } else { 0 };
            scaling_lists = Some(match referenced_sps.and_then(|sps| sps.scaling_lists.as_ref()) {
                Some(sps_lists) => {
                    parse_scaling_matrix_rule_b(&mut reader, num_lists, sps_lists)?
                }
                None => parse_scaling_matrix_rule_a(&mut reader, num_lists)?,
            });
        }

        second_chroma_qp_index_offset = reader.read_se()?;
    }

    Ok(Pps {
        pic_parameter_set_id,
        seq_parameter_set_id,
        entropy_coding_mode_flag,
        bottom_field_pic_order_in_frame_present_flag,
        num_slice_groups_minus1,
        slice_group_map_type,
        num_ref_idx_l0_default_active_minus1,
        num_ref_idx_l1_default_active_minus1,
        weighted_pred_flag,
        weighted_bipred_idc,
        pic_init_qp_minus26,
        pic_init_qs_minus26,
        chroma_qp_index_offset,
        deblocking_filter_control_present_flag,
        constrained_intra_pred_flag,
        redundant_pic_cnt_present_flag,
        transform_8x8_mode_flag,
        pic_scaling_matrix_present_flag,
        scaling_lists,
        second_chroma_qp_index_offset,
    })
}
