//! HEVC short-term reference picture set parsing (ITU-T H.265 §7.3.7, §7.4.8).
//!
//! A short-term RPS is either parsed explicitly (separate negative/positive
//! delta-POC lists) or predicted from an earlier RPS in the same SPS by
//! accumulating signed deltas per §7.4.7. Either way the result is flattened
//! into the same `DeltaPocS0/S1` + `UsedByCurrPicS0/S1` representation so
//! downstream DPB code never has to know which path produced it.

use crate::bitreader::BitReader;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Maximum number of delta-POC entries in either subset, per the
/// specification's cap on total RPS size.
pub const MAX_NUM_DELTA_POC: usize = 16;

/// A single parsed short-term reference picture set, already resolved to
/// its flat delta-POC form regardless of whether it was signaled explicitly
/// or via inter-RPS prediction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShortTermRefPicSet {
    /// DeltaPocS0[i]: negative (before current POC) deltas, most recent first.
    pub delta_poc_s0: Vec<i32>,
    /// UsedByCurrPicS0[i], parallel to `delta_poc_s0`.
    pub used_by_curr_pic_s0: Vec<bool>,
    /// DeltaPocS1[i]: positive (after current POC) deltas.
    pub delta_poc_s1: Vec<i32>,
    /// UsedByCurrPicS1[i], parallel to `delta_poc_s1`.
    pub used_by_curr_pic_s1: Vec<bool>,
}

impl ShortTermRefPicSet {
    pub fn num_negative_pics(&self) -> usize {
        self.delta_poc_s0.len()
    }

    pub fn num_positive_pics(&self) -> usize {
        self.delta_poc_s1.len()
    }

    /// NumPicTotalCurr contribution from this RPS: the count of entries in
    /// either subset flagged as used by the current picture. The slice
    /// header adds the long-term used-by-curr count on top of this.
    pub fn num_used_by_curr(&self) -> usize {
        self.used_by_curr_pic_s0.iter().filter(|&&u| u).count()
            + self.used_by_curr_pic_s1.iter().filter(|&&u| u).count()
    }
}

/// Parses `st_ref_pic_set(stRpsIdx)` out of an SPS's (or slice header's)
/// bitstream, given the RPS sets already parsed earlier in the same SPS
/// (needed for inter-RPS prediction, which may reference any earlier index).
pub fn parse_short_term_ref_pic_set(
    reader: &mut BitReader,
    st_rps_idx: usize,
    num_short_term_ref_pic_sets: usize,
    prior_sets: &[ShortTermRefPicSet],
) -> Result<ShortTermRefPicSet> {
    let mut inter_ref_pic_set_prediction_flag = false;
    if st_rps_idx != 0 {
        inter_ref_pic_set_prediction_flag = reader.read_bit()?;
    }

    if inter_ref_pic_set_prediction_flag {
        let delta_idx_minus1 = if st_rps_idx == num_short_term_ref_pic_sets {
            reader.read_ue()?
        } else {
            0
        };
        let delta_rps_sign = reader.read_bit()?;
        let abs_delta_rps_minus1 = reader.read_ue()?;
        let delta_rps = if delta_rps_sign {
            -((abs_delta_rps_minus1 + 1) as i32)
        } else {
            (abs_delta_rps_minus1 + 1) as i32
        };

        let ref_rps_idx = st_rps_idx - (delta_idx_minus1 as usize + 1);
        let ref_set = prior_sets.get(ref_rps_idx).cloned().unwrap_or_default();

        // NumDeltaPocs of the referenced set.
        let num_ref_deltas = ref_set.num_negative_pics() + ref_set.num_positive_pics();

        parse_inter_predicted_rps(reader, &ref_set, num_ref_deltas, delta_rps)
    } else {
        let num_negative_pics = reader.read_ue()? as usize;
        let num_positive_pics = reader.read_ue()? as usize;

        let mut delta_poc_s0 = Vec::with_capacity(num_negative_pics);
        let mut used_by_curr_pic_s0 = Vec::with_capacity(num_negative_pics);
        let mut prev = 0i32;
        for _ in 0..num_negative_pics {
            let delta_poc_s0_minus1 = reader.read_ue()? as i32;
            prev -= delta_poc_s0_minus1 + 1;
            delta_poc_s0.push(prev);
            used_by_curr_pic_s0.push(reader.read_bit()?);
        }

        let mut delta_poc_s1 = Vec::with_capacity(num_positive_pics);
        let mut used_by_curr_pic_s1 = Vec::with_capacity(num_positive_pics);
        let mut prev = 0i32;
        for _ in 0..num_positive_pics {
            let delta_poc_s1_minus1 = reader.read_ue()? as i32;
            prev += delta_poc_s1_minus1 + 1;
            delta_poc_s1.push(prev);
            used_by_curr_pic_s1.push(reader.read_bit()?);
        }

        Ok(ShortTermRefPicSet {
            delta_poc_s0,
            used_by_curr_pic_s0,
            delta_poc_s1,
            used_by_curr_pic_s1,
        })
    }
}

/// Implements the inter-RPS-prediction accumulation of §7.4.8 in a single
/// forward pass: for each of the `num_ref_deltas` entries of the referenced
/// set (negative then positive, in index order) plus one extra synthetic
/// entry for delta_rps itself, read `used_by_curr_pic_flag` and conditionally
/// `use_delta_flag`, then derive `DeltaPocSX`/`UsedByCurrPicSX` per the
/// specification's equations 7-61..7-64.
fn parse_inter_predicted_rps(
    reader: &mut BitReader,
    ref_set: &ShortTermRefPicSet,
    num_ref_deltas: usize,
    delta_rps: i32,
) -> Result<ShortTermRefPicSet> {
    let mut used_by_curr_pic_flag = Vec::with_capacity(num_ref_deltas + 1);
    let mut use_delta_flag = Vec::with_capacity(num_ref_deltas + 1);

    for _ in 0..=num_ref_deltas {
        let used = reader.read_bit()?;
        let use_delta = if used {
            true
        } else {
            reader.read_bit()?
        };
        used_by_curr_pic_flag.push(used);
        use_delta_flag.push(use_delta);
    }

    // Referenced deltas in the order the spec iterates them: positive
    // subset descending (index NumPositivePics-1..0), then negative subset
    // ascending is NOT how 7.4.8 iterates; it iterates j = NumPositivePics-1
    // downTo 0 for the S1-derived entries of the *new* S0 list, then the
    // delta_rps entry, then the S0 subset ascending for the new S1 list.
    // We follow the reference derivation directly:
    let ref_s1 = &ref_set.delta_poc_s1;
    let ref_s0 = &ref_set.delta_poc_s0;
    let num_pos = ref_s1.len();
    let num_neg = ref_s0.len();

    let mut new_s0: Vec<(i32, bool)> = Vec::new();
    for j in (0..num_pos).rev() {
        let d_poc = ref_s1[j] + delta_rps;
        let idx = num_neg + j;
        if d_poc < 0 && use_delta_flag[idx] {
            new_s0.push((d_poc, used_by_curr_pic_flag[idx]));
        }
    }
    if delta_rps < 0 && use_delta_flag[num_ref_deltas] {
        new_s0.push((delta_rps, used_by_curr_pic_flag[num_ref_deltas]));
    }
    for j in 0..num_neg {
        let d_poc = ref_s0[j] + delta_rps;
        if d_poc < 0 && use_delta_flag[j] {
            new_s0.push((d_poc, used_by_curr_pic_flag[j]));
        }
    }

    let mut new_s1: Vec<(i32, bool)> = Vec::new();
    for j in (0..num_neg).rev() {
        let d_poc = ref_s0[j] + delta_rps;
        if d_poc > 0 && use_delta_flag[j] {
            new_s1.push((d_poc, used_by_curr_pic_flag[j]));
        }
    }
    if delta_rps > 0 && use_delta_flag[num_ref_deltas] {
        new_s1.push((delta_rps, used_by_curr_pic_flag[num_ref_deltas]));
    }
    for j in 0..num_pos {
        let d_poc = ref_s1[j] + delta_rps;
        let idx = num_neg + j;
        if d_poc > 0 && use_delta_flag[idx] {
            new_s1.push((d_poc, used_by_curr_pic_flag[idx]));
        }
    }

    new_s0.truncate(MAX_NUM_DELTA_POC);
    new_s1.truncate(MAX_NUM_DELTA_POC);

    Ok(ShortTermRefPicSet {
        delta_poc_s0: new_s0.iter().map(|(d, _)| *d).collect(),
        used_by_curr_pic_s0: new_s0.iter().map(|(_, u)| *u).collect(),
        delta_poc_s1: new_s1.iter().map(|(d, _)| *d).collect(),
        used_by_curr_pic_s1: new_s1.iter().map(|(_, u)| *u).collect(),
    })
}
