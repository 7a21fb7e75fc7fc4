//! H.265 decoded picture buffer: reference-picture-set partitioning
//! (ITU-T H.265 §8.3.2) and the output-and-removal/bumping process
//! (Annex C.5.2.2).

use vparse_core::PicOrderCnt;
use vparse_hevc::rps::ShortTermRefPicSet;

/// A single decoded H.265 picture as tracked by the DPB.
#[derive(Debug, Clone)]
pub struct Picture<P> {
    pub poc: PicOrderCnt,
    pub used_for_reference: bool,
    pub needed_for_output: bool,
    pub long_term: bool,
    pub payload: P,
}

impl<P> Picture<P> {
    pub fn new(poc: PicOrderCnt, payload: P) -> Self {
        Self {
            poc,
            used_for_reference: true,
            needed_for_output: true,
            long_term: false,
            payload,
        }
    }
}

/// The five reference-picture subsets derived from a slice's RPS and
/// long-term picture set, per §8.3.2: `RefPicSetStCurrBefore/After/Foll`,
/// `RefPicSetLtCurr/Foll`. Each entry is a reference into the DPB's
/// picture list, resolved by matching POC (short-term) or POC-LSB
/// (long-term) against the pictures currently held.
pub struct RpsPartition<'a, P> {
    pub st_curr_before: Vec<&'a Picture<P>>,
    pub st_curr_after: Vec<&'a Picture<P>>,
    pub st_foll: Vec<&'a Picture<P>>,
    pub lt_curr: Vec<&'a Picture<P>>,
    pub lt_foll: Vec<&'a Picture<P>>,
}

impl<'a, P> RpsPartition<'a, P> {
    pub fn num_pic_total_curr(&self) -> usize {
        self.st_curr_before.len() + self.st_curr_after.len() + self.lt_curr.len()
    }
}

pub struct Dpb<P> {
    pictures: Vec<Picture<P>>,
    sps_max_dec_pic_buffering: usize,
    sps_max_num_reorder_pics: usize,
}

impl<P> Dpb<P> {
    pub fn new(sps_max_dec_pic_buffering: usize, sps_max_num_reorder_pics: usize) -> Self {
        Self {
            pictures: Vec::new(),
            sps_max_dec_pic_buffering,
            sps_max_num_reorder_pics,
        }
    }

    pub fn len(&self) -> usize {
        self.pictures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pictures.is_empty()
    }

    /// Partitions the current DPB contents against a just-parsed short-term
    /// RPS and long-term reference list (§8.3.2). `current_poc` is the POC
    /// of the picture about to be decoded; `max_poc_lsb` is
    /// `1 << (log2_max_pic_order_cnt_lsb_minus4 + 4)`, used to match
    /// long-term entries signaled only by POC LSB.
    pub fn derive_rps_partition<'a>(
        &'a self,
        current_poc: PicOrderCnt,
        short_term: &ShortTermRefPicSet,
        poc_lsb_lt: &[u32],
        used_by_curr_pic_lt: &[bool],
        max_poc_lsb: u32,
    ) -> RpsPartition<'a, P> {
        let mut st_curr_before = Vec::new();
        let mut st_foll = Vec::new();
        for (&delta, &used) in short_term
            .delta_poc_s0
            .iter()
            .zip(short_term.used_by_curr_pic_s0.iter())
        {
            let target = PicOrderCnt(current_poc.0 + delta);
            if let Some(p) = self.find_by_poc(target) {
                if used {
                    st_curr_before.push(p);
                } else {
                    st_foll.push(p);
                }
            }
        }

        let mut st_curr_after = Vec::new();
        for (&delta, &used) in short_term
            .delta_poc_s1
            .iter()
            .zip(short_term.used_by_curr_pic_s1.iter())
        {
            let target = PicOrderCnt(current_poc.0 + delta);
            if let Some(p) = self.find_by_poc(target) {
                if used {
                    st_curr_after.push(p);
                } else {
                    st_foll.push(p);
                }
            }
        }

        let mut lt_curr = Vec::new();
        let mut lt_foll = Vec::new();
        for (&poc_lsb, &used) in poc_lsb_lt.iter().zip(used_by_curr_pic_lt.iter()) {
            if let Some(p) = self.find_by_poc_lsb(poc_lsb, max_poc_lsb) {
                if used {
                    lt_curr.push(p);
                } else {
                    lt_foll.push(p);
                }
            }
        }

        RpsPartition {
            st_curr_before,
            st_curr_after,
            st_foll,
            lt_curr,
            lt_foll,
        }
    }

    fn find_by_poc(&self, poc: PicOrderCnt) -> Option<&Picture<P>> {
        self.pictures.iter().find(|p| p.poc == poc)
    }

    fn find_by_poc_lsb(&self, poc_lsb: u32, max_poc_lsb: u32) -> Option<&Picture<P>> {
        self.pictures
            .iter()
            .find(|p| (p.poc.0.rem_euclid(max_poc_lsb as i32)) as u32 == poc_lsb)
    }

    /// Drops pictures that are neither used for reference nor needed for
    /// output, per the start of the output-and-removal process
    /// (Annex C.5.2.2, first bullet).
    fn remove_unused(&mut self) {
        self.pictures
            .retain(|p| p.used_for_reference || p.needed_for_output);
    }

    fn num_needed_for_output(&self) -> usize {
        self.pictures.iter().filter(|p| p.needed_for_output).count()
    }

    /// Outputs the picture with the smallest POC still needed for output,
    /// removing its frame store entirely if it is also unused for
    /// reference.
    pub fn bump(&mut self) -> Option<Picture<P>>
    where
        P: Clone,
    {
        let idx = self
            .pictures
            .iter()
            .enumerate()
            .filter(|(_, p)| p.needed_for_output)
            .min_by_key(|(_, p)| p.poc)
            .map(|(i, _)| i)?;

        let out = self.pictures[idx].clone();
        self.pictures[idx].needed_for_output = false;
        if !self.pictures[idx].used_for_reference {
            self.pictures.remove(idx);
        }
        Some(out)
    }

    /// Inserts a freshly decoded picture and bumps until the reorder and
    /// buffering constraints from the active SPS are satisfied
    /// (§C.5.2.2: "no more reordering capacity" / DPB-fullness bullets).
    /// `sps_max_latency_increase` elapsing is tracked by the driver, which
    /// calls [`Dpb::bump`] directly when that interval expires.
    pub fn insert_and_bump(&mut self, picture: Picture<P>) -> Vec<Picture<P>>
    where
        P: Clone,
    {
        self.remove_unused();
        let mut out = Vec::new();
        while self.num_needed_for_output() >= self.sps_max_num_reorder_pics.max(1)
            || self.pictures.len() >= self.sps_max_dec_pic_buffering
        {
            match self.bump() {
                Some(p) => out.push(p),
                None => break,
            }
        }
        self.pictures.push(picture);
        out
    }

    /// Marks every picture outside `partition` as unused for reference,
    /// applying the RPS's implicit "everything else is dropped" semantics
    /// once the current picture has been decoded against it.
    pub fn apply_rps(&mut self, kept_pocs: &[PicOrderCnt]) {
        for p in self.pictures.iter_mut() {
            if !kept_pocs.contains(&p.poc) {
                p.used_for_reference = false;
            }
        }
    }

    pub fn flush(&mut self) -> Vec<Picture<P>>
    where
        P: Clone,
    {
        let mut out = Vec::new();
        while let Some(p) = self.bump() {
            out.push(p);
        }
        self.pictures.clear();
        out
    }
}
