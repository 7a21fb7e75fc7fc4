//! H.264 decoded picture buffer: frame-store bookkeeping, sliding-window and
//! adaptive (MMCO) reference marking, and P/B reference-list construction
//! (ITU-T H.264 §8.2.4, §8.2.5).

use crate::error::{DpbError, Result};
use vparse_avc::slice::DecRefPicMarking;
use vparse_core::{PicOrderCnt, ReferenceMark};

/// A single decoded H.264 picture as tracked by the DPB. `payload` is
/// whatever opaque handle the driver uses to refer to the actual decoded
/// samples (a buffer index, a surface id, ...); this module only reasons
/// about the bookkeeping fields.
#[derive(Debug, Clone)]
pub struct Picture<P> {
    pub frame_num: u32,
    pub pic_order_cnt: PicOrderCnt,
    pub is_idr: bool,
    pub reference: ReferenceMark,
    pub long_term_frame_idx: Option<u32>,
    pub output_needed: bool,
    pub payload: P,
}

impl<P> Picture<P> {
    pub fn new(frame_num: u32, pic_order_cnt: PicOrderCnt, payload: P) -> Self {
        Self {
            frame_num,
            pic_order_cnt,
            is_idr: false,
            reference: ReferenceMark::NotUsed,
            long_term_frame_idx: None,
            output_needed: true,
            payload,
        }
    }
}

/// The decoded picture buffer for one H.264 coded video sequence.
///
/// `max_dec_frame_buffering` and `num_ref_frames` are read from the active
/// SPS (`max_dec_frame_buffering`/`max_num_ref_frames` derived per Annex A,
/// or taken directly from VUI bitstream restrictions when present);
/// `max_frame_num` is `1 << (log2_max_frame_num_minus4 + 4)`.
pub struct Dpb<P> {
    frame_stores: Vec<Picture<P>>,
    max_dec_frame_buffering: usize,
    num_ref_frames: usize,
    max_frame_num: u32,
}

impl<P> Dpb<P> {
    pub fn new(max_dec_frame_buffering: usize, num_ref_frames: usize, max_frame_num: u32) -> Self {
        Self {
            frame_stores: Vec::new(),
            max_dec_frame_buffering,
            num_ref_frames,
            max_frame_num,
        }
    }

    pub fn len(&self) -> usize {
        self.frame_stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frame_stores.is_empty()
    }

    fn is_full(&self) -> bool {
        self.frame_stores.len() >= self.max_dec_frame_buffering
    }

    /// `FrameNumWrap` (eq. 8-29): the frame_num of a stored picture,
    /// unwrapped relative to the current picture's frame_num.
    fn frame_num_wrap(&self, frame_num: u32, current_frame_num: u32) -> i64 {
        if frame_num as i64 > current_frame_num as i64 {
            frame_num as i64 - self.max_frame_num as i64
        } else {
            frame_num as i64
        }
    }

    fn pic_num(&self, picture: &Picture<P>, current_frame_num: u32) -> i64 {
        self.frame_num_wrap(picture.frame_num, current_frame_num)
    }

    /// Removes frame stores that are neither held for reference nor pending
    /// output: step 1 of the "add a completed picture" sequence.
    fn remove_unneeded(&mut self) {
        self.frame_stores
            .retain(|p| p.reference != ReferenceMark::NotUsed || p.output_needed);
    }

    /// Outputs the picture with the smallest POC whose `output_needed` is
    /// still set, clearing the flag and dropping the frame store if it is
    /// also unused for reference.
    pub fn bump(&mut self) -> Option<Picture<P>>
    where
        P: Clone,
    {
        let idx = self
            .frame_stores
            .iter()
            .enumerate()
            .filter(|(_, p)| p.output_needed)
            .min_by_key(|(_, p)| p.pic_order_cnt)
            .map(|(i, _)| i)?;

        let out = self.frame_stores[idx].clone();
        self.frame_stores[idx].output_needed = false;
        if self.frame_stores[idx].reference == ReferenceMark::NotUsed {
            self.frame_stores.remove(idx);
        }
        Some(out)
    }

    /// Bumps pictures until the buffer has room, or fails if nothing left
    /// to bump (every remaining frame store is a needed reference).
    fn make_room(&mut self) -> Result<Vec<Picture<P>>>
    where
        P: Clone,
    {
        let mut bumped = Vec::new();
        while self.is_full() {
            match self.bump() {
                Some(p) => bumped.push(p),
                None => {
                    return Err(DpbError::BufferOverflow {
                        capacity: self.max_dec_frame_buffering,
                    })
                }
            }
        }
        Ok(bumped)
    }

    /// Adds a newly decoded picture to the DPB, per §4.12: references are
    /// stored and bumped for only when the buffer is full; non-reference
    /// pictures with `output_needed` set are handed straight back for
    /// output when no buffered picture would display earlier.
    pub fn add_picture(&mut self, picture: Picture<P>) -> Result<Vec<Picture<P>>>
    where
        P: Clone,
    {
        self.remove_unneeded();

        if picture.reference != ReferenceMark::NotUsed {
            let bumped = self.make_room()?;
            self.frame_stores.push(picture);
            Ok(bumped)
        } else if picture.output_needed {
            let smaller_pending = self
                .frame_stores
                .iter()
                .any(|p| p.output_needed && p.pic_order_cnt < picture.pic_order_cnt);
            if !smaller_pending {
                Ok(vec![picture])
            } else {
                let bumped = self.make_room()?;
                self.frame_stores.push(picture);
                Ok(bumped)
            }
        } else {
            Ok(Vec::new())
        }
    }

    /// Applies sliding-window marking (§8.2.5.3): while the reference count
    /// is at least `num_ref_frames`, unmark the short-term picture with the
    /// smallest `FrameNumWrap`.
    pub fn sliding_window_marking(&mut self, current_frame_num: u32) {
        loop {
            let ref_count = self
                .frame_stores
                .iter()
                .filter(|p| p.reference != ReferenceMark::NotUsed)
                .count();
            if ref_count < self.num_ref_frames {
                break;
            }
            let victim = self
                .frame_stores
                .iter()
                .enumerate()
                .filter(|(_, p)| p.reference == ReferenceMark::ShortTerm)
                .min_by_key(|(_, p)| self.frame_num_wrap(p.frame_num, current_frame_num))
                .map(|(i, _)| i);
            match victim {
                Some(idx) => self.frame_stores[idx].reference = ReferenceMark::NotUsed,
                None => break,
            }
        }
    }

    /// Applies the `dec_ref_pic_marking()` adaptive memory-management
    /// control operations (§8.2.5.4, operations 1-6) against the just
    /// decoded `current`, which has not yet been inserted into the frame
    /// store list. Returns whether operation 5 fired, in which case the
    /// caller must reset `frame_num`/POC for the current picture and treat
    /// this as a draining point (§4.12).
    pub fn apply_adaptive_marking(
        &mut self,
        current: &mut Picture<P>,
        marking: &DecRefPicMarking,
        current_frame_num: u32,
    ) -> bool {
        let mut mmco5 = false;
        for &(op, arg0, long_term_idx) in &marking.mmco_operations {
            match op {
                1 => {
                    let pic_num_x = self.cur_pic_num(current_frame_num) - (arg0 as i64 + 1);
                    for p in self.frame_stores.iter_mut() {
                        if p.reference == ReferenceMark::ShortTerm
                            && self.pic_num(p, current_frame_num) == pic_num_x
                        {
                            p.reference = ReferenceMark::NotUsed;
                        }
                    }
                }
                2 => {
                    for p in self.frame_stores.iter_mut() {
                        if p.reference == ReferenceMark::LongTerm
                            && p.long_term_frame_idx == Some(arg0)
                        {
                            p.reference = ReferenceMark::NotUsed;
                        }
                    }
                }
                3 => {
                    let pic_num_x = self.cur_pic_num(current_frame_num) - (arg0 as i64 + 1);
                    for p in self.frame_stores.iter_mut() {
                        if p.long_term_frame_idx == Some(long_term_idx) {
                            p.reference = ReferenceMark::NotUsed;
                            p.long_term_frame_idx = None;
                        }
                    }
                    for p in self.frame_stores.iter_mut() {
                        if p.reference == ReferenceMark::ShortTerm
                            && self.pic_num(p, current_frame_num) == pic_num_x
                        {
                            p.reference = ReferenceMark::LongTerm;
                            p.long_term_frame_idx = Some(long_term_idx);
                        }
                    }
                }
                4 => {
                    // max_long_term_frame_idx_plus1 - 1; anything beyond is evicted.
                    let max_idx = arg0;
                    for p in self.frame_stores.iter_mut() {
                        if p.reference == ReferenceMark::LongTerm
                            && p.long_term_frame_idx.is_some_and(|i| i > max_idx)
                        {
                            p.reference = ReferenceMark::NotUsed;
                        }
                    }
                }
                5 => {
                    for p in self.frame_stores.iter_mut() {
                        p.reference = ReferenceMark::NotUsed;
                    }
                    mmco5 = true;
                }
                6 => {
                    for p in self.frame_stores.iter_mut() {
                        if p.long_term_frame_idx == Some(long_term_idx) {
                            p.reference = ReferenceMark::NotUsed;
                            p.long_term_frame_idx = None;
                        }
                    }
                    current.reference = ReferenceMark::LongTerm;
                    current.long_term_frame_idx = Some(long_term_idx);
                }
                _ => {
                    tracing::warn!(op, "unrecognized MMCO operation, ignoring");
                }
            }
        }
        if mmco5 {
            tracing::debug!("MMCO 5: all reference pictures marked unused, draining DPB");
        }
        mmco5
    }

    /// Marks `current` long-term at index 0, the IDR shortcut in place of
    /// full `dec_ref_pic_marking()` (§8.2.5.1, `long_term_reference_flag`).
    pub fn mark_idr_long_term(&mut self, current: &mut Picture<P>) {
        current.reference = ReferenceMark::LongTerm;
        current.long_term_frame_idx = Some(0);
    }

    fn cur_pic_num(&self, current_frame_num: u32) -> i64 {
        current_frame_num as i64
    }

    /// RefPicList0 for a P slice (§8.2.4.2.1): short-term by descending
    /// `PicNum`, then long-term by ascending `LongTermPicNum`.
    pub fn ref_pic_list_p(&self, current_frame_num: u32) -> Vec<&Picture<P>> {
        let mut short: Vec<&Picture<P>> = self
            .frame_stores
            .iter()
            .filter(|p| p.reference == ReferenceMark::ShortTerm)
            .collect();
        short.sort_by_key(|p| std::cmp::Reverse(self.frame_num_wrap(p.frame_num, current_frame_num)));

        let mut long: Vec<&Picture<P>> = self
            .frame_stores
            .iter()
            .filter(|p| p.reference == ReferenceMark::LongTerm)
            .collect();
        long.sort_by_key(|p| p.long_term_frame_idx.unwrap_or(u32::MAX));

        short.into_iter().chain(long).collect()
    }

    /// RefPicList0/RefPicList1 for a B slice (§8.2.4.2.3/.2.4), including
    /// the final swap of the first two L1 entries when the initial lists
    /// are identical and have more than one entry.
    pub fn ref_pic_list_b(&self, current_poc: PicOrderCnt) -> (Vec<&Picture<P>>, Vec<&Picture<P>>) {
        let mut long: Vec<&Picture<P>> = self
            .frame_stores
            .iter()
            .filter(|p| p.reference == ReferenceMark::LongTerm)
            .collect();
        long.sort_by_key(|p| p.long_term_frame_idx.unwrap_or(u32::MAX));

        let mut before: Vec<&Picture<P>> = self
            .frame_stores
            .iter()
            .filter(|p| p.reference == ReferenceMark::ShortTerm && p.pic_order_cnt < current_poc)
            .collect();
        before.sort_by_key(|p| std::cmp::Reverse(p.pic_order_cnt));

        let mut after: Vec<&Picture<P>> = self
            .frame_stores
            .iter()
            .filter(|p| p.reference == ReferenceMark::ShortTerm && p.pic_order_cnt >= current_poc)
            .collect();
        after.sort_by_key(|p| p.pic_order_cnt);

        let mut l0 = before;
        l0.extend(after);
        l0.extend(long.iter().copied());

        let mut strictly_after: Vec<&Picture<P>> = self
            .frame_stores
            .iter()
            .filter(|p| p.reference == ReferenceMark::ShortTerm && p.pic_order_cnt > current_poc)
            .collect();
        strictly_after.sort_by_key(|p| p.pic_order_cnt);

        let mut before_or_equal: Vec<&Picture<P>> = self
            .frame_stores
            .iter()
            .filter(|p| p.reference == ReferenceMark::ShortTerm && p.pic_order_cnt <= current_poc)
            .collect();
        before_or_equal.sort_by_key(|p| std::cmp::Reverse(p.pic_order_cnt));

        let mut l1 = strictly_after;
        l1.extend(before_or_equal);
        l1.extend(long);

        if l0.len() > 1 && l0.iter().map(|p| p.frame_num).eq(l1.iter().map(|p| p.frame_num)) {
            l1.swap(0, 1);
        }

        (l0, l1)
    }

    /// Bumps every remaining output-pending picture, in output order, and
    /// clears the buffer; used at end of stream and on an IDR/MMCO-5
    /// draining point.
    pub fn flush(&mut self) -> Vec<Picture<P>>
    where
        P: Clone,
    {
        let mut out = Vec::new();
        while let Some(p) = self.bump() {
            out.push(p);
        }
        self.frame_stores.clear();
        out
    }
}
