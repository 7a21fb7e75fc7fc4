//! The fixed-size named-slot reference model shared by VP8 (3 slots:
//! last/golden/altref) and VP9 (8 numbered slots), per spec §4.12: rather
//! than a general DPB, these codecs overwrite a small array of reference
//! slots directly, so this module is a uniform lookup table instead of a
//! bump/eviction policy.

use crate::error::{DpbError, Result};

/// A single occupied reference slot.
#[derive(Debug, Clone)]
pub struct Slot<P> {
    pub picture_id: u64,
    pub width: u32,
    pub height: u32,
    pub payload: P,
}

impl<P> Slot<P> {
    pub fn new(picture_id: u64, width: u32, height: u32, payload: P) -> Self {
        Self {
            picture_id,
            width,
            height,
            payload,
        }
    }
}

/// `N` fixed reference slots, indexed 0..N. VP8 uses [`Vp8Slots`] (3 named
/// slots); VP9 uses [`Vp9Slots`] (8 numbered slots, refreshed via an
/// 8-bit `refresh_frame_flags` mask).
pub struct SlotTable<const N: usize, P> {
    slots: [Option<Slot<P>>; N],
}

impl<const N: usize, P> SlotTable<N, P> {
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
        }
    }

    pub fn capacity(&self) -> usize {
        N
    }

    pub fn get(&self, index: usize) -> Option<&Slot<P>> {
        self.slots.get(index).and_then(|s| s.as_ref())
    }

    pub fn set(&mut self, index: usize, slot: Slot<P>) -> Result<()> {
        if index >= N {
            return Err(DpbError::SlotOutOfRange {
                index,
                capacity: N,
            });
        }
        tracing::debug!(index, picture_id = slot.picture_id, "reference slot updated");
        self.slots[index] = Some(slot);
        Ok(())
    }

    /// Refreshes every slot named by a VP8/VP9-style bitmask, where bit `i`
    /// set means "slot `i` now holds the current picture". The slot data
    /// itself (dimensions, payload) is identical across refreshed slots,
    /// matching the hardware convention of copying one decoded surface
    /// into several reference slots at once.
    pub fn refresh(&mut self, mask: u32, make_slot: impl Fn() -> Slot<P>) -> Result<()> {
        for index in 0..N {
            if mask & (1 << index) != 0 {
                self.set(index, make_slot())?;
            }
        }
        Ok(())
    }

    /// Returns the slots read by the given indices, skipping any that are
    /// still empty (e.g. before the first key frame).
    pub fn slots_read_by(&self, indices: &[usize]) -> Vec<&Slot<P>> {
        indices.iter().filter_map(|&i| self.get(i)).collect()
    }
}

impl<const N: usize, P> Default for SlotTable<N, P> {
    fn default() -> Self {
        Self::new()
    }
}

pub const VP8_LAST: usize = 0;
pub const VP8_GOLDEN: usize = 1;
pub const VP8_ALTREF: usize = 2;

pub type Vp8Slots<P> = SlotTable<3, P>;
pub type Vp9Slots<P> = SlotTable<8, P>;
