//! VP8 reference-frame role tracking and the key-frame gate (§4.7 "State
//! carry", §8 "VP8 key-frame gate").

use crate::error::{Result, Vp8Error};
use crate::frame_header::{CompressedHeader, CopyBuffer, FrameKind};
use serde::{Deserialize, Serialize};

/// Which of the three reference roles a decoded picture occupies. VP8 has
/// no DPB in the H.264/H.265 sense: each role always points at exactly one
/// picture (or none, before the first key frame).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceSlots {
    pub last: Option<usize>,
    pub golden: Option<usize>,
    pub alt: Option<usize>,
}

impl Default for ReferenceSlots {
    fn default() -> Self {
        Self {
            last: None,
            golden: None,
            alt: None,
        }
    }
}

/// Tracks whether a key frame has been observed and rotates the three
/// reference roles (last/golden/alt) frame by frame.
#[derive(Debug, Clone, Default)]
pub struct ReferenceState {
    pub slots: ReferenceSlots,
    pub seen_keyframe: bool,
}

impl ReferenceState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the key-frame gate and then rotates reference roles
    /// according to `header`'s refresh/copy flags, assigning `picture_id`
    /// to whichever roles this frame refreshes.
    pub fn advance(&mut self, frame_kind: FrameKind, header: &CompressedHeader, picture_id: usize) -> Result<()> {
        if frame_kind == FrameKind::Inter && !self.seen_keyframe {
            return Err(Vp8Error::MissingKeyframe);
        }

        if frame_kind == FrameKind::Key {
            self.slots = ReferenceSlots {
                last: Some(picture_id),
                golden: Some(picture_id),
                alt: Some(picture_id),
            };
            self.seen_keyframe = true;
            return Ok(());
        }

        if header.refresh_alternate_frame {
            self.slots.alt = Some(picture_id);
        } else {
            match header.copy_buffer_to_alternate {
                CopyBuffer::FromLast => self.slots.alt = self.slots.last,
                CopyBuffer::FromAltOrGolden => self.slots.alt = self.slots.golden,
                CopyBuffer::None => {}
            }
        }

        if header.refresh_golden_frame {
            self.slots.golden = Some(picture_id);
        } else {
            match header.copy_buffer_to_golden {
                CopyBuffer::FromLast => self.slots.golden = self.slots.last,
                CopyBuffer::FromAltOrGolden => self.slots.golden = self.slots.alt,
                CopyBuffer::None => {}
            }
        }

        if header.refresh_last {
            self.slots.last = Some(picture_id);
        }

        Ok(())
    }
}
