//! VP9 decode-unit driver: thin adapter over [`vparse_vp9::parse_vp9`]
//! that mirrors each frame's `refresh_frame_flags` into the 8-slot
//! reference model from `vparse_dpb::slots`.

use vparse_dpb::slots::{Slot, Vp9Slots};
use vparse_vp9::{parse_vp9, FrameHeader, Vp9Stream};

use crate::error::Result;

#[derive(Default)]
pub struct Vp9Driver {
    slots: Vp9Slots<u64>,
    next_picture_id: u64,
}

impl Vp9Driver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slots(&self) -> &Vp9Slots<u64> {
        &self.slots
    }

    /// Parses a complete VP9 bitstream (one or more frames, possibly
    /// wrapped in a superframe) and replays its frames through the slot
    /// table in order, returning the parsed stream unchanged.
    pub fn decode(&mut self, data: &[u8]) -> Result<Vp9Stream> {
        let stream = parse_vp9(data)?;
        for frame in &stream.frames {
            self.apply_refresh(frame)?;
        }
        Ok(stream)
    }

    fn apply_refresh(&mut self, frame: &FrameHeader) -> Result<()> {
        let picture_id = self.next_picture_id;
        self.next_picture_id += 1;
        let (width, height) = (frame.width, frame.height);
        self.slots.refresh(frame.refresh_frame_flags as u32, || {
            Slot::new(picture_id, width, height, picture_id)
        })?;
        Ok(())
    }
}
