//! VP8 decode-unit driver: thin adapter over [`vparse_vp8::Vp8Parser`]
//! that mirrors its 3-slot reference state into
//! [`vparse_dpb::slots::Vp8Slots`] using the refresh flags each frame
//! header carries.

use vparse_dpb::slots::{Slot, Vp8Slots, VP8_ALTREF, VP8_GOLDEN, VP8_LAST};
use vparse_vp8::{Vp8Frame, Vp8Parser};

use crate::error::Result;

pub struct Vp8Driver {
    parser: Vp8Parser,
    slots: Vp8Slots<u64>,
    next_picture_id: u64,
}

impl Default for Vp8Driver {
    fn default() -> Self {
        Self {
            parser: Vp8Parser::new(),
            slots: Vp8Slots::new(),
            next_picture_id: 0,
        }
    }
}

impl Vp8Driver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slots(&self) -> &Vp8Slots<u64> {
        &self.slots
    }

    /// Decodes one VP8 frame and updates the reference slots named by the
    /// uncompressed header's refresh flags.
    pub fn decode(&mut self, data: &[u8], timestamp: i64) -> Result<Vp8Frame> {
        let frame = self.parser.decode(data, timestamp)?;
        let picture_id = self.next_picture_id;
        self.next_picture_id += 1;

        let (width, height) = self
            .parser
            .current_dimensions()
            .map(|(w, h)| (w as u32, h as u32))
            .unwrap_or((0, 0));
        let header = &frame.compressed_header;
        let refreshed = [
            (header.refresh_last, VP8_LAST),
            (header.refresh_golden_frame, VP8_GOLDEN),
            (header.refresh_alternate_frame, VP8_ALTREF),
        ];
        for (refresh, index) in refreshed {
            if refresh {
                self.slots
                    .set(index, Slot::new(picture_id, width, height, picture_id))?;
            }
        }
        Ok(frame)
    }
}
