//! VC-1 decode-unit driver: adapts [`vparse_vc1::Vc1Parser`]'s
//! frame-at-a-time decoding onto the same reorder queue MPEG-2 uses
//! (spec §4.12: VC-1's simple/main profile and non-B-frame advanced
//! profile share MPEG-2's display-reorder behavior).

use vparse_dpb::mpeg2::{Vc1Picture, Vc1ReorderQueue};
use vparse_vc1::picture::FrameType;
use vparse_vc1::{Vc1Frame, Vc1Parser};

use crate::error::Result;

#[derive(Default)]
pub struct Vc1Driver {
    parser: Vc1Parser,
    queue: Vc1ReorderQueue<Vc1Frame>,
}

impl Vc1Driver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse_codec_data(&mut self, data: &[u8]) -> Result<()> {
        self.parser.parse_codec_data(data)?;
        Ok(())
    }

    /// Decodes one VC-1 frame and pushes it through the reorder queue,
    /// returning the frame displaced (if any): the frame just decoded for
    /// a B picture, or a previously held I/P frame once it is displaced.
    pub fn decode(&mut self, data: &[u8], timestamp: i64) -> Result<Option<Vc1Frame>> {
        let frame = self.parser.decode(data, timestamp)?;
        let is_reference = !matches!(
            frame.picture_header.frame_type,
            FrameType::B | FrameType::Bi
        );
        let entry = if is_reference {
            Vc1Picture::reference(frame)
        } else {
            Vc1Picture::non_reference(frame)
        };
        Ok(self.queue.push(entry).map(|p| p.payload))
    }

    pub fn flush(&mut self) -> Option<Vc1Frame> {
        self.queue.flush().map(|p| p.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn driver_flush_on_empty_queue_yields_none() {
        let mut driver = Vc1Driver::new();
        assert!(driver.flush().is_none());
    }
}
