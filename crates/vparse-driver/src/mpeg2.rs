//! MPEG-2 decode-unit driver. MPEG-2's start-code-delimited syntax is
//! already fully picture-structured by [`vparse_mpeg2::parse_mpeg2`]; this
//! module only adapts its output into the reorder queue from
//! `vparse_dpb::mpeg2`.

use vparse_dpb::mpeg2::{Picture, ReorderQueue};
use vparse_mpeg2::{parse_mpeg2, Mpeg2Stream, ParsedPicture, PictureType};

use crate::error::Result;

/// Parses a complete MPEG-2 elementary stream and returns its pictures in
/// output order, draining the reorder queue at the end.
pub fn decode_stream(data: &[u8]) -> Result<(Mpeg2Stream, Vec<ParsedPicture>)> {
    let stream = parse_mpeg2(data)?;
    let mut queue: ReorderQueue<ParsedPicture> = ReorderQueue::new();
    let mut output = Vec::with_capacity(stream.pictures.len());

    for picture in stream.pictures.iter().cloned() {
        let is_reference = !matches!(picture.header.picture_coding_type, PictureType::B);
        let entry = if is_reference {
            Picture::reference(picture)
        } else {
            Picture::non_reference(picture)
        };
        if let Some(displaced) = queue.push(entry) {
            output.push(displaced.payload);
        }
    }
    while let Some(displaced) = queue.flush() {
        output.push(displaced.payload);
    }

    Ok((stream, output))
}

/// Registry-facing handle for MPEG-2. The codec's start-code-delimited
/// syntax carries no cross-call state of its own (every `decode` call
/// parses one complete elementary stream), so this wraps
/// [`decode_stream`] only so `video/mpeg2` resolves through
/// [`crate::registry::create`] like every other codec.
#[derive(Default)]
pub struct Mpeg2Driver;

impl Mpeg2Driver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decode(&mut self, data: &[u8]) -> Result<(Mpeg2Stream, Vec<ParsedPicture>)> {
        decode_stream(data)
    }
}
