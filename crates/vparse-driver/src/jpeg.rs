//! JPEG decode-unit driver. JPEG has no multi-frame reference state to
//! track (each image is self-contained), so this is a direct pass-through
//! to [`vparse_jpeg::parse_jpeg`], kept here only so callers can reach
//! every codec through one `vparse_driver` surface.

use vparse_jpeg::{parse_jpeg, JpegStream};

use crate::error::Result;

pub fn decode(data: &[u8]) -> Result<JpegStream> {
    Ok(parse_jpeg(data)?)
}

/// Registry-facing handle for JPEG. Each image is self-contained, so
/// this wraps [`decode`] only so `image/jpeg` resolves through
/// [`crate::registry::create`] like every other codec.
#[derive(Default)]
pub struct JpegDriver;

impl JpegDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decode(&mut self, data: &[u8]) -> Result<JpegStream> {
        decode(data)
    }
}
