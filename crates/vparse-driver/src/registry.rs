//! Maps a codec identifier string to the driver that understands it, in
//! the spirit of a small factory keyed by name rather than a match
//! statement scattered across call sites (cf. the C++ template factory
//! pattern of registering creators under a string key and looking them
//! up later).

use crate::avc::AvcDriver;
use crate::error::{DriverError, Result};
use crate::hevc::HevcDriver;
use crate::jpeg::JpegDriver;
use crate::mpeg2::Mpeg2Driver;
use crate::vc1::Vc1Driver;
use crate::vp8::Vp8Driver;
use crate::vp9::Vp9Driver;

/// The codec-specific driver constructed for a registered identifier.
/// Each variant owns its own parser/reference-model state; MPEG-2 and
/// JPEG carry no state across calls, so their variants wrap the
/// stateless [`crate::mpeg2::decode_stream`]/[`crate::jpeg::decode`]
/// functions rather than tracking anything of their own.
pub enum Driver {
    Avc(AvcDriver),
    Hevc(HevcDriver),
    Mpeg2(Mpeg2Driver),
    Vp8(Vp8Driver),
    Vp9(Vp9Driver),
    Vc1(Vc1Driver),
    Jpeg(JpegDriver),
}

/// Constructs a [`Driver`] for a MIME-type-style codec identifier
/// (`"video/avc"`, `"video/hevc"`, `"video/mpeg2"`, `"video/vp8"`,
/// `"video/vp9"`, `"video/vc1"`, `"image/jpeg"`). Returns
/// [`DriverError::UnknownCodec`] for anything else.
pub fn create(codec: &str) -> Result<Driver> {
    match codec {
        "video/avc" | "video/h264" => Ok(Driver::Avc(AvcDriver::new())),
        "video/hevc" | "video/h265" => Ok(Driver::Hevc(HevcDriver::new())),
        "video/mpeg2" => Ok(Driver::Mpeg2(Mpeg2Driver::new())),
        "video/vp8" => Ok(Driver::Vp8(Vp8Driver::new())),
        "video/vp9" => Ok(Driver::Vp9(Vp9Driver::new())),
        "video/vc1" => Ok(Driver::Vc1(Vc1Driver::new())),
        "image/jpeg" => Ok(Driver::Jpeg(JpegDriver::new())),
        other => Err(DriverError::UnknownCodec(other.to_string())),
    }
}

/// The codec identifiers [`create`] accepts.
pub fn known_codecs() -> &'static [&'static str] {
    &[
        "video/avc",
        "video/hevc",
        "video/mpeg2",
        "video/vp8",
        "video/vp9",
        "video/vc1",
        "image/jpeg",
    ]
}
