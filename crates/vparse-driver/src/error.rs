//! Error type for the decode-unit drivers (component C14).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Avc(#[from] vparse_avc::error::AvcError),

    #[error(transparent)]
    Hevc(#[from] vparse_hevc::error::HevcError),

    #[error(transparent)]
    Mpeg2(#[from] vparse_mpeg2::error::Mpeg2Error),

    #[error(transparent)]
    Vp8(#[from] vparse_vp8::error::Vp8Error),

    #[error(transparent)]
    Vp9(#[from] vparse_vp9::error::Vp9Error),

    #[error(transparent)]
    Vc1(#[from] vparse_vc1::error::Vc1Error),

    #[error(transparent)]
    Jpeg(#[from] vparse_jpeg::error::JpegError),

    #[error(transparent)]
    Dpb(#[from] vparse_dpb::DpbError),

    #[error("no decode unit produced any output")]
    Empty,

    #[error("unknown codec identifier: {0}")]
    UnknownCodec(String),
}

pub type Result<T> = std::result::Result<T, DriverError>;
