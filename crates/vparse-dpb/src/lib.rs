//! Per-codec reference-picture management for vparse (component C13):
//! H.264/H.265 decoded picture buffers, the MPEG-2/VC-1 reorder queue, and
//! the VP8/VP9 fixed-slot reference model. Each parser crate owns its own
//! picture-descriptor fields; this crate owns only the bookkeeping that
//! decides what stays resident, what gets marked unused, and in what order
//! completed pictures are handed back for output.

pub mod error;
pub mod h264;
pub mod h265;
pub mod mpeg2;
pub mod slots;

pub use error::{DpbError, Result};
