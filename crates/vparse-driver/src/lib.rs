//! Decode-unit orchestration (component C14): splits a raw elementary
//! stream into NAL units / start-code units / frames as appropriate for
//! each codec, tracks the parameter sets and reference state each one
//! needs, and assembles the result into complete pictures. This is the
//! layer that ties the bit-level parsers in `vparse-avc`, `vparse-hevc`,
//! `vparse-mpeg2`, `vparse-vp8`, `vparse-vp9`, `vparse-vc1`, and
//! `vparse-jpeg` to the reference-management bookkeeping in
//! `vparse-dpb`.

pub mod avc;
pub mod error;
pub mod hevc;
pub mod jpeg;
pub mod mpeg2;
pub mod registry;
pub mod vc1;
pub mod vp8;
pub mod vp9;

pub use error::{DriverError, Result};
pub use registry::{create, known_codecs, Driver};
