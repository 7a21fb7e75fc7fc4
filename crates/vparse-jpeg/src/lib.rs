//! JPEG baseline/progressive bitstream parser for vparse.
//!
//! Scans a JFIF/EXIF byte stream marker by marker (component C11, spec
//! §4.11): quantization and Huffman tables, the single frame header, and
//! one scan header per scan, locating each scan's entropy-coded payload
//! without decoding it. Lossless, differential and arithmetic-coded SOF
//! variants are rejected as unsupported rather than silently mis-parsed.
//!
//! # Example
//!
//! ```ignore
//! use vparse_jpeg::parse_jpeg;
//!
//! let stream = parse_jpeg(&data)?;
//! let frame = stream.frame_header.unwrap();
//! println!("{}x{}", frame.image_width, frame.image_height);
//! ```

pub mod defaults;
pub mod error;
pub mod parser;
pub mod tables;

pub use error::{JpegError, Result};
pub use parser::{apply_annex_k_defaults, CallbackAction, JpegStream, ParseOutcome, Parser};
pub use tables::{Component, FrameHeader, HuffTable, Marker, QuantTable, ScanComponent, ScanHeader, Segment};

/// Parses a complete JPEG byte stream (from SOI through EOI), ignoring any
/// suspend requests: used when no callback that could `Suspend` is
/// registered. Use `Parser::new` directly to register callbacks.
pub fn parse_jpeg(data: &[u8]) -> Result<JpegStream> {
    let mut parser = Parser::new(data);
    loop {
        match parser.parse()? {
            ParseOutcome::Complete(stream) => return Ok(stream),
            ParseOutcome::Suspended => continue,
        }
    }
}
