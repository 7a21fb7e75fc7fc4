//! Parses a bitstream and prints its full structure as JSON. Each codec's
//! top-level parse function already produces a fully `serde`-serializable
//! tree, so this is a thin parse-then-print wrapper rather than a second
//! copy of the driver logic `info`/`validate` use.

use anyhow::Result;
use std::path::Path;

use super::read_input;
use crate::Codec;

pub fn run(file: &Path, codec: Codec) -> Result<()> {
    let data = read_input(file)?;
    let json = match codec {
        Codec::Avc => {
            let nal_units = vparse_avc::nal::parse_nal_units(&data)?;
            serde_json::to_string_pretty(&nal_units)?
        }
        Codec::Hevc => {
            let nal_units = vparse_hevc::nal::parse_nal_units(&data)?;
            serde_json::to_string_pretty(&nal_units)?
        }
        Codec::Mpeg2 => {
            let stream = vparse_mpeg2::parse_mpeg2(&data)?;
            serde_json::to_string_pretty(&stream)?
        }
        Codec::Vp8 => {
            let mut parser = vparse_vp8::Vp8Parser::new();
            let frame = parser.decode(&data, 0)?;
            serde_json::to_string_pretty(&frame)?
        }
        Codec::Vp9 => {
            let stream = vparse_vp9::parse_vp9(&data)?;
            serde_json::to_string_pretty(&stream)?
        }
        Codec::Vc1 => {
            let mut parser = vparse_vc1::Vc1Parser::new();
            parser.parse_codec_data(&data)?;
            serde_json::to_string_pretty(parser.sequence_header())?
        }
        Codec::Jpeg => {
            let stream = vparse_jpeg::parse_jpeg(&data)?;
            serde_json::to_string_pretty(&stream)?
        }
    };
    println!("{json}");
    Ok(())
}
