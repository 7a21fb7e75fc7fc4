pub mod dump;
pub mod info;
pub mod validate;

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use crate::Codec;

pub fn read_input(file: &Path) -> Result<Vec<u8>> {
    std::fs::read(file).with_context(|| format!("failed to read {}", file.display()))
}

/// One decoded unit's worth of summary fields, common across codecs, for
/// `info`'s one-line-per-picture output.
#[derive(Serialize)]
pub struct PictureSummary {
    pub index: usize,
    pub kind: String,
    pub detail: String,
}

/// Parses `data` for the given codec and returns one [`PictureSummary`]
/// per picture/frame found. Shared by `info` and `validate` so both
/// commands exercise exactly the same driver code path.
pub fn summarize(codec: Codec, data: &[u8]) -> Result<Vec<PictureSummary>> {
    let summaries = match codec {
        Codec::Avc => {
            let mut driver = vparse_driver::avc::AvcDriver::new();
            let mut pictures = driver.push(data)?;
            pictures.extend(driver.flush());
            pictures
                .into_iter()
                .enumerate()
                .map(|(index, picture)| PictureSummary {
                    index,
                    kind: if picture.is_idr { "IDR".into() } else { "non-IDR".into() },
                    detail: format!(
                        "frame_num={} slices={} nal_ref_idc={}",
                        picture.slices.first().map(|s| s.frame_num).unwrap_or(0),
                        picture.slices.len(),
                        picture.nal_ref_idc
                    ),
                })
                .collect()
        }
        Codec::Hevc => {
            let mut driver = vparse_driver::hevc::HevcDriver::new();
            let mut pictures = driver.push(data)?;
            pictures.extend(driver.flush());
            pictures
                .into_iter()
                .enumerate()
                .map(|(index, picture)| PictureSummary {
                    index,
                    kind: format!("{:?}", picture.nal_type),
                    detail: format!("slices={}", picture.slices.len()),
                })
                .collect()
        }
        Codec::Mpeg2 => {
            let (_stream, pictures) = vparse_driver::mpeg2::decode_stream(data)?;
            pictures
                .into_iter()
                .enumerate()
                .map(|(index, picture)| PictureSummary {
                    index,
                    kind: format!("{:?}", picture.header.picture_coding_type),
                    detail: format!("temporal_reference={}", picture.temporal_reference),
                })
                .collect()
        }
        Codec::Vp8 => {
            let mut driver = vparse_driver::vp8::Vp8Driver::new();
            let frame = driver.decode(data, 0)?;
            vec![PictureSummary {
                index: 0,
                kind: format!("{:?}", frame.uncompressed_header.frame_kind),
                detail: format!("show_frame={}", frame.uncompressed_header.show_frame),
            }]
        }
        Codec::Vp9 => {
            let mut driver = vparse_driver::vp9::Vp9Driver::new();
            let stream = driver.decode(data)?;
            stream
                .frames
                .into_iter()
                .enumerate()
                .map(|(index, frame)| PictureSummary {
                    index,
                    kind: format!("{:?}", frame.frame_type),
                    detail: format!("{}x{}", frame.width, frame.height),
                })
                .collect()
        }
        Codec::Vc1 => {
            let mut driver = vparse_driver::vc1::Vc1Driver::new();
            let mut pictures = Vec::new();
            if let Some(displaced) = driver.decode(data, 0)? {
                pictures.push(displaced);
            }
            pictures.extend(driver.flush());
            pictures
                .into_iter()
                .enumerate()
                .map(|(index, frame)| PictureSummary {
                    index,
                    kind: format!("{:?}", frame.picture_header.frame_type),
                    detail: format!("timestamp={}", frame.timestamp),
                })
                .collect()
        }
        Codec::Jpeg => {
            let stream = vparse_driver::jpeg::decode(data)?;
            vec![PictureSummary {
                index: 0,
                kind: "baseline".into(),
                detail: format!("scans={}", stream.scan_headers.len()),
            }]
        }
    };
    Ok(summaries)
}
