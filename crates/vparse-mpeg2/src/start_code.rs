//! MPEG-2 Video start code detection and classification.

use serde::{Deserialize, Serialize};

/// MPEG-2 start code types, classified from the byte following `0x000001`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartCodeType {
    /// Picture start code (0x00).
    Picture,
    /// Slice start codes (0x01-0xAF); payload is the macroblock row + 1.
    Slice(u8),
    /// Reserved (0xB0).
    Reserved0,
    /// Reserved (0xB1).
    Reserved1,
    /// User data start code (0xB2).
    UserData,
    /// Sequence header start code (0xB3).
    SequenceHeader,
    /// Sequence error start code (0xB4).
    SequenceError,
    /// Extension start code (0xB5); sub-type selected by the next nibble.
    Extension,
    /// Reserved (0xB6).
    Reserved6,
    /// Sequence end code (0xB7).
    SequenceEnd,
    /// Group of pictures start code (0xB8).
    GroupOfPictures,
    /// System start codes (0xB9-0xFF), owned by the transport layer.
    System(u8),
}

impl StartCodeType {
    /// Classifies the byte following the `0x000001` prefix.
    pub fn from_u8(value: u8) -> Self {
        match value {
            0x00 => StartCodeType::Picture,
            0x01..=0xAF => StartCodeType::Slice(value),
            0xB0 => StartCodeType::Reserved0,
            0xB1 => StartCodeType::Reserved1,
            0xB2 => StartCodeType::UserData,
            0xB3 => StartCodeType::SequenceHeader,
            0xB4 => StartCodeType::SequenceError,
            0xB5 => StartCodeType::Extension,
            0xB6 => StartCodeType::Reserved6,
            0xB7 => StartCodeType::SequenceEnd,
            0xB8 => StartCodeType::GroupOfPictures,
            _ => StartCodeType::System(value),
        }
    }

    /// Human-readable name, used by diagnostics and the CLI harness.
    pub fn name(&self) -> &'static str {
        match self {
            StartCodeType::Picture => "Picture",
            StartCodeType::Slice(_) => "Slice",
            StartCodeType::Reserved0 | StartCodeType::Reserved1 | StartCodeType::Reserved6 => {
                "Reserved"
            }
            StartCodeType::UserData => "User Data",
            StartCodeType::SequenceHeader => "Sequence Header",
            StartCodeType::SequenceError => "Sequence Error",
            StartCodeType::Extension => "Extension",
            StartCodeType::SequenceEnd => "Sequence End",
            StartCodeType::GroupOfPictures => "GOP",
            StartCodeType::System(_) => "System",
        }
    }

    /// Macroblock row (0-based) encoded by a slice start code, before any
    /// `slice_vertical_position_extension` is folded in.
    pub fn slice_row(&self) -> Option<u8> {
        match self {
            StartCodeType::Slice(v) => Some(v - 1),
            _ => None,
        }
    }
}

/// The 4-bit extension_start_code_identifier values selecting an extension's
/// sub-type, carried immediately after the 0xB5 start code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtensionId {
    /// Sequence extension (1).
    Sequence,
    /// Sequence display extension (2).
    SequenceDisplay,
    /// Quantisation matrix extension (3).
    QuantMatrix,
    /// Copyright extension (4).
    Copyright,
    /// Sequence scalable extension (5).
    SequenceScalable,
    /// Picture display extension (7).
    PictureDisplay,
    /// Picture coding extension (8).
    PictureCoding,
    /// Picture spatial scalable extension (9).
    PictureSpatialScalable,
    /// Picture temporal scalable extension (10).
    PictureTemporalScalable,
    /// Unrecognized / reserved identifier.
    Reserved(u8),
}

impl ExtensionId {
    /// Classifies the 4-bit identifier nibble.
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => ExtensionId::Sequence,
            2 => ExtensionId::SequenceDisplay,
            3 => ExtensionId::QuantMatrix,
            4 => ExtensionId::Copyright,
            5 => ExtensionId::SequenceScalable,
            7 => ExtensionId::PictureDisplay,
            8 => ExtensionId::PictureCoding,
            9 => ExtensionId::PictureSpatialScalable,
            10 => ExtensionId::PictureTemporalScalable,
            other => ExtensionId::Reserved(other),
        }
    }
}

/// Parsed start code with its raw code-value byte.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartCode {
    /// Classified start code type.
    pub code_type: StartCodeType,
    /// Raw byte value (the byte after 0x000001).
    pub code_value: u8,
}

/// Find all start codes in an MPEG-2 bitstream.
///
/// Returns `(byte offset of the 0x00 0x00 0x01 prefix, StartCode)` pairs.
pub fn find_start_codes(data: &[u8]) -> Vec<(usize, StartCode)> {
    // Bounds the scan so a buffer with no start codes cannot hang the driver.
    const MAX_START_CODE_SCAN_DISTANCE: usize = 100 * 1024 * 1024;

    let mut codes = Vec::new();
    let mut i = 0;
    let mut last_code_pos = 0;

    while i + 3 < data.len() {
        if i > last_code_pos && i - last_code_pos > MAX_START_CODE_SCAN_DISTANCE {
            break;
        }

        if data[i] == 0x00 && data[i + 1] == 0x00 && data[i + 2] == 0x01 {
            let code_value = data[i + 3];
            codes.push((
                i,
                StartCode {
                    code_type: StartCodeType::from_u8(code_value),
                    code_value,
                },
            ));
            last_code_pos = i;
            i += 4;
        } else {
            i += 1;
        }
    }

    codes
}
