//! JPEG marker, segment and table descriptor types (spec §4.11).

use serde::{Deserialize, Serialize};

pub const MAX_COMPS_IN_SCAN: usize = 4;
pub const NUM_QUANT_TBLS: usize = 4;
pub const NUM_HUFF_TBLS: usize = 4;
pub const NUM_ARITH_TBLS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Marker {
    Sof0,
    Sof1,
    Sof2,
    Sof3,
    Sof5,
    Sof6,
    Sof7,
    Jpg,
    Sof9,
    Sof10,
    Sof11,
    Sof13,
    Sof14,
    Sof15,
    Dht,
    Dac,
    Rst(u8),
    Soi,
    Eoi,
    Sos,
    Dqt,
    Dnl,
    Dri,
    App(u8),
    Com,
    Other(u8),
}

impl Marker {
    pub fn from_byte(b: u8) -> Self {
        match b {
            0xC0 => Marker::Sof0,
            0xC1 => Marker::Sof1,
            0xC2 => Marker::Sof2,
            0xC3 => Marker::Sof3,
            0xC4 => Marker::Dht,
            0xC5 => Marker::Sof5,
            0xC6 => Marker::Sof6,
            0xC7 => Marker::Sof7,
            0xC8 => Marker::Jpg,
            0xC9 => Marker::Sof9,
            0xCA => Marker::Sof10,
            0xCB => Marker::Sof11,
            0xCC => Marker::Dac,
            0xCD => Marker::Sof13,
            0xCE => Marker::Sof14,
            0xCF => Marker::Sof15,
            0xD0..=0xD7 => Marker::Rst(b - 0xD0),
            0xD8 => Marker::Soi,
            0xD9 => Marker::Eoi,
            0xDA => Marker::Sos,
            0xDB => Marker::Dqt,
            0xDC => Marker::Dnl,
            0xDD => Marker::Dri,
            0xE0..=0xEF => Marker::App(b - 0xE0),
            0xFE => Marker::Com,
            other => Marker::Other(other),
        }
    }

    pub fn is_restart(self) -> bool {
        matches!(self, Marker::Rst(_))
    }

    /// SOFn markers this parser can decode (baseline, extended sequential,
    /// and progressive, all Huffman-coded). SOF3/5/6/7/9/10/11/13/14/15 are
    /// lossless, differential, or arithmetic-coded variants this parser
    /// deliberately does not support (spec's JPEG Non-goals).
    pub fn sof_kind(self) -> Option<(bool, bool, bool)> {
        match self {
            Marker::Sof0 => Some((true, false, false)),
            Marker::Sof1 => Some((false, false, false)),
            Marker::Sof2 => Some((false, true, false)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuantTable {
    pub precision: u8,
    /// Zig-zag-ordered coefficients, matching on-the-wire DQT storage.
    pub values: [u16; 64],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HuffTable {
    /// `code_lengths[i]` is the number of codes of length `i + 1`.
    pub code_lengths: [u8; 16],
    pub values: Vec<u8>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Component {
    pub id: u8,
    pub index: usize,
    pub h_sample_factor: u8,
    pub v_sample_factor: u8,
    pub quant_table_number: u8,
    pub dc_table_number: u8,
    pub ac_table_number: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameHeader {
    pub is_baseline: bool,
    pub is_progressive: bool,
    pub is_arithmetic: bool,
    pub data_precision: u8,
    pub image_height: u16,
    pub image_width: u16,
    pub max_h_sample_factor: u8,
    pub max_v_sample_factor: u8,
    pub components: Vec<Component>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScanComponent {
    pub component_index: usize,
    pub dc_table_number: u8,
    pub ac_table_number: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanHeader {
    pub components: Vec<ScanComponent>,
    pub spectral_start: u8,
    pub spectral_end: u8,
    pub successive_approx_high: u8,
    pub successive_approx_low: u8,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Segment {
    pub marker: u8,
    pub position: usize,
    pub length: usize,
}
