//! VC-1 advanced-profile entry-point header parsing (Table 265, spec §4.9).

use crate::error::Result;
use crate::sequence::SequenceHeader;
use serde::{Deserialize, Serialize};
use vparse_core::BitReader;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryPointHeader {
    pub broken_link: bool,
    pub closed_entry: bool,
    pub panscan_flag: bool,
    pub reference_distance_flag: bool,
    pub loopfilter: bool,
    pub fastuvmc: bool,
    pub extended_mv: bool,
    pub dquant: u8,
    pub variable_sized_transform_flag: bool,
    pub overlap: bool,
    pub quantizer: u8,
    pub coded_size_flag: bool,
    pub coded_width: u16,
    pub coded_height: u16,
    pub extended_dmv_flag: bool,
    pub range_mapy_flag: bool,
    pub range_mapy: u8,
    pub range_mapuv_flag: bool,
    pub range_mapuv: u8,
}

/// Parses an entry-point header, mutating `seq_hdr.coded_width/height` if
/// the entry point overrides them (mirrors the original parser, which
/// writes the override straight back into the sequence-header state it
/// holds alongside the entry point).
pub fn parse_entry_point_header(data: &[u8], seq_hdr: &mut SequenceHeader) -> Result<EntryPointHeader> {
    let mut br = BitReader::new(data);
    let mut hdr = EntryPointHeader {
        broken_link: br.read_flag()?,
        closed_entry: br.read_flag()?,
        panscan_flag: br.read_flag()?,
        reference_distance_flag: br.read_flag()?,
        loopfilter: br.read_flag()?,
        fastuvmc: br.read_flag()?,
        extended_mv: br.read_flag()?,
        dquant: br.read_bits(2)? as u8,
        variable_sized_transform_flag: br.read_flag()?,
        overlap: br.read_flag()?,
        quantizer: br.read_bits(2)? as u8,
        ..Default::default()
    };

    if seq_hdr.hrd_param_flag {
        for _ in 0..seq_hdr.hrd_param.hrd_num_leaky_buckets {
            br.skip_bits(8)?;
        }
    }

    hdr.coded_size_flag = br.read_flag()?;
    if hdr.coded_size_flag {
        hdr.coded_width = ((br.read_bits(12)? + 1) << 1) as u16;
        hdr.coded_height = ((br.read_bits(12)? + 1) << 1) as u16;
        seq_hdr.coded_width = hdr.coded_width;
        seq_hdr.coded_height = hdr.coded_height;
    }

    if hdr.extended_mv {
        hdr.extended_dmv_flag = br.read_flag()?;
    }

    hdr.range_mapy_flag = br.read_flag()?;
    if hdr.range_mapy_flag {
        hdr.range_mapy = br.read_bits(3)? as u8;
    }
    hdr.range_mapuv_flag = br.read_flag()?;
    if hdr.range_mapy_flag {
        hdr.range_mapuv = br.read_bits(3)? as u8;
    }

    Ok(hdr)
}
