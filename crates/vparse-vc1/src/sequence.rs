//! VC-1 sequence header parsing (Table 263/264, spec §4.9).

use crate::error::Result;
use serde::{Deserialize, Serialize};
use vparse_core::BitReader;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Profile {
    Simple,
    Main,
    Advanced,
    Reserved,
}

impl Profile {
    fn from_bits(v: u32) -> Self {
        match v {
            0 => Profile::Simple,
            1 => Profile::Main,
            3 => Profile::Advanced,
            _ => Profile::Reserved,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HrdParam {
    pub hrd_num_leaky_buckets: u8,
    pub bit_rate_exponent: u8,
    pub buffer_size_exponent: u8,
    pub hrd_rate: Vec<u16>,
    pub hrd_buffer: Vec<u16>,
}

/// Sequence header, the union of STRUCT_C (simple/main) and the
/// advanced-profile sequence layer fields. Fields unused by a given
/// profile keep their default value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequenceHeader {
    pub profile: Profile,
    // simple/main (STRUCT_C)
    pub frmrtq_postproc: u8,
    pub bitrtq_postproc: u8,
    pub loop_filter: bool,
    pub multires: bool,
    pub fastuvmc: bool,
    pub extended_mv: bool,
    pub dquant: u8,
    pub variable_sized_transform_flag: bool,
    pub overlap: bool,
    pub syncmarker: bool,
    pub rangered: bool,
    pub max_b_frames: u8,
    pub quantizer: u8,
    pub finterpflag: bool,
    // advanced profile
    pub level: u8,
    pub colordiff_format: u8,
    pub postprocflag: bool,
    pub coded_width: u16,
    pub coded_height: u16,
    pub pulldown: bool,
    pub interlace: bool,
    pub tfcntrflag: bool,
    pub psf: bool,
    pub display_ext: bool,
    pub disp_horiz_size: u16,
    pub disp_vert_size: u16,
    pub aspect_ratio_flag: bool,
    pub aspect_ratio: u8,
    pub framerate_flag: bool,
    pub color_format_flag: bool,
    pub hrd_param_flag: bool,
    pub hrd_param: HrdParam,
}

impl Default for SequenceHeader {
    fn default() -> Self {
        Self {
            profile: Profile::Simple,
            frmrtq_postproc: 0,
            bitrtq_postproc: 0,
            loop_filter: false,
            multires: false,
            fastuvmc: false,
            extended_mv: false,
            dquant: 0,
            variable_sized_transform_flag: false,
            overlap: false,
            syncmarker: false,
            rangered: false,
            max_b_frames: 0,
            quantizer: 0,
            finterpflag: false,
            level: 0,
            colordiff_format: 0,
            postprocflag: false,
            coded_width: 0,
            coded_height: 0,
            pulldown: false,
            interlace: false,
            tfcntrflag: false,
            psf: false,
            display_ext: false,
            disp_horiz_size: 0,
            disp_vert_size: 0,
            aspect_ratio_flag: false,
            aspect_ratio: 0,
            framerate_flag: false,
            color_format_flag: false,
            hrd_param_flag: false,
            hrd_param: HrdParam::default(),
        }
    }
}

/// Parses a raw (already RBDU-converted) sequence header buffer.
pub fn parse_sequence_header(data: &[u8]) -> Result<SequenceHeader> {
    let mut br = BitReader::new(data);
    let mut hdr = SequenceHeader {
        profile: Profile::from_bits(br.read_bits(2)?),
        ..Default::default()
    };

    if hdr.profile != Profile::Advanced {
        br.skip_bits(2)?;
        hdr.frmrtq_postproc = br.read_bits(3)? as u8;
        hdr.bitrtq_postproc = br.read_bits(5)? as u8;
        hdr.loop_filter = br.read_flag()?;
        br.skip_bits(1)?;
        hdr.multires = br.read_flag()?;
        br.skip_bits(1)?;
        hdr.fastuvmc = br.read_flag()?;
        hdr.extended_mv = br.read_flag()?;
        hdr.dquant = br.read_bits(2)? as u8;
        hdr.variable_sized_transform_flag = br.read_flag()?;
        br.skip_bits(1)?;
        hdr.overlap = br.read_flag()?;
        hdr.syncmarker = br.read_flag()?;
        hdr.rangered = br.read_flag()?;
        hdr.max_b_frames = br.read_bits(3)? as u8;
        hdr.quantizer = br.read_bits(2)? as u8;
        hdr.finterpflag = br.read_flag()?;
    } else {
        hdr.level = br.read_bits(3)? as u8;
        hdr.colordiff_format = br.read_bits(2)? as u8;
        hdr.frmrtq_postproc = br.read_bits(3)? as u8;
        hdr.bitrtq_postproc = br.read_bits(5)? as u8;
        hdr.postprocflag = br.read_flag()?;
        hdr.coded_width = ((br.read_bits(12)? + 1) << 1) as u16;
        hdr.coded_height = ((br.read_bits(12)? + 1) << 1) as u16;
        hdr.pulldown = br.read_flag()?;
        hdr.interlace = br.read_flag()?;
        hdr.tfcntrflag = br.read_flag()?;
        hdr.finterpflag = br.read_flag()?;
        br.skip_bits(1)?;
        hdr.psf = br.read_flag()?;
        hdr.display_ext = br.read_flag()?;
        if hdr.display_ext {
            hdr.disp_horiz_size = (br.read_bits(14)? + 1) as u16;
            hdr.disp_vert_size = (br.read_bits(14)? + 1) as u16;
            hdr.aspect_ratio_flag = br.read_flag()?;
            if hdr.aspect_ratio_flag {
                hdr.aspect_ratio = br.read_bits(4)? as u8;
                if hdr.aspect_ratio == 15 {
                    br.skip_bits(16)?;
                }
            }
            hdr.framerate_flag = br.read_flag()?;
            if hdr.framerate_flag {
                let framerateind = br.read_flag()?;
                if !framerateind {
                    br.skip_bits(12)?;
                } else {
                    br.skip_bits(16)?;
                }
            }
            hdr.color_format_flag = br.read_flag()?;
            if hdr.color_format_flag {
                br.skip_bits(24)?;
            }
        }
        hdr.hrd_param_flag = br.read_flag()?;
        if hdr.hrd_param_flag {
            hdr.hrd_param.hrd_num_leaky_buckets = br.read_bits(5)? as u8;
            hdr.hrd_param.bit_rate_exponent = br.read_bits(4)? as u8;
            hdr.hrd_param.buffer_size_exponent = br.read_bits(4)? as u8;
            for _ in 0..hdr.hrd_param.hrd_num_leaky_buckets {
                hdr.hrd_param.hrd_rate.push(br.read_bits(16)? as u16);
                hdr.hrd_param.hrd_buffer.push(br.read_bits(16)? as u16);
            }
        }
    }

    Ok(hdr)
}
