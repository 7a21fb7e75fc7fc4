//! H.265/HEVC decode-unit driver: splits NAL units, tracks VPS/SPS/PPS,
//! and folds slice segments into pictures (a new picture starts when
//! `first_slice_segment_in_pic_flag` is set).

use std::collections::HashMap;

use vparse_hevc::nal::{parse_nal_units, NalUnit, NalUnitType};
use vparse_hevc::pps::{parse_pps, Pps};
use vparse_hevc::slice::{parse_slice_header, SliceHeader};
use vparse_hevc::sps::{parse_sps, Sps};
use vparse_hevc::vps::{parse_vps, Vps};

use crate::error::Result;

#[derive(Debug, Clone)]
pub struct HevcPicture {
    pub slices: Vec<SliceHeader>,
    pub nal_type: NalUnitType,
}

/// Stateful HEVC decode-unit driver, the HEVC counterpart to
/// [`crate::avc::AvcDriver`].
#[derive(Default)]
pub struct HevcDriver {
    vps_map: HashMap<u8, Vps>,
    sps_map: HashMap<u8, Sps>,
    pps_map: HashMap<u8, Pps>,
    pending: Option<HevcPicture>,
}

impl HevcDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vps_map(&self) -> &HashMap<u8, Vps> {
        &self.vps_map
    }

    pub fn sps_map(&self) -> &HashMap<u8, Sps> {
        &self.sps_map
    }

    pub fn pps_map(&self) -> &HashMap<u8, Pps> {
        &self.pps_map
    }

    pub fn push(&mut self, data: &[u8]) -> Result<Vec<HevcPicture>> {
        let mut pictures = Vec::new();
        for nal in parse_nal_units(data)? {
            if let Some(picture) = self.handle_nal(&nal)? {
                pictures.push(picture);
            }
        }
        Ok(pictures)
    }

    fn handle_nal(&mut self, nal: &NalUnit) -> Result<Option<HevcPicture>> {
        match nal.header.nal_unit_type {
            NalUnitType::VpsNut => {
                let vps = parse_vps(&nal.payload)?;
                if let Some(old) = self.vps_map.insert(vps.vps_video_parameter_set_id, vps) {
                    tracing::debug!(id = old.vps_video_parameter_set_id, "VPS replaced");
                }
                Ok(None)
            }
            NalUnitType::SpsNut => {
                let sps = parse_sps(&nal.payload)?;
                if let Some(old) = self.sps_map.insert(sps.sps_seq_parameter_set_id, sps) {
                    tracing::debug!(id = old.sps_seq_parameter_set_id, "SPS replaced");
                }
                Ok(None)
            }
            NalUnitType::PpsNut => {
                let pps = parse_pps(&nal.payload)?;
                if let Some(old) = self.pps_map.insert(pps.pps_pic_parameter_set_id, pps) {
                    tracing::debug!(id = old.pps_pic_parameter_set_id, "PPS replaced");
                }
                Ok(None)
            }
            nal_type if is_vcl(nal_type) => {
                let header = parse_slice_header(&nal.payload, &self.sps_map, &self.pps_map, nal_type)?;
                self.fold_slice(header, nal_type)
            }
            _ => Ok(None),
        }
    }

    fn fold_slice(
        &mut self,
        header: SliceHeader,
        nal_type: NalUnitType,
    ) -> Result<Option<HevcPicture>> {
        if header.first_slice_segment_in_pic_flag {
            let finished = self.pending.take();
            self.pending = Some(HevcPicture {
                slices: vec![header],
                nal_type,
            });
            Ok(finished)
        } else {
            if let Some(picture) = self.pending.as_mut() {
                picture.slices.push(header);
            } else {
                tracing::warn!("dependent slice segment arrived with no picture open");
                self.pending = Some(HevcPicture {
                    slices: vec![header],
                    nal_type,
                });
            }
            Ok(None)
        }
    }

    pub fn flush(&mut self) -> Option<HevcPicture> {
        self.pending.take()
    }
}

/// NAL unit types 0-31 carry video coding layer (slice) data (Table 7-1).
fn is_vcl(nal_type: NalUnitType) -> bool {
    (nal_type as u8) <= 31
}
