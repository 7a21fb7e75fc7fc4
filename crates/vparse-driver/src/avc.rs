//! H.264/AVC decode-unit driver: splits a byte stream into NAL units,
//! tracks the active SPS/PPS tables, and assembles slice NAL units into
//! pictures (a new picture starts when `first_mb_in_slice == 0`, per the
//! bitstream's own picture-boundary signal).

use std::collections::HashMap;

use vparse_avc::nal::{parse_nal_units, NalUnit, NalUnitType};
use vparse_avc::pps::{parse_pps_with_sps_map, Pps};
use vparse_avc::slice::{parse_slice_header, SliceHeader};
use vparse_avc::sps::{parse_sps, Sps};

use crate::error::Result;

/// One decoded picture: the slice headers that compose it (almost always
/// one, but a picture may be split across several slice NAL units) plus
/// the NAL reference flag of its first slice, used by the caller to drive
/// [`vparse_dpb::h264::Dpb`].
#[derive(Debug, Clone)]
pub struct AvcPicture {
    pub slices: Vec<SliceHeader>,
    pub nal_ref_idc: u8,
    pub is_idr: bool,
}

/// Stateful AVC decode-unit driver. Feed it NAL-unit-delimited data (an
/// Annex B byte stream, or a single access unit's worth of it) and it
/// returns the pictures found, leaving any trailing in-progress picture
/// buffered for the next call.
#[derive(Default)]
pub struct AvcDriver {
    sps_map: HashMap<u8, Sps>,
    pps_map: HashMap<u8, Pps>,
    pending: Option<AvcPicture>,
}

impl AvcDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sps_map(&self) -> &HashMap<u8, Sps> {
        &self.sps_map
    }

    pub fn pps_map(&self) -> &HashMap<u8, Pps> {
        &self.pps_map
    }

    /// Splits `data` into NAL units and folds them into the driver's
    /// state, returning every picture completed along the way. Call
    /// [`Self::flush`] at end of stream to collect the final picture.
    pub fn push(&mut self, data: &[u8]) -> Result<Vec<AvcPicture>> {
        let mut pictures = Vec::new();
        for nal in parse_nal_units(data)? {
            if let Some(picture) = self.handle_nal(&nal)? {
                pictures.push(picture);
            }
        }
        Ok(pictures)
    }

    fn handle_nal(&mut self, nal: &NalUnit) -> Result<Option<AvcPicture>> {
        match nal.nal_type() {
            NalUnitType::Sps => {
                let sps = parse_sps(&nal.payload)?;
                if let Some(old) = self.sps_map.insert(sps.seq_parameter_set_id, sps) {
                    tracing::debug!(id = old.seq_parameter_set_id, "SPS replaced");
                }
                Ok(None)
            }
            NalUnitType::Pps => {
                let pps = parse_pps_with_sps_map(&nal.payload, &self.sps_map)?;
                if let Some(old) = self.pps_map.insert(pps.pic_parameter_set_id, pps) {
                    tracing::debug!(id = old.pic_parameter_set_id, "PPS replaced");
                }
                Ok(None)
            }
            NalUnitType::IdrSlice | NalUnitType::NonIdrSlice => {
                let header = parse_slice_header(
                    &nal.payload,
                    &self.sps_map,
                    &self.pps_map,
                    nal.nal_type(),
                    nal.header.nal_ref_idc,
                )?;
                self.fold_slice(header, nal.header.nal_ref_idc, nal.nal_type() == NalUnitType::IdrSlice)
            }
            _ => Ok(None),
        }
    }

    /// A slice with `first_mb_in_slice == 0` starts a new picture; any
    /// prior picture is complete and handed back. Otherwise the slice
    /// joins the picture currently being assembled.
    fn fold_slice(
        &mut self,
        header: SliceHeader,
        nal_ref_idc: u8,
        is_idr: bool,
    ) -> Result<Option<AvcPicture>> {
        if header.first_mb_in_slice == 0 {
            let finished = self.pending.take();
            self.pending = Some(AvcPicture {
                slices: vec![header],
                nal_ref_idc,
                is_idr,
            });
            Ok(finished)
        } else {
            if let Some(picture) = self.pending.as_mut() {
                picture.slices.push(header);
            } else {
                tracing::warn!("slice with nonzero first_mb_in_slice arrived with no picture open");
                self.pending = Some(AvcPicture {
                    slices: vec![header],
                    nal_ref_idc,
                    is_idr,
                });
            }
            Ok(None)
        }
    }

    /// Releases whatever picture is still being assembled, for end of
    /// stream.
    pub fn flush(&mut self) -> Option<AvcPicture> {
        self.pending.take()
    }
}
