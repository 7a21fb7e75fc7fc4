//! JPEG marker-scanning parser (spec §4.11), mirroring the IJG/libyami
//! marker dispatch loop: each marker either consumes a length-prefixed
//! segment or hands control to a scan (the entropy-coded bytes between
//! SOS and the next non-restart marker are not decoded here — the driver,
//! C14, submits them to the accelerator verbatim).

use crate::defaults::{
    default_chrominance_ac_table, default_chrominance_dc_table, default_chrominance_quant_table,
    default_luminance_ac_table, default_luminance_dc_table, default_luminance_quant_table,
};
use crate::error::{JpegError, Result};
use crate::tables::{
    Component, FrameHeader, HuffTable, Marker, QuantTable, ScanComponent, ScanHeader, Segment,
    MAX_COMPS_IN_SCAN, NUM_ARITH_TBLS, NUM_HUFF_TBLS, NUM_QUANT_TBLS,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct JpegStream {
    pub segments: Vec<Segment>,
    pub quant_tables: [Option<QuantTable>; NUM_QUANT_TBLS],
    pub dc_huff_tables: [Option<HuffTable>; NUM_HUFF_TBLS],
    pub ac_huff_tables: [Option<HuffTable>; NUM_HUFF_TBLS],
    pub frame_header: Option<FrameHeader>,
    pub scan_headers: Vec<ScanHeader>,
    pub restart_interval: u16,
    /// Byte offset, within the input buffer, where each scan's
    /// entropy-coded segment begins (just past the SOS segment).
    pub scan_data_offsets: Vec<usize>,
}

#[derive(Default)]
struct Flags {
    soi_seen: bool,
    eoi_seen: bool,
    sof_seen: bool,
}

/// What a registered marker callback asks the parser to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
    /// Keep scanning for the next marker.
    Continue,
    /// Return control to the caller; a later call to [`Parser::parse`]
    /// resumes at the next marker without reparsing the one just handled.
    Suspend,
}

/// Result of one [`Parser::parse`] call.
pub enum ParseOutcome {
    /// SOI..EOI was fully consumed; the assembled stream is final.
    Complete(JpegStream),
    /// A callback requested `Suspend`; call `parse()` again to continue.
    Suspended,
}

type MarkerCallback<'a> = Box<dyn FnMut(&JpegStream, Marker) -> CallbackAction + 'a>;

pub struct Parser<'a> {
    data: &'a [u8],
    pos: usize,
    flags: Flags,
    stream: JpegStream,
    callbacks: Vec<(Marker, MarkerCallback<'a>)>,
}

impl<'a> Parser<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            flags: Flags::default(),
            stream: JpegStream::default(),
            callbacks: Vec::new(),
        }
    }

    /// Registers a callback invoked, in registration order, after every
    /// successful parse of `marker`. Callbacks for the same marker fire in
    /// the order they were registered (spec §4.11 "Callback dispatch").
    pub fn on_marker(
        &mut self,
        marker: Marker,
        callback: impl FnMut(&JpegStream, Marker) -> CallbackAction + 'a,
    ) {
        self.callbacks.push((marker, Box::new(callback)));
    }

    /// Read-only view of the stream assembled so far, for use from within a
    /// suspended callback or after `parse()` returns `Suspended`.
    pub fn stream(&self) -> &JpegStream {
        &self.stream
    }

    fn err(&self, message: impl Into<String>) -> JpegError {
        JpegError::InvalidData {
            offset: self.pos,
            message: message.into(),
        }
    }

    fn read_u8(&mut self) -> Result<u8> {
        let b = *self
            .data
            .get(self.pos)
            .ok_or_else(|| self.err("unexpected end of data"))?;
        self.pos += 1;
        Ok(b)
    }

    fn read_u16(&mut self) -> Result<u16> {
        let hi = self.read_u8()? as u16;
        let lo = self.read_u8()? as u16;
        Ok((hi << 8) | lo)
    }

    /// Scans forward for the next marker: an `0xFF` byte followed by a
    /// non-zero, non-0xFF byte (fill bytes and stuffed `0xFF 0x00` inside
    /// entropy-coded data are skipped).
    fn next_marker(&mut self) -> Result<Marker> {
        loop {
            while self.pos < self.data.len() && self.data[self.pos] != 0xFF {
                self.pos += 1;
            }
            if self.pos >= self.data.len() {
                return Err(self.err("no marker found before end of data"));
            }
            self.pos += 1;
            let mut b = self.read_u8()?;
            while b == 0xFF {
                b = self.read_u8()?;
            }
            if b == 0x00 {
                continue;
            }
            return Ok(Marker::from_byte(b));
        }
    }

    fn parse_soi(&mut self) -> Result<()> {
        if self.flags.soi_seen {
            return Err(JpegError::Duplicate("SOI"));
        }
        self.flags.soi_seen = true;
        Ok(())
    }

    fn parse_eoi(&mut self) -> Result<()> {
        if self.flags.eoi_seen {
            return Err(JpegError::Duplicate("EOI"));
        }
        self.flags.eoi_seen = true;
        Ok(())
    }

    /// Skips an APPn/COM segment: length-prefixed, payload not interpreted.
    fn parse_app(&mut self) -> Result<()> {
        let start = self.pos - 2;
        let length = self.read_u16()? as usize;
        if length < 2 {
            return Err(self.err("segment length below minimum"));
        }
        self.pos = start + 2 + length;
        self.stream.segments.push(Segment {
            marker: 0,
            position: start,
            length,
        });
        Ok(())
    }

    fn parse_dri(&mut self) -> Result<()> {
        let length = self.read_u16()?;
        if length != 4 {
            return Err(self.err("DRI segment length must be 4"));
        }
        self.stream.restart_interval = self.read_u16()?;
        Ok(())
    }

    fn parse_dqt(&mut self) -> Result<()> {
        let length = self.read_u16()? as usize;
        let end = self.pos + length - 2;
        while self.pos < end {
            let pq_tq = self.read_u8()?;
            let precision = pq_tq >> 4;
            let index = (pq_tq & 0x0F) as usize;
            if index >= NUM_QUANT_TBLS {
                return Err(self.err("quantization table index out of range"));
            }
            let mut values = [0u16; 64];
            for v in values.iter_mut() {
                *v = if precision == 0 {
                    self.read_u8()? as u16
                } else {
                    self.read_u16()?
                };
            }
            self.stream.quant_tables[index] = Some(QuantTable { precision, values });
        }
        Ok(())
    }

    fn parse_dht(&mut self) -> Result<()> {
        let length = self.read_u16()? as usize;
        let end = self.pos + length - 2;
        while self.pos < end {
            let tc_th = self.read_u8()?;
            let is_ac = tc_th & 0x10 != 0;
            let index = (tc_th & 0x0F) as usize;
            if index >= NUM_HUFF_TBLS {
                return Err(self.err("Huffman table index out of range"));
            }
            let mut code_lengths = [0u8; 16];
            let mut count = 0usize;
            for l in code_lengths.iter_mut() {
                *l = self.read_u8()?;
                count += *l as usize;
            }
            if count > 256 {
                return Err(self.err("Huffman table has more than 256 values"));
            }
            let mut values = Vec::with_capacity(count);
            for _ in 0..count {
                values.push(self.read_u8()?);
            }
            let table = HuffTable { code_lengths, values };
            if is_ac {
                self.stream.ac_huff_tables[index] = Some(table);
            } else {
                self.stream.dc_huff_tables[index] = Some(table);
            }
        }
        Ok(())
    }

    fn parse_dac(&mut self) -> Result<()> {
        let length = self.read_u16()? as usize;
        let end = self.pos + length - 2;
        while self.pos < end {
            let class_index = self.read_u8()? as usize;
            let _value = self.read_u8()?;
            if class_index >= 2 * NUM_ARITH_TBLS {
                return Err(self.err("DAC class/index out of range"));
            }
        }
        Ok(())
    }

    fn parse_sof(&mut self, is_baseline: bool, is_progressive: bool, is_arithmetic: bool) -> Result<()> {
        if self.flags.sof_seen {
            return Err(JpegError::Duplicate("SOF"));
        }
        let length = self.read_u16()?;
        let data_precision = self.read_u8()?;
        let image_height = self.read_u16()?;
        let image_width = self.read_u16()?;
        let num_components = self.read_u8()? as usize;
        if length as usize != 8 + num_components * 3 {
            return Err(self.err("SOF segment length inconsistent with component count"));
        }
        if num_components > MAX_COMPS_IN_SCAN {
            return Err(self.err("too many components in frame"));
        }

        let mut components = Vec::with_capacity(num_components);
        let mut max_h = 1u8;
        let mut max_v = 1u8;
        for index in 0..num_components {
            let id = self.read_u8()?;
            let sample_factors = self.read_u8()?;
            let h_sample_factor = sample_factors >> 4;
            let v_sample_factor = sample_factors & 0x0F;
            let quant_table_number = self.read_u8()?;
            max_h = max_h.max(h_sample_factor);
            max_v = max_v.max(v_sample_factor);
            components.push(Component {
                id,
                index,
                h_sample_factor,
                v_sample_factor,
                quant_table_number,
                dc_table_number: 0,
                ac_table_number: 0,
            });
        }

        self.stream.frame_header = Some(FrameHeader {
            is_baseline,
            is_progressive,
            is_arithmetic,
            data_precision,
            image_height,
            image_width,
            max_h_sample_factor: max_h,
            max_v_sample_factor: max_v,
            components,
        });
        self.flags.sof_seen = true;
        Ok(())
    }

    fn parse_sos(&mut self) -> Result<()> {
        let frame = self
            .stream
            .frame_header
            .clone()
            .ok_or_else(|| self.err("SOS before SOF"))?;

        let length = self.read_u16()?;
        let num_components = self.read_u8()? as usize;
        if length as usize != num_components * 2 + 6 {
            return Err(self.err("SOS segment length inconsistent with component count"));
        }
        if num_components > MAX_COMPS_IN_SCAN {
            return Err(self.err("too many components in scan"));
        }

        let mut components = Vec::with_capacity(num_components);
        let mut seen = Vec::with_capacity(num_components);
        for _ in 0..num_components {
            let id = self.read_u8()?;
            let tables = self.read_u8()?;
            let component_index = frame
                .components
                .iter()
                .position(|c| c.id == id)
                .ok_or_else(|| self.err("SOS references unknown component id"))?;
            if seen.contains(&component_index) {
                return Err(self.err("SOS references the same component twice"));
            }
            seen.push(component_index);
            components.push(ScanComponent {
                component_index,
                dc_table_number: tables >> 4,
                ac_table_number: tables & 0x0F,
            });
        }

        let spectral_start = self.read_u8()?;
        let spectral_end = self.read_u8()?;
        let approx = self.read_u8()?;

        self.stream.scan_headers.push(ScanHeader {
            components,
            spectral_start,
            spectral_end,
            successive_approx_high: approx >> 4,
            successive_approx_low: approx & 0x0F,
        });
        self.stream.scan_data_offsets.push(self.pos);
        Ok(())
    }

    /// Skips past the entropy-coded segment following a scan header: runs
    /// to (but not past) the next marker that is not a restart marker or a
    /// stuffed `0xFF 0x00` byte.
    fn skip_entropy_coded_data(&mut self) {
        while self.pos + 1 < self.data.len() {
            if self.data[self.pos] == 0xFF {
                let next = self.data[self.pos + 1];
                if next != 0x00 && !(0xD0..=0xD7).contains(&next) {
                    return;
                }
            }
            self.pos += 1;
        }
        self.pos = self.data.len();
    }

    /// Runs the marker loop from the current position until EOI (returning
    /// `Complete`) or until a registered callback asks to `Suspend`. Calling
    /// `parse()` again after a `Suspended` result resumes at the next
    /// marker, with no partial-segment state lost (spec §4.11, §9 "Callback
    /// suspension").
    pub fn parse(&mut self) -> Result<ParseOutcome> {
        loop {
            let marker = self.next_marker()?;
            match marker {
                Marker::Soi => self.parse_soi()?,
                Marker::Eoi => {
                    self.parse_eoi()?;
                    self.dispatch(marker)?;
                    return Ok(ParseOutcome::Complete(self.stream.clone()));
                }
                Marker::App(_) | Marker::Com => self.parse_app()?,
                Marker::Dri => self.parse_dri()?,
                Marker::Dqt => self.parse_dqt()?,
                Marker::Dht => self.parse_dht()?,
                Marker::Dac => self.parse_dac()?,
                Marker::Sof0 => self.parse_sof(true, false, false)?,
                Marker::Sof1 => self.parse_sof(false, false, false)?,
                Marker::Sof2 => self.parse_sof(false, true, false)?,
                Marker::Sof3
                | Marker::Sof5
                | Marker::Sof6
                | Marker::Sof7
                | Marker::Sof9
                | Marker::Sof10
                | Marker::Sof11
                | Marker::Sof13
                | Marker::Sof14
                | Marker::Sof15 => {
                    return Err(JpegError::Unsupported(format!("{:?}", marker)));
                }
                Marker::Sos => {
                    self.parse_sos()?;
                    self.skip_entropy_coded_data();
                }
                Marker::Rst(_) | Marker::Jpg | Marker::Dnl | Marker::Other(_) => {}
            }

            if self.dispatch(marker)? == CallbackAction::Suspend {
                return Ok(ParseOutcome::Suspended);
            }

            if self.pos >= self.data.len() {
                return Err(self.err("reached end of data without EOI"));
            }
        }
    }

    /// Invokes every callback registered for `marker`, in registration
    /// order; the first `Suspend` wins (later callbacks for the same
    /// marker still run before the loop returns control to the caller).
    fn dispatch(&mut self, marker: Marker) -> Result<CallbackAction> {
        let mut action = CallbackAction::Continue;
        for (registered, callback) in self.callbacks.iter_mut() {
            if *registered == marker {
                if callback(&self.stream, marker) == CallbackAction::Suspend {
                    action = CallbackAction::Suspend;
                }
            }
        }
        Ok(action)
    }
}

/// Fills in any of the four standard Huffman/quantization table slots a
/// stream left empty with the Annex K defaults, for encoders that rely on
/// them implicitly.
pub fn apply_annex_k_defaults(stream: &mut JpegStream) {
    if stream.quant_tables[0].is_none() {
        stream.quant_tables[0] = Some(default_luminance_quant_table());
    }
    if stream.quant_tables[1].is_none() {
        stream.quant_tables[1] = Some(default_chrominance_quant_table());
    }
    if stream.dc_huff_tables[0].is_none() {
        stream.dc_huff_tables[0] = Some(default_luminance_dc_table());
    }
    if stream.dc_huff_tables[1].is_none() {
        stream.dc_huff_tables[1] = Some(default_chrominance_dc_table());
    }
    if stream.ac_huff_tables[0].is_none() {
        stream.ac_huff_tables[0] = Some(default_luminance_ac_table());
    }
    if stream.ac_huff_tables[1].is_none() {
        stream.ac_huff_tables[1] = Some(default_chrominance_ac_table());
    }
}
