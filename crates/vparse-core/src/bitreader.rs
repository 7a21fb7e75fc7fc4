//! Big-endian and little-endian bit-level readers shared by every codec parser.
//!
//! [`BitReader`] reads bits MSB-first and underlies every NAL/start-code-based
//! codec (H.264, H.265, MPEG-2, VC-1). [`LsbBitReader`] reads bits LSB-first
//! within each byte and underlies VP9's uncompressed header and VP8's
//! literal reads outside the Boolean-coded partition.

use crate::error::{CoreError, Result};

/// MSB-first bit reader over a borrowed byte slice.
#[derive(Debug, Clone, Copy)]
pub struct BitReader<'a> {
    data: &'a [u8],
    byte_offset: usize,
    bit_offset: u8,
}

impl<'a> BitReader<'a> {
    #[inline]
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            byte_offset: 0,
            bit_offset: 0,
        }
    }

    /// Current bit position from the start of the buffer.
    #[inline]
    pub fn position_in_bits(&self) -> u64 {
        let byte_bits = (self.byte_offset as u64).checked_mul(8).unwrap_or(u64::MAX);
        byte_bits.checked_add(self.bit_offset as u64).unwrap_or(u64::MAX)
    }

    #[inline]
    pub fn remaining_bits(&self) -> u64 {
        let total_bits = (self.data.len() as u64) * 8;
        total_bits.saturating_sub(self.position_in_bits())
    }

    #[inline]
    pub fn at_end(&self) -> bool {
        self.byte_offset >= self.data.len()
    }

    #[inline]
    pub fn is_byte_aligned(&self) -> bool {
        self.bit_offset == 0
    }

    pub fn byte_align(&mut self) {
        if self.bit_offset != 0 {
            self.bit_offset = 0;
            self.byte_offset += 1;
        }
    }

    /// Returns the remaining bytes, from the current byte position onward.
    /// If not byte-aligned, the current partial byte is included.
    pub fn remaining_data(&self) -> &'a [u8] {
        if self.byte_offset >= self.data.len() {
            &[]
        } else {
            &self.data[self.byte_offset..]
        }
    }

    pub fn read_bit(&mut self) -> Result<bool> {
        if self.byte_offset >= self.data.len() {
            return Err(CoreError::ShortRead {
                offset: self.position_in_bits(),
                needed: 1,
            });
        }
        let byte = self.data[self.byte_offset];
        let bit = (byte >> (7 - self.bit_offset)) & 1;
        self.bit_offset += 1;
        if self.bit_offset == 8 {
            self.bit_offset = 0;
            self.byte_offset += 1;
        }
        Ok(bit == 1)
    }

    /// Reads `n` bits (1..=32) MSB-first as an unsigned integer.
    pub fn read_bits(&mut self, n: u8) -> Result<u32> {
        if n == 0 {
            return Ok(0);
        }
        if n > 32 {
            return Err(CoreError::InvalidData {
                offset: self.position_in_bits(),
                message: format!("cannot read more than 32 bits at once, requested {n}"),
            });
        }
        if (n as u64) > self.remaining_bits() {
            return Err(CoreError::ShortRead {
                offset: self.position_in_bits(),
                needed: n as u64,
            });
        }
        let mut result: u32 = 0;
        for _ in 0..n {
            result = (result << 1) | (self.read_bit()? as u32);
        }
        Ok(result)
    }

    /// Reads `n` bits (1..=64) MSB-first as an unsigned integer.
    pub fn read_bits_u64(&mut self, n: u8) -> Result<u64> {
        if n == 0 {
            return Ok(0);
        }
        if n > 64 {
            return Err(CoreError::InvalidData {
                offset: self.position_in_bits(),
                message: format!("cannot read more than 64 bits at once, requested {n}"),
            });
        }
        if (n as u64) > self.remaining_bits() {
            return Err(CoreError::ShortRead {
                offset: self.position_in_bits(),
                needed: n as u64,
            });
        }
        let mut result: u64 = 0;
        for _ in 0..n {
            result = (result << 1) | (self.read_bit()? as u64);
        }
        Ok(result)
    }

    pub fn read_flag(&mut self) -> Result<bool> {
        self.read_bit()
    }

    pub fn skip_bits(&mut self, n: u64) -> Result<()> {
        if n > self.remaining_bits() {
            return Err(CoreError::ShortRead {
                offset: self.position_in_bits(),
                needed: n,
            });
        }
        let new_pos = self.position_in_bits() + n;
        self.byte_offset = (new_pos / 8) as usize;
        self.bit_offset = (new_pos % 8) as u8;
        Ok(())
    }

    /// Peeks `n` bits without advancing the reader.
    pub fn peek_bits(&self, n: u8) -> Result<u32> {
        let mut tmp = *self;
        tmp.read_bits(n)
    }

    /// Reads an unsigned Exp-Golomb code: `[leading zeros][1][info bits]`.
    pub fn read_ue(&mut self) -> Result<u32> {
        let mut leading_zeros = 0u32;
        while !self.read_bit()? {
            leading_zeros += 1;
            if leading_zeros > 31 {
                return Err(CoreError::InvalidData {
                    offset: self.position_in_bits(),
                    message: "exp-golomb leading zero run exceeded 31 bits".to_string(),
                });
            }
        }
        if leading_zeros == 0 {
            return Ok(0);
        }
        let info = self.read_bits(leading_zeros as u8)?;
        Ok((1u32 << leading_zeros) - 1 + info)
    }

    /// Reads a signed Exp-Golomb code derived from [`read_ue`](Self::read_ue).
    pub fn read_se(&mut self) -> Result<i32> {
        let code = self.read_ue()?;
        let magnitude = ((code + 1) / 2) as i32;
        if code & 1 == 1 {
            Ok(magnitude)
        } else {
            Ok(-magnitude)
        }
    }

    /// RBSP trailing-bits detector (H.264/H.265 `more_rbsp_data()`): true
    /// unless only the stop bit and trailing zero padding remain.
    pub fn more_rbsp_data(&self) -> bool {
        if self.at_end() {
            return false;
        }
        let Some(last_nonzero) = self.data.iter().rposition(|&b| b != 0) else {
            return false;
        };
        // stop bit is the lowest set bit of the last non-zero byte, counted
        // MSB-first within that byte
        let stop_bit_in_byte = 7 - self.data[last_nonzero].trailing_zeros() as u64;
        let stop_bit_offset = (last_nonzero as u64) * 8 + stop_bit_in_byte;
        self.position_in_bits() < stop_bit_offset
    }

    /// Consumes the RBSP stop bit (`1`) followed by zero-alignment padding.
    pub fn rbsp_trailing_bits(&mut self) -> Result<()> {
        let stop_bit = self.read_bit()?;
        if !stop_bit {
            return Err(CoreError::InvalidData {
                offset: self.position_in_bits(),
                message: "missing rbsp_stop_one_bit".to_string(),
            });
        }
        while !self.is_byte_aligned() {
            self.read_bit()?;
        }
        Ok(())
    }
}

/// LSB-first bit reader over a borrowed byte slice (VP9 uncompressed header,
/// VP8 literal reads).
#[derive(Debug, Clone, Copy)]
pub struct LsbBitReader<'a> {
    data: &'a [u8],
    byte_offset: usize,
    bit_offset: u8,
}

impl<'a> LsbBitReader<'a> {
    #[inline]
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            byte_offset: 0,
            bit_offset: 0,
        }
    }

    #[inline]
    pub fn position_in_bits(&self) -> u64 {
        (self.byte_offset as u64) * 8 + self.bit_offset as u64
    }

    #[inline]
    pub fn remaining_bits(&self) -> u64 {
        ((self.data.len() as u64) * 8).saturating_sub(self.position_in_bits())
    }

    #[inline]
    pub fn at_end(&self) -> bool {
        self.byte_offset >= self.data.len()
    }

    #[inline]
    pub fn is_byte_aligned(&self) -> bool {
        self.bit_offset == 0
    }

    pub fn byte_align(&mut self) {
        if self.bit_offset != 0 {
            self.bit_offset = 0;
            self.byte_offset += 1;
        }
    }

    pub fn read_bit(&mut self) -> Result<bool> {
        if self.byte_offset >= self.data.len() {
            return Err(CoreError::ShortRead {
                offset: self.position_in_bits(),
                needed: 1,
            });
        }
        let byte = self.data[self.byte_offset];
        let bit = (byte >> self.bit_offset) & 1;
        self.bit_offset += 1;
        if self.bit_offset == 8 {
            self.bit_offset = 0;
            self.byte_offset += 1;
        }
        Ok(bit == 1)
    }

    /// Reads `n` bits (1..=32), LSB-first within the stream, assembling the
    /// result MSB-first (bit read first becomes the low-order bit).
    pub fn read_bits(&mut self, n: u8) -> Result<u32> {
        if n == 0 {
            return Ok(0);
        }
        if n > 32 {
            return Err(CoreError::InvalidData {
                offset: self.position_in_bits(),
                message: format!("cannot read more than 32 bits at once, requested {n}"),
            });
        }
        let mut result: u32 = 0;
        for i in 0..n {
            if self.read_bit()? {
                result |= 1 << i;
            }
        }
        Ok(result)
    }

    pub fn skip_bits(&mut self, n: u64) -> Result<()> {
        let new_pos = self.position_in_bits() + n;
        let total_bits = (self.data.len() as u64) * 8;
        if new_pos > total_bits {
            return Err(CoreError::ShortRead {
                offset: self.position_in_bits(),
                needed: n,
            });
        }
        self.byte_offset = (new_pos / 8) as usize;
        self.bit_offset = (new_pos % 8) as u8;
        Ok(())
    }
}

/// Strips H.264/H.265-style emulation prevention bytes (`0x03` following two
/// `0x00` bytes) from a NAL unit payload, returning the cleaned bytes and a
/// count of bytes removed.
pub fn remove_emulation_prevention_bytes(data: &[u8]) -> (Vec<u8>, usize) {
    let mut out = Vec::with_capacity(data.len());
    let mut zero_run = 0u8;
    let mut removed = 0usize;
    let mut i = 0;
    while i < data.len() {
        let b = data[i];
        if zero_run >= 2 && b == 0x03 {
            zero_run = 0;
            removed += 1;
            i += 1;
            continue;
        }
        out.push(b);
        if b == 0x00 {
            zero_run += 1;
        } else {
            zero_run = 0;
        }
        i += 1;
    }
    (out, removed)
}
