//! Bit-level packing into fixed-width output units.
//!
//! [`BitPacker`] accumulates bits MSB-first and emits one unit every time
//! `unit_bits` bits have been collected (6 for the URL alphabet, 8 for raw
//! output). [`BitUnpacker`] serves the bits of a unit sequence back one at a
//! time in the same order.
//!
//! # Example
//!
//! ```
//! use oxiurl_core::bitstream::{BitPacker, BitUnpacker};
//!
//! let mut packer = BitPacker::new(6);
//! packer.write_bits(0b10, 2);
//! packer.write_bits(0b1100, 4);
//! packer.write_bits(0b101, 3);
//! let units = packer.finish(0, 0);
//! assert_eq!(units, vec![0b101100, 0b101000]);
//!
//! let mut unpacker = BitUnpacker::new(&units, 6);
//! assert_eq!(unpacker.read_bits(2).unwrap(), 0b10);
//! assert_eq!(unpacker.read_bits(4).unwrap(), 0b1100);
//! assert_eq!(unpacker.read_bits(3).unwrap(), 0b101);
//! ```

use crate::alphabet::OutputAlphabet;
use crate::error::{OxiUrlError, Result};

/// MSB-first bit packer producing `unit_bits`-wide units.
#[derive(Debug, Clone)]
pub struct BitPacker {
    /// Width of one output unit (1-8).
    unit_bits: u8,
    /// Completed units.
    units: Vec<u8>,
    /// Partial unit being assembled (MSB-first).
    buffer: u8,
    /// Number of bits in `buffer`.
    bits_in_buffer: u8,
    /// Total bits written.
    total_bits_written: u64,
}

impl BitPacker {
    /// Create a packer for units of `unit_bits` bits.
    pub fn new(unit_bits: u8) -> Self {
        debug_assert!(
            (1..=8).contains(&unit_bits),
            "unit width must be between 1 and 8 bits"
        );
        Self {
            unit_bits,
            units: Vec::new(),
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_written: 0,
        }
    }

    /// Create a packer matching the unit width of `alphabet`.
    pub fn for_alphabet(alphabet: OutputAlphabet) -> Self {
        Self::new(alphabet.unit_bits())
    }

    /// Get the unit width.
    pub fn unit_bits(&self) -> u8 {
        self.unit_bits
    }

    /// Get the total number of bits written so far.
    pub fn bits_written(&self) -> u64 {
        self.total_bits_written
    }

    /// Number of bits waiting in the partial unit.
    pub fn pending_bits(&self) -> u8 {
        self.bits_in_buffer
    }

    /// Write a single bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) {
        self.buffer = (self.buffer << 1) | u8::from(bit);
        self.bits_in_buffer += 1;
        self.total_bits_written += 1;

        if self.bits_in_buffer == self.unit_bits {
            self.units.push(self.buffer);
            self.buffer = 0;
            self.bits_in_buffer = 0;
        }
    }

    /// Write the low `count` bits of `value`, most significant first.
    pub fn write_bits(&mut self, value: u64, count: u8) {
        debug_assert!(count <= 64, "Cannot write more than 64 bits at once");

        for shift in (0..count).rev() {
            self.write_bit((value >> shift) & 1 == 1);
        }
    }

    /// Complete the final unit and return all units.
    ///
    /// A partial unit is filled with the leading bits of the `padding_len`-bit
    /// code `padding`; if that code is shorter than the gap, zero bits follow it.
    pub fn finish(mut self, padding: u64, padding_len: u8) -> Vec<u8> {
        if self.bits_in_buffer > 0 {
            let gap = self.unit_bits - self.bits_in_buffer;
            let fill = if padding_len >= gap {
                padding >> (padding_len - gap)
            } else {
                padding << (gap - padding_len)
            };
            self.write_bits(fill, gap);
        }
        self.units
    }
}

/// MSB-first bit reader over a slice of `unit_bits`-wide units.
#[derive(Debug, Clone)]
pub struct BitUnpacker<'a> {
    /// Input units.
    units: &'a [u8],
    /// Width of one unit.
    unit_bits: u8,
    /// Index of the current unit.
    unit_pos: usize,
    /// Bits already consumed from the current unit.
    bit_pos: u8,
    /// Total bits read (for error reporting).
    total_bits_read: u64,
}

impl<'a> BitUnpacker<'a> {
    /// Create an unpacker over `units` of `unit_bits` bits each.
    pub fn new(units: &'a [u8], unit_bits: u8) -> Self {
        debug_assert!(
            (1..=8).contains(&unit_bits),
            "unit width must be between 1 and 8 bits"
        );
        Self {
            units,
            unit_bits,
            unit_pos: 0,
            bit_pos: 0,
            total_bits_read: 0,
        }
    }

    /// Create an unpacker matching the unit width of `alphabet`.
    pub fn for_alphabet(units: &'a [u8], alphabet: OutputAlphabet) -> Self {
        Self::new(units, alphabet.unit_bits())
    }

    /// Get the current bit position.
    pub fn bit_position(&self) -> u64 {
        self.total_bits_read
    }

    /// Number of bits not yet read.
    pub fn remaining_bits(&self) -> u64 {
        let total = self.units.len() as u64 * u64::from(self.unit_bits);
        total - self.total_bits_read
    }

    /// Check whether every bit has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.unit_pos >= self.units.len()
    }

    /// Read one bit, or `None` once the input is exhausted.
    #[inline]
    pub fn next_bit(&mut self) -> Option<bool> {
        let unit = *self.units.get(self.unit_pos)?;
        let bit = (unit >> (self.unit_bits - self.bit_pos - 1)) & 1 == 1;

        self.bit_pos += 1;
        self.total_bits_read += 1;
        if self.bit_pos == self.unit_bits {
            self.bit_pos = 0;
            self.unit_pos += 1;
        }

        Some(bit)
    }

    /// Read one bit that must be present.
    #[inline]
    pub fn read_bit(&mut self) -> Result<bool> {
        self.next_bit()
            .ok_or_else(|| OxiUrlError::unexpected_eof(self.total_bits_read))
    }

    /// Read `count` bits (0-32) MSB-first.
    pub fn read_bits(&mut self, count: u8) -> Result<u32> {
        debug_assert!(count <= 32, "Cannot read more than 32 bits at once");

        let mut value = 0u32;
        for _ in 0..count {
            value = (value << 1) | u32::from(self.read_bit()?);
        }
        Ok(value)
    }
}
