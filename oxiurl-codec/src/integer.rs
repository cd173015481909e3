//! Integer sub-codes used inside back-references.
//!
//! Match lengths are written as bijective base-3 numbers: each digit takes a
//! 2-bit group holding `0`, `1` or `2`, most significant digit first, and the
//! group `11` terminates the number. Zero is the bare terminator. Offsets use
//! a plain fixed-width field whose width is given by [`required_bits`].

use oxiurl_core::error::{OxiUrlError, Result};
use oxiurl_core::{BitPacker, BitUnpacker};

/// 2-bit group ending a ternary number.
const TERMINATOR: u64 = 0b11;

/// Number of bits needed to represent `n` (`0` for `n == 0`).
pub fn required_bits(n: usize) -> u8 {
    (usize::BITS - n.leading_zeros()) as u8
}

/// Write `value` as a bijective base-3 number.
pub fn write_ternary(writer: &mut BitPacker, value: usize) {
    let mut digits = Vec::new();
    let mut rest = value;
    while rest != 0 {
        rest -= 1;
        digits.push((rest % 3) as u64);
        rest /= 3;
    }

    for &digit in digits.iter().rev() {
        writer.write_bits(digit, 2);
    }
    writer.write_bits(TERMINATOR, 2);
}

/// Read a bijective base-3 number, rejecting values above `limit`.
///
/// Running out of input before the terminator is an error.
pub fn read_ternary(reader: &mut BitUnpacker<'_>, limit: u64) -> Result<u64> {
    let mut value = 0u64;
    loop {
        let digit = u64::from(reader.read_bits(2)?);
        if digit == TERMINATOR {
            return Ok(value);
        }
        value = value * 3 + digit + 1;
        if value > limit {
            return Err(OxiUrlError::match_too_long(value, limit as usize));
        }
    }
}
