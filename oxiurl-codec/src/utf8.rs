//! UTF-16 to UTF-8 transcoding for mode 0 streams.
//!
//! The transcoder works on raw code units rather than `str` so that any
//! UTF-16 sequence the caller holds can be compressed. Surrogate pairs are
//! combined into one scalar value; a lead surrogate that is not followed by a
//! trail surrogate is rejected. A lone trail surrogate is passed through as a
//! 3-byte sequence and restored unchanged by [`decode_utf8`].

use oxiurl_core::error::{OxiUrlError, Result};

const LEAD_SURROGATES: std::ops::RangeInclusive<u16> = 0xD800..=0xDBFF;
const TRAIL_SURROGATES: std::ops::RangeInclusive<u16> = 0xDC00..=0xDFFF;

/// Encode UTF-16 code units as UTF-8 bytes.
pub fn encode_utf8(units: &[u16]) -> Result<Vec<u8>> {
    let mut output = Vec::with_capacity(units.len() * 3);
    let mut i = 0;

    while i < units.len() {
        let unit = units[i];
        let scalar = if LEAD_SURROGATES.contains(&unit) {
            let trail = units
                .get(i + 1)
                .copied()
                .filter(|trail| TRAIL_SURROGATES.contains(trail))
                .ok_or_else(|| OxiUrlError::unpaired_surrogate(i))?;
            i += 1;
            0x10000 + ((u32::from(unit & 0x3FF) << 10) | u32::from(trail & 0x3FF))
        } else {
            u32::from(unit)
        };
        push_scalar(&mut output, scalar)?;
        i += 1;
    }

    Ok(output)
}

fn push_scalar(output: &mut Vec<u8>, scalar: u32) -> Result<()> {
    match scalar {
        0..=0x7F => output.push(scalar as u8),
        0x80..=0x7FF => output.extend_from_slice(&[
            0xC0 | (scalar >> 6) as u8,
            0x80 | (scalar & 0x3F) as u8,
        ]),
        0x800..=0xFFFF => output.extend_from_slice(&[
            0xE0 | (scalar >> 12) as u8,
            0x80 | ((scalar >> 6) & 0x3F) as u8,
            0x80 | (scalar & 0x3F) as u8,
        ]),
        0x10000..=0x10FFFF => output.extend_from_slice(&[
            0xF0 | (scalar >> 18) as u8,
            0x80 | ((scalar >> 12) & 0x3F) as u8,
            0x80 | ((scalar >> 6) & 0x3F) as u8,
            0x80 | (scalar & 0x3F) as u8,
        ]),
        _ => return Err(OxiUrlError::scalar_out_of_range(scalar)),
    }
    Ok(())
}

/// Decode UTF-8 bytes into UTF-16 code units.
///
/// Accepts leading bytes `00-7F`, `C2-DF`, `E0-EF` and `F0-F4`. Sequences
/// that are truncated, carry a non-continuation trailing byte, or (for 4-byte
/// forms) decode outside U+10000..=U+10FFFF are rejected.
pub fn decode_utf8(bytes: &[u8]) -> Result<Vec<u16>> {
    let mut output = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        let lead = bytes[i];
        let (extra, initial) = match lead {
            0x00..=0x7F => (0, u32::from(lead)),
            0xC2..=0xDF => (1, u32::from(lead & 0x1F)),
            0xE0..=0xEF => (2, u32::from(lead & 0x0F)),
            0xF0..=0xF4 => (3, u32::from(lead & 0x07)),
            _ => {
                return Err(OxiUrlError::invalid_utf8(
                    i,
                    format!("invalid leading byte {lead:#04x}"),
                ));
            }
        };

        let tail = bytes
            .get(i + 1..i + 1 + extra)
            .ok_or_else(|| OxiUrlError::invalid_utf8(i, "truncated multi-byte sequence"))?;

        let mut scalar = initial;
        for &byte in tail {
            if byte & 0xC0 != 0x80 {
                return Err(OxiUrlError::invalid_utf8(
                    i,
                    format!("invalid continuation byte {byte:#04x}"),
                ));
            }
            scalar = (scalar << 6) | u32::from(byte & 0x3F);
        }

        if extra == 3 {
            if !(0x10000..=0x10FFFF).contains(&scalar) {
                return Err(OxiUrlError::invalid_utf8(
                    i,
                    format!("4-byte sequence decodes to {scalar:#x}"),
                ));
            }
            let offset = scalar - 0x10000;
            output.push(0xD800 | (offset >> 10) as u16);
            output.push(0xDC00 | (offset & 0x3FF) as u16);
        } else {
            output.push(scalar as u16);
        }

        i += 1 + extra;
    }

    Ok(output)
}
