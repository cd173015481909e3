//! Output alphabets for packed units.
//!
//! The bit packer produces a sequence of fixed-width units. An
//! [`OutputAlphabet`] decides the unit width and how each unit becomes a
//! character:
//!
//! - [`OutputAlphabet::Url`]: 6-bit units rendered through the base64url
//!   table `A-Z a-z 0-9 - _` (no padding character).
//! - [`OutputAlphabet::Raw`]: 8-bit units rendered as the code point with the
//!   same value (a Latin-1 string), or kept as plain bytes.
//!
//! Both lookup tables are `const` and shared by every call.

use crate::error::{OxiUrlError, Result};
use std::fmt;
use std::str::FromStr;

/// The 64-character URL-safe alphabet, indexed by 6-bit unit value.
pub const BASE64URL_TABLE: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Marker for ASCII characters outside [`BASE64URL_TABLE`].
const NOT_IN_TABLE: u8 = 0xFF;

/// Reverse lookup from ASCII character to 6-bit unit value.
const BASE64URL_REVERSE: [u8; 128] = build_reverse_table();

const fn build_reverse_table() -> [u8; 128] {
    let mut table = [NOT_IN_TABLE; 128];
    let mut i = 0;
    while i < BASE64URL_TABLE.len() {
        table[BASE64URL_TABLE[i] as usize] = i as u8;
        i += 1;
    }
    table
}

/// Character set used for the compressed representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputAlphabet {
    /// 64-symbol URL-safe alphabet, 6 bits per character.
    #[default]
    Url,
    /// Raw 8-bit units, one byte (or Latin-1 character) each.
    Raw,
}

impl OutputAlphabet {
    /// Number of bits carried by one output unit.
    pub const fn unit_bits(self) -> u8 {
        match self {
            Self::Url => 6,
            Self::Raw => 8,
        }
    }

    /// Render one packed unit as a byte.
    ///
    /// For [`OutputAlphabet::Url`] this is the ASCII table character; for
    /// [`OutputAlphabet::Raw`] it is the unit itself.
    #[inline]
    pub fn unit_to_byte(self, unit: u8) -> u8 {
        match self {
            Self::Url => BASE64URL_TABLE[(unit & 0x3F) as usize],
            Self::Raw => unit,
        }
    }

    /// Map a byte back to its unit value, if it belongs to the alphabet.
    #[inline]
    pub fn byte_to_unit(self, byte: u8) -> Option<u8> {
        match self {
            Self::Url => BASE64URL_REVERSE
                .get(byte as usize)
                .copied()
                .filter(|&unit| unit != NOT_IN_TABLE),
            Self::Raw => Some(byte),
        }
    }

    /// Map a character back to its unit value, if it belongs to the alphabet.
    ///
    /// Raw units accept only U+0000..=U+00FF.
    #[inline]
    pub fn char_to_unit(self, ch: char) -> Option<u8> {
        let byte = u8::try_from(u32::from(ch)).ok()?;
        self.byte_to_unit(byte)
    }

    /// Render packed units as a string (base64url text or a Latin-1 string).
    pub fn render(self, units: &[u8]) -> String {
        units
            .iter()
            .map(|&unit| char::from(self.unit_to_byte(unit)))
            .collect()
    }

    /// Parse a compressed string into unit values.
    pub fn parse(self, input: &str) -> Result<Vec<u8>> {
        input
            .chars()
            .enumerate()
            .map(|(position, ch)| {
                self.char_to_unit(ch)
                    .ok_or_else(|| OxiUrlError::invalid_character(position, ch))
            })
            .collect()
    }

    /// Get the alphabet name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Url => "url",
            Self::Raw => "raw",
        }
    }
}

impl fmt::Display for OutputAlphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for OutputAlphabet {
    type Err = OxiUrlError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "url" | "base64url" => Ok(Self::Url),
            "raw" | "bytes" => Ok(Self::Raw),
            other => Err(OxiUrlError::invalid_argument(format!(
                "unknown output alphabet: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_table_matches_forward() {
        for (value, &byte) in BASE64URL_TABLE.iter().enumerate() {
            assert_eq!(OutputAlphabet::Url.byte_to_unit(byte), Some(value as u8));
        }
    }

    #[test]
    fn test_url_rejects_foreign_characters() {
        for ch in ['+', '/', '=', ' ', '.', 'é', '\u{3042}'] {
            assert_eq!(OutputAlphabet::Url.char_to_unit(ch), None, "{ch:?}");
        }
    }

    #[test]
    fn test_raw_accepts_latin1_only() {
        assert_eq!(OutputAlphabet::Raw.char_to_unit('\u{00FF}'), Some(0xFF));
        assert_eq!(OutputAlphabet::Raw.char_to_unit('\0'), Some(0));
        assert_eq!(OutputAlphabet::Raw.char_to_unit('\u{0100}'), None);
    }

    #[test]
    fn test_render_and_parse() {
        let units = [0u8, 25, 26, 51, 52, 61, 62, 63];
        let text = OutputAlphabet::Url.render(&units);
        assert_eq!(text, "AZaz09-_");
        assert_eq!(OutputAlphabet::Url.parse(&text).unwrap(), units);
    }

    #[test]
    fn test_parse_reports_position() {
        let err = OutputAlphabet::Url.parse("AB*C").unwrap_err();
        assert_eq!(err, OxiUrlError::invalid_character(2, '*'));
    }

    #[test]
    fn test_unit_bits() {
        assert_eq!(OutputAlphabet::Url.unit_bits(), 6);
        assert_eq!(OutputAlphabet::Raw.unit_bits(), 8);
        assert_eq!(OutputAlphabet::default(), OutputAlphabet::Url);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("url".parse::<OutputAlphabet>().unwrap(), OutputAlphabet::Url);
        assert_eq!("raw".parse::<OutputAlphabet>().unwrap(), OutputAlphabet::Raw);
        assert!("base32".parse::<OutputAlphabet>().is_err());
    }
}
