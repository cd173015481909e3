//! Stream modes and the per-mode symbol transforms.
//!
//! Every compressed stream starts with a 2-bit mode chosen from the input
//! text. The mode fixes the symbol space of the Huffman model and the
//! transform applied before compression (and undone after expansion):
//!
//! | Mode | Symbols | Back-ref | End | Input |
//! |------|---------|----------|-----|-------|
//! | 0 `utf8`      | 258 | 256 | 257 | contains code units >= 256, coded as UTF-8 bytes |
//! | 1 `latin1`    | 258 | 256 | 257 | all below 256, at least one >= 128 |
//! | 2 `ascii`     | 130 | 128 | 129 | all below 128, with control characters |
//! | 3 `printable` | 99  | 97  | 98  | TAB, LF and 0x20-0x7E only, remapped to 0..96 |

use crate::utf8::{decode_utf8, encode_utf8};
use oxiurl_core::error::{OxiUrlError, Result};

/// Stream mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Mode 0: UTF-8 transcoded bytes.
    Utf8,
    /// Mode 1: 8-bit code units.
    Latin1,
    /// Mode 2: 7-bit code units including control characters.
    Ascii,
    /// Mode 3: printable ASCII plus TAB and LF, densely remapped.
    #[default]
    Printable,
}

impl Mode {
    /// Parse a mode from its 2-bit identifier.
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(Self::Utf8),
            1 => Some(Self::Latin1),
            2 => Some(Self::Ascii),
            3 => Some(Self::Printable),
            _ => None,
        }
    }

    /// Get the 2-bit identifier written at the head of the stream.
    pub fn id(&self) -> u8 {
        match self {
            Self::Utf8 => 0,
            Self::Latin1 => 1,
            Self::Ascii => 2,
            Self::Printable => 3,
        }
    }

    /// Size of the symbol space, including the two control symbols.
    pub fn symbol_count(&self) -> usize {
        usize::from(self.eof_symbol()) + 1
    }

    /// Number of literal symbols.
    pub fn literal_count(&self) -> u16 {
        match self {
            Self::Utf8 | Self::Latin1 => 256,
            Self::Ascii => 128,
            Self::Printable => constants::PRINTABLE_COUNT as u16,
        }
    }

    /// Symbol announcing a back-reference.
    pub fn dic_symbol(&self) -> u16 {
        self.literal_count()
    }

    /// Symbol marking the end of the stream.
    pub fn eof_symbol(&self) -> u16 {
        self.literal_count() + 1
    }

    /// Get the mode name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Utf8 => "utf8",
            Self::Latin1 => "latin1",
            Self::Ascii => "ascii",
            Self::Printable => "printable",
        }
    }

    /// Pick the mode for a UTF-16 code-unit sequence.
    ///
    /// Checks run in priority order: any unit >= 256 selects [`Mode::Utf8`]
    /// regardless of what else the text holds.
    pub fn classify(units: &[u16]) -> Self {
        let mut has_high = false;
        let mut has_control = false;

        for &unit in units {
            match unit {
                0x100..=u16::MAX => return Self::Utf8,
                0x80..=0xFF => has_high = true,
                _ => {
                    if !is_printable(unit as u8) {
                        has_control = true;
                    }
                }
            }
        }

        if has_high {
            Self::Latin1
        } else if has_control {
            Self::Ascii
        } else {
            Self::Printable
        }
    }

    /// Transform code units into literal symbols for this mode.
    pub(crate) fn encode_symbols(self, units: &[u16]) -> Result<Vec<u8>> {
        match self {
            Self::Utf8 => encode_utf8(units),
            Self::Latin1 | Self::Ascii => units
                .iter()
                .enumerate()
                .map(|(position, &unit)| {
                    u8::try_from(unit)
                        .ok()
                        .filter(|&byte| u16::from(byte) < self.literal_count())
                        .ok_or_else(|| not_in_mode(self, position))
                })
                .collect(),
            Self::Printable => units
                .iter()
                .enumerate()
                .map(|(position, &unit)| {
                    REDUCE_TABLE
                        .get(usize::from(unit))
                        .copied()
                        .filter(|&symbol| symbol != NOT_PRINTABLE)
                        .ok_or_else(|| not_in_mode(self, position))
                })
                .collect(),
        }
    }

    /// Transform decoded literal symbols back into code units.
    pub(crate) fn decode_symbols(self, symbols: &[u8]) -> Result<Vec<u16>> {
        match self {
            Self::Utf8 => decode_utf8(symbols),
            Self::Latin1 | Self::Ascii => Ok(symbols.iter().map(|&s| u16::from(s)).collect()),
            Self::Printable => symbols
                .iter()
                .enumerate()
                .map(|(position, &symbol)| {
                    EXPAND_TABLE
                        .get(usize::from(symbol))
                        .map(|&ch| u16::from(ch))
                        .ok_or_else(|| OxiUrlError::invalid_character(position, char::from(symbol)))
                })
                .collect(),
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn not_in_mode(mode: Mode, position: usize) -> OxiUrlError {
    OxiUrlError::invalid_argument(format!(
        "code unit at {position} is not representable in {mode} mode"
    ))
}

/// Bitstream-defining constants.
pub mod constants {
    /// Width of the mode header.
    pub const MODE_BITS: u8 = 2;
    /// Back-references may reach at most this far behind the current position.
    pub const WINDOW_SIZE: usize = 2048;
    /// Shortest run coded as a back-reference.
    pub const MIN_MATCH: usize = 3;
    /// Longest run a single back-reference may cover.
    pub const MAX_MATCH: usize = 1000;
    /// Initial symbol weight, in quarter units (0.25).
    pub const INITIAL_WEIGHT: u64 = 1;
    /// Weight added per coded symbol, in quarter units (1.0).
    pub const WEIGHT_INCREMENT: u64 = 4;
    /// The tree is rebuilt after every symbol until this many have been coded.
    pub const EAGER_REBUILD_LIMIT: usize = 256;
    /// Past the eager phase, the tree is rebuilt every this many symbols.
    pub const REBUILD_INTERVAL: usize = 8;
    /// Size of the printable set used by mode 3.
    pub const PRINTABLE_COUNT: usize = 97;
}

const NOT_PRINTABLE: u8 = 0xFF;

/// Printable ASCII (0x20-0x7E) plus TAB and LF.
const fn is_printable(c: u8) -> bool {
    c == 0x09 || c == 0x0A || (c >= 0x20 && c < 0x7F)
}

/// ASCII character to dense printable index.
const REDUCE_TABLE: [u8; 128] = build_reduce_table();

/// Dense printable index to ASCII character.
const EXPAND_TABLE: [u8; constants::PRINTABLE_COUNT] = build_expand_table();

const fn build_reduce_table() -> [u8; 128] {
    let mut table = [NOT_PRINTABLE; 128];
    let mut next = 0u8;
    let mut c = 0;
    while c < 128 {
        if is_printable(c as u8) {
            table[c] = next;
            next += 1;
        }
        c += 1;
    }
    table
}

const fn build_expand_table() -> [u8; constants::PRINTABLE_COUNT] {
    let mut table = [0u8; constants::PRINTABLE_COUNT];
    let mut next = 0;
    let mut c = 0;
    while c < 128 {
        if is_printable(c as u8) {
            table[next] = c as u8;
            next += 1;
        }
        c += 1;
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    #[test]
    fn test_mode_table() {
        assert_eq!(Mode::Utf8.symbol_count(), 258);
        assert_eq!(Mode::Utf8.dic_symbol(), 256);
        assert_eq!(Mode::Utf8.eof_symbol(), 257);
        assert_eq!(Mode::Latin1.symbol_count(), 258);
        assert_eq!(Mode::Ascii.symbol_count(), 130);
        assert_eq!(Mode::Ascii.dic_symbol(), 128);
        assert_eq!(Mode::Ascii.eof_symbol(), 129);
        assert_eq!(Mode::Printable.symbol_count(), 99);
        assert_eq!(Mode::Printable.dic_symbol(), 97);
        assert_eq!(Mode::Printable.eof_symbol(), 98);
    }

    #[test]
    fn test_mode_from_id() {
        for id in 0..4 {
            assert_eq!(Mode::from_id(id).unwrap().id(), id);
        }
        assert_eq!(Mode::from_id(4), None);
    }

    #[test]
    fn test_classify() {
        assert_eq!(Mode::classify(&[0x100]), Mode::Utf8);
        assert_eq!(Mode::classify(&units("caf\u{e9}")), Mode::Latin1);
        assert_eq!(Mode::classify(&units("\u{1}")), Mode::Ascii);
        assert_eq!(Mode::classify(&units("\u{7f}")), Mode::Ascii);
        assert_eq!(Mode::classify(&units("Hello, World!")), Mode::Printable);
        assert_eq!(Mode::classify(&units("tab\there\nnewline")), Mode::Printable);
        assert_eq!(Mode::classify(&units("")), Mode::Printable);
    }

    #[test]
    fn test_classify_priority() {
        // High code unit wins even when control and Latin-1 characters are present.
        assert_eq!(Mode::classify(&[0x01, 0xE9, 0x3042]), Mode::Utf8);
        // Latin-1 wins over control characters.
        assert_eq!(Mode::classify(&[0x01, 0xE9]), Mode::Latin1);
        // A lone surrogate is still a unit >= 256.
        assert_eq!(Mode::classify(&[0xD800]), Mode::Utf8);
    }

    #[test]
    fn test_printable_tables() {
        assert_eq!(REDUCE_TABLE[0x09], 0);
        assert_eq!(REDUCE_TABLE[0x0A], 1);
        assert_eq!(REDUCE_TABLE[0x20], 2);
        assert_eq!(REDUCE_TABLE[0x7E], 96);
        assert_eq!(REDUCE_TABLE[0x7F], NOT_PRINTABLE);
        assert_eq!(REDUCE_TABLE[0x0D], NOT_PRINTABLE);

        for (index, &ch) in EXPAND_TABLE.iter().enumerate() {
            assert_eq!(REDUCE_TABLE[ch as usize] as usize, index);
        }
    }

    #[test]
    fn test_symbol_transform_roundtrip() {
        let text = units("Hello,\tWorld!\n");
        let symbols = Mode::Printable.encode_symbols(&text).unwrap();
        assert!(symbols.iter().all(|&s| (s as usize) < constants::PRINTABLE_COUNT));
        assert_eq!(Mode::Printable.decode_symbols(&symbols).unwrap(), text);
    }

    #[test]
    fn test_symbol_transform_rejects_foreign_units() {
        assert!(Mode::Printable.encode_symbols(&[0x01]).is_err());
        assert!(Mode::Ascii.encode_symbols(&[0x80]).is_err());
        assert!(Mode::Latin1.encode_symbols(&[0x100]).is_err());
    }
}
