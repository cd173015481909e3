//! URL-safe decompression (decoding).
//!
//! The decoder mirrors the encoder's model updates symbol by symbol. It
//! stops at the end symbol or when the input runs out between two symbols;
//! running out inside a back-reference is an error.

use crate::huffman::AdaptiveHuffman;
use crate::integer::read_ternary;
use crate::lzss::{WindowExpander, offset_bits};
use crate::mode::Mode;
use crate::mode::constants::{MAX_MATCH, MIN_MATCH, MODE_BITS};
use oxiurl_core::error::{OxiUrlError, Result};
use oxiurl_core::{BitUnpacker, OutputAlphabet};

/// Decompressor consuming packed input units.
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlDecoder {
    /// Input alphabet, fixing the unit width.
    alphabet: OutputAlphabet,
}

impl UrlDecoder {
    /// Create a decoder for the given alphabet.
    pub fn new(alphabet: OutputAlphabet) -> Self {
        Self { alphabet }
    }

    /// Get the input alphabet.
    pub fn alphabet(&self) -> OutputAlphabet {
        self.alphabet
    }

    /// Read only the mode header of a unit sequence.
    pub fn read_mode(&self, units: &[u8]) -> Result<Mode> {
        if units.is_empty() {
            return Err(OxiUrlError::invalid_argument("compressed input is empty"));
        }

        let mut reader = BitUnpacker::for_alphabet(units, self.alphabet);
        let id = reader.read_bits(MODE_BITS)? as u8;
        Mode::from_id(id).ok_or_else(|| OxiUrlError::invalid_argument(format!("unknown mode {id}")))
    }

    /// Decompress output units back into UTF-16 code units.
    pub fn decode(&self, units: &[u8]) -> Result<Vec<u16>> {
        let mode = self.read_mode(units)?;

        let mut reader = BitUnpacker::for_alphabet(units, self.alphabet);
        reader.read_bits(MODE_BITS)?;

        let dic = mode.dic_symbol();
        let eof = mode.eof_symbol();
        let mut model = AdaptiveHuffman::new(mode.symbol_count());
        let mut window = WindowExpander::new();

        while let Some(symbol) = model.tree().decode(&mut reader) {
            if symbol == eof {
                break;
            }

            if symbol == dic {
                let length = read_ternary(&mut reader, (MAX_MATCH - MIN_MATCH) as u64)
                    .map_err(|err| match err {
                        OxiUrlError::MatchTooLong { length, .. } => {
                            OxiUrlError::match_too_long(length + MIN_MATCH as u64, MAX_MATCH)
                        }
                        other => other,
                    })
                    .inspect_err(|err| tracing::debug!(%err, "bad back-reference length"))?
                    as usize
                    + MIN_MATCH;
                let offset = reader.read_bits(offset_bits(window.len()))? as usize;
                window
                    .copy_match(length, offset)
                    .inspect_err(|err| tracing::debug!(%err, "bad back-reference offset"))?;
            } else {
                window.push_literal(symbol as u8);
            }

            model.update(symbol);
        }

        let symbols = window.into_output();
        tracing::debug!(
            %mode,
            input_units = units.len(),
            symbols = symbols.len(),
            "expanded"
        );

        mode.decode_symbols(&symbols)
    }
}
