//! URL-safe compression (encoding).
//!
//! Stream layout: a 2-bit mode header, then one Huffman code per token. A
//! back-reference is the back-reference symbol's code followed by the
//! ternary-coded `length - MIN_MATCH` and a fixed-width offset field. The
//! end symbol is never written in full; it only pads the last unit.

use crate::huffman::{AdaptiveHuffman, CodeTable};
use crate::integer::write_ternary;
use crate::lzss::{MatchFinder, Token, offset_bits};
use crate::mode::Mode;
use crate::mode::constants::{MIN_MATCH, MODE_BITS};
use oxiurl_core::error::Result;
use oxiurl_core::{BitPacker, OutputAlphabet};

/// Compressor producing packed output units.
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlEncoder {
    /// Output alphabet, fixing the unit width.
    alphabet: OutputAlphabet,
}

impl UrlEncoder {
    /// Create an encoder for the given output alphabet.
    pub fn new(alphabet: OutputAlphabet) -> Self {
        Self { alphabet }
    }

    /// Get the output alphabet.
    pub fn alphabet(&self) -> OutputAlphabet {
        self.alphabet
    }

    /// Compress UTF-16 code units into output units.
    ///
    /// Each unit holds `alphabet.unit_bits()` bits; render them with
    /// [`OutputAlphabet::render`].
    pub fn encode(&self, units: &[u16]) -> Result<Vec<u8>> {
        let mode = Mode::classify(units);
        let symbols = mode.encode_symbols(units)?;

        tracing::debug!(
            %mode,
            code_units = units.len(),
            symbols = symbols.len(),
            alphabet = %self.alphabet,
            "compressing"
        );

        let mut writer = BitPacker::for_alphabet(self.alphabet);
        writer.write_bits(u64::from(mode.id()), MODE_BITS);

        let mut model = AdaptiveHuffman::new(mode.symbol_count());
        let mut codes = model.tree().code_table();

        let mut position = 0;
        for token in MatchFinder::new(&symbols) {
            let symbol = match token {
                Token::Literal(literal) => {
                    emit(&mut writer, &codes, u16::from(literal));
                    u16::from(literal)
                }
                Token::Match { length, offset } => {
                    let dic = mode.dic_symbol();
                    emit(&mut writer, &codes, dic);
                    write_ternary(&mut writer, length - MIN_MATCH);
                    writer.write_bits(offset as u64, offset_bits(position));
                    tracing::trace!(position, length, offset, "back-reference");
                    dic
                }
            };

            if model.update(symbol) {
                codes = model.tree().code_table();
            }
            position += token.span();
        }

        let eof = codes.get(mode.eof_symbol());
        let output = writer.finish(eof.bits, eof.len);

        tracing::debug!(%mode, output_units = output.len(), "compressed");
        Ok(output)
    }
}

fn emit(writer: &mut BitPacker, codes: &CodeTable, symbol: u16) {
    let code = codes.get(symbol);
    writer.write_bits(code.bits, code.len);
}
