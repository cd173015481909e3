//! # OxiUrl Codec
//!
//! Compression of short texts into URL-safe strings.
//!
//! The codec combines a sliding-window matcher (2 KiB window, runs of 3 to
//! 1000 symbols) with an adaptive Huffman model whose tree both sides rebuild
//! from symbol counts, so no table is ever transmitted. Output is packed into
//! 6-bit units rendered with the base64url alphabet, or into raw 8-bit units.
//!
//! Input text is first classified into one of four [`Mode`]s, which fixes
//! the symbol space:
//!
//! - **utf8**: any UTF-16 code unit >= 256; the text is coded as UTF-8 bytes
//! - **latin1**: 8-bit text
//! - **ascii**: 7-bit text with control characters
//! - **printable**: printable ASCII plus TAB and LF, remapped to 97 symbols
//!
//! ## Example
//!
//! ```rust
//! use oxiurl_codec::{compress, expand};
//!
//! let packed = compress("abcabcabcabcabcabc").unwrap();
//! assert!(packed.len() < 18);
//! assert!(packed.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_'));
//! assert_eq!(expand(&packed).unwrap(), "abcabcabcabcabcabc");
//! ```
//!
//! ## Lone surrogates
//!
//! `&str` cannot hold unpaired surrogates. Use [`compress_utf16`] and
//! [`expand_utf16`] to work on raw UTF-16 code units:
//!
//! ```rust
//! use oxiurl_codec::{compress_utf16, expand_utf16};
//! use oxiurl_core::OutputAlphabet;
//!
//! let units = [0x41, 0xDC00, 0x42];
//! let packed = compress_utf16(&units, OutputAlphabet::Url).unwrap();
//! assert_eq!(expand_utf16(&packed, OutputAlphabet::Url).unwrap(), units);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod decode;
pub mod encode;
pub mod huffman;
pub mod integer;
pub mod lzss;
pub mod mode;
pub mod utf8;

// Re-exports
pub use decode::UrlDecoder;
pub use encode::UrlEncoder;
pub use huffman::{AdaptiveHuffman, Code, CodeTable, HuffmanTree};
pub use lzss::{MatchFinder, Token, WindowExpander};
pub use mode::Mode;
pub use oxiurl_core::{ErrorKind, OutputAlphabet, OxiUrlError, Result};
pub use utf8::{decode_utf8, encode_utf8};

/// Compress text into a URL-safe string.
pub fn compress(input: &str) -> Result<String> {
    compress_with(input, OutputAlphabet::Url)
}

/// Compress text using the given output alphabet.
///
/// With [`OutputAlphabet::Raw`] every output `char` is in U+0000..=U+00FF.
pub fn compress_with(input: &str, alphabet: OutputAlphabet) -> Result<String> {
    let units: Vec<u16> = input.encode_utf16().collect();
    compress_utf16(&units, alphabet)
}

/// Compress raw UTF-16 code units.
pub fn compress_utf16(units: &[u16], alphabet: OutputAlphabet) -> Result<String> {
    let packed = UrlEncoder::new(alphabet).encode(units)?;
    Ok(alphabet.render(&packed))
}

/// Compress text into raw 8-bit units.
pub fn compress_raw(input: &str) -> Result<Vec<u8>> {
    let units: Vec<u16> = input.encode_utf16().collect();
    UrlEncoder::new(OutputAlphabet::Raw).encode(&units)
}

/// Expand a URL-safe string produced by [`compress`].
pub fn expand(input: &str) -> Result<String> {
    expand_with(input, OutputAlphabet::Url)
}

/// Expand a string produced with the given output alphabet.
///
/// Fails with [`OxiUrlError::InvalidUtf16`] if the result holds lone
/// surrogates; [`expand_utf16`] returns those unchanged.
pub fn expand_with(input: &str, alphabet: OutputAlphabet) -> Result<String> {
    let units = expand_utf16(input, alphabet)?;
    to_string(&units)
}

/// Expand a string into raw UTF-16 code units.
pub fn expand_utf16(input: &str, alphabet: OutputAlphabet) -> Result<Vec<u16>> {
    if input.is_empty() {
        return Err(OxiUrlError::invalid_argument("compressed input is empty"));
    }
    let packed = alphabet.parse(input)?;
    UrlDecoder::new(alphabet).decode(&packed)
}

/// Expand raw 8-bit units produced by [`compress_raw`].
pub fn expand_raw(input: &[u8]) -> Result<String> {
    let units = UrlDecoder::new(OutputAlphabet::Raw).decode(input)?;
    to_string(&units)
}

/// Report the mode of a compressed string without decoding it.
pub fn peek_mode(input: &str, alphabet: OutputAlphabet) -> Result<Mode> {
    let head: String = input.chars().take(1).collect();
    let packed = alphabet.parse(&head)?;
    UrlDecoder::new(alphabet).read_mode(&packed)
}

fn to_string(units: &[u16]) -> Result<String> {
    String::from_utf16(units).map_err(|err| OxiUrlError::invalid_utf16(err.to_string()))
}
