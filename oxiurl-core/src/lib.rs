//! # OxiUrl Core
//!
//! Core components for the OxiUrl text compressor.
//!
//! This crate provides the building blocks shared by the codec:
//!
//! - [`bitstream`]: MSB-first packing of variable-length codes into 6- or 8-bit units
//! - [`alphabet`]: Output alphabets (base64url and raw 8-bit)
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L3: Unified API                                         │
//! │     compress / expand, CLI                              │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codec                                               │
//! │     Mode selection, adaptive Huffman, sliding window    │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: Units (this crate)                                  │
//! │     BitPacker/BitUnpacker, OutputAlphabet               │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxiurl_core::{BitPacker, BitUnpacker, OutputAlphabet};
//!
//! let mut packer = BitPacker::for_alphabet(OutputAlphabet::Url);
//! packer.write_bits(0b110011, 6);
//! let units = packer.finish(0, 0);
//! assert_eq!(OutputAlphabet::Url.render(&units), "z");
//!
//! let mut unpacker = BitUnpacker::for_alphabet(&units, OutputAlphabet::Url);
//! assert_eq!(unpacker.read_bits(6).unwrap(), 0b110011);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod alphabet;
pub mod bitstream;
pub mod error;

// Re-exports for convenience
pub use alphabet::{BASE64URL_TABLE, OutputAlphabet};
pub use bitstream::{BitPacker, BitUnpacker};
pub use error::{ErrorKind, OxiUrlError, Result};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::alphabet::OutputAlphabet;
    pub use crate::bitstream::{BitPacker, BitUnpacker};
    pub use crate::error::{ErrorKind, OxiUrlError, Result};
}
