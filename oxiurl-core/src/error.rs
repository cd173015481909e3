//! Error types for OxiUrl operations.
//!
//! Every failure in the codec is reported through [`OxiUrlError`]. The
//! variants carry enough positional context to locate the problem, while
//! [`OxiUrlError::kind`] collapses them into the three coarse categories a
//! caller usually branches on.

use thiserror::Error;

/// Coarse classification of an [`OxiUrlError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller passed an argument the codec cannot work with.
    InvalidArgument,
    /// The input text could not be transcoded for compression.
    EncodingFailed,
    /// The compressed input is malformed or was not produced by this codec.
    CorruptStream,
}

/// The main error type for OxiUrl operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OxiUrlError {
    /// Invalid argument (e.g. an empty compressed string).
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the problem.
        message: String,
    },

    /// A lead surrogate without a following trail surrogate.
    #[error("Unpaired surrogate at code unit {position}")]
    UnpairedSurrogate {
        /// Index of the offending lead surrogate.
        position: usize,
    },

    /// A composed scalar value above U+10FFFF.
    #[error("Scalar value {scalar:#x} is outside the Unicode range")]
    ScalarOutOfRange {
        /// The composed scalar value.
        scalar: u32,
    },

    /// A character outside the active output alphabet.
    #[error("Invalid character {ch:?} at position {position}")]
    InvalidCharacter {
        /// Character index in the compressed input.
        position: usize,
        /// The rejected character.
        ch: char,
    },

    /// Malformed UTF-8 byte sequence.
    #[error("Invalid UTF-8 at byte {offset}: {message}")]
    InvalidUtf8 {
        /// Byte offset of the sequence start.
        offset: usize,
        /// Description of the problem.
        message: String,
    },

    /// Decoded code units do not form valid UTF-16.
    #[error("Invalid UTF-16 in expanded text: {message}")]
    InvalidUtf16 {
        /// Description of the problem.
        message: String,
    },

    /// The bit stream ended inside a field that must be complete.
    #[error("Unexpected end of stream at bit position {bit_position}")]
    UnexpectedEof {
        /// Bit position where more data was required.
        bit_position: u64,
    },

    /// A back-reference pointing outside the already decoded output.
    #[error("Invalid back-reference distance: {distance} exceeds history size {history_size}")]
    InvalidDistance {
        /// Decoded offset field.
        distance: usize,
        /// Output length at the time of the reference.
        history_size: usize,
    },

    /// A back-reference longer than the match limit.
    #[error("Match length {length} exceeds limit {limit}")]
    MatchTooLong {
        /// Decoded match length.
        length: u64,
        /// Maximum allowed match length.
        limit: usize,
    },
}

/// Result type alias for OxiUrl operations.
pub type Result<T> = std::result::Result<T, OxiUrlError>;

impl OxiUrlError {
    /// Create an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an unpaired surrogate error.
    pub fn unpaired_surrogate(position: usize) -> Self {
        Self::UnpairedSurrogate { position }
    }

    /// Create a scalar-out-of-range error.
    pub fn scalar_out_of_range(scalar: u32) -> Self {
        Self::ScalarOutOfRange { scalar }
    }

    /// Create an invalid character error.
    pub fn invalid_character(position: usize, ch: char) -> Self {
        Self::InvalidCharacter { position, ch }
    }

    /// Create an invalid UTF-8 error.
    pub fn invalid_utf8(offset: usize, message: impl Into<String>) -> Self {
        Self::InvalidUtf8 {
            offset,
            message: message.into(),
        }
    }

    /// Create an invalid UTF-16 error.
    pub fn invalid_utf16(message: impl Into<String>) -> Self {
        Self::InvalidUtf16 {
            message: message.into(),
        }
    }

    /// Create an unexpected end-of-stream error.
    pub fn unexpected_eof(bit_position: u64) -> Self {
        Self::UnexpectedEof { bit_position }
    }

    /// Create an invalid distance error.
    pub fn invalid_distance(distance: usize, history_size: usize) -> Self {
        Self::InvalidDistance {
            distance,
            history_size,
        }
    }

    /// Create a match-too-long error.
    pub fn match_too_long(length: u64, limit: usize) -> Self {
        Self::MatchTooLong { length, limit }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::UnpairedSurrogate { .. } | Self::ScalarOutOfRange { .. } => {
                ErrorKind::EncodingFailed
            }
            Self::InvalidCharacter { .. }
            | Self::InvalidUtf8 { .. }
            | Self::InvalidUtf16 { .. }
            | Self::UnexpectedEof { .. }
            | Self::InvalidDistance { .. }
            | Self::MatchTooLong { .. } => ErrorKind::CorruptStream,
        }
    }
}
