//! Sliding-window matching for the URL codec.
//!
//! The encoder side ([`MatchFinder`]) keeps, for every literal value, the
//! last position it occurred at, and for every consumed position the
//! previous position holding the same value. Together these form one
//! occurrence chain per value, walked from the nearest occurrence outwards
//! until the window limit.
//!
//! The decoder side ([`WindowExpander`]) replays back-references into the
//! output buffer one byte at a time, so a reference may overlap the bytes it
//! is producing.

use crate::integer::required_bits;
use crate::mode::constants::{MAX_MATCH, MIN_MATCH, WINDOW_SIZE};
use oxiurl_core::error::{OxiUrlError, Result};

/// Sliding-window token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// A literal symbol.
    Literal(u8),
    /// A copy of earlier output.
    Match {
        /// Number of symbols to copy (`MIN_MATCH..=MAX_MATCH`).
        length: usize,
        /// Distance back to the copy source, minus one.
        offset: usize,
    },
}

impl Token {
    /// Number of input symbols this token covers.
    pub fn span(&self) -> usize {
        match self {
            Self::Literal(_) => 1,
            Self::Match { length, .. } => *length,
        }
    }
}

/// Width of the offset field for a back-reference starting at `position`.
///
/// Grows with the history actually available, capped at the window size.
pub fn offset_bits(position: usize) -> u8 {
    required_bits(position.saturating_sub(1).min(WINDOW_SIZE - 1))
}

/// Greedy match finder producing [`Token`]s over a symbol sequence.
#[derive(Debug)]
pub struct MatchFinder<'a> {
    /// Input symbols.
    data: &'a [u8],
    /// Next position to encode.
    position: usize,
    /// Most recent position of each symbol value.
    last_index: [Option<usize>; 256],
    /// Previous position with the same value, for every consumed position.
    prev_index: Vec<Option<usize>>,
}

impl<'a> MatchFinder<'a> {
    /// Create a finder over `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            position: 0,
            last_index: [None; 256],
            prev_index: Vec::with_capacity(data.len()),
        }
    }

    /// Position of the next token.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Find the longest match for the current position.
    ///
    /// Candidates are visited nearest first; the first candidate reaching a
    /// new best length is kept, so among equal lengths the nearest wins.
    /// Returns `(length, start)`.
    fn find_match(&self) -> Option<(usize, usize)> {
        let pos = self.position;
        let mut best: Option<(usize, usize)> = None;
        let mut candidate = self.last_index[usize::from(self.data[pos])];

        while let Some(start) = candidate {
            if pos - start > WINDOW_SIZE {
                break;
            }

            let mut length = 1;
            while pos + length < self.data.len()
                && self.data[pos + length] == self.data[start + length]
            {
                length += 1;
                if length >= MAX_MATCH {
                    break;
                }
            }

            if best.is_none_or(|(best_len, _)| length > best_len) {
                best = Some((length, start));
                if length >= MAX_MATCH {
                    break;
                }
            }

            candidate = self.prev_index[start];
        }

        best.filter(|&(length, _)| length >= MIN_MATCH)
    }

    /// Record `count` consumed positions in the occurrence chains.
    fn advance(&mut self, count: usize) {
        for _ in 0..count {
            let slot = &mut self.last_index[usize::from(self.data[self.position])];
            self.prev_index.push(*slot);
            *slot = Some(self.position);
            self.position += 1;
        }
    }
}

impl Iterator for MatchFinder<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let symbol = *self.data.get(self.position)?;

        let token = match self.find_match() {
            Some((length, start)) => Token::Match {
                length,
                offset: self.position - start - 1,
            },
            None => Token::Literal(symbol),
        };

        self.advance(token.span());
        Some(token)
    }
}

/// Output buffer replaying literals and back-references.
#[derive(Debug, Default)]
pub struct WindowExpander {
    output: Vec<u8>,
}

impl WindowExpander {
    /// Create an empty expander.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a literal symbol.
    pub fn push_literal(&mut self, symbol: u8) {
        self.output.push(symbol);
    }

    /// Copy `length` symbols starting `offset + 1` positions back.
    pub fn copy_match(&mut self, length: usize, offset: usize) -> Result<()> {
        let history = self.output.len();
        if offset >= history {
            return Err(OxiUrlError::invalid_distance(offset, history));
        }
        if length > MAX_MATCH {
            return Err(OxiUrlError::match_too_long(length as u64, MAX_MATCH));
        }

        let start = history - offset - 1;
        self.output.reserve(length);
        for i in 0..length {
            let symbol = self.output[start + i];
            self.output.push(symbol);
        }

        Ok(())
    }

    /// Number of symbols produced so far.
    pub fn len(&self) -> usize {
        self.output.len()
    }

    /// Check whether nothing has been produced yet.
    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    /// Get the produced symbols.
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Take the produced symbols.
    pub fn into_output(self) -> Vec<u8> {
        self.output
    }
}
