//! Tokens and the match-code bit layout.
//!
//! Every block starts with a flag byte. Bit `n` (least significant first)
//! describes the `n`-th token of the block: a set bit is followed by one
//! literal byte, a clear bit by a big-endian 16-bit match code.

use avslz_core::LzConfig;

/// The match code reserved for end of stream.
pub const END_OF_STREAM: u16 = 0;

/// Bytes written by the encoder after the last block: an empty flag byte
/// followed by the end-of-stream code.
pub const END_MARKER: [u8; 3] = [0x00, 0x00, 0x00];

/// An AVS-LZ token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// A literal byte.
    Literal(u8),
    /// A back-reference into the window.
    Match {
        /// Distance back from the window head.
        offset: usize,
        /// Number of bytes to copy.
        length: usize,
    },
    /// Terminates the stream.
    EndOfStream,
}

impl Token {
    /// Pack a match into its 16-bit code.
    ///
    /// The caller guarantees `1 <= offset <= max_offset` and
    /// `min_match <= length <= max_match`.
    pub fn pack_match(offset: usize, length: usize, config: &LzConfig) -> u16 {
        debug_assert!(offset >= 1 && offset <= config.max_offset());
        debug_assert!(length >= config.min_match && length <= config.max_match());

        ((offset as u16) << config.length_bits) | (length - config.min_match) as u16
    }

    /// Interpret a 16-bit code read from a match slot.
    pub fn from_code(code: u16, config: &LzConfig) -> Self {
        if code == END_OF_STREAM {
            return Self::EndOfStream;
        }

        Self::Match {
            offset: (code >> config.length_bits) as usize,
            length: (code & config.length_mask()) as usize + config.min_match,
        }
    }
}
