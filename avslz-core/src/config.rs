//! Structural parameters of an AVS-LZ stream.
//!
//! A match is packed into a 16-bit code: the back-reference offset occupies
//! the high `16 - length_bits` bits and `length - min_match` the low
//! `length_bits` bits. An encoder and a decoder must share the same
//! configuration to interoperate; nothing in the stream records it.

use crate::error::{AvsLzError, Result};

/// Width of a packed match code in bits.
pub const CODE_BITS: u32 = 16;

/// Maximum number of tokens in one block (one per flag bit).
pub const TOKENS_PER_BLOCK: usize = 8;

/// AVS-LZ configuration parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LzConfig {
    /// Window capacity in bytes (power of two).
    pub window_size: usize,
    /// Bits of the match code holding `length - min_match`.
    pub length_bits: u32,
    /// Shortest match worth encoding.
    pub min_match: usize,
    /// Number of candidate offsets the encoder scans per position.
    pub search_distance: usize,
    /// Capacity of the encoder's staging buffer.
    pub staging_size: usize,
}

impl LzConfig {
    /// The AVS-LZ parameters.
    ///
    /// - 4 KiB window, 12-bit offsets
    /// - 4-bit lengths, matches of 3 to 18 bytes
    /// - 256 candidate offsets per position
    /// - 1 KiB staging buffer
    pub const AVS: Self = Self {
        window_size: 4096,
        length_bits: 4,
        min_match: 3,
        search_distance: 256,
        staging_size: 1024,
    };

    /// Create a validated configuration.
    pub fn new(
        window_size: usize,
        length_bits: u32,
        min_match: usize,
        search_distance: usize,
        staging_size: usize,
    ) -> Result<Self> {
        let config = Self {
            window_size,
            length_bits,
            min_match,
            search_distance,
            staging_size,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that the parameters describe a representable stream.
    pub fn validate(&self) -> Result<()> {
        if !(1..=8).contains(&self.length_bits) {
            return Err(AvsLzError::invalid_config(format!(
                "length field must be 1-8 bits, got {}",
                self.length_bits
            )));
        }
        if self.window_size == 0 || !self.window_size.is_power_of_two() {
            return Err(AvsLzError::invalid_config(format!(
                "window size must be a power of 2, got {}",
                self.window_size
            )));
        }
        if self.window_size > 1 << self.offset_bits() {
            return Err(AvsLzError::invalid_config(format!(
                "window size {} is not addressable with {} offset bits",
                self.window_size,
                self.offset_bits()
            )));
        }
        if self.min_match == 0 {
            return Err(AvsLzError::invalid_config("minimum match length must be at least 1"));
        }
        if self.search_distance == 0 || self.search_distance > self.window_size {
            return Err(AvsLzError::invalid_config(format!(
                "search distance must be 1-{}, got {}",
                self.window_size, self.search_distance
            )));
        }
        if self.staging_size == 0 {
            return Err(AvsLzError::invalid_config("staging buffer must not be empty"));
        }
        Ok(())
    }

    /// Bits of the match code holding the offset.
    pub fn offset_bits(&self) -> u32 {
        CODE_BITS - self.length_bits
    }

    /// Mask selecting the length field of a match code.
    pub fn length_mask(&self) -> u16 {
        (1 << self.length_bits) - 1
    }

    /// Largest offset representable in a match code.
    pub fn max_offset(&self) -> usize {
        (1 << self.offset_bits()) - 1
    }

    /// Longest match representable in a match code.
    pub fn max_match(&self) -> usize {
        self.min_match + self.length_mask() as usize
    }

    /// Most bytes a single block can expand to.
    pub fn max_block_output(&self) -> usize {
        TOKENS_PER_BLOCK * self.max_match()
    }
}

impl Default for LzConfig {
    fn default() -> Self {
        Self::AVS
    }
}
