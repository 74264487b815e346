//! # AVS-LZ
//!
//! Pure Rust implementation of the AVS-LZ stream format, an LZSS variant
//! built from a 4 KiB sliding window and flag-tagged tokens.
//!
//! ## Format
//!
//! ```text
//! stream := block* end-marker
//! block  := flag-byte token{1..8}
//! token  := literal (1 byte, flag bit set)
//!         | match   (2 bytes big endian, flag bit clear)
//! match  := offset:12 | (length - 3):4
//! end    := 0x00 0x00 0x00
//! ```
//!
//! Flag bits are consumed least significant first. The match code `0x0000`
//! is reserved and ends the stream wherever it appears.
//!
//! ## Example
//!
//! ```rust
//! use avslz::{compress, decompress};
//!
//! let original = b"Hello Hello Hello World";
//!
//! let compressed = compress(original).unwrap();
//! assert!(compressed.len() < original.len());
//!
//! let decompressed = decompress(&compressed).unwrap();
//! assert_eq!(decompressed, original);
//! ```
//!
//! ## Streaming
//!
//! ```rust
//! use avslz::{LzReader, LzWriter};
//! use std::io::{Read, Write};
//!
//! let mut writer = LzWriter::new(Vec::new());
//! writer.write_all(b"streamed ").unwrap();
//! writer.write_all(b"streamed data").unwrap();
//! // Nothing is guaranteed to reach the sink before `finish`.
//! let compressed = writer.finish().unwrap();
//!
//! let mut output = String::new();
//! LzReader::new(&compressed[..]).read_to_string(&mut output).unwrap();
//! assert_eq!(output, "streamed streamed data");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod decoder;
mod encoder;
mod token;

pub use avslz_core::{AvsLzError, LzConfig, Result};
pub use decoder::LzReader;
pub use encoder::LzWriter;
pub use token::{END_MARKER, END_OF_STREAM, Token};

use std::io::{Read, Write};

/// Compress data with the AVS parameters.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    compress_with_config(data, LzConfig::AVS)
}

/// Compress data with a custom configuration.
///
/// The output can only be decompressed with the same configuration.
pub fn compress_with_config(data: &[u8], config: LzConfig) -> Result<Vec<u8>> {
    // Worst case: every byte a literal, plus one flag byte per 8 and the
    // end marker.
    let bound = data.len() + data.len().div_ceil(8) + 1 + END_MARKER.len();
    let mut writer = LzWriter::with_config(Vec::with_capacity(bound), config)?;
    writer.write_all(data)?;
    Ok(writer.finish()?)
}

/// Decompress an AVS-LZ stream with the AVS parameters.
///
/// Input after the end marker is ignored.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    decompress_with_config(data, LzConfig::AVS)
}

/// Decompress an AVS-LZ stream with a custom configuration.
pub fn decompress_with_config(data: &[u8], config: LzConfig) -> Result<Vec<u8>> {
    let mut reader = LzReader::with_config(data, config)?;
    let mut output = Vec::with_capacity(data.len() * 2);
    reader
        .read_to_end(&mut output)
        .map_err(|e| AvsLzError::from_io(e, reader.total_in()))?;
    Ok(output)
}
