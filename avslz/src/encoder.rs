//! AVS-LZ encoder (compression).
//!
//! [`LzWriter`] is a push-based sink: bytes written to it collect in a
//! staging buffer, and each full staging buffer is packed into blocks that
//! go to the underlying writer. Matches never span two staging buffers.
//!
//! Output is only complete once [`LzWriter::finish`] has run. Until then the
//! tail of the input may sit in the staging buffer and the current block may
//! be partially packed.

use std::io::{self, Write};

use avslz_core::{LzConfig, TOKENS_PER_BLOCK, Window};
use tracing::{debug, trace};

use crate::token::{END_MARKER, Token};

/// A writer that compresses data written to it.
#[derive(Debug)]
pub struct LzWriter<W: Write> {
    inner: W,
    config: LzConfig,
    window: Window,
    /// Uncompressed bytes waiting to be packed.
    staging: Vec<u8>,
    /// Payload of the current block, preceded by a slot for its flag byte.
    block: Vec<u8>,
    flags: u8,
    tokens: usize,
    total_in: u64,
    total_out: u64,
}

impl<W: Write> LzWriter<W> {
    /// Create a new encoder using the AVS parameters.
    pub fn new(writer: W) -> Self {
        Self::build(writer, LzConfig::AVS)
    }

    /// Create a new encoder with a custom configuration.
    pub fn with_config(writer: W, config: LzConfig) -> avslz_core::Result<Self> {
        config.validate()?;
        Ok(Self::build(writer, config))
    }

    fn build(inner: W, config: LzConfig) -> Self {
        let mut block = Vec::with_capacity(1 + 2 * TOKENS_PER_BLOCK);
        block.push(0);

        Self {
            inner,
            config,
            window: Window::new(config.window_size),
            staging: Vec::with_capacity(config.staging_size),
            block,
            flags: 0,
            tokens: 0,
            total_in: 0,
            total_out: 0,
        }
    }

    /// Get the configuration in use.
    pub fn config(&self) -> &LzConfig {
        &self.config
    }

    /// Get a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Get a mutable reference to the underlying writer.
    ///
    /// Writing to it directly corrupts the compressed stream.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    /// Uncompressed bytes accepted so far.
    pub fn total_in(&self) -> u64 {
        self.total_in
    }

    /// Compressed bytes written to the underlying writer so far.
    pub fn total_out(&self) -> u64 {
        self.total_out
    }

    /// Pack the remaining input, write the final block and the end marker,
    /// and return the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.pack_staged()?;
        self.flush_block()?;
        self.inner.write_all(&END_MARKER)?;
        self.total_out += END_MARKER.len() as u64;
        self.inner.flush()?;

        debug!(
            total_in = self.total_in,
            total_out = self.total_out,
            "finished AVS-LZ stream"
        );
        Ok(self.inner)
    }

    /// Write the current block, even if it holds fewer than 8 tokens.
    fn flush_block(&mut self) -> io::Result<()> {
        self.block[0] = self.flags;
        self.inner.write_all(&self.block)?;
        self.total_out += self.block.len() as u64;

        trace!(
            flags = self.flags,
            tokens = self.tokens,
            len = self.block.len(),
            "flushed block"
        );

        self.block.truncate(1);
        self.flags = 0;
        self.tokens = 0;
        Ok(())
    }

    /// Find the longest back-reference for `staging[pos..]`.
    ///
    /// Returns `(offset, length)`; a length below `min_match` means no usable
    /// match. Candidates are scanned from offset 0 upward and the first
    /// longest one wins.
    fn find_match(&self, pos: usize) -> (usize, usize) {
        let lookahead = &self.staging[pos..];
        if lookahead.len() <= self.config.min_match {
            return (0, 0);
        }

        let max_len = lookahead.len().min(self.config.max_match());
        let head = self.window.head() as isize;
        let mut best = (0, 0);

        for offset in 0..self.config.search_distance {
            let start = head - offset as isize;
            let mut len = 0;

            // The read position must stay behind the head: the window is not
            // updated while a candidate is compared.
            while len < max_len
                && start + (len as isize) < head
                && self.window.at(start + len as isize) == lookahead[len]
            {
                len += 1;
            }

            if len == self.config.max_match() {
                return (offset, len);
            }
            if len > best.1 {
                best = (offset, len);
            }
        }

        best
    }

    /// Pack the whole staging buffer into tokens and empty it.
    fn pack_staged(&mut self) -> io::Result<()> {
        let mut pos = 0;

        while pos < self.staging.len() {
            if self.tokens >= TOKENS_PER_BLOCK {
                self.flush_block()?;
            }

            let (offset, length) = self.find_match(pos);
            if length >= self.config.min_match {
                let code = Token::pack_match(offset, length, &self.config);
                self.block.extend_from_slice(&code.to_be_bytes());

                for &byte in &self.staging[pos..pos + length] {
                    self.window.put(byte);
                }
                pos += length;
            } else {
                let byte = self.staging[pos];
                self.flags |= 1 << self.tokens;
                self.block.push(byte);
                self.window.put(byte);
                pos += 1;
            }

            self.tokens += 1;
        }

        self.staging.clear();
        Ok(())
    }
}

impl<W: Write> Write for LzWriter<W> {
    fn write(&mut self, mut buf: &[u8]) -> io::Result<usize> {
        let accepted = buf.len();

        while !buf.is_empty() {
            if self.staging.len() >= self.config.staging_size {
                self.pack_staged()?;
            }

            let room = self.config.staging_size - self.staging.len();
            let take = room.min(buf.len());
            self.staging.extend_from_slice(&buf[..take]);
            self.total_in += take as u64;
            buf = &buf[take..];
        }

        Ok(accepted)
    }

    /// Flush the underlying writer.
    ///
    /// Staged input and the partially packed block are not written: a block
    /// cannot be closed before it holds 8 tokens without ending the stream.
    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
