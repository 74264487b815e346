//! AVS-LZ decoder (decompression).
//!
//! [`LzReader`] is a pull-based source: each time its ready buffer runs dry
//! it decodes one more block from the underlying reader. Decoding stops at the
//! end-of-stream code; running out of input before that point is an error.

use std::io::{self, BufReader, Read};

use avslz_core::{AvsLzError, LzConfig, TOKENS_PER_BLOCK, Window};
use tracing::{debug, trace};

use crate::token::Token;

/// A reader that decompresses data read from an underlying reader.
#[derive(Debug)]
pub struct LzReader<R: Read> {
    inner: BufReader<R>,
    config: LzConfig,
    window: Window,
    /// Bytes produced by the most recent block.
    ready: Vec<u8>,
    /// Read position in `ready`.
    pos: usize,
    finished: bool,
    total_in: u64,
    total_out: u64,
}

impl<R: Read> LzReader<R> {
    /// Create a new decoder using the AVS parameters.
    ///
    /// The reader is wrapped in a [`BufReader`]; the codec consumes input a
    /// byte or two at a time.
    pub fn new(reader: R) -> Self {
        Self::build(reader, LzConfig::AVS)
    }

    /// Create a new decoder with a custom configuration.
    pub fn with_config(reader: R, config: LzConfig) -> avslz_core::Result<Self> {
        config.validate()?;
        Ok(Self::build(reader, config))
    }

    fn build(reader: R, config: LzConfig) -> Self {
        Self {
            inner: BufReader::new(reader),
            config,
            window: Window::new(config.window_size),
            ready: Vec::with_capacity(config.max_block_output()),
            pos: 0,
            finished: false,
            total_in: 0,
            total_out: 0,
        }
    }

    /// Get the configuration in use.
    pub fn config(&self) -> &LzConfig {
        &self.config
    }

    /// Get a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        self.inner.get_ref()
    }

    /// Consume the decoder and return the underlying reader.
    ///
    /// Input that was buffered but not yet decoded is lost.
    pub fn into_inner(self) -> R {
        self.inner.into_inner()
    }

    /// Whether the end-of-stream code has been decoded.
    ///
    /// Decoded bytes may still be waiting to be read.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Compressed bytes consumed so far.
    pub fn total_in(&self) -> u64 {
        self.total_in
    }

    /// Decompressed bytes handed to the caller so far.
    pub fn total_out(&self) -> u64 {
        self.total_out
    }

    fn read_exact_counted(&mut self, buf: &mut [u8]) -> io::Result<()> {
        match self.inner.read_exact(buf) {
            Ok(()) => {
                self.total_in += buf.len() as u64;
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                Err(AvsLzError::unexpected_eof(self.total_in).into())
            }
            Err(e) => Err(e),
        }
    }

    fn read_u8(&mut self) -> io::Result<u8> {
        let mut byte = [0u8; 1];
        self.read_exact_counted(&mut byte)?;
        Ok(byte[0])
    }

    fn emit(&mut self, byte: u8) {
        self.window.put(byte);
        self.ready.push(byte);
    }

    /// Read the token in a block slot; `literal` is the slot's flag bit.
    fn read_token(&mut self, literal: bool) -> io::Result<Token> {
        if literal {
            return Ok(Token::Literal(self.read_u8()?));
        }

        let mut code = [0u8; 2];
        self.read_exact_counted(&mut code)?;
        Ok(Token::from_code(u16::from_be_bytes(code), &self.config))
    }

    /// Decode one block into the ready buffer.
    fn decode_block(&mut self) -> io::Result<()> {
        self.ready.clear();
        self.pos = 0;

        let flags = self.read_u8()?;
        for bit in 0..TOKENS_PER_BLOCK {
            match self.read_token((flags >> bit) & 1 == 1)? {
                Token::Literal(byte) => self.emit(byte),
                Token::Match { offset, length } => {
                    // Byte by byte: with offset < length the source overlaps
                    // the bytes being produced.
                    for _ in 0..length {
                        let byte = self.window.back(offset);
                        self.emit(byte);
                    }
                }
                Token::EndOfStream => {
                    self.finished = true;
                    debug!(total_in = self.total_in, "reached end of AVS-LZ stream");
                    break;
                }
            }
        }

        trace!(flags, len = self.ready.len(), "decoded block");
        Ok(())
    }
}

impl<R: Read> Read for LzReader<R> {
    /// Decodes at most one new block per call once some bytes have been
    /// copied, so an error is only returned when `buf` was left untouched.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut written = 0;

        while written < buf.len() {
            if self.pos >= self.ready.len() {
                if self.finished || written > 0 {
                    break;
                }
                self.decode_block()?;
                continue;
            }

            let available = &self.ready[self.pos..];
            let take = available.len().min(buf.len() - written);
            buf[written..written + take].copy_from_slice(&available[..take]);
            self.pos += take;
            written += take;
        }

        self.total_out += written as u64;
        Ok(written)
    }
}
