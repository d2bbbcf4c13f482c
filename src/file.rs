//! Streaming LZW decoding over `std::io`.
//!
//! # Public API
//! - [`LzwReader`]: `impl Read` adaptor: reads codes from `R`, yields bytes
//! - [`decode_all`]: convenience: decode a complete in-memory stream
//! - [`decode_all_with`]: the same against a restored dictionary

use std::io::{self, Read};

use crate::config::CHUNK_SIZE_DEFAULT;
use crate::lzw::{Decoder, DecoderConfig, DictionarySnapshot, LzwError, SnapshotError};

// ─────────────────────────────────────────────────────────────────────────────
// LzwReader<R>
// ─────────────────────────────────────────────────────────────────────────────

/// Streaming LZW decoder backed by any `R: Read`.
///
/// Compressed bytes are pulled from `R` one chunk at a time; decoded bytes
/// are buffered until the caller reads them. The end of `R` is the end of the
/// stream, checked according to the decoder's strictness.
///
/// ```
/// use std::io::Read;
/// use lzwd::file::LzwReader;
/// use lzwd::DecoderConfig;
///
/// let stream: &[u8] = &[0x41, 0x80, 0x10, 0x40];
/// let mut out = String::new();
/// LzwReader::new(stream, DecoderConfig::default())
///     .read_to_string(&mut out)
///     .unwrap();
/// assert_eq!(out, "AAAA");
/// ```
pub struct LzwReader<R: Read> {
    decoder: Decoder<Vec<u8>>,
    inner: R,
    /// Compressed bytes read from `inner`, one chunk at a time.
    src_buf: Vec<u8>,
    /// Read offset within the decoder's output buffer.
    out_pos: usize,
    eof: bool,
    /// Error held back until the output decoded before it has been read.
    fault: Option<LzwError>,
}

impl<R: Read> LzwReader<R> {
    /// A reader decoding with a fresh, literal-only dictionary.
    pub fn new(reader: R, config: DecoderConfig) -> Self {
        Self::from_decoder(reader, Decoder::new(config, Vec::new()))
    }

    /// A reader decoding fixed-width codes against a saved dictionary.
    pub fn with_snapshot(
        reader: R,
        config: DecoderConfig,
        snapshot: &DictionarySnapshot,
    ) -> Result<Self, SnapshotError> {
        Ok(Self::from_decoder(
            reader,
            Decoder::restore(config, snapshot, Vec::new())?,
        ))
    }

    fn from_decoder(inner: R, decoder: Decoder<Vec<u8>>) -> Self {
        LzwReader {
            decoder,
            inner,
            src_buf: vec![0u8; CHUNK_SIZE_DEFAULT],
            out_pos: 0,
            eof: false,
            fault: None,
        }
    }

    /// Read compressed input `chunk_size` bytes at a time (minimum 1).
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.src_buf = vec![0u8; chunk_size.max(1)];
        self
    }

    /// The underlying decoder, e.g. for its stats or a dictionary snapshot.
    pub fn decoder(&self) -> &Decoder<Vec<u8>> {
        &self.decoder
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Decode the next chunk into the (drained) output buffer.
    /// Returns `false` once the input is exhausted.
    fn fill(&mut self) -> io::Result<bool> {
        self.decoder.sink_mut().clear();
        self.out_pos = 0;

        let n = match self.inner.read(&mut self.src_buf) {
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => return Ok(true),
            Err(e) => return Err(e),
        };
        if n == 0 {
            self.eof = true;
            self.decoder.check_end()?;
            return Ok(false);
        }
        if let Err(err) = self.decoder.decode_chunk(&self.src_buf[..n]) {
            if self.decoder.sink().is_empty() {
                return Err(err.into());
            }
            self.fault = Some(err);
        }
        Ok(true)
    }
}

impl<R: Read> Read for LzwReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        loop {
            let pending = &self.decoder.sink()[self.out_pos..];
            if !pending.is_empty() {
                let n = pending.len().min(buf.len());
                buf[..n].copy_from_slice(&pending[..n]);
                self.out_pos += n;
                return Ok(n);
            }
            if let Some(err) = self.fault {
                return Err(err.into());
            }
            if self.eof || !self.fill()? {
                return Ok(0);
            }
        }
    }
}

impl<R: Read> core::fmt::Debug for LzwReader<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LzwReader")
            .field("decoder", &self.decoder)
            .field("chunk_size", &self.src_buf.len())
            .field("eof", &self.eof)
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// One-shot helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Decode a complete stream held in memory.
pub fn decode_all(data: &[u8], config: DecoderConfig) -> Result<Vec<u8>, LzwError> {
    let mut decoder = Decoder::new(config, Vec::with_capacity(data.len().saturating_mul(2)));
    decoder.decode_chunk(data)?;
    decoder.finish()
}

/// Decode a complete stream of fixed-width codes against a saved dictionary.
pub fn decode_all_with(
    data: &[u8],
    config: DecoderConfig,
    snapshot: &DictionarySnapshot,
) -> io::Result<Vec<u8>> {
    let mut decoder = Decoder::restore(config, snapshot, Vec::new())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    decoder.decode_chunk(data)?;
    Ok(decoder.finish()?)
}
