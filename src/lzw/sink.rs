//! Output sinks for decoded bytes.
//!
//! The decoder hands every resolved string to a [`Sink`] in decode order. The
//! sink is chosen when the decoder is built:
//!
//! | Sink | Behaviour |
//! |------|-----------|
//! | `Vec<u8>` | grows without bound |
//! | [`WriteSink`] | forwards to any `io::Write` |
//! | [`BoundedBuffer`] | fixed limit, drained by the caller between chunks |
//!
//! A sink never loses bytes silently: if it cannot take a run it returns an
//! error and the decoder faults.

use std::io::{self, Write};

/// Destination for decoded byte runs.
pub trait Sink {
    /// Deliver the next run of decoded bytes.
    fn emit(&mut self, bytes: &[u8]) -> io::Result<()>;
}

impl Sink for Vec<u8> {
    #[inline]
    fn emit(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    #[inline]
    fn emit(&mut self, bytes: &[u8]) -> io::Result<()> {
        (**self).emit(bytes)
    }
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    #[inline]
    fn emit(&mut self, bytes: &[u8]) -> io::Result<()> {
        (**self).emit(bytes)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// WriteSink
// ─────────────────────────────────────────────────────────────────────────────

/// Writes every run straight through to `W`.
#[derive(Debug)]
pub struct WriteSink<W: Write> {
    inner: W,
    written: u64,
}

impl<W: Write> WriteSink<W> {
    pub fn new(inner: W) -> Self {
        WriteSink { inner, written: 0 }
    }

    /// Bytes accepted so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Sink for WriteSink<W> {
    #[inline]
    fn emit(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.inner.write_all(bytes)?;
        self.written += bytes.len() as u64;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// BoundedBuffer
// ─────────────────────────────────────────────────────────────────────────────

/// Accumulates output up to a fixed limit.
///
/// Intended for targets that cannot grow memory: size it to at least the
/// longest string the dictionary can produce (its capacity) and drain it
/// after each chunk. A run that does not fit is refused whole with
/// [`io::ErrorKind::WriteZero`].
#[derive(Debug, Clone)]
pub struct BoundedBuffer {
    buf: Vec<u8>,
    limit: usize,
}

impl BoundedBuffer {
    pub fn new(limit: usize) -> Self {
        BoundedBuffer {
            buf: Vec::with_capacity(limit),
            limit,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Free space left before the limit.
    pub fn remaining(&self) -> usize {
        self.limit - self.buf.len()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Take the buffered bytes, leaving the buffer empty.
    pub fn drain(&mut self) -> Vec<u8> {
        std::mem::replace(&mut self.buf, Vec::with_capacity(self.limit))
    }

    /// Empty the buffer without returning its contents.
    pub fn clear(&mut self) {
        self.buf.clear();
    }
}

impl Sink for BoundedBuffer {
    fn emit(&mut self, bytes: &[u8]) -> io::Result<()> {
        if bytes.len() > self.remaining() {
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                format!(
                    "output buffer full: {} bytes pending, {} free",
                    bytes.len(),
                    self.remaining()
                ),
            ));
        }
        self.buf.extend_from_slice(bytes);
        Ok(())
    }
}
