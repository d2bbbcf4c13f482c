//! The LZW decode engine.
//!
//! [`Decoder`] turns a stream of variable-width codes back into bytes while
//! rebuilding the encoder's dictionary one step behind it. Input arrives in
//! chunks of any size through [`Decoder::decode_chunk`]; decoded strings go
//! to the [`Sink`] supplied at construction.
//!
//! # Growth policy
//!
//! The encoder learns `previous + next_byte` when it emits a code, but the
//! decoder only sees `next_byte` when the following code arrives, so every
//! dictionary add lags one code behind. Consequently:
//!
//! - the first code of a session (or after a reset) adds nothing;
//! - a code equal to `max_code + 1` refers to the entry that code is about to
//!   create (`previous + first byte of previous`);
//! - the code width grows once `max_code + 1 == 2^width`, capped at 24 bits;
//! - once `max_code + 1 == capacity` both sides drop every learned entry and
//!   restart at 8 bits, with no marker in the stream.
//!
//! A decoder built with [`Decoder::restore`] skips all of this: it resolves
//! fixed-width codes against the restored table and never learns.

use super::bits::BitReader;
use super::dict::Dictionary;
use super::sink::Sink;
use super::snapshot::{DictionarySnapshot, SnapshotError};
use super::types::{
    Code, DecoderConfig, LzwError, Phase, CODE_WIDTH_MAX, CODE_WIDTH_MIN, MAX_LITERAL,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Fresh dictionary, grown in lockstep with the encoder.
    Learning,
    /// Dictionary loaded from a snapshot; output only.
    Restored,
}

/// What a single code does to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    /// First code since start or reset: a literal, no dictionary add.
    First,
    /// A live code: emit it, then learn `prefix + its first byte`.
    Known { prefix: Code },
    /// `max_code + 1`: learn `prefix + first byte of prefix`, then emit it.
    Repeat { prefix: Code },
    /// Restored mode: emit a code from the fixed table.
    Lookup,
}

/// Running totals for one decoder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeStats {
    /// Codes decoded successfully.
    pub codes: u64,
    /// Bytes delivered to the sink.
    pub bytes_out: u64,
    /// Dictionary resets triggered by reaching capacity.
    pub resets: u64,
}

/// Streaming LZW decoder writing into `S`.
pub struct Decoder<S: Sink> {
    dict: Dictionary,
    bits: BitReader,
    code_width: u32,
    previous: Option<Code>,
    first_byte: u8,
    mode: Mode,
    phase: Phase,
    strict: bool,
    stats: DecodeStats,
    sink: S,
}

impl<S: Sink> Decoder<S> {
    /// A decoder with a literal-only dictionary, reading 8-bit codes first.
    pub fn new(config: DecoderConfig, sink: S) -> Self {
        Decoder {
            dict: Dictionary::with_capacity(config.capacity()),
            bits: BitReader::new(),
            code_width: CODE_WIDTH_MIN,
            previous: None,
            first_byte: 0,
            mode: Mode::Learning,
            phase: Phase::AwaitingFirstCode,
            strict: config.is_strict(),
            stats: DecodeStats::default(),
            sink,
        }
    }

    /// A string-output-only decoder over a previously saved dictionary.
    ///
    /// Codes are read at `config.get_restore_code_width()` bits; the table is
    /// never extended.
    pub fn restore(
        config: DecoderConfig,
        snapshot: &DictionarySnapshot,
        sink: S,
    ) -> Result<Self, SnapshotError> {
        Ok(Decoder {
            dict: Dictionary::from_snapshot(config.capacity(), snapshot)?,
            bits: BitReader::new(),
            code_width: config.get_restore_code_width(),
            previous: None,
            first_byte: 0,
            mode: Mode::Restored,
            phase: Phase::Running,
            strict: config.is_strict(),
            stats: DecodeStats::default(),
            sink,
        })
    }

    // ── Decoding ─────────────────────────────────────────────────────────────

    /// Decode every complete code in `input`.
    ///
    /// Returns the number of bytes consumed, which is always `input.len()`:
    /// bits of a code cut off by the end of the chunk are kept for the next
    /// call. An empty chunk returns `Ok(0)`.
    ///
    /// On error the decoder is faulted for good; output emitted before the
    /// bad code stays delivered, nothing after it is.
    pub fn decode_chunk(&mut self, input: &[u8]) -> Result<usize, LzwError> {
        if let Phase::Faulted(err) = self.phase {
            return Err(err);
        }
        if input.is_empty() {
            return Ok(0);
        }
        if self.phase == Phase::Exhausted {
            self.phase = self.resume_phase();
        }

        let mut rest = input;
        while let Some(code) = self.bits.read_bits(self.code_width, &mut rest) {
            self.push_code(code)?;
        }
        self.phase = Phase::Exhausted;
        Ok(input.len() - rest.len())
    }

    /// Apply one already-extracted code.
    pub fn push_code(&mut self, code: Code) -> Result<(), LzwError> {
        if let Phase::Faulted(err) = self.phase {
            return Err(err);
        }
        self.step(code).map_err(|err| {
            self.phase = Phase::Faulted(err);
            err
        })
    }

    fn step(&mut self, code: Code) -> Result<(), LzwError> {
        match self.classify(code)? {
            Transition::Lookup => {
                self.first_byte = self.emit(code)?;
            }
            Transition::First => {
                self.first_byte = self.emit(code)?;
            }
            Transition::Known { prefix } => {
                self.first_byte = self.emit(code)?;
                self.dict
                    .add(Some(prefix), self.first_byte)
                    .ok_or(LzwError::DictionaryFull)?;
            }
            Transition::Repeat { prefix } => {
                let added = self
                    .dict
                    .add(Some(prefix), self.first_byte)
                    .ok_or(LzwError::DictionaryFull)?;
                debug_assert_eq!(added, code);
                self.first_byte = self.emit(code)?;
            }
        }

        self.previous = Some(code);
        self.phase = Phase::Running;
        self.stats.codes += 1;
        if self.mode == Mode::Learning {
            self.grow();
        }
        Ok(())
    }

    fn classify(&self, code: Code) -> Result<Transition, LzwError> {
        let max_code = self.dict.max_code();
        let invalid = LzwError::InvalidCode { code, max_code };

        if self.mode == Mode::Restored {
            return if (code as usize) < self.dict.len() {
                Ok(Transition::Lookup)
            } else {
                Err(invalid)
            };
        }

        match self.previous {
            None if code <= MAX_LITERAL => Ok(Transition::First),
            None => Err(invalid),
            Some(prefix) if code <= max_code => Ok(Transition::Known { prefix }),
            Some(prefix) if code == max_code + 1 => Ok(Transition::Repeat { prefix }),
            Some(_) => Err(invalid),
        }
    }

    /// Send the string for `code` to the sink; returns its first byte.
    fn emit(&mut self, code: Code) -> Result<u8, LzwError> {
        let max_code = self.dict.max_code();
        let bytes = self
            .dict
            .resolve(code)
            .ok_or(LzwError::InvalidCode { code, max_code })?;
        self.sink
            .emit(bytes)
            .map_err(|e| LzwError::Sink(e.kind()))?;
        self.stats.bytes_out += bytes.len() as u64;
        Ok(bytes[0])
    }

    /// Width growth, then the overflow reset. Order matters when the
    /// capacity is a power of two: both fire on the same code.
    fn grow(&mut self) {
        let next = self.dict.max_code() + 1;
        if self.code_width < CODE_WIDTH_MAX && next == 1 << self.code_width {
            self.code_width += 1;
        }
        if next == self.dict.capacity() {
            self.reset_dictionary();
            self.stats.resets += 1;
        }
    }

    fn reset_dictionary(&mut self) {
        self.dict.reset();
        self.code_width = CODE_WIDTH_MIN;
        self.previous = None;
        self.phase = Phase::AwaitingFirstCode;
    }

    fn resume_phase(&self) -> Phase {
        match (self.mode, self.previous) {
            (Mode::Learning, None) => Phase::AwaitingFirstCode,
            _ => Phase::Running,
        }
    }

    /// Start over at a reset boundary: buffered bits and any fault are
    /// dropped. A learning decoder also forgets its dictionary; a restored one
    /// keeps its table.
    pub fn restart(&mut self) {
        self.bits.clear();
        match self.mode {
            Mode::Learning => self.reset_dictionary(),
            Mode::Restored => {
                self.previous = None;
                self.phase = Phase::Running;
            }
        }
    }

    // ── End of stream ────────────────────────────────────────────────────────

    /// Check that the stream may end here.
    ///
    /// Relaxed decoders accept any leftover bits as padding. Strict ones
    /// accept fewer than 8 leftover bits, all zero: the byte padding after
    /// the final code.
    pub fn check_end(&self) -> Result<(), LzwError> {
        if let Phase::Faulted(err) = self.phase {
            return Err(err);
        }
        if self.strict {
            let pending_bits = self.bits.pending_bits();
            if pending_bits >= 8 || self.bits.pending_value() != 0 {
                return Err(LzwError::InputTruncated { pending_bits });
            }
        }
        Ok(())
    }

    /// End the session and hand back the sink.
    pub fn finish(self) -> Result<S, LzwError> {
        self.check_end()?;
        Ok(self.sink)
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Width, in bits, of the next code to be read.
    pub fn code_width(&self) -> u32 {
        self.code_width
    }

    /// Highest live dictionary code.
    pub fn max_code(&self) -> Code {
        self.dict.max_code()
    }

    pub fn capacity(&self) -> u32 {
        self.dict.capacity()
    }

    pub fn is_restored(&self) -> bool {
        self.mode == Mode::Restored
    }

    pub fn stats(&self) -> DecodeStats {
        self.stats
    }

    /// Bits read from the input but not yet part of a complete code.
    pub fn pending_bits(&self) -> u32 {
        self.bits.pending_bits()
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dict
    }

    /// Copy of the current dictionary, for saving and a later [`restore`](Self::restore).
    pub fn snapshot(&self) -> DictionarySnapshot {
        self.dict.snapshot()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Give back the sink without the end-of-stream check.
    pub fn into_sink(self) -> S {
        self.sink
    }
}

impl<S: Sink> core::fmt::Debug for Decoder<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Decoder")
            .field("mode", &self.mode)
            .field("phase", &self.phase)
            .field("code_width", &self.code_width)
            .field("max_code", &self.dict.max_code())
            .field("previous", &self.previous)
            .field("pending_bits", &self.bits.pending_bits())
            .field("stats", &self.stats)
            .finish()
    }
}
