//! LZW code types, width constants, decoder configuration, and error handling.
//!
//! Covers:
//! - [`Code`] and the [`NO_CODE`] sentinel used inside the dictionary arena
//!   and the snapshot format
//! - Code-width bounds (`CODE_WIDTH_MIN` / `CODE_WIDTH_MAX`)
//! - [`DecoderConfig`]: runtime configuration fixed at construction time
//! - [`Phase`]: the decode-engine state visible to callers
//! - [`LzwError`] / [`ConfigError`] with `Display` + `Error` impls

use core::fmt;
use std::io;

use crate::config::{DICT_BITS_DEFAULT, RESTORE_CODE_WIDTH_DEFAULT};

// ─────────────────────────────────────────────────────────────────────────────
// Codes
// ─────────────────────────────────────────────────────────────────────────────

/// A dictionary code: a literal byte (0–255) or a learned string (256+).
pub type Code = u32;

/// "No code": marks a root entry's prefix and is never a valid code.
/// Sits one above the largest 24-bit code.
pub const NO_CODE: Code = 0x0100_0000;

/// Number of implicit literal entries (one per byte value).
pub const LITERAL_COUNT: Code = 256;

/// Highest literal code.
pub const MAX_LITERAL: Code = LITERAL_COUNT - 1;

/// Width of every code right after initialisation or a dictionary reset.
pub const CODE_WIDTH_MIN: u32 = 8;

/// Widest code the bit reader supports (the 32-bit accumulator needs 8 bits of slack).
pub const CODE_WIDTH_MAX: u32 = 24;

/// Smallest usable dictionary: the literals plus one learned entry.
pub const CAPACITY_MIN: u32 = LITERAL_COUNT + 1;

/// Largest dictionary whose codes all fit in [`CODE_WIDTH_MAX`] bits.
pub const CAPACITY_MAX: u32 = 1 << CODE_WIDTH_MAX;

// ─────────────────────────────────────────────────────────────────────────────
// DecoderConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Decoder settings fixed when a [`Decoder`](crate::lzw::Decoder) is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    capacity: u32,
    strict: bool,
    restore_code_width: u32,
}

impl DecoderConfig {
    /// Configuration with a `capacity`-entry dictionary.
    ///
    /// `capacity` counts the 256 literals; a reset happens as soon as the
    /// dictionary holds `capacity` entries.
    pub fn with_capacity(capacity: u32) -> Result<Self, ConfigError> {
        if !(CAPACITY_MIN..=CAPACITY_MAX).contains(&capacity) {
            return Err(ConfigError::CapacityOutOfRange(capacity));
        }
        Ok(DecoderConfig {
            capacity,
            ..DecoderConfig::default()
        })
    }

    /// Configuration with a `2^bits`-entry dictionary.
    pub fn with_dict_bits(bits: u32) -> Result<Self, ConfigError> {
        if !(CODE_WIDTH_MIN + 1..=CODE_WIDTH_MAX).contains(&bits) {
            return Err(ConfigError::DictBitsOutOfRange(bits));
        }
        Self::with_capacity(1 << bits)
    }

    /// Report streams ending in the middle of a code as
    /// [`LzwError::InputTruncated`] instead of treating the leftover as padding.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Code width used by a decoder restored from a saved dictionary.
    pub fn restore_code_width(mut self, width: u32) -> Result<Self, ConfigError> {
        if !(CODE_WIDTH_MIN..=CODE_WIDTH_MAX).contains(&width) {
            return Err(ConfigError::CodeWidthOutOfRange(width));
        }
        self.restore_code_width = width;
        Ok(self)
    }

    #[inline]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    #[inline]
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    #[inline]
    pub fn get_restore_code_width(&self) -> u32 {
        self.restore_code_width
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        DecoderConfig {
            capacity: 1 << DICT_BITS_DEFAULT,
            strict: false,
            restore_code_width: RESTORE_CODE_WIDTH_DEFAULT,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Phase
// ─────────────────────────────────────────────────────────────────────────────

/// Decode-engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No previous code: the next code must be a literal. Entered at
    /// construction and after every dictionary reset.
    AwaitingFirstCode,
    /// At least one code decoded since the last reset.
    Running,
    /// The last chunk was consumed entirely; feed another chunk or finish.
    Exhausted,
    /// A fatal error stopped the session. Sticky.
    Faulted(LzwError),
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Fatal decode errors. Each one means the decoder lost synchrony with the
/// encoder (or could not deliver output), so none is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LzwError {
    /// A dictionary add was needed but every slot is taken and no reset was due.
    DictionaryFull,
    /// The code is neither known nor exactly `max_code + 1`.
    InvalidCode { code: Code, max_code: Code },
    /// Strict mode: the stream ended with an incomplete code pending.
    InputTruncated { pending_bits: u32 },
    /// The output sink refused the decoded bytes.
    Sink(io::ErrorKind),
}

impl LzwError {
    /// Short stable identifier, used in CLI diagnostics.
    pub fn error_name(&self) -> &'static str {
        match self {
            LzwError::DictionaryFull => "ERROR_dictionary_full",
            LzwError::InvalidCode { .. } => "ERROR_invalid_code",
            LzwError::InputTruncated { .. } => "ERROR_input_truncated",
            LzwError::Sink(_) => "ERROR_sink",
        }
    }
}

impl fmt::Display for LzwError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LzwError::DictionaryFull => f.write_str("dictionary is full"),
            LzwError::InvalidCode { code, max_code } => write!(
                f,
                "invalid code {:#x} (highest known code {:#x})",
                code, max_code
            ),
            LzwError::InputTruncated { pending_bits } => write!(
                f,
                "input ends in the middle of a code ({} bits pending)",
                pending_bits
            ),
            LzwError::Sink(kind) => write!(f, "output sink failed: {}", kind),
        }
    }
}

impl std::error::Error for LzwError {}

impl From<LzwError> for io::Error {
    fn from(err: LzwError) -> Self {
        match err {
            LzwError::Sink(kind) => io::Error::from(kind),
            other => io::Error::new(io::ErrorKind::InvalidData, other),
        }
    }
}

/// Rejected [`DecoderConfig`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    CapacityOutOfRange(u32),
    DictBitsOutOfRange(u32),
    CodeWidthOutOfRange(u32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::CapacityOutOfRange(c) => write!(
                f,
                "dictionary capacity {} outside {}..={}",
                c, CAPACITY_MIN, CAPACITY_MAX
            ),
            ConfigError::DictBitsOutOfRange(b) => write!(
                f,
                "dictionary bits {} outside {}..={}",
                b,
                CODE_WIDTH_MIN + 1,
                CODE_WIDTH_MAX
            ),
            ConfigError::CodeWidthOutOfRange(w) => write!(
                f,
                "code width {} outside {}..={}",
                w, CODE_WIDTH_MIN, CODE_WIDTH_MAX
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
