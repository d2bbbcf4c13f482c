//! MSB-first bit reader over chunked input.
//!
//! Bytes are shifted into a 32-bit accumulator from the low end and codes are
//! extracted from the high end. Bits left over when a chunk runs out stay in
//! the accumulator, so a single code may straddle any number of chunk
//! boundaries.

use super::types::CODE_WIDTH_MAX;

#[inline(always)]
fn low_mask(nbits: u32) -> u32 {
    // nbits <= 31 here; the accumulator never holds more.
    (1u32 << nbits) - 1
}

/// Rolling bit accumulator. Holds at most 31 valid bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BitReader {
    acc: u32,
    count: u32,
}

impl BitReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the next `nbits` (0..=24) bits, pulling bytes from the front of
    /// `input` as needed and advancing it past them.
    ///
    /// Returns `None` when `input` runs dry first. Bytes pulled before that
    /// point are kept, so the same call on the next chunk completes the code.
    #[inline]
    pub fn read_bits(&mut self, nbits: u32, input: &mut &[u8]) -> Option<u32> {
        debug_assert!(nbits <= CODE_WIDTH_MAX);
        while self.count < nbits {
            let (&byte, rest) = input.split_first()?;
            *input = rest;
            self.acc = (self.acc << 8) | u32::from(byte);
            self.count += 8;
        }
        self.count -= nbits;
        Some((self.acc >> self.count) & low_mask(nbits))
    }

    /// Number of buffered bits not yet returned.
    #[inline]
    pub fn pending_bits(&self) -> u32 {
        self.count
    }

    /// Value of the buffered bits not yet returned.
    #[inline]
    pub fn pending_value(&self) -> u32 {
        self.acc & low_mask(self.count)
    }

    /// Drop any buffered bits.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
