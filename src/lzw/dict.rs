//! The LZW dictionary: a fixed-capacity arena of prefix chains.
//!
//! Entry `c` stores the code of every byte but the last (`prefix`) and the
//! last byte itself. Codes 0..=255 are the literal roots. Learned entries are
//! appended contiguously from 256 and never modified, and their prefix always
//! exists already, so chains cannot loop in a dictionary built by decoding.
//!
//! Both the arena and the scratch buffer used to spell out a string are
//! allocated once, `capacity` long, when the dictionary is created.

use super::snapshot::{DictionarySnapshot, SnapshotError};
use super::types::{Code, LITERAL_COUNT, MAX_LITERAL, NO_CODE};

/// Prefix-chain dictionary with a fixed capacity.
#[derive(Clone)]
pub struct Dictionary {
    prefixes: Box<[Code]>,
    bytes: Box<[u8]>,
    /// Strings are spelled out back to front, so they land at the tail.
    scratch: Box<[u8]>,
    max_code: Code,
}

impl Dictionary {
    /// A literal-only dictionary able to hold `capacity` entries in total.
    ///
    /// # Panics
    /// If `capacity` cannot hold the literals. [`DecoderConfig`] never yields
    /// such a capacity.
    ///
    /// [`DecoderConfig`]: crate::lzw::DecoderConfig
    pub fn with_capacity(capacity: u32) -> Self {
        assert!(capacity >= LITERAL_COUNT, "dictionary capacity below 256");
        let cap = capacity as usize;
        let mut prefixes = vec![NO_CODE; cap].into_boxed_slice();
        let mut bytes = vec![0u8; cap].into_boxed_slice();
        for code in 0..LITERAL_COUNT as usize {
            prefixes[code] = NO_CODE;
            bytes[code] = code as u8;
        }
        Dictionary {
            prefixes,
            bytes,
            scratch: vec![0u8; cap].into_boxed_slice(),
            max_code: MAX_LITERAL,
        }
    }

    /// A dictionary pre-populated from `snapshot`.
    ///
    /// The table replaces the literal roots too; an empty table leaves no code
    /// resolvable.
    pub fn from_snapshot(capacity: u32, snapshot: &DictionarySnapshot) -> Result<Self, SnapshotError> {
        if snapshot.len() > capacity as usize {
            return Err(SnapshotError::TooLarge {
                count: snapshot.len(),
                capacity,
            });
        }
        let mut dict = Self::with_capacity(capacity);
        let (prefixes, bytes) = snapshot.raw_parts();
        dict.prefixes[..prefixes.len()].copy_from_slice(prefixes);
        dict.bytes[..bytes.len()].copy_from_slice(bytes);
        // An empty table wraps to NO_CODE, above every code: nothing resolves.
        dict.max_code = (snapshot.len() as Code).wrapping_sub(1).min(NO_CODE);
        Ok(dict)
    }

    /// Copy of every live entry, literals included.
    pub fn snapshot(&self) -> DictionarySnapshot {
        let mut snap = DictionarySnapshot::new();
        for code in 0..self.len() {
            let prefix = self.prefixes[code];
            snap.push((prefix != NO_CODE).then_some(prefix), self.bytes[code]);
        }
        snap
    }

    /// Highest allocated code.
    #[inline]
    pub fn max_code(&self) -> Code {
        self.max_code
    }

    /// Total number of entries the arena can hold.
    #[inline]
    pub fn capacity(&self) -> u32 {
        self.prefixes.len() as u32
    }

    /// Number of live entries, literals included.
    #[inline]
    pub fn len(&self) -> usize {
        if self.max_code == NO_CODE {
            0
        } else {
            self.max_code as usize + 1
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(prefix, byte)` of a live entry.
    pub fn entry(&self, code: Code) -> Option<(Option<Code>, u8)> {
        if code as usize >= self.len() {
            return None;
        }
        let prefix = self.prefixes[code as usize];
        Some(((prefix != NO_CODE).then_some(prefix), self.bytes[code as usize]))
    }

    /// Spell out the string for `code`.
    ///
    /// Returns `None` for a code that is not live, or for a chain that leaves
    /// the arena or runs longer than the scratch buffer (only possible with a
    /// corrupt restored table).
    pub fn resolve(&mut self, code: Code) -> Option<&[u8]> {
        if code as usize >= self.len() {
            return None;
        }
        let mut pos = self.scratch.len();
        let mut cur = code;
        loop {
            if pos == 0 {
                return None;
            }
            pos -= 1;
            self.scratch[pos] = *self.bytes.get(cur as usize)?;
            match self.prefixes[cur as usize] {
                NO_CODE => break,
                prefix => cur = prefix,
            }
        }
        Some(&self.scratch[pos..])
    }

    /// Append `prefix + byte` and return its code.
    ///
    /// A `None` prefix means "no previous string": nothing is stored and the
    /// byte's own literal code comes back. `None` is returned when the arena
    /// is full.
    pub fn add(&mut self, prefix: Option<Code>, byte: u8) -> Option<Code> {
        let Some(prefix) = prefix else {
            return Some(Code::from(byte));
        };
        let next = self.max_code.wrapping_add(1);
        if next >= self.capacity() {
            return None;
        }
        self.prefixes[next as usize] = prefix;
        self.bytes[next as usize] = byte;
        self.max_code = next;
        Some(next)
    }

    /// Forget every learned entry; only the literals remain.
    pub fn reset(&mut self) {
        for code in 0..LITERAL_COUNT as usize {
            self.prefixes[code] = NO_CODE;
            self.bytes[code] = code as u8;
        }
        self.max_code = MAX_LITERAL;
    }
}

impl core::fmt::Debug for Dictionary {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Dictionary")
            .field("capacity", &self.capacity())
            .field("max_code", &self.max_code)
            .finish()
    }
}
