//! Saved-dictionary tables.
//!
//! A snapshot lets a decoder start from a dictionary built elsewhere (by an
//! encoder, or by an earlier decoding session) instead of the literal-only
//! one. The serialised layout is the one the encoder-side tooling writes:
//!
//! ```text
//! count   : i32 LE
//! records : count × { prefix: i32 LE, next: i32 LE, byte: u8 }   (9 bytes each, packed)
//! ```
//!
//! `prefix` is [`NO_CODE`] for root entries. `next` is the encoder's sibling
//! link; it carries no meaning for decoding, is ignored on read and written as
//! [`NO_CODE`]. Bytes after the last record are ignored.
//!
//! Only structural bounds are checked here. Whether the table matches the
//! stream being decoded is the caller's business.

use core::fmt;
use std::io::{self, Read, Write};

use super::types::{Code, LITERAL_COUNT, NO_CODE};

/// Size of the leading entry count.
pub const COUNT_SIZE: usize = 4;

/// Size of one packed entry record.
pub const RECORD_SIZE: usize = 9;

/// An in-memory dictionary table: entry `i` is `(prefixes[i], bytes[i])`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DictionarySnapshot {
    prefixes: Vec<Code>,
    bytes: Vec<u8>,
}

impl DictionarySnapshot {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The 256 literal roots and nothing else.
    pub fn literals() -> Self {
        let mut snap = Self::new();
        for b in 0..LITERAL_COUNT {
            snap.push(None, b as u8);
        }
        snap
    }

    /// Append an entry. `prefix == None` marks a root.
    pub fn push(&mut self, prefix: Option<Code>, byte: u8) {
        self.prefixes.push(prefix.unwrap_or(NO_CODE));
        self.bytes.push(byte);
    }

    /// Number of entries, literals included.
    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// Entry `code` as `(prefix, byte)`; roots report `None` as prefix.
    pub fn entry(&self, code: Code) -> Option<(Option<Code>, u8)> {
        let i = code as usize;
        let prefix = *self.prefixes.get(i)?;
        let prefix = if prefix == NO_CODE { None } else { Some(prefix) };
        Some((prefix, self.bytes[i]))
    }

    pub(crate) fn raw_parts(&self) -> (&[Code], &[u8]) {
        (&self.prefixes, &self.bytes)
    }

    /// Parse a serialised table.
    pub fn parse(data: &[u8]) -> Result<Self, SnapshotError> {
        let header: [u8; COUNT_SIZE] = data
            .get(..COUNT_SIZE)
            .and_then(|h| h.try_into().ok())
            .ok_or(SnapshotError::Truncated {
                expected: COUNT_SIZE,
                actual: data.len(),
            })?;
        let count = i32::from_le_bytes(header);
        if count < 0 {
            return Err(SnapshotError::NegativeCount(count));
        }
        let count = count as usize;
        let expected = count
            .checked_mul(RECORD_SIZE)
            .and_then(|n| n.checked_add(COUNT_SIZE))
            .ok_or(SnapshotError::Truncated {
                expected: usize::MAX,
                actual: data.len(),
            })?;
        if data.len() < expected {
            return Err(SnapshotError::Truncated {
                expected,
                actual: data.len(),
            });
        }

        let mut snap = DictionarySnapshot {
            prefixes: Vec::with_capacity(count),
            bytes: Vec::with_capacity(count),
        };
        for (index, record) in data[COUNT_SIZE..expected]
            .chunks_exact(RECORD_SIZE)
            .enumerate()
        {
            let prefix = u32::from_le_bytes([record[0], record[1], record[2], record[3]]);
            if prefix != NO_CODE && prefix as usize >= count {
                return Err(SnapshotError::BadPrefix {
                    index: index as Code,
                    prefix,
                });
            }
            snap.prefixes.push(prefix);
            snap.bytes.push(record[8]);
        }
        Ok(snap)
    }

    /// Read and parse a whole serialised table from `reader`.
    pub fn read_from<R: Read>(mut reader: R) -> io::Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::parse(&data).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Serialise into a fresh buffer.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(COUNT_SIZE + self.len() * RECORD_SIZE);
        out.extend_from_slice(&(self.len() as i32).to_le_bytes());
        for (&prefix, &byte) in self.prefixes.iter().zip(&self.bytes) {
            out.extend_from_slice(&prefix.to_le_bytes());
            out.extend_from_slice(&NO_CODE.to_le_bytes());
            out.push(byte);
        }
        out
    }

    /// Serialise into `writer`.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_all(&self.to_bytes())
    }
}

/// Malformed or oversized snapshot tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotError {
    /// Fewer bytes than the header or the declared record count needs.
    Truncated { expected: usize, actual: usize },
    /// The entry count field is negative.
    NegativeCount(i32),
    /// An entry's prefix points outside the table.
    BadPrefix { index: Code, prefix: Code },
    /// More entries than the decoder's dictionary can hold.
    TooLarge { count: usize, capacity: u32 },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Truncated { expected, actual } => write!(
                f,
                "dictionary table truncated: need {} bytes, have {}",
                expected, actual
            ),
            SnapshotError::NegativeCount(n) => write!(f, "dictionary table count {} is negative", n),
            SnapshotError::BadPrefix { index, prefix } => write!(
                f,
                "dictionary entry {:#x} has out-of-range prefix {:#x}",
                index, prefix
            ),
            SnapshotError::TooLarge { count, capacity } => write!(
                f,
                "dictionary table holds {} entries, capacity is {}",
                count, capacity
            ),
        }
    }
}

impl std::error::Error for SnapshotError {}
