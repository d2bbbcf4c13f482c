//! Streaming LZW decoding.
//!
//! The pieces, leaves first:
//! - [`bits`]: MSB-first bit reader carrying partial codes across chunks
//! - [`dict`]: prefix-chain dictionary arena
//! - [`snapshot`]: saved dictionary tables and their on-disk layout
//! - [`sink`]: where decoded bytes go
//! - [`decoder`]: the decode engine tying them together
//! - [`types`]: codes, configuration, phases and errors

pub mod bits;
pub mod decoder;
pub mod dict;
pub mod sink;
pub mod snapshot;
pub mod types;

pub use bits::BitReader;
pub use decoder::{DecodeStats, Decoder};
pub use dict::Dictionary;
pub use sink::{BoundedBuffer, Sink, WriteSink};
pub use snapshot::{DictionarySnapshot, SnapshotError};
pub use types::{
    Code, ConfigError, DecoderConfig, LzwError, Phase, CAPACITY_MAX, CAPACITY_MIN,
    CODE_WIDTH_MAX, CODE_WIDTH_MIN, LITERAL_COUNT, MAX_LITERAL, NO_CODE,
};
