// lzwd: streaming LZW decompressor with the `unlzw` command-line front end.

pub mod timefn;
pub mod config;
pub mod util;
pub mod io;
pub mod lzw;
pub mod file;
pub mod cli;

// ── Version constants ─────────────────────────────────────────────────────────
pub const LZWD_VERSION_MAJOR: u32 = 0;
pub const LZWD_VERSION_MINOR: u32 = 1;
pub const LZWD_VERSION_RELEASE: u32 = 0;
pub const LZWD_VERSION_NUMBER: u32 =
    LZWD_VERSION_MAJOR * 100 * 100 + LZWD_VERSION_MINOR * 100 + LZWD_VERSION_RELEASE;
pub const LZWD_VERSION_STRING: &str = env!("CARGO_PKG_VERSION");

/// Returns the library version number (`major * 10000 + minor * 100 + release`).
pub fn version_number() -> u32 {
    LZWD_VERSION_NUMBER
}

pub fn version_string() -> &'static str {
    LZWD_VERSION_STRING
}

// ── Top-level re-exports ──────────────────────────────────────────────────────
pub use file::{decode_all, decode_all_with, LzwReader};
pub use lzw::{
    BoundedBuffer, Code, ConfigError, DecodeStats, Decoder, DecoderConfig, DictionarySnapshot,
    LzwError, Phase, Sink, SnapshotError, WriteSink, NO_CODE,
};
