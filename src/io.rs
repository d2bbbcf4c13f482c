//! Public API surface for file-level decoding.
//!
//! Assembles the I/O sub-modules and re-exports the symbols consumed by the
//! CLI and library users.

pub mod decompress;
pub mod file_io;
pub mod prefs;

// ── Core type re-exports ─────────────────────────────────────────────────────
pub use decompress::DecompressStats;
pub use prefs::Prefs;

// ── Special I/O sentinels ────────────────────────────────────────────────────
pub use file_io::{NULL_OUTPUT, NUL_MARK, STDIN_MARK, STDOUT_MARK};

// ── Notification level (global) ──────────────────────────────────────────────
pub use prefs::set_notification_level;

// ── Decoding public API ──────────────────────────────────────────────────────
/// Decode one reader into one writer.
pub use decompress::decompress_stream;

/// Decode a single file.
pub use decompress::decompress_filename;

/// Decode several files, stripping a suffix to name the outputs.
pub use decompress::decompress_multiple_filenames;
