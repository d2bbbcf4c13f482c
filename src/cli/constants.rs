// cli/constants.rs: program identity, verbosity global and display macros.

use std::sync::atomic::{AtomicU32, Ordering};

// ── Identity ─────────────────────────────────────────────────────────────────
pub const PROGRAM_NAME: &str = "unlzw";
pub const LZW_EXTENSION: &str = ".lzw";
/// Alias binary that decodes every input to stdout.
pub const LZWCAT: &str = "lzwcat";

// ── Display level ────────────────────────────────────────────────────────────
//
// 0 = silent; 1 = errors only; 2 = normal (downgradable); 3 = non-downgradable;
// 4 = verbose. The I/O layer keeps its own copy, synced by main() through
// `crate::io::set_notification_level`.
pub static DISPLAY_LEVEL: AtomicU32 = AtomicU32::new(2);

#[inline]
pub fn display_level() -> u32 {
    DISPLAY_LEVEL.load(Ordering::Relaxed)
}

#[inline]
pub fn set_display_level(level: u32) {
    DISPLAY_LEVEL.store(level, Ordering::Relaxed);
}

// ── Display helpers ──────────────────────────────────────────────────────────

/// Print to stderr.
#[macro_export]
macro_rules! display {
    ($($arg:tt)*) => { eprint!($($arg)*) };
}

/// Print to stderr when the CLI display level is at least `level`.
#[macro_export]
macro_rules! displaylevel {
    ($level:expr, $($arg:tt)*) => {
        if $crate::cli::constants::display_level() >= $level {
            eprint!($($arg)*);
        }
    };
}
