// prefs.rs: decoding preferences, display globals, and timing helpers.
//
// - The display level is a process-wide `AtomicI32` so the CLI and the I/O
//   layer agree on verbosity without threading it through every call.
// - `Prefs` is a plain value type owned by the caller; setters take
//   `&mut self` and return the value actually stored.
// - `cpu_load_sec` reads process CPU time through `libc::clock()` on Unix and
//   `GetProcessTimes` on Windows.

use std::sync::atomic::{AtomicI32, Ordering};

use crate::config::CHUNK_SIZE_DEFAULT;
use crate::lzw::DecoderConfig;
use crate::timefn::{clock_span_ns, TimeT};

// ---------------------------------------------------------------------------
// Numeric constants
// ---------------------------------------------------------------------------
pub const KB: usize = 1 << 10;
pub const MB: usize = 1 << 20;

// Chunk-size bounds accepted by `set_chunk_size`.
pub const CHUNK_SIZE_MIN: usize = 1;
pub const CHUNK_SIZE_MAX: usize = 64 * MB;

// ---------------------------------------------------------------------------
// Display / notification globals
// ---------------------------------------------------------------------------

/// Global notification level. 0 = silent, 1 = errors only, 2 = results +
/// warnings, 3 = progress, 4+ = verbose.
pub static DISPLAY_LEVEL: AtomicI32 = AtomicI32::new(0);

/// Write `msg` to stderr if the current notification level is ≥ `level`.
/// Flushes stderr when level ≥ 4.
#[inline]
pub fn display_level(level: i32, msg: &str) {
    if DISPLAY_LEVEL.load(Ordering::Relaxed) >= level {
        eprint!("{}", msg);
        if DISPLAY_LEVEL.load(Ordering::Relaxed) >= 4 {
            use std::io::Write;
            let _ = std::io::stderr().flush();
        }
    }
}

/// Sets the global notification level. Returns the value stored.
pub fn set_notification_level(level: i32) -> i32 {
    DISPLAY_LEVEL.store(level, Ordering::Relaxed);
    level
}

// ---------------------------------------------------------------------------
// CPU-load helper
// ---------------------------------------------------------------------------

/// Process CPU clock, for a later [`cpu_load_sec`].
pub fn cpu_clock() -> libc::clock_t {
    #[cfg(not(target_os = "windows"))]
    {
        extern "C" {
            fn clock() -> libc::clock_t;
        }
        unsafe { clock() }
    }
    #[cfg(target_os = "windows")]
    {
        0
    }
}

/// Returns seconds of CPU time consumed since `cpu_start`.
pub fn cpu_load_sec(cpu_start: libc::clock_t) -> f64 {
    #[cfg(not(target_os = "windows"))]
    {
        // CLOCKS_PER_SEC is 1_000_000 on POSIX (SUSv2) and macOS.
        const CLOCKS_PER_SEC: libc::clock_t = 1_000_000;
        (cpu_clock() - cpu_start) as f64 / CLOCKS_PER_SEC as f64
    }
    #[cfg(target_os = "windows")]
    {
        // cpu_start is unused: GetProcessTimes reports totals since process start,
        // in 100-nanosecond intervals.
        let _ = cpu_start;
        use std::mem::MaybeUninit;
        unsafe {
            let process = winapi::um::processthreadsapi::GetCurrentProcess();
            let mut creation = MaybeUninit::uninit();
            let mut exit = MaybeUninit::uninit();
            let mut kernel = MaybeUninit::uninit();
            let mut user = MaybeUninit::uninit();
            winapi::um::processthreadsapi::GetProcessTimes(
                process,
                creation.as_mut_ptr(),
                exit.as_mut_ptr(),
                kernel.as_mut_ptr(),
                user.as_mut_ptr(),
            );
            let k: winapi::shared::minwindef::FILETIME = kernel.assume_init();
            let u: winapi::shared::minwindef::FILETIME = user.assume_init();
            ((k.dwLowDateTime as f64) + (u.dwLowDateTime as f64)) * 100.0 / 1_000_000_000.0
        }
    }
}

/// Prints "Done in … s ==> … MiB/s (cpu load: …%)" at notification level 3.
/// `size` is the number of decoded bytes.
pub fn final_time_display(time_start: TimeT, cpu_start: libc::clock_t, size: u64) {
    let duration_ns = clock_span_ns(time_start);
    let seconds = (duration_ns.max(1)) as f64 / 1_000_000_000.0_f64;
    let cpu_load_s = cpu_load_sec(cpu_start);
    let msg = format!(
        "Done in {:.2} s ==> {:.2} MiB/s  (cpu load : {:.0}%)\n",
        seconds,
        (size as f64) / seconds / 1024.0 / 1024.0,
        (cpu_load_s / seconds) * 100.0,
    );
    display_level(3, &msg);
}

// ---------------------------------------------------------------------------
// Preferences struct
// ---------------------------------------------------------------------------

/// Everything the file layer needs to know about one decoding run.
#[derive(Clone, Debug)]
pub struct Prefs {
    /// Overwrite existing destination files without prompting. Default: true.
    pub overwrite: bool,
    /// Test mode: decode but discard output. Default: false.
    pub test_mode: bool,
    /// Remove the source file after successful decoding. Default: false.
    pub remove_src_file: bool,
    /// Saved dictionary to restore before decoding. Derived: `use_dictionary`.
    pub dictionary_filename: Option<String>,
    pub use_dictionary: bool,
    /// Where to write the learned dictionary once a file is decoded.
    pub save_dictionary_filename: Option<String>,
    /// Compressed bytes fed to the decoder per call. Default: 64 KiB.
    pub chunk_size: usize,
    /// Capacity, strictness and restore width of every decoder created.
    pub decoder: DecoderConfig,
}

impl Default for Prefs {
    fn default() -> Self {
        Prefs {
            overwrite: true,
            test_mode: false,
            remove_src_file: false,
            dictionary_filename: None,
            use_dictionary: false,
            save_dictionary_filename: None,
            chunk_size: CHUNK_SIZE_DEFAULT,
            decoder: DecoderConfig::default(),
        }
    }
}

impl Prefs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables destination-file overwrite. Returns the new value.
    pub fn set_overwrite(&mut self, yes: bool) -> bool {
        self.overwrite = yes;
        yes
    }

    /// Enables or disables test mode (decode, discard). Returns the new value.
    pub fn set_test_mode(&mut self, yes: bool) -> bool {
        self.test_mode = yes;
        yes
    }

    pub fn set_remove_src_file(&mut self, flag: bool) {
        self.remove_src_file = flag;
    }

    /// Sets the dictionary to restore. Passing `None` clears it.
    /// Returns true if a dictionary is now active.
    pub fn set_dictionary_filename(&mut self, filename: Option<&str>) -> bool {
        self.dictionary_filename = filename.map(|s| s.to_owned());
        self.use_dictionary = self.dictionary_filename.is_some();
        self.use_dictionary
    }

    pub fn set_save_dictionary_filename(&mut self, filename: Option<&str>) {
        self.save_dictionary_filename = filename.map(|s| s.to_owned());
    }

    /// Sets the input chunk size, clamped to [`CHUNK_SIZE_MIN`, `CHUNK_SIZE_MAX`].
    /// Returns the clamped size.
    pub fn set_chunk_size(&mut self, chunk_size: usize) -> usize {
        self.chunk_size = chunk_size.clamp(CHUNK_SIZE_MIN, CHUNK_SIZE_MAX);
        self.chunk_size
    }

    pub fn set_decoder_config(&mut self, config: DecoderConfig) {
        self.decoder = config;
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
