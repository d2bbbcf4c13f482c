//! Opening sources and destinations for the decoding pipeline.
//!
//! - [`open_src_file`]: resolves a path string to a `Box<dyn Read>`,
//!   handling the `"stdin"` sentinel and rejecting directories.
//! - [`open_dst_file`]: resolves a path string to a [`DstFile`], handling
//!   the `"stdout"` and null-device sentinels and enforcing the overwrite
//!   policy from [`Prefs`].
//!
//! Sentinel string constants ([`STDIN_MARK`], [`STDOUT_MARK`], [`NUL_MARK`],
//! [`NULL_OUTPUT`]) are exported so callers can compare against them without
//! embedding magic strings.

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::sync::atomic::Ordering;

use crate::io::prefs::{Prefs, DISPLAY_LEVEL};
use crate::util::is_directory;

// ---------------------------------------------------------------------------
// Sentinel strings
// ---------------------------------------------------------------------------

/// Sentinel: read from standard input.
pub const STDIN_MARK: &str = "stdin";

/// Sentinel: write to standard output.
pub const STDOUT_MARK: &str = "stdout";

/// Sentinel: discard output.
#[cfg(windows)]
pub const NUL_MARK: &str = "nul";
#[cfg(not(windows))]
pub const NUL_MARK: &str = "/dev/null";

/// User-facing spelling of the discard sentinel; the CLI maps it to [`NUL_MARK`].
pub const NULL_OUTPUT: &str = "null";

#[inline]
pub fn is_stdin(s: &str) -> bool {
    s == STDIN_MARK
}

#[inline]
pub fn is_stdout(s: &str) -> bool {
    s == STDOUT_MARK
}

#[inline]
fn is_dev_null(s: &str) -> bool {
    s == NUL_MARK
}

// ---------------------------------------------------------------------------
// Source file
// ---------------------------------------------------------------------------

/// Opens a source for reading.
///
/// `"stdin"` yields standard input; a directory is refused with
/// [`io::ErrorKind::InvalidInput`]; anything else is opened buffered.
pub fn open_src_file(path: &str) -> io::Result<Box<dyn Read>> {
    if is_stdin(path) {
        if DISPLAY_LEVEL.load(Ordering::Relaxed) >= 4 {
            eprintln!("Using stdin for input");
        }
        #[cfg(windows)]
        // SAFETY: calling _setmode on stdin (fd=0) is always valid.
        unsafe {
            libc::_setmode(0, libc::O_BINARY);
        }
        return Ok(Box::new(io::stdin()));
    }

    if is_directory(Path::new(path)) {
        if DISPLAY_LEVEL.load(Ordering::Relaxed) >= 1 {
            eprintln!("unlzw: {} is a directory -- ignored", path);
        }
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{}: is a directory", path),
        ));
    }

    let f = File::open(path).map_err(|e| {
        if DISPLAY_LEVEL.load(Ordering::Relaxed) >= 1 {
            eprintln!("{}: {}", path, e);
        }
        e
    })?;
    Ok(Box::new(BufReader::new(f)))
}

// ---------------------------------------------------------------------------
// Destination file
// ---------------------------------------------------------------------------

/// A write-capable destination produced by [`open_dst_file`]: a regular
/// file, stdout, or a discard sink.
pub struct DstFile {
    inner: Box<dyn Write>,
    /// A regular file was opened; its metadata is copied from the source.
    pub is_file: bool,
}

impl Write for DstFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }
    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Opens a destination for writing.
///
/// `"stdout"` and [`NUL_MARK`] are resolved before touching the filesystem.
/// For a regular path with `prefs.overwrite == false` and an existing file:
/// at display level ≤ 1 the call fails with [`io::ErrorKind::AlreadyExists`];
/// above that the user is asked on stderr.
pub fn open_dst_file(path: &str, prefs: &Prefs) -> io::Result<DstFile> {
    if is_stdout(path) {
        if DISPLAY_LEVEL.load(Ordering::Relaxed) >= 4 {
            eprintln!("Using stdout for output");
        }
        #[cfg(windows)]
        // SAFETY: calling _setmode on stdout (fd=1) is always valid.
        unsafe {
            libc::_setmode(1, libc::O_BINARY);
        }
        return Ok(DstFile {
            inner: Box::new(io::stdout()),
            is_file: false,
        });
    }

    if is_dev_null(path) {
        return Ok(DstFile {
            inner: Box::new(io::sink()),
            is_file: false,
        });
    }

    if !prefs.overwrite && Path::new(path).exists() {
        if DISPLAY_LEVEL.load(Ordering::Relaxed) <= 1 {
            eprintln!("{} already exists; not overwritten  ", path);
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{}: already exists; not overwritten", path),
            ));
        }
        eprint!("{} already exists; do you want to overwrite (y/N) ? ", path);
        let _ = io::stderr().flush();
        let mut line = String::new();
        io::stdin().read_line(&mut line)?;
        let first = line.trim_start().chars().next().unwrap_or('\0');
        if first != 'y' && first != 'Y' {
            eprintln!("    not overwritten  ");
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{}: not overwritten", path),
            ));
        }
    }

    let f = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| {
            if DISPLAY_LEVEL.load(Ordering::Relaxed) >= 1 {
                eprintln!("{}: {}", path, e);
            }
            e
        })?;

    Ok(DstFile {
        inner: Box::new(BufWriter::new(f)),
        is_file: true,
    })
}

// ---------------------------------------------------------------------------
// Dictionary files
// ---------------------------------------------------------------------------

/// Reads a whole saved-dictionary file.
pub fn read_dictionary_file(path: &str) -> io::Result<crate::lzw::DictionarySnapshot> {
    let f = File::open(path).map_err(|e| {
        io::Error::new(e.kind(), format!("dictionary {}: {}", path, e))
    })?;
    crate::lzw::DictionarySnapshot::read_from(BufReader::new(f))
        .map_err(|e| io::Error::new(e.kind(), format!("dictionary {}: {}", path, e)))
}

/// Writes `snapshot` to `path`, replacing any existing file.
pub fn write_dictionary_file(path: &str, snapshot: &crate::lzw::DictionarySnapshot) -> io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    snapshot.write_to(&mut w)?;
    w.flush()
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
