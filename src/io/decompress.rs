//! File-level decoding and its public API.
//!
//! - [`decompress_stream`]: decode one reader into one writer
//! - [`decompress_filename`]: decode a single source/destination pair
//! - [`decompress_multiple_filenames`]: decode a list of sources, deriving
//!   each destination by stripping a suffix (e.g. `.lzw`)
//!
//! # Design notes
//!
//! - **Resources**: the input buffer and a restored dictionary are set up
//!   once per call and shared by every file of a multi-file run.
//! - **Source first**: the source is opened before the destination so a
//!   missing input never leaves an empty output file behind.
//! - **File stat propagation**: mtime, permission bits and ownership are
//!   copied onto regular-file outputs through [`crate::util::set_file_stat`].
//! - **Errors**: decoder failures become `io::Error`s carrying the decoder's
//!   message and error name. `Sink` failures keep the writer's error kind,
//!   everything else is `InvalidData`.

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use crate::io::file_io::{
    is_stdin, open_dst_file, open_src_file, read_dictionary_file, write_dictionary_file,
    NUL_MARK, STDOUT_MARK,
};
use crate::io::prefs::{cpu_clock, display_level, final_time_display, Prefs};
use crate::lzw::{Decoder, DictionarySnapshot, LzwError, WriteSink};
use crate::timefn::get_time;
use crate::util::set_file_stat;

// ---------------------------------------------------------------------------
// Public stats
// ---------------------------------------------------------------------------

/// Totals for one file, or summed over a multi-file run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecompressStats {
    /// Compressed bytes read.
    pub compressed_bytes: u64,
    /// Decoded bytes written.
    pub decompressed_bytes: u64,
    /// Codes decoded.
    pub codes: u64,
    /// Dictionary resets seen.
    pub resets: u64,
}

impl DecompressStats {
    fn accumulate(&mut self, other: &DecompressStats) {
        self.compressed_bytes += other.compressed_bytes;
        self.decompressed_bytes += other.decompressed_bytes;
        self.codes += other.codes;
        self.resets += other.resets;
    }
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

struct DecompressResources {
    src_buf: Vec<u8>,
    snapshot: Option<DictionarySnapshot>,
}

impl DecompressResources {
    fn from_prefs(prefs: &Prefs) -> io::Result<Self> {
        let snapshot = match prefs.dictionary_filename.as_deref() {
            Some(path) if prefs.use_dictionary => {
                let snap = read_dictionary_file(path)?;
                display_level(
                    3,
                    &format!("Loaded dictionary {} ({} entries) \n", path, snap.len()),
                );
                Some(snap)
            }
            _ => None,
        };
        Ok(DecompressResources {
            src_buf: vec![0u8; prefs.chunk_size.max(1)],
            snapshot,
        })
    }
}

fn decoding_error(err: LzwError) -> io::Error {
    let kind = io::Error::from(err).kind();
    io::Error::new(
        kind,
        format!("Decoding error : {} ({})", err, err.error_name()),
    )
}

// ---------------------------------------------------------------------------
// decode_stream
// ---------------------------------------------------------------------------

/// Feeds `src` to a fresh decoder chunk by chunk, writing into `dst`.
fn decode_stream<R: Read + ?Sized, W: Write + ?Sized>(
    src: &mut R,
    dst: &mut W,
    prefs: &Prefs,
    resources: &mut DecompressResources,
) -> io::Result<DecompressStats> {
    let sink = WriteSink::new(&mut *dst);
    let mut decoder = match &resources.snapshot {
        Some(snap) => Decoder::restore(prefs.decoder, snap, sink).map_err(|e| {
            io::Error::new(io::ErrorKind::InvalidData, format!("Dictionary error : {}", e))
        })?,
        None => Decoder::new(prefs.decoder, sink),
    };

    let mut stats = DecompressStats::default();
    loop {
        let n = match src.read(&mut resources.src_buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        stats.compressed_bytes += n as u64;
        decoder
            .decode_chunk(&resources.src_buf[..n])
            .map_err(decoding_error)?;
    }
    decoder.check_end().map_err(decoding_error)?;

    let ds = decoder.stats();
    stats.decompressed_bytes = ds.bytes_out;
    stats.codes = ds.codes;
    stats.resets = ds.resets;
    display_level(
        4,
        &format!("{} codes, {} dictionary resets \n", ds.codes, ds.resets),
    );

    if let Some(path) = prefs.save_dictionary_filename.as_deref() {
        let snap = decoder.snapshot();
        write_dictionary_file(path, &snap)?;
        display_level(
            3,
            &format!("Saved dictionary {} ({} entries) \n", path, snap.len()),
        );
    }

    decoder.into_sink().get_mut().flush()?;
    Ok(stats)
}

/// Decode everything `src` yields into `dst`.
pub fn decompress_stream<R: Read + ?Sized, W: Write + ?Sized>(
    src: &mut R,
    dst: &mut W,
    prefs: &Prefs,
) -> io::Result<DecompressStats> {
    let mut resources = DecompressResources::from_prefs(prefs)?;
    decode_stream(src, dst, prefs, &mut resources)
}

// ---------------------------------------------------------------------------
// decompress_file
// ---------------------------------------------------------------------------

/// Decodes `src_path` into `dst_path`, then copies file metadata and applies
/// `--rm`.
fn decompress_file(
    src_path: &str,
    dst_path: &str,
    prefs: &Prefs,
    resources: &mut DecompressResources,
) -> io::Result<DecompressStats> {
    let src_stat = if is_stdin(src_path) {
        None
    } else {
        fs::metadata(src_path).ok()
    };

    let mut src = open_src_file(src_path)?;
    let mut dst = open_dst_file(dst_path, prefs)?;
    let stats = match decode_stream(&mut src, &mut dst, prefs, resources) {
        Ok(stats) => stats,
        Err(e) => {
            // Whatever was decoded before the failure is still delivered.
            let _ = dst.flush();
            return Err(io::Error::new(e.kind(), format!("{} : {}", src_path, e)));
        }
    };
    dst.flush()?;
    let dst_is_file = dst.is_file;
    drop(dst);
    drop(src);

    if dst_is_file {
        if let Some(meta) = &src_stat {
            if let Err(e) = set_file_stat(Path::new(dst_path), meta) {
                display_level(4, &format!("{}: cannot copy file status: {} \n", dst_path, e));
            }
        }
    }

    // Never in test mode: nothing was written that could replace the source.
    if prefs.remove_src_file && !prefs.test_mode && !is_stdin(src_path) {
        fs::remove_file(src_path).map_err(|e| {
            io::Error::new(e.kind(), format!("Remove error : {}: {}", src_path, e))
        })?;
    }

    display_level(2, &format!("\r{:79}\r", ""));
    display_level(
        2,
        &format!(
            "{:<30.30} : decoded {} bytes from {} bytes \n",
            src_path, stats.decompressed_bytes, stats.compressed_bytes
        ),
    );

    Ok(stats)
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Decodes the file at `src` into `dst`.
///
/// `src` may be the stdin sentinel; `dst` may be the stdout or null-device
/// sentinel. In test mode the output is discarded whatever `dst` says.
///
/// # Errors
///
/// Returns an error on I/O failure, a corrupt stream, an unreadable
/// dictionary, or a refused overwrite.
pub fn decompress_filename(src: &str, dst: &str, prefs: &Prefs) -> io::Result<DecompressStats> {
    let mut resources = DecompressResources::from_prefs(prefs)?;
    let time_start = get_time();
    let cpu_start = cpu_clock();

    let dst = if prefs.test_mode { NUL_MARK } else { dst };
    let result = decompress_file(src, dst, prefs, &mut resources);

    let produced = result.as_ref().map_or(0, |s| s.decompressed_bytes);
    final_time_display(time_start, cpu_start, produced);
    result
}

/// Decodes several files, deriving each output name by stripping `suffix`.
///
/// When `suffix` is the stdout or null-device sentinel (or test mode is on)
/// every file is decoded to that one destination instead. Otherwise a file
/// whose name does not end with `suffix` is reported and skipped.
///
/// A failing file does not stop the run. Returns the summed stats when every
/// file succeeded, or an error counting the failures.
pub fn decompress_multiple_filenames(
    srcs: &[&str],
    suffix: &str,
    prefs: &Prefs,
) -> io::Result<DecompressStats> {
    let mut resources = DecompressResources::from_prefs(prefs)?;
    let time_start = get_time();
    let cpu_start = cpu_clock();

    let special_dst = if prefs.test_mode {
        Some(NUL_MARK)
    } else if suffix == STDOUT_MARK || suffix == NUL_MARK {
        Some(suffix)
    } else {
        None
    };

    let mut total = DecompressStats::default();
    let mut failed_files = 0u32;
    let mut skipped_files = 0u32;

    for &src_path in srcs {
        let out_path = match special_dst {
            Some(dst) => dst.to_owned(),
            None => {
                if src_path.len() <= suffix.len() || !src_path.ends_with(suffix) {
                    display_level(
                        1,
                        &format!(
                            "File extension doesn't match expected extension ({}); \
                             will not process file: {}\n",
                            suffix, src_path
                        ),
                    );
                    skipped_files += 1;
                    continue;
                }
                src_path[..src_path.len() - suffix.len()].to_owned()
            }
        };

        match decompress_file(src_path, &out_path, prefs, &mut resources) {
            Ok(stats) => total.accumulate(&stats),
            Err(e) => {
                display_level(1, &format!("unlzw: {}\n", e));
                failed_files += 1;
            }
        }
    }

    final_time_display(time_start, cpu_start, total.decompressed_bytes);

    if failed_files + skipped_files > 0 {
        Err(io::Error::other(format!(
            "{} file(s) could not be decoded; {} file(s) skipped",
            failed_files, skipped_files
        )))
    } else {
        Ok(total)
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
