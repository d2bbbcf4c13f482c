//! Binary entry point for the `unlzw` command-line tool.
//!
//! 1. [`detect_alias`] inspects `argv[0]` (`lzwcat` decodes every input to stdout).
//! 2. [`parse_args`] processes all flags and builds a [`ParsedArgs`] value.
//! 3. [`run`] resolves input/output names and dispatches to the I/O layer,
//!    returning the process exit code.

use std::io::IsTerminal;
use std::path::Path;

use lzwd::cli::args::{parse_args, ParsedArgs};
use lzwd::cli::constants::{display_level, set_display_level, LZW_EXTENSION, PROGRAM_NAME};
use lzwd::cli::init::detect_alias;
use lzwd::cli::op_mode::OpMode;
use lzwd::io::{
    decompress_filename, decompress_multiple_filenames, set_notification_level, NUL_MARK,
    STDIN_MARK, STDOUT_MARK,
};

/// Execute the decoding run described by `args`.
///
/// Returns the process exit code (0 = success, 1 = any failure).
fn run(args: ParsedArgs) -> i32 {
    let mut prefs = args.prefs;
    let force_stdout = args.force_stdout;
    let mut multiple_inputs = args.multiple_inputs;
    let mut output_filename = args.output_filename;
    let mut in_file_names = args.in_file_names;

    lzwd::displaylevel!(
        3,
        "*** {} v{} {}-bit, dictionary {} entries ***\n",
        PROGRAM_NAME,
        lzwd::LZWD_VERSION_STRING,
        std::mem::size_of::<*const ()>() * 8,
        prefs.decoder.capacity()
    );
    lzwd::displaylevel!(4, "Chunk size : {} bytes\n", prefs.chunk_size);

    // ── Recursive directory expansion ─────────────────────────────────────────
    if multiple_inputs && args.recursive {
        let paths: Vec<&Path> = in_file_names.iter().map(Path::new).collect();
        match lzwd::util::create_file_list(&paths, LZW_EXTENSION) {
            Ok(list) => {
                for (u, p) in list.iter().enumerate() {
                    lzwd::displaylevel!(4, "{} {}\n", u, p.display());
                }
                in_file_names = list
                    .into_iter()
                    .map(|p| p.to_string_lossy().into_owned())
                    .collect();
            }
            Err(e) => {
                lzwd::displaylevel!(1, "{}: {}\n", PROGRAM_NAME, e);
                return 1;
            }
        }
    }
    if in_file_names.is_empty() {
        multiple_inputs = false;
    }

    // ── Test mode: decode, discard ─────────────────────────────────────────────
    if args.op_mode == OpMode::Test {
        prefs.set_test_mode(true);
        output_filename = Some(NUL_MARK.to_owned());
    }

    let input_filename = if multiple_inputs {
        in_file_names[0].clone()
    } else {
        args.input_filename.unwrap_or_else(|| STDIN_MARK.to_owned())
    };

    if input_filename == STDIN_MARK && std::io::stdin().is_terminal() {
        lzwd::displaylevel!(1, "refusing to read from a console\n");
        return 1;
    }

    if input_filename == STDIN_MARK && output_filename.is_none() {
        output_filename = Some(STDOUT_MARK.to_owned());
    }

    // ── Derive the output name from the input ────────────────────────────────
    if output_filename.is_none() && !multiple_inputs {
        match input_filename.strip_suffix(LZW_EXTENSION) {
            Some(base) if !base.is_empty() => {
                lzwd::displaylevel!(2, "Decoding file {} \n", base);
                output_filename = Some(base.to_owned());
            }
            _ => {
                lzwd::displaylevel!(1, "Cannot determine an output filename \n");
                lzwd::displaylevel!(1, "Usage: {} [OPTIONS] [FILE]...\n", args.exe_name);
                return 1;
            }
        }
    }

    if output_filename.as_deref() == Some(STDOUT_MARK)
        && std::io::stdout().is_terminal()
        && !force_stdout
    {
        lzwd::displaylevel!(1, "refusing to write to console without -c \n");
        return 1;
    }

    // ── Downgrade notification level ──────────────────────────────────────────
    if output_filename.as_deref() == Some(STDOUT_MARK) && display_level() == 2 {
        set_display_level(1);
    }
    if multiple_inputs && display_level() == 2 {
        set_display_level(1);
    }
    set_notification_level(display_level() as i32);

    // ── Dispatch ─────────────────────────────────────────────────────────────
    let result = if multiple_inputs {
        let dec_extension: &str = match output_filename.as_deref() {
            Some(STDOUT_MARK) => STDOUT_MARK,
            Some(NUL_MARK) => NUL_MARK,
            _ => LZW_EXTENSION,
        };
        let srcs: Vec<&str> = in_file_names.iter().map(String::as_str).collect();
        decompress_multiple_filenames(&srcs, dec_extension, &prefs)
    } else {
        let output_filename = output_filename.unwrap_or_else(|| STDOUT_MARK.to_owned());
        decompress_filename(&input_filename, &output_filename, &prefs)
    };

    match result {
        Ok(_) => 0,
        Err(e) => {
            lzwd::displaylevel!(1, "{}: {}\n", PROGRAM_NAME, e);
            1
        }
    }
}

fn main() {
    let argv0 = std::env::args()
        .next()
        .unwrap_or_else(|| PROGRAM_NAME.to_owned());
    let init = detect_alias(&argv0);

    let args = match parse_args(init) {
        Ok(a) => a,
        Err(e) => {
            lzwd::display!("{}: {}\n", PROGRAM_NAME, e);
            std::process::exit(1);
        }
    };

    if args.exit_early {
        std::process::exit(0);
    }
    set_display_level(args.display_level);

    std::process::exit(run(args));
}
