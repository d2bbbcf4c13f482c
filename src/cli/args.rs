//! Command-line argument parsing for `unlzw` / `lzwcat`.
//!
//! The entry points are [`parse_args`] (reads `std::env::args()`) and
//! [`parse_args_from`] (takes an explicit slice, suitable for unit-testing).
//! Both return a [`ParsedArgs`] value that captures every option and filename
//! discovered during the parse.
//!
//! Flag syntax is handled by `clap`; cross-flag validation and the mapping
//! onto [`Prefs`] / [`DecoderConfig`] happen here. Bad usage returns an `Err`
//! whose message begins with `"bad usage: "`.

use anyhow::{anyhow, bail};
use clap::error::ErrorKind;
use clap::{ArgAction, Parser};

use crate::cli::arg_utils::{last_name_from_path, parse_size};
use crate::cli::init::CliInit;
use crate::cli::op_mode::OpMode;
use crate::displaylevel;
use crate::io::file_io::{NULL_OUTPUT, NUL_MARK, STDIN_MARK, STDOUT_MARK};
use crate::io::prefs::Prefs;
use crate::lzw::DecoderConfig;

/// Default display level when no alias overrides it.
const DISPLAY_LEVEL_DEFAULT: u32 = 2;

// ── Flag definitions ───────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "unlzw",
    version,
    about = "Decode LZW-compressed files",
    after_help = "With no FILE, or when FILE is -, read standard input."
)]
struct Cli {
    /// Decode (default; accepted for symmetry)
    #[arg(short = 'd', long = "decompress", visible_alias = "uncompress")]
    decompress: bool,

    /// Decode and discard output
    #[arg(short = 't', long = "test")]
    test: bool,

    /// Write to standard output
    #[arg(short = 'c', long = "stdout", visible_alias = "to-stdout")]
    stdout: bool,

    /// Overwrite existing output files
    #[arg(short = 'f', long = "force")]
    force: bool,

    /// Treat every FILE as an input
    #[arg(short = 'm', long = "multiple")]
    multiple: bool,

    /// Expand directories into the .lzw files they contain (implies -m)
    #[arg(short = 'r', long = "recursive")]
    recursive: bool,

    /// Remove the source file after successful decoding
    #[arg(long = "rm")]
    rm: bool,

    /// Restore a saved dictionary and decode in string-output-only mode
    #[arg(short = 'D', long = "dictionary", value_name = "FILE")]
    dictionary: Option<String>,

    /// Write the learned dictionary to FILE after decoding
    #[arg(long = "save-dictionary", value_name = "FILE")]
    save_dictionary: Option<String>,

    /// Dictionary capacity 2^N, 9..=24 [default: 18, env LZW_DICT_BITS]
    #[arg(short = 'B', long = "dict-bits", value_name = "N")]
    dict_bits: Option<u32>,

    /// Code width used with a restored dictionary [default: 17]
    #[arg(long = "restore-width", value_name = "N")]
    restore_width: Option<u32>,

    /// Report streams that end in the middle of a code
    #[arg(long = "strict")]
    strict: bool,

    /// Compressed bytes fed to the decoder per step (K/M suffixes accepted)
    #[arg(long = "chunk-size", value_name = "BYTES", value_parser = parse_size)]
    chunk_size: Option<u32>,

    /// Increase verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (repeatable)
    #[arg(short = 'q', long = "quiet", action = ArgAction::Count)]
    quiet: u8,

    /// Input file(s); in single-input mode an optional second name is the output
    #[arg(value_name = "FILE")]
    files: Vec<String>,
}

// ── Public output type ─────────────────────────────────────────────────────────

/// Complete set of options and filenames produced by argument parsing.
#[derive(Debug)]
pub struct ParsedArgs {
    /// Decoding and I/O preferences, decoder configuration included.
    pub prefs: Prefs,
    pub op_mode: OpMode,
    /// Write to stdout even if it is a terminal.
    pub force_stdout: bool,
    /// Treat every positional argument as an input.
    pub multiple_inputs: bool,
    /// Expand directory inputs.
    pub recursive: bool,
    /// Single input filename (single-input mode).
    pub input_filename: Option<String>,
    /// Single output filename, or the stdout / null sentinel.
    pub output_filename: Option<String>,
    /// Inputs collected in multiple-input mode.
    pub in_file_names: Vec<String>,
    /// Display level after `-v` / `-q`; the caller installs it.
    pub display_level: u32,
    /// A `--help` / `--version` request was served; exit 0 without I/O.
    pub exit_early: bool,
    /// argv[0] basename.
    pub exe_name: String,
}

// ── Public API ─────────────────────────────────────────────────────────────────

/// Parse `std::env::args()` (skipping argv[0]) using `init` as the starting state.
pub fn parse_args(init: CliInit) -> anyhow::Result<ParsedArgs> {
    let exe_name = std::env::args().next().unwrap_or_default();
    let argv: Vec<String> = std::env::args().skip(1).collect();
    parse_args_from(init, &exe_name, &argv)
}

/// Parse an explicit argument list using `init` as the starting state.
///
/// `exe_name` is argv[0]; `argv` is argv[1..].
pub fn parse_args_from(
    init: CliInit,
    exe_name: &str,
    argv: &[String],
) -> anyhow::Result<ParsedArgs> {
    let exe_name = last_name_from_path(exe_name).to_owned();

    let cli = match Cli::try_parse_from(
        std::iter::once(exe_name.as_str()).chain(argv.iter().map(String::as_str)),
    ) {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.print()?;
            return Ok(early_exit(init, exe_name));
        }
        Err(e) => bail!("bad usage: {}", e.render().to_string().trim_end()),
    };

    let CliInit {
        mut prefs,
        op_mode: init_op_mode,
        multiple_inputs: init_multiple_inputs,
        dict_bits: init_dict_bits,
        force_stdout: init_force_stdout,
        output_filename: init_output_filename,
        display_level_override,
    } = init;

    // ── Mode and destination ─────────────────────────────────────────────────
    let op_mode = if cli.test {
        OpMode::Test
    } else if cli.decompress {
        OpMode::Decompress
    } else {
        init_op_mode
    };
    let recursive = cli.recursive;
    let multiple_inputs = init_multiple_inputs || cli.multiple || recursive;
    let force_stdout = init_force_stdout || cli.stdout;
    let mut output_filename = if cli.stdout {
        Some(STDOUT_MARK.to_owned())
    } else {
        init_output_filename
    };

    if cli.force {
        prefs.set_overwrite(true);
    }
    if cli.rm {
        prefs.set_remove_src_file(true);
    }

    // ── Dictionary handling ──────────────────────────────────────────────────
    if cli.dictionary.is_some() && cli.save_dictionary.is_some() {
        bail!("bad usage: --dictionary and --save-dictionary cannot be combined");
    }
    prefs.set_dictionary_filename(cli.dictionary.as_deref());
    prefs.set_save_dictionary_filename(cli.save_dictionary.as_deref());

    // ── Decoder configuration ────────────────────────────────────────────────
    let dict_bits = cli.dict_bits.unwrap_or(init_dict_bits);
    let mut config = DecoderConfig::with_dict_bits(dict_bits)
        .map_err(|e| anyhow!("bad usage: --dict-bits: {}", e))?
        .strict(cli.strict);
    if let Some(width) = cli.restore_width {
        config = config
            .restore_code_width(width)
            .map_err(|e| anyhow!("bad usage: --restore-width: {}", e))?;
    }
    prefs.set_decoder_config(config);

    if let Some(size) = cli.chunk_size {
        if size == 0 {
            bail!("bad usage: --chunk-size must be at least 1 byte");
        }
        let applied = prefs.set_chunk_size(size as usize);
        if applied != size as usize {
            displaylevel!(2, "Warning: chunk size reduced to {} bytes \n", applied);
        }
    }

    // ── Filenames ────────────────────────────────────────────────────────────
    let mut input_filename: Option<String> = None;
    let mut in_file_names: Vec<String> = Vec::new();
    for name in cli.files {
        if multiple_inputs {
            in_file_names.push(if name == "-" { STDIN_MARK.to_owned() } else { name });
        } else if input_filename.is_none() {
            input_filename = Some(if name == "-" { STDIN_MARK.to_owned() } else { name });
        } else if output_filename.is_none() {
            output_filename = Some(match name.as_str() {
                "-" => STDOUT_MARK.to_owned(),
                NULL_OUTPUT => NUL_MARK.to_owned(),
                _ => name,
            });
        } else if prefs.overwrite {
            displaylevel!(
                1,
                "Warning: {} won't be used ! Do you want multiple input files (-m) ? \n",
                name
            );
        } else {
            bail!(
                "Error: {} won't be used ! Do you want multiple input files (-m) ?",
                name
            );
        }
    }

    // ── Verbosity ────────────────────────────────────────────────────────────
    let display_level = display_level_override
        .unwrap_or(DISPLAY_LEVEL_DEFAULT)
        .saturating_add(cli.verbose as u32)
        .saturating_sub(cli.quiet as u32);

    Ok(ParsedArgs {
        prefs,
        op_mode,
        force_stdout,
        multiple_inputs,
        recursive,
        input_filename,
        output_filename,
        in_file_names,
        display_level,
        exit_early: false,
        exe_name,
    })
}

fn early_exit(init: CliInit, exe_name: String) -> ParsedArgs {
    ParsedArgs {
        prefs: init.prefs,
        op_mode: init.op_mode,
        force_stdout: init.force_stdout,
        multiple_inputs: init.multiple_inputs,
        recursive: false,
        input_filename: None,
        output_filename: init.output_filename,
        in_file_names: Vec::new(),
        display_level: init.display_level_override.unwrap_or(DISPLAY_LEVEL_DEFAULT),
        exit_early: true,
        exe_name,
    }
}
