//! CLI initialization and binary-alias detection.
//!
//! `unlzw` may also be installed as `lzwcat` via a hard or symbolic link.
//! [`detect_alias`] inspects `argv[0]` before any flag is parsed and returns a
//! [`CliInit`] carrying the defaults for that name; the argument parser then
//! layers explicit flags on top.

use crate::cli::arg_utils::{exe_name_match, last_name_from_path};
use crate::cli::constants::LZWCAT;
use crate::cli::op_mode::{init_dict_bits, OpMode};
use crate::io::file_io::STDOUT_MARK;
use crate::io::prefs::Prefs;

/// Initial CLI state derived from the binary name and environment.
#[derive(Debug, Clone)]
pub struct CliInit {
    /// Decoding preferences; overwrite starts disabled.
    pub prefs: Prefs,
    pub op_mode: OpMode,
    /// Treat every positional argument as an input (set by `lzwcat`).
    pub multiple_inputs: bool,
    /// Dictionary size from `LZW_DICT_BITS`, or the default.
    pub dict_bits: u32,
    /// Write to stdout even when it is a terminal.
    pub force_stdout: bool,
    /// Explicit output, `Some(STDOUT_MARK)` for `lzwcat`.
    pub output_filename: Option<String>,
    /// Display level the alias starts at, applied by the argument parser.
    pub display_level_override: Option<u32>,
}

/// Detect initial settings from `argv[0]`, which may be a full path.
///
/// | Binary name | Effect                                               |
/// |-------------|------------------------------------------------------|
/// | `lzwcat`    | Decode every input to stdout, quiet (level 1)        |
/// | other       | Plain defaults                                       |
pub fn detect_alias(argv0: &str) -> CliInit {
    detect_alias_with(argv0, init_dict_bits())
}

/// [`detect_alias`] with an explicit dictionary-size default, bypassing the environment.
pub fn detect_alias_with(argv0: &str, dict_bits: u32) -> CliInit {
    let exe_name = last_name_from_path(argv0);

    let mut prefs = Prefs::default();
    prefs.overwrite = false;

    let mut init = CliInit {
        prefs,
        op_mode: OpMode::Decompress,
        multiple_inputs: false,
        dict_bits,
        force_stdout: false,
        output_filename: None,
        display_level_override: None,
    };

    if exe_name_match(exe_name, LZWCAT) {
        init.prefs.set_overwrite(true);
        init.prefs.set_remove_src_file(false);
        init.force_stdout = true;
        init.output_filename = Some(STDOUT_MARK.to_owned());
        init.display_level_override = Some(1);
        init.multiple_inputs = true;
    }

    init
}
