//! Command-line interface for the `unlzw` binary.
//!
//! | Submodule     | Responsibility |
//! |---------------|---------------|
//! | [`constants`] | Program identity strings, the `DISPLAY_LEVEL` atomic and display macros. |
//! | [`arg_utils`] | Path basename, executable-name matching, size parsing. |
//! | [`op_mode`]   | `OpMode` and the `LZW_DICT_BITS` environment default. |
//! | [`init`]      | `CliInit`: initial state built from the binary name (`lzwcat` alias). |
//! | [`args`]      | `ParsedArgs`: flags parsed with clap and validated into `Prefs`. |
//!
//! Typical call sequence: `detect_alias` → `parse_args` → dispatch to the I/O layer.

pub mod constants;
pub mod arg_utils;
pub mod op_mode;
pub mod init;
pub mod args;
