//! Operation mode selection and environment-derived defaults for the CLI.
//!
//! - [`OpMode`]: decode to a destination, or decode and discard (`-t`).
//! - [`init_dict_bits`]: default dictionary size from `LZW_DICT_BITS`.

use crate::cli::arg_utils::read_u32_from_str;
use crate::cli::constants::display_level;
use crate::config::{DICT_BITS_DEFAULT, DICT_BITS_MAX, DICT_BITS_MIN, ENV_DICT_BITS};

/// What the CLI should do with its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpMode {
    /// Decode input into the destination file or stream.
    Decompress,
    /// Decode input, check integrity, discard output.
    Test,
}

/// Read the default dictionary size (in bits) from `LZW_DICT_BITS`.
pub fn init_dict_bits() -> u32 {
    init_dict_bits_from(std::env::var(ENV_DICT_BITS).ok().as_deref())
}

/// Testable core of [`init_dict_bits`]: parse an optional `LZW_DICT_BITS` value.
///
/// Values that are not plain numbers in `DICT_BITS_MIN..=DICT_BITS_MAX` are
/// reported at display level 2 and replaced by [`DICT_BITS_DEFAULT`].
pub fn init_dict_bits_from(env_val: Option<&str>) -> u32 {
    if let Some(env) = env_val {
        match read_u32_from_str(env) {
            Some((val, "")) if (DICT_BITS_MIN..=DICT_BITS_MAX).contains(&val) => return val,
            Some((_, "")) => {
                if display_level() >= 2 {
                    eprintln!(
                        "Ignore environment variable setting {}={}: must be within {}..={} ",
                        ENV_DICT_BITS, env, DICT_BITS_MIN, DICT_BITS_MAX
                    );
                }
            }
            _ => {
                if display_level() >= 2 {
                    eprintln!(
                        "Ignore environment variable setting {}={}: not a valid unsigned value ",
                        ENV_DICT_BITS, env
                    );
                }
            }
        }
    }
    DICT_BITS_DEFAULT
}
