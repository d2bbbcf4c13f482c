// config.rs: Compile-time configuration constants.
//
// Runtime overrides: LZW_DICT_BITS in the environment, then the -B / --restore-width
// / --chunk-size command-line flags.

// Default dictionary size, as a power of two (2^18 entries, literals included).
// Must match the encoder that produced the stream.
// Can be overridden by the LZW_DICT_BITS environment variable at runtime,
// or by the -B# command-line flag.
pub const DICT_BITS_DEFAULT: u32 = 18;

// Smallest dictionary size the CLI accepts (2^9 = 512 entries).
pub const DICT_BITS_MIN: u32 = 9;

// Largest dictionary size: every code must fit in 24 bits.
pub const DICT_BITS_MAX: u32 = 24;

// Fixed code width used when decoding against a restored dictionary.
// Can be overridden with --restore-width.
pub const RESTORE_CODE_WIDTH_DEFAULT: u32 = 17;

// Size of each input chunk fed to the decoder by the file layer.
// Can be overridden with --chunk-size.
pub const CHUNK_SIZE_DEFAULT: usize = 64 * 1024;

// Environment variable consulted for the default dictionary size.
pub const ENV_DICT_BITS: &str = "LZW_DICT_BITS";
