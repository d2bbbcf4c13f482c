// arg_utils.rs: small parsing helpers shared by alias detection and flag parsing.

/// Returns the last path component of `path`, handling both `/` and `\` separators.
pub fn last_name_from_path(path: &str) -> &str {
    let after_slash = match path.rfind('/') {
        Some(pos) => &path[pos + 1..],
        None => path,
    };
    match after_slash.rfind('\\') {
        Some(pos) => &after_slash[pos + 1..],
        None => after_slash,
    }
}

/// Returns `true` if `exe_path` is `name`, optionally followed by an extension.
pub fn exe_name_match(exe_path: &str, name: &str) -> bool {
    match exe_path.strip_prefix(name) {
        Some(rest) => rest.is_empty() || rest.starts_with('.'),
        None => false,
    }
}

/// Parses an unsigned 32-bit integer from the start of `s`, optionally
/// followed by a size suffix. Returns `None` if `s` does not start with a
/// digit or the value overflows, else `Some((value, remainder))`.
///
/// Recognised suffixes (case-sensitive):
///   `K` / `KB` / `KiB`  → × 1 024
///   `M` / `MB` / `MiB`  → × 1 048 576
///   `G` / `GB` / `GiB`  → × 1 073 741 824
pub fn read_u32_from_str(s: &str) -> Option<(u32, &str)> {
    let bytes = s.as_bytes();
    let mut i = 0usize;

    if bytes.first().map_or(true, |b| !b.is_ascii_digit()) {
        return None;
    }

    let mut result: u32 = 0;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        result = result
            .checked_mul(10)?
            .checked_add((bytes[i] - b'0') as u32)?;
        i += 1;
    }

    let shift = match bytes.get(i) {
        Some(b'K') => 10,
        Some(b'M') => 20,
        Some(b'G') => 30,
        _ => 0,
    };
    if shift > 0 {
        if result.leading_zeros() < shift {
            return None;
        }
        result <<= shift;
        i += 1;
        if bytes.get(i) == Some(&b'i') {
            i += 1;
        }
        if bytes.get(i) == Some(&b'B') {
            i += 1;
        }
    }

    Some((result, &s[i..]))
}

/// Parses a whole argument as a size: digits, an optional suffix, nothing else.
pub fn parse_size(s: &str) -> Result<u32, String> {
    match read_u32_from_str(s) {
        Some((value, "")) => Ok(value),
        Some((_, rest)) => Err(format!("unexpected trailing characters '{}'", rest)),
        None => Err(format!("'{}' is not a valid unsigned size", s)),
    }
}
