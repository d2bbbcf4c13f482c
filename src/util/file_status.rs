//! File status helpers: type checks and metadata propagation from a
//! compressed source to its decoded output.
//!
//! Uses `std::fs::Metadata`, the `filetime` crate for timestamps and `nix`
//! for POSIX ownership.

use std::fs;
use std::io;
use std::path::Path;
use std::time::SystemTime;

use filetime::FileTime;

#[cfg(unix)]
use crate::io::prefs::display_level;

/// Copies modification time, permission bits and (POSIX) ownership from
/// `src` onto the regular file at `path`.
///
/// Access time is set to now. Ownership is applied last and best effort:
/// an unprivileged user cannot give a file away, so a refusal is only
/// reported at display level 4.
pub fn set_file_stat(path: &Path, src: &fs::Metadata) -> io::Result<()> {
    if !is_reg_file(path) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "set_file_stat: not a regular file",
        ));
    }

    let mtime = src.modified()?;
    let atime = FileTime::from_system_time(SystemTime::now());
    filetime::set_file_times(path, atime, FileTime::from_system_time(mtime))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::{MetadataExt, PermissionsExt};
        fs::set_permissions(path, fs::Permissions::from_mode(src.mode() & 0o7777))?;

        if let Err(e) = copy_owner(path, src.uid(), src.gid()) {
            display_level(4, &format!("{}: cannot copy ownership: {} \n", path.display(), e));
        }
    }
    #[cfg(not(unix))]
    {
        fs::set_permissions(path, src.permissions())?;
    }

    Ok(())
}

/// Gives `path` the owner and group `uid`/`gid`.
#[cfg(unix)]
pub fn copy_owner(path: &Path, uid: u32, gid: u32) -> nix::Result<()> {
    use nix::unistd::{chown, Gid, Uid};
    chown(path, Some(Uid::from_raw(uid)), Some(Gid::from_raw(gid)))
}

/// Returns `true` if `path` refers to a regular file (symlinks resolved).
pub fn is_reg_file(path: &Path) -> bool {
    fs::metadata(path)
        .map(|m| m.file_type().is_file())
        .unwrap_or(false)
}

/// Returns `true` if `path` refers to a directory.
pub fn is_directory(path: &Path) -> bool {
    fs::metadata(path)
        .map(|m| m.file_type().is_dir())
        .unwrap_or(false)
}

// ─── Tests ────────────────────────────────────────────────────────────────────
