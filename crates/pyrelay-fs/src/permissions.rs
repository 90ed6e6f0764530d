//! Executable-bit inspection and the `chmod a+x` equivalent.

use crate::error::{Error, Result, metadata_err};
use std::io;
use std::path::Path;

#[cfg(windows)]
const DEFAULT_PATHEXT: &str = ".COM;.EXE;.BAT;.CMD";

/// Check whether `path` names a regular file the current user may execute.
///
/// # Platform Behavior
/// - **Unix**: `access(2)` with `X_OK`, so ownership and the effective uid
///   are taken into account, not just the mode bits.
/// - **Windows**: the file extension must appear in `PATHEXT`.
///
/// A path that does not exist, or that is not a regular file, is reported
/// as not executable rather than as an error.
pub fn is_executable(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    let metadata = match std::fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(metadata_err(path)(e)),
    };
    if !metadata.is_file() {
        return Ok(false);
    }
    has_execute_access(path)
}

#[cfg(unix)]
fn has_execute_access(path: &Path) -> Result<bool> {
    use nix::errno::Errno;
    use nix::unistd::{AccessFlags, access};

    match access(path, AccessFlags::X_OK) {
        Ok(()) => Ok(true),
        Err(Errno::EACCES | Errno::ENOENT | Errno::EROFS) => Ok(false),
        Err(errno) => Err(Error::Access {
            path: path.to_path_buf(),
            source: io::Error::from(errno),
        }),
    }
}

#[cfg(windows)]
fn has_execute_access(path: &Path) -> Result<bool> {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return Ok(false);
    };
    let pathext = std::env::var("PATHEXT").unwrap_or_else(|_| DEFAULT_PATHEXT.to_string());
    Ok(pathext_contains(&pathext, ext))
}

#[cfg(any(windows, test))]
fn pathext_contains(pathext: &str, ext: &str) -> bool {
    pathext
        .split(';')
        .filter_map(|e| e.trim().strip_prefix('.'))
        .any(|e| e.eq_ignore_ascii_case(ext))
}

/// Unix `chmod a+x path` restricted to classes that can already read.
///
/// Keeps the low `0o777` bits and, for each of user, group and other that
/// has read permission, adds execute permission. Special bits (setuid,
/// setgid, sticky) are cleared.
///
/// On Windows there is no execute bit and this only checks the path exists.
pub fn chmod_plus_x(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let metadata = std::fs::metadata(path).map_err(metadata_err(path))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        let mode = plus_x_mode(metadata.permissions().mode());
        tracing::trace!(path = %path.display(), "chmod +x to {mode:o}");
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode)).map_err(|e| {
            Error::SetPermissions {
                path: path.to_path_buf(),
                source: e,
            }
        })?;
    }

    #[cfg(not(unix))]
    let _ = metadata;

    Ok(())
}

/// Mode bits produced by [`chmod_plus_x`] for an existing `mode`.
pub fn plus_x_mode(mode: u32) -> u32 {
    let mut mode = mode & 0o777;
    if mode & 0o400 != 0 {
        mode |= 0o100;
    }
    if mode & 0o040 != 0 {
        mode |= 0o010;
    }
    if mode & 0o004 != 0 {
        mode |= 0o001;
    }
    mode
}
