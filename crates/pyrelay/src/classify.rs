//! Shebang-based script classification.
//!
//! A script is a regular file whose first two bytes are `#!`. Callers narrow
//! that down with a pattern applied to the rest of the first line and, when
//! the pattern fails, a secondary check that may read further into the file.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use regex::bytes::Regex;

use crate::redirector;
use crate::{Error, Result};

/// The two bytes every script starts with.
pub const SHEBANG_MAGIC: &[u8; 2] = b"#!";

/// Longest shebang line read, excluding the magic.
pub const MAX_SHEBANG_LEN: u64 = 4096;

/// Check applied when the shebang line does not match the pattern.
///
/// The reader handed to the check is positioned just past the first line.
#[derive(Clone, Copy)]
pub enum SecondaryCheck<'a> {
    /// A `/bin/sh` shebang followed by the redirector marker line.
    Redirector,
    /// Any other dialect.
    Custom(&'a dyn Fn(&[u8], &mut dyn Read) -> io::Result<bool>),
}

impl SecondaryCheck<'_> {
    fn check(&self, shebang: &[u8], reader: &mut dyn Read) -> io::Result<bool> {
        match self {
            Self::Redirector => redirector::is_redirector(shebang, reader),
            Self::Custom(check) => check(shebang, reader),
        }
    }
}

impl fmt::Debug for SecondaryCheck<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Redirector => f.write_str("Redirector"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ScriptOptions<'a> {
    pattern:          Option<&'a Regex>,
    check_executable: bool,
    secondary:        Option<SecondaryCheck<'a>>,
}

impl Default for ScriptOptions<'_> {
    fn default() -> Self { Self::new() }
}

impl<'a> ScriptOptions<'a> {
    pub fn new() -> Self {
        Self {
            pattern:          None,
            check_executable: true,
            secondary:        None,
        }
    }

    /// Require the shebang line (without `#!` and the line ending) to match
    /// `pattern` from its first byte.
    pub fn pattern(mut self, pattern: &'a Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn check_executable(mut self, check_executable: bool) -> Self {
        self.check_executable = check_executable;
        self
    }

    pub fn secondary(mut self, secondary: SecondaryCheck<'a>) -> Self {
        self.secondary = Some(secondary);
        self
    }
}

/// Determine whether `path` is a script.
///
/// `path` is resolved (symlinks followed) before anything else. A missing
/// path, a non-regular file, a file the current user cannot execute (when
/// [`ScriptOptions::check_executable`] is set) or a file not starting with
/// `#!` are all `Ok(false)`. I/O failures other than the path not existing
/// are returned as errors.
pub fn is_script(path: impl AsRef<Path>, options: &ScriptOptions<'_>) -> Result<bool> {
    match resolve(path.as_ref())? {
        Some(path) => classify(&path, options),
        None => Ok(false),
    }
}

/// Canonicalize `path`, mapping a missing path to `None`.
pub(crate) fn resolve(path: &Path) -> Result<Option<PathBuf>> {
    match std::fs::canonicalize(path) {
        Ok(resolved) => Ok(Some(resolved)),
        Err(e) if is_missing(&e) => Ok(None),
        Err(source) => Err(Error::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Missing paths, paths routed through a regular file and symlink loops
/// all mean there is no file to classify.
fn is_missing(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    ) || is_symlink_loop(err)
}

#[cfg(unix)]
fn is_symlink_loop(err: &io::Error) -> bool {
    err.raw_os_error() == Some(nix::errno::Errno::ELOOP as i32)
}

#[cfg(not(unix))]
fn is_symlink_loop(_err: &io::Error) -> bool { false }

/// Classify an already resolved path.
pub(crate) fn classify(path: &Path, options: &ScriptOptions<'_>) -> Result<bool> {
    if options.check_executable && !pyrelay_fs::is_executable(path)? {
        tracing::trace!(path = %path.display(), "not executable");
        return Ok(false);
    }

    let Some(file) = open_regular(path)? else {
        tracing::trace!(path = %path.display(), "not a regular file");
        return Ok(false);
    };
    let io_err = |source| Error::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = BufReader::new(file);
    let mut magic = Vec::with_capacity(SHEBANG_MAGIC.len());
    (&mut reader)
        .take(SHEBANG_MAGIC.len() as u64)
        .read_to_end(&mut magic)
        .map_err(io_err)?;
    if magic != SHEBANG_MAGIC {
        tracing::trace!(path = %path.display(), "no shebang");
        return Ok(false);
    }

    let Some(pattern) = options.pattern else {
        return Ok(true);
    };

    let mut line = Vec::new();
    (&mut reader)
        .take(MAX_SHEBANG_LEN)
        .read_until(b'\n', &mut line)
        .map_err(io_err)?;
    if !line.ends_with(b"\n") && line.len() as u64 == MAX_SHEBANG_LEN {
        let at_eof = reader.fill_buf().map_err(io_err)?.is_empty();
        if !at_eof {
            tracing::trace!(path = %path.display(), "shebang line exceeds {MAX_SHEBANG_LEN} bytes");
            return Ok(false);
        }
    }
    let shebang = line.trim_ascii_end();

    if matches_from_start(pattern, shebang) {
        tracing::debug!(path = %path.display(), "shebang matched pattern");
        return Ok(true);
    }

    match options.secondary {
        Some(secondary) => {
            let matched = secondary.check(shebang, &mut reader).map_err(io_err)?;
            if matched {
                tracing::debug!(path = %path.display(), ?secondary, "secondary check matched");
            }
            Ok(matched)
        }
        None => Ok(false),
    }
}

/// Leftmost-first search: a match starting at offset zero exists exactly
/// when the leftmost match starts there.
pub(crate) fn matches_from_start(pattern: &Regex, haystack: &[u8]) -> bool {
    pattern.find(haystack).is_some_and(|m| m.start() == 0)
}

fn open_regular(path: &Path) -> Result<Option<File>> {
    let io_err = |source| Error::Io {
        path: path.to_path_buf(),
        source,
    };
    match std::fs::metadata(path) {
        Ok(metadata) if metadata.is_file() => {}
        Ok(_) => return Ok(None),
        Err(e) if is_missing(&e) => return Ok(None),
        Err(e) => return Err(io_err(e)),
    }
    match File::open(path) {
        Ok(file) => Ok(Some(file)),
        Err(e) if is_missing(&e) => Ok(None),
        Err(e) => Err(io_err(e)),
    }
}
