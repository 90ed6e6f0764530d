//! Does a path represent a script run by Python?

use std::path::Path;

use once_cell::sync::Lazy;
use regex::bytes::Regex;

use crate::classify::{ScriptOptions, SecondaryCheck, classify, matches_from_start, resolve};
use crate::platform::{NativeProbe, PlatformProbe};
use crate::Result;

// Admits `python`, `/usr/bin/env [args] <name> [args]` and
// `/abs/path/<name> [args]`. The bare `python` form is the wheel
// placeholder shebang.
static PYTHON_SHEBANG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?ix-u)
        ^(?:.*\W)?
        (?:python|pypy)
        (?:\d+(?:\.\d+)*)?
        (?:\.exe)?
        (?:\s\S|$)
        ",
    )
    .unwrap()
});

/// Pattern matching shebang lines (without `#!`) that run a Python
/// interpreter. ASCII case-insensitive, byte oriented.
pub fn python_shebang() -> &'static Regex { &PYTHON_SHEBANG }

/// Whether a shebang line (without `#!` or line ending) names a Python
/// interpreter.
pub fn is_python_shebang(line: &[u8]) -> bool { matches_from_start(&PYTHON_SHEBANG, line) }

/// Recognizes Python scripts in every encoding the probe `P` knows about.
#[derive(Clone, Debug, Default)]
pub struct PythonScriptDetector<P = NativeProbe> {
    probe: P,
}

impl PythonScriptDetector {
    pub fn native() -> Self { Self::default() }
}

impl<P: PlatformProbe> PythonScriptDetector<P> {
    pub fn new(probe: P) -> Self { Self { probe } }

    /// Checked in order: a Python shebang, a redirector header, then the
    /// platform encodings. Missing paths and non-regular files are
    /// `Ok(false)`.
    pub fn is_python_script(&self, path: impl AsRef<Path>, check_executable: bool) -> Result<bool> {
        let Some(path) = resolve(path.as_ref())? else {
            return Ok(false);
        };

        let options = ScriptOptions::new()
            .pattern(python_shebang())
            .check_executable(check_executable)
            .secondary(SecondaryCheck::Redirector);
        if classify(&path, &options)? {
            return Ok(true);
        }

        self.probe.probe(&path)
    }
}

/// [`PythonScriptDetector::is_python_script`] with the probe for the
/// current platform.
pub fn is_python_script(path: impl AsRef<Path>, check_executable: bool) -> Result<bool> {
    PythonScriptDetector::native().is_python_script(path, check_executable)
}
