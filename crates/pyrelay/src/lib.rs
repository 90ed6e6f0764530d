//! Script classification for Python application packaging.
//!
//! # Architecture
//!
//! - `classify.rs` - Is a path a `#!` script, optionally of a given dialect
//! - `redirector.rs` - Headers valid as both `sh` and Python
//! - `detect.rs` - Is a path a script run by Python, in any encoding
//! - `platform.rs` - Per-platform console-script encodings
//! - `launcher.rs` - Native Windows launcher detection
//!
//! Nothing here runs an interpreter. Files are only opened for reading, and
//! only a bounded prefix (or, for launchers, a fixed trailer) is read.
//!
//! # Example
//!
//! ```no_run
//! use pyrelay::{RedirectorHeader, is_python_script};
//!
//! let header = RedirectorHeader::new("exec python3 \"$0\" \"$@\"")?;
//! let script = format!("{header}\nprint('hello')\n");
//! std::fs::write("hello", script)?;
//! pyrelay_fs::chmod_plus_x("hello")?;
//!
//! assert!(is_python_script("hello", true)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use classify::{MAX_SHEBANG_LEN, SHEBANG_MAGIC, ScriptOptions, SecondaryCheck, is_script};
pub use detect::{PythonScriptDetector, is_python_script, is_python_shebang, python_shebang};
pub use error::{Error, Result};
pub use launcher::{LauncherDetector, TrampolineLauncher};
pub use platform::{NativeProbe, PlatformProbe, PosixProbe, WindowsProbe};
pub use redirector::{REDIRECTOR_INTERPRETER, REDIRECTOR_MARKER, RedirectorHeader};

mod classify;
mod detect;
mod error;
mod launcher;
mod platform;
mod redirector;
