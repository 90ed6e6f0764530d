//! Platform-specific encodings of Python console scripts.
//!
//! Shebang scripts are recognized everywhere. On Windows, installers also
//! produce launcher executables, which [`WindowsProbe`] recognizes. The probe
//! for the current platform is [`NativeProbe`].

use std::path::Path;

use pyrelay_archive::ZipHeader;

use crate::classify::SHEBANG_MAGIC;
use crate::detect::is_python_shebang;
use crate::launcher::{LauncherDetector, TrampolineLauncher};
use crate::Result;

pub trait PlatformProbe {
    /// Whether `path`, already resolved and known not to be a shebang
    /// Python script, is a Python console script in a platform encoding.
    fn probe(&self, path: &Path) -> Result<bool>;
}

/// POSIX has no encodings beyond the shebang.
#[derive(Clone, Copy, Debug, Default)]
pub struct PosixProbe;

impl PlatformProbe for PosixProbe {
    fn probe(&self, _path: &Path) -> Result<bool> { Ok(false) }
}

/// Native launchers, then launcher executables with an embedded shebang
/// followed by a zip archive.
#[derive(Clone, Debug, Default)]
pub struct WindowsProbe<L = TrampolineLauncher> {
    launcher: L,
}

impl<L: LauncherDetector> WindowsProbe<L> {
    pub fn new(launcher: L) -> Self { Self { launcher } }
}

impl<L: LauncherDetector> PlatformProbe for WindowsProbe<L> {
    fn probe(&self, path: &Path) -> Result<bool> {
        if self.launcher.is_launcher(path)? {
            return Ok(true);
        }
        let mut header = match ZipHeader::load(path) {
            Ok(header) => header,
            Err(pyrelay_archive::Error::NotZip { .. } | pyrelay_archive::Error::Corrupted { .. }) => {
                tracing::trace!(path = %path.display(), "not a zip launcher");
                return Ok(false);
            }
            Err(e) => return Err(e.into()),
        };
        let Some(shebang) = header.isolate_header(SHEBANG_MAGIC)? else {
            tracing::trace!(path = %path.display(), "zip header carries no shebang");
            return Ok(false);
        };
        let line = shebang[SHEBANG_MAGIC.len()..].trim_ascii();
        let matched = is_python_shebang(line);
        if matched {
            tracing::debug!(path = %path.display(), "zip-embedded Python shebang");
        }
        Ok(matched)
    }
}

#[cfg(windows)]
pub type NativeProbe = WindowsProbe;

#[cfg(not(windows))]
pub type NativeProbe = PosixProbe;
