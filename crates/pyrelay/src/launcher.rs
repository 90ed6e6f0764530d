//! Native Windows console-script launchers.
//!
//! The [`LauncherDetector`] trait is the only contract between the Python
//! script detector and whatever launcher format a packaging tool produces.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use crate::{Error, Result};

pub trait LauncherDetector {
    /// Whether `path` is a console-script launcher that runs Python.
    fn is_launcher(&self, path: &Path) -> Result<bool>;
}

/// PE launcher stub with a trailer naming the script kind.
///
/// Layout: `MZ` executable, appended script payload, then the four byte
/// trailer magic `UVSC` as the very last bytes of the file.
///
/// This is one trampoline encoding among several. Packaging tools that emit
/// a different launcher format implement [`LauncherDetector`] for it and
/// pass that to [`WindowsProbe::new`](crate::WindowsProbe::new).
#[derive(Clone, Copy, Debug, Default)]
pub struct TrampolineLauncher;

const PE_MAGIC: &[u8; 2] = b"MZ";
const SCRIPT_TRAILER: &[u8; 4] = b"UVSC";

impl LauncherDetector for TrampolineLauncher {
    fn is_launcher(&self, path: &Path) -> Result<bool> {
        let io_err = |source| Error::Io {
            path: path.to_path_buf(),
            source,
        };
        let metadata = match std::fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(io_err(e)),
        };
        if !metadata.is_file() || metadata.len() < (PE_MAGIC.len() + SCRIPT_TRAILER.len()) as u64 {
            return Ok(false);
        }

        let mut file = File::open(path).map_err(io_err)?;
        let mut magic = [0u8; 2];
        file.read_exact(&mut magic).map_err(io_err)?;
        if &magic != PE_MAGIC {
            return Ok(false);
        }

        let mut trailer = [0u8; 4];
        file.seek(SeekFrom::End(-(SCRIPT_TRAILER.len() as i64)))
            .and_then(|_| file.read_exact(&mut trailer))
            .map_err(io_err)?;
        let is_launcher = &trailer == SCRIPT_TRAILER;
        if is_launcher {
            tracing::debug!(path = %path.display(), "console-script launcher");
        }
        Ok(is_launcher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn check(content: &[u8]) -> bool {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tool.exe");
        std::fs::write(&path, content).unwrap();
        TrampolineLauncher.is_launcher(&path).unwrap()
    }

    #[test]
    fn detects_trailer_on_pe_stub() {
        assert!(check(b"MZ\x90\x00launcher-body-PK\x05\x06python\x06\x00\x00\x00UVSC"));
    }

    #[test]
    fn rejects_missing_pe_magic() {
        assert!(!check(b"#!/usr/bin/env python\nUVSC"));
    }

    #[test]
    fn rejects_wrong_trailer() {
        assert!(!check(b"MZ\x90\x00launcher-bodyUVPY"));
    }

    #[test]
    fn rejects_tiny_files() {
        assert!(!check(b""));
        assert!(!check(b"MZUVS"));
    }

    #[test]
    fn missing_and_directory_are_not_launchers() {
        let dir = tempdir().unwrap();
        assert!(!TrampolineLauncher.is_launcher(&dir.path().join("missing")).unwrap());
        assert!(!TrampolineLauncher.is_launcher(dir.path()).unwrap());
    }
}
