use std::fs::File;
use std::io;
use std::path::Path;

use crate::{Error, Result, ZipHeader};

/// Whether `path` is a regular file that parses as a zip archive.
///
/// Data prepended to the archive (a launcher executable, a shebang line) is
/// allowed, as it is for self-extracting archives. Anything that fails to
/// parse is reported as `false`; only I/O errors opening the file surface.
pub fn is_zip(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    let is_zip = match ZipHeader::load(path) {
        Ok(_) => true,
        Err(Error::NotZip { .. } | Error::Corrupted { .. }) => false,
        Err(e) => return Err(e),
    };
    tracing::trace!(path = %path.display(), is_zip, "probed for zip archive");
    Ok(is_zip)
}

pub(crate) fn open_regular(path: &Path) -> Result<Option<File>> {
    let io_err = |source| Error::Io {
        path: path.to_path_buf(),
        source,
    };
    match std::fs::metadata(path) {
        Ok(metadata) if metadata.is_file() => {}
        Ok(_) => return Ok(None),
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(io_err(e)),
    }
    File::open(path).map(Some).map_err(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;

    fn zip_bytes() -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("__main__.py", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"print('hello')\n").unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn detect_plain_zip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.zip");
        std::fs::write(&path, zip_bytes()).unwrap();
        assert!(is_zip(&path).unwrap());
    }

    #[test]
    fn detect_zip_with_prepended_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.exe");
        let mut data = b"MZ launcher stub\n#!python.exe\n".to_vec();
        data.extend(zip_bytes());
        std::fs::write(&path, data).unwrap();
        assert!(is_zip(&path).unwrap());
    }

    #[test]
    fn detect_non_zip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("script.py");
        std::fs::write(&path, "#!/usr/bin/env python\n").unwrap();
        assert!(!is_zip(&path).unwrap());
    }

    #[test]
    fn detect_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty");
        std::fs::write(&path, b"").unwrap();
        assert!(!is_zip(&path).unwrap());
    }

    #[test]
    fn detect_missing_and_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!is_zip(dir.path().join("missing")).unwrap());
        assert!(!is_zip(dir.path()).unwrap());
    }
}
