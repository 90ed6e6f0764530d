//! Isolation of the bytes that precede a zip archive's first entry.
//!
//! Console-script launchers generated by Python installers on Windows are a
//! launcher executable, then a shebang line, then a zip archive holding the
//! entry point. The zip reader tolerates the prepended bytes; this module
//! hands them back so the shebang can be inspected.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use crate::detect::open_regular;
use crate::{Error, Result};

/// Upper bound on the number of header bytes read, counted back from the
/// start of the archive.
pub const MAX_HEADER_LEN: u64 = 1024 * 1024;

/// A zip archive together with the offset where its data begins.
#[derive(Debug)]
pub struct ZipHeader {
    path:   PathBuf,
    file:   File,
    offset: u64,
}

impl ZipHeader {
    /// Parse the central directory of `path` once.
    ///
    /// A missing path or a non-file is [`Error::NotZip`]. Anything the zip
    /// reader rejects, including short reads while it looks for the end of
    /// central directory record, is [`Error::Corrupted`]. Only failures to
    /// stat or open the file are [`Error::Io`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = open_regular(path)?.ok_or_else(|| Error::NotZip {
            path: path.to_path_buf(),
        })?;
        let archive = zip::ZipArchive::new(file).map_err(|source| Error::Corrupted {
            path: path.to_path_buf(),
            source,
        })?;
        let offset = archive.offset();
        let file = archive.into_inner();

        tracing::trace!(path = %path.display(), offset, "located zip archive start");
        Ok(Self {
            path: path.to_path_buf(),
            file,
            offset,
        })
    }

    /// Number of bytes in front of the archive proper.
    pub fn header_len(&self) -> u64 { self.offset }

    /// Read the header region, at most [`MAX_HEADER_LEN`] bytes ending where
    /// the archive begins.
    pub fn read_header(&mut self) -> Result<Vec<u8>> {
        let start = self.offset.saturating_sub(MAX_HEADER_LEN);
        let len = self.offset - start;

        let mut header = Vec::with_capacity(len as usize);
        self.file
            .seek(SeekFrom::Start(start))
            .and_then(|_| (&mut self.file).take(len).read_to_end(&mut header))
            .map_err(|source| Error::Io {
                path: self.path.clone(),
                source,
            })?;
        Ok(header)
    }

    /// Return the tail of the header starting at the last `stop_at`.
    ///
    /// `None` means the marker does not occur in the header region.
    pub fn isolate_header(&mut self, stop_at: &[u8]) -> Result<Option<Vec<u8>>> {
        if stop_at.is_empty() {
            return Ok(None);
        }
        let mut header = self.read_header()?;
        let found = header
            .windows(stop_at.len())
            .rposition(|window| window == stop_at);
        Ok(found.map(|index| header.split_off(index)))
    }
}
