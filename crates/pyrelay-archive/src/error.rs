use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read '{path}': {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("'{path}' is not a zip archive")]
    NotZip { path: PathBuf },

    #[error("zip archive '{path}' is corrupted: {source}")]
    Corrupted {
        path:   PathBuf,
        source: zip::result::ZipError,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
