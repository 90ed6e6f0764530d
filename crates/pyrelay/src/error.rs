//! Error types for script classification and header generation.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read '{path}': {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Fs(#[from] pyrelay_fs::Error),

    #[error(transparent)]
    Archive(#[from] pyrelay_archive::Error),

    #[error("redirector script is empty")]
    EmptyScript,
}

pub type Result<T> = std::result::Result<T, Error>;
