use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to inspect '{path}': {source}")]
    Metadata { path: PathBuf, source: io::Error },

    #[error("failed to check access to '{path}': {source}")]
    Access { path: PathBuf, source: io::Error },

    #[error("failed to set permissions on '{path}': {source}")]
    SetPermissions { path: PathBuf, source: io::Error },
}

impl Error {
    pub fn path(&self) -> &Path {
        match self {
            Self::Metadata { path, .. }
            | Self::Access { path, .. }
            | Self::SetPermissions { path, .. } => path,
        }
    }

    pub fn io(&self) -> &io::Error {
        match self {
            Self::Metadata { source, .. }
            | Self::Access { source, .. }
            | Self::SetPermissions { source, .. } => source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

pub(crate) fn metadata_err(path: &Path) -> impl FnOnce(io::Error) -> Error + '_ {
    move |source| Error::Metadata {
        path: path.to_path_buf(),
        source,
    }
}
