use std::num::ParseIntError;
use std::path::PathBuf;

use crate::fsutil;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    FileOpen(#[from] fsutil::FileOpenError),
    #[error("failed to read file `{path}`: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid pid `{value}` in file `{path}`: {source}")]
    InvalidPid {
        path: PathBuf,
        value: String,
        #[source]
        source: ParseIntError,
    },
    #[error("no process listed in file `{path}`")]
    EmptyTasks { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, Error>;
