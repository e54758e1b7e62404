use std::io::Read;
use std::path::Path;

use crate::fsutil;

use super::{Error, Result};

/// Reads the first process id listed in a cgroup `tasks` file.
///
/// The first whitespace-delimited token is taken; for a container this is
/// its leading process.
///
/// # Errors
///
/// - [`Error::FileOpen`] / [`Error::Read`] if the file cannot be read.
/// - [`Error::EmptyTasks`] if the file lists no process.
/// - [`Error::InvalidPid`] if the first token is not a pid.
pub fn read_first_pid(path: impl AsRef<Path>) -> Result<u32> {
    let path = path.as_ref();
    let mut reader = fsutil::open_file_reader(path)?;
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;

    let token = content
        .split_whitespace()
        .next()
        .ok_or_else(|| Error::EmptyTasks {
            path: path.to_path_buf(),
        })?;

    token.parse::<u32>().map_err(|source| Error::InvalidPid {
        path: path.to_path_buf(),
        value: token.to_owned(),
        source,
    })
}
