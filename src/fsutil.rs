use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Error that occurs when opening a file fails.
#[derive(Debug, thiserror::Error)]
#[error("failed to open file `{path}`: {source}")]
pub struct FileOpenError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Opens a file at the given path and wraps it in a [`BufReader`].
///
/// # Errors
///
/// Returns a [`FileOpenError`] if the file cannot be opened.
///
/// # Example
/// ```no_run
/// # use docker_graphite::fsutil;
/// let reader = fsutil::open_file_reader("/sys/fs/cgroup/memory/memory.stat")?;
/// # Ok::<(), fsutil::FileOpenError>(())
/// ```
pub fn open_file_reader(path: impl AsRef<Path>) -> Result<BufReader<File>, FileOpenError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| FileOpenError {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

/// Returns the first line of `reader` that starts with `prefix`, without the
/// trailing line break.
///
/// Read errors end the search like end-of-file does.
pub fn find_line_with_prefix<R: BufRead>(reader: &mut R, prefix: &str) -> Option<String> {
    let mut line = String::with_capacity(64);
    loop {
        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) | Err(_) => return None,
            Ok(_) => {
                if line.starts_with(prefix) {
                    return Some(line.trim_end_matches(['\n', '\r']).to_owned());
                }
            }
        }
    }
}
