//! This module parses the cgroup v1 block I/O throttling file
//! `blkio.throttle.io_service_bytes`.
//!
//! The file lists one line per device and operation, followed by a
//! pre-aggregated total:
//!
//! ```text
//! 8:0 Read 4096
//! 8:0 Write 1024
//! 8:0 Sync 5120
//! 8:0 Async 0
//! 8:0 Total 5120
//! Total 5120
//! ```
//!
//! # Device names
//!
//! The `major:minor` pair of each line is resolved to a kernel device name by
//! reading `DEVNAME=` from `<device_root>/<major:minor>/uevent`. Lines whose
//! device cannot be resolved are dropped, since the device may have been
//! removed between reading the stat file and the uevent file.
//!
//! # Totals
//!
//! The trailing `Total <value>` line is forwarded as `blkio.Total`. No sum is
//! derived from the per-device lines.

use std::path::{Path, PathBuf};

use crate::fsutil;
use crate::metric::MetricRecord;

use super::{LineStat, StatParseError, split_first_field};

/// Record prefix for block I/O accounting.
pub const BLKIO_PREFIX: &str = "blkio";

const TOTAL_KEY: &str = "Total";
const DEVNAME_PREFIX: &str = "DEVNAME=";

/// Parser for `blkio.throttle.io_service_bytes` and files in the same format.
#[derive(Debug, Clone)]
pub struct BlkioStat {
    device_root: PathBuf,
}

impl BlkioStat {
    /// Creates a parser resolving devices below `device_root` (usually `/sys/dev/block`).
    pub fn new(device_root: impl Into<PathBuf>) -> Self {
        Self {
            device_root: device_root.into(),
        }
    }

    pub fn device_root(&self) -> &Path {
        &self.device_root
    }

    /// Looks up the kernel name of a `major:minor` device.
    ///
    /// Returns `None` if the uevent file is missing or has no `DEVNAME=` entry.
    pub fn device_name(&self, device: &str) -> Option<String> {
        let path = self.device_root.join(device).join("uevent");
        let mut reader = fsutil::open_file_reader(&path).ok()?;
        let line = fsutil::find_line_with_prefix(&mut reader, DEVNAME_PREFIX)?;
        line.split_once('=').map(|(_, name)| name.to_owned())
    }
}

impl LineStat for BlkioStat {
    fn parse_line(
        &self,
        line: &str,
        lineno: usize,
    ) -> Result<Option<MetricRecord>, StatParseError> {
        let Some((device, rest)) = split_first_field(line) else {
            return Ok(None);
        };

        if device == TOTAL_KEY {
            if rest.is_empty() {
                return Err(too_few_fields(2, 1, line, lineno));
            }
            return Ok(Some(MetricRecord::prefixed(BLKIO_PREFIX, TOTAL_KEY, rest)));
        }

        // The value keeps everything after the operation, like `key value` files do.
        let Some((op, value)) = split_first_field(rest).filter(|(_, value)| !value.is_empty())
        else {
            let found = if rest.is_empty() { 1 } else { 2 };
            return Err(too_few_fields(3, found, line, lineno));
        };
        if !is_device_number(device) {
            return Err(StatParseError::InvalidDevice {
                device: device.to_owned(),
                line: lineno,
            });
        }

        match self.device_name(device) {
            Some(name) => Ok(Some(MetricRecord::new(
                format!("{BLKIO_PREFIX}.{name}.{op}"),
                value,
            ))),
            None => {
                log::debug!(
                    target: "cgroup stats",
                    "dropping blkio entry for unresolved device {}",
                    device
                );
                Ok(None)
            }
        }
    }
}

fn too_few_fields(expected: usize, found: usize, line: &str, lineno: usize) -> StatParseError {
    StatParseError::TooFewFields {
        expected,
        found,
        line: lineno,
        content: line.trim_end().to_owned(),
    }
}

/// Returns true for `major:minor` device numbers.
fn is_device_number(device: &str) -> bool {
    device.split_once(':').is_some_and(|(major, minor)| {
        major.parse::<u32>().is_ok() && minor.parse::<u32>().is_ok()
    })
}
