//! Provides generic line-oriented parsing for cgroup v1 accounting files.
//!
//! Files such as `cpuacct.stat`, `memory.stat` and
//! `blkio.throttle.io_service_bytes` are read line by line and each line is
//! turned into at most one [`MetricRecord`]. The record value is kept as the
//! text found in the file.
//!
//! # Traits
//!
//! - [`LineStat`]: parses multi-line files, skipping blank and malformed lines.
//! - [`SingleLineStat`]: parses files holding a single scalar, such as `cpuacct.usage`.
//!
//! # Example: Implementing `LineStat`
//!
//! ```rust
//! use docker_graphite::cgroup::stats::{LineStat, StatParseError, key_value_record};
//! use docker_graphite::metric::MetricRecord;
//!
//! struct PidsStat;
//!
//! impl LineStat for PidsStat {
//!     fn parse_line(
//!         &self,
//!         line: &str,
//!         lineno: usize,
//!     ) -> Result<Option<MetricRecord>, StatParseError> {
//!         key_value_record("pids", line, lineno)
//!     }
//! }
//!
//! let records = PidsStat.from_reader(&mut "current 3\n\nmax 10\n".as_bytes()).unwrap();
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[1].name(), "pids.max");
//! ```

use std::io::BufRead;

use crate::metric::MetricRecord;

use super::StatParseError;

/// A parser for line-oriented stat files producing one record per line.
pub trait LineStat {
    /// Parses a single line.
    ///
    /// Returns `Ok(None)` for lines that carry no record (blank lines, or
    /// entries that are dropped on purpose).
    ///
    /// # Errors
    ///
    /// Returns a [`StatParseError`] if the line is malformed.
    fn parse_line(&self, line: &str, lineno: usize)
    -> Result<Option<MetricRecord>, StatParseError>;

    /// Parses every line of `buf`.
    ///
    /// Malformed lines are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an `io::Error` only if reading from `buf` fails.
    fn from_reader<R: BufRead>(&self, buf: &mut R) -> std::io::Result<Vec<MetricRecord>> {
        let mut records = Vec::new();
        let mut line = String::new();
        let mut lineno = 0;

        while buf.read_line(&mut line)? != 0 {
            lineno += 1;
            match self.parse_line(&line, lineno) {
                Ok(Some(record)) => records.push(record),
                Ok(None) => {}
                Err(err) => log::debug!(target: "cgroup stats", "skipping line: {}", err),
            }
            line.clear();
        }

        Ok(records)
    }
}

/// A parser for files containing a single scalar value.
pub trait SingleLineStat {
    /// Name of the record emitted for the value.
    const NAME: &'static str;

    /// Reads the first line of `buf` as the value.
    ///
    /// Returns `Ok(None)` if the file is empty.
    fn from_reader<R: BufRead>(buf: &mut R) -> std::io::Result<Option<MetricRecord>> {
        let mut line = String::new();
        buf.read_line(&mut line)?;
        let value = line.trim();
        if value.is_empty() {
            return Ok(None);
        }
        Ok(Some(MetricRecord::new(Self::NAME, value)))
    }
}

/// Splits `line` at its first run of whitespace.
///
/// Returns `None` if the key portion is empty, which covers blank lines,
/// trailing newlines and lines starting with whitespace. The value has
/// surrounding whitespace removed and may be empty.
pub fn split_first_field(line: &str) -> Option<(&str, &str)> {
    let line = line.trim_end_matches(['\n', '\r']);
    let (key, value) = match line.find(char::is_whitespace) {
        Some(idx) => (&line[..idx], &line[idx..]),
        None => (line, ""),
    };
    if key.is_empty() {
        return None;
    }
    Some((key, value.trim()))
}

/// Parses a `key value` line into a record named `<prefix>.<key>`.
///
/// # Errors
///
/// Returns [`StatParseError::MissingValue`] if the line has a key but no value.
pub fn key_value_record(
    prefix: &str,
    line: &str,
    lineno: usize,
) -> Result<Option<MetricRecord>, StatParseError> {
    let Some((key, value)) = split_first_field(line) else {
        return Ok(None);
    };
    if value.is_empty() {
        return Err(StatParseError::MissingValue {
            key: key.to_owned(),
            line: lineno,
        });
    }
    Ok(Some(MetricRecord::prefixed(prefix, key, value)))
}
