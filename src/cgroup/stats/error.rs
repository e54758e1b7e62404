//! Defines structured error types for parsing cgroup statistics lines.
//!
//! A [`StatParseError`] always refers to a single line. Readers log it and move
//! on to the next line, so one malformed entry never hides the rest of a file.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatParseError {
    #[error("missing value for '{key}' at line {line}")]
    MissingValue { key: String, line: usize },

    #[error("expected {expected} fields at line {line}, found {found}: '{content}'")]
    TooFewFields {
        expected: usize,
        found: usize,
        line: usize,
        content: String,
    },

    #[error("invalid block device '{device}' at line {line}")]
    InvalidDevice { device: String, line: usize },
}
