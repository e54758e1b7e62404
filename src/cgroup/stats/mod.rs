//! This module provides parsers turning cgroup v1 accounting files into flat
//! lists of [`MetricRecord`](crate::metric::MetricRecord)s.
//!
//! # Main types
//!
//! - [`CpuStat`] / [`CpuUsage`]: `cpuacct.stat` and `cpuacct.usage`.
//! - [`MemoryStat`]: `memory.stat`.
//! - [`BlkioStat`]: `blkio.throttle.io_service_bytes`, with device name resolution.
//!
//! All parsers skip blank lines and log-and-skip malformed ones.

mod blkio;
mod cpu;
mod error;
mod memory;
mod parser;

pub use blkio::{BLKIO_PREFIX, BlkioStat};
pub use cpu::{CPU_PREFIX, CpuStat, CpuUsage};
pub use error::StatParseError;
pub use memory::{MEMORY_PREFIX, MemoryStat};
pub use parser::{LineStat, SingleLineStat, key_value_record, split_first_field};
