//! Reads per-container resource accounting from a cgroup v1 hierarchy.
//!
//! Docker containers started under systemd live in
//! `/sys/fs/cgroup/<controller>/system.slice/docker-<id>.scope`. This module
//! knows that layout ([`CgroupLayout`]) and turns the accounting files found
//! there into [`MetricRecord`](crate::metric::MetricRecord)s ([`CgroupReader`]).
//!
//! # Supported Stats
//!
//! - `cpu,cpuacct/…/cpuacct.stat` and `cpuacct.usage` → `cpu.*`
//! - `memory/…/memory.stat` → `memory.*`
//! - `blkio/…/blkio.throttle.io_service_bytes` → `blkio.*`
//! - `memory/…/tasks` → the leading pid, used to find the network namespace
//!
//! # Platform Requirements
//!
//! - Linux with the cgroup v1 controllers above mounted.
//! - Read access to `/sys/fs/cgroup` and `/sys/dev/block`.
mod error;
mod layout;
mod reader;
pub mod stats;
mod tasks;

pub use error::{Error, Result};
pub use layout::CgroupLayout;
pub use reader::{CgroupReader, Subsystem};
pub use tasks::read_first_pid;
