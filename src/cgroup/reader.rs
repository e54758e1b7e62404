use std::path::{Path, PathBuf};

use crate::container::ContainerID;
use crate::error::ResultOkLogExt;
use crate::fsutil;
use crate::metric::MetricRecord;

use super::stats::{BlkioStat, CpuStat, CpuUsage, LineStat, MemoryStat, SingleLineStat};
use super::{CgroupLayout, Error, Result};

/// A cgroup accounting subsystem read per container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subsystem {
    Cpu,
    Memory,
    Blkio,
}

impl Subsystem {
    /// All subsystems, in collection order.
    pub const ALL: [Subsystem; 3] = [Subsystem::Cpu, Subsystem::Memory, Subsystem::Blkio];
}

/// Reads cgroup accounting files for containers.
///
/// A missing or unreadable file yields no records for that subsystem; it is
/// logged and never aborts reading the other subsystems.
#[derive(Debug, Clone)]
pub struct CgroupReader {
    layout: CgroupLayout,
    blkio: BlkioStat,
}

impl CgroupReader {
    pub fn new(layout: CgroupLayout, device_root: impl Into<PathBuf>) -> Self {
        Self {
            layout,
            blkio: BlkioStat::new(device_root),
        }
    }

    pub fn layout(&self) -> &CgroupLayout {
        &self.layout
    }

    /// Reads all records of one subsystem.
    pub fn read_subsystem(
        &self,
        container_id: &ContainerID,
        subsystem: Subsystem,
    ) -> Vec<MetricRecord> {
        match subsystem {
            Subsystem::Cpu => self.read_cpu(container_id),
            Subsystem::Memory => {
                self.read_stat(&self.layout.memory_stat_file(container_id), &MemoryStat)
            }
            Subsystem::Blkio => self.read_stat(
                &self.layout.blkio_service_bytes_file(container_id),
                &self.blkio,
            ),
        }
    }

    fn read_cpu(&self, container_id: &ContainerID) -> Vec<MetricRecord> {
        let stat_file = self.layout.cpuacct_stat_file(container_id);
        let Some(mut records) =
            read_with(&stat_file, |buf| CpuStat.from_reader(buf)).ok_log_with("cgroup cpu")
        else {
            return Vec::new();
        };

        let usage_file = self.layout.cpuacct_usage_file(container_id);
        if let Some(usage) = read_with(&usage_file, CpuUsage::from_reader)
            .ok_log_with("cgroup cpu usage")
            .flatten()
        {
            records.push(usage);
        }
        records
    }

    fn read_stat(&self, path: &Path, stat: &impl LineStat) -> Vec<MetricRecord> {
        read_with(path, |buf| stat.from_reader(buf))
            .ok_log_with("cgroup stats")
            .unwrap_or_default()
    }
}

/// Opens `path` and hands the reader to `parse`.
fn read_with<T>(
    path: &Path,
    parse: impl FnOnce(&mut std::io::BufReader<std::fs::File>) -> std::io::Result<T>,
) -> Result<T> {
    let mut reader = fsutil::open_file_reader(path)?;
    parse(&mut reader).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })
}
