use std::path::{Path, PathBuf};

use crate::container::ContainerID;

const CPU_CONTROLLER: &str = "cpu,cpuacct";
const MEMORY_CONTROLLER: &str = "memory";
const BLKIO_CONTROLLER: &str = "blkio";
const SLICE: &str = "system.slice";

/// Path conventions of a cgroup v1 hierarchy managed by systemd for Docker.
///
/// Every per-container file lives at
/// `<root>/<controller>/system.slice/docker-<id>.scope/<file>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CgroupLayout {
    root: PathBuf,
}

impl Default for CgroupLayout {
    fn default() -> Self {
        Self::new("/sys/fs/cgroup")
    }
}

impl CgroupLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the scope directory of a container below `controller`.
    pub fn scope_dir(&self, controller: &str, container_id: &ContainerID) -> PathBuf {
        self.root
            .join(controller)
            .join(SLICE)
            .join(format!("docker-{container_id}.scope"))
    }

    pub fn cpuacct_stat_file(&self, container_id: &ContainerID) -> PathBuf {
        self.scope_dir(CPU_CONTROLLER, container_id)
            .join("cpuacct.stat")
    }

    pub fn cpuacct_usage_file(&self, container_id: &ContainerID) -> PathBuf {
        self.scope_dir(CPU_CONTROLLER, container_id)
            .join("cpuacct.usage")
    }

    pub fn memory_stat_file(&self, container_id: &ContainerID) -> PathBuf {
        self.scope_dir(MEMORY_CONTROLLER, container_id)
            .join("memory.stat")
    }

    pub fn blkio_service_bytes_file(&self, container_id: &ContainerID) -> PathBuf {
        self.scope_dir(BLKIO_CONTROLLER, container_id)
            .join("blkio.throttle.io_service_bytes")
    }

    /// The `tasks` file listing the container's thread ids, leader first.
    pub fn tasks_file(&self, container_id: &ContainerID) -> PathBuf {
        self.scope_dir(MEMORY_CONTROLLER, container_id)
            .join("tasks")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let layout = CgroupLayout::default();
        let id = ContainerID::new("abc123").unwrap();
        assert_eq!(
            layout.cpuacct_stat_file(&id),
            PathBuf::from("/sys/fs/cgroup/cpu,cpuacct/system.slice/docker-abc123.scope/cpuacct.stat")
        );
        assert_eq!(
            layout.cpuacct_usage_file(&id),
            PathBuf::from("/sys/fs/cgroup/cpu,cpuacct/system.slice/docker-abc123.scope/cpuacct.usage")
        );
        assert_eq!(
            layout.memory_stat_file(&id),
            PathBuf::from("/sys/fs/cgroup/memory/system.slice/docker-abc123.scope/memory.stat")
        );
        assert_eq!(
            layout.blkio_service_bytes_file(&id),
            PathBuf::from(
                "/sys/fs/cgroup/blkio/system.slice/docker-abc123.scope/blkio.throttle.io_service_bytes"
            )
        );
        assert_eq!(
            layout.tasks_file(&id),
            PathBuf::from("/sys/fs/cgroup/memory/system.slice/docker-abc123.scope/tasks")
        );
    }

    #[test]
    fn test_custom_root() {
        let layout = CgroupLayout::new("/rootfs/sys/fs/cgroup");
        let id = ContainerID::new("ff").unwrap();
        assert!(layout.tasks_file(&id).starts_with("/rootfs/sys/fs/cgroup/memory"));
    }
}
