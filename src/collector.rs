use crate::cgroup::{CgroupReader, Subsystem};
use crate::container::Container;
use crate::metric::MetricRecord;
use crate::netns::{HostNamespaces, IpCommand, LinkStatsQuery, Namespaces, NetworkSampler};

/// Collects all metric records of a container for one sampling cycle.
///
/// Records are concatenated in a fixed order: CPU, memory, block I/O and
/// network. No deduplication is performed.
#[derive(Debug, Clone)]
pub struct Collector<N = HostNamespaces, Q = IpCommand> {
    cgroups: CgroupReader,
    network: NetworkSampler<N, Q>,
}

impl<N, Q> Collector<N, Q>
where
    N: Namespaces + Sync,
    Q: LinkStatsQuery + Sync,
{
    pub fn new(cgroups: CgroupReader, network: NetworkSampler<N, Q>) -> Self {
        Self { cgroups, network }
    }

    /// Collects the records of `container`.
    ///
    /// Subsystems that cannot be read contribute no records.
    pub fn collect(&self, container: &Container) -> Vec<MetricRecord> {
        let container_id = container.id();
        let mut records = Vec::new();
        for subsystem in Subsystem::ALL {
            records.extend(self.cgroups.read_subsystem(container_id, subsystem));
        }
        records.extend(self.network.read_network(container_id));

        log::debug!(
            "collected {} records for container {}: {:?}",
            records.len(),
            container_id,
            records
        );
        records
    }
}
