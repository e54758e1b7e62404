use std::thread;

use crate::cgroup::{self, CgroupLayout};
use crate::container::ContainerID;
use crate::metric::MetricRecord;

use super::error::NamespaceOp;
use super::{
    Error, HostNamespaces, IpCommand, LinkStatsQuery, NamespaceLease, Namespaces, Result, link,
};

const SAMPLER_THREAD_NAME: &str = "netns-sampler";

/// Reads per-interface network counters from inside a container's network namespace.
///
/// Every sample runs on its own short-lived OS thread. The thread enters the
/// container's namespace, runs the link statistics query and restores its
/// original namespace before it exits, so the namespace of the calling thread
/// (and of any pooled worker) is never touched.
#[derive(Debug, Clone)]
pub struct NetworkSampler<N = HostNamespaces, Q = IpCommand> {
    layout: CgroupLayout,
    namespaces: N,
    query: Q,
}

impl<N, Q> NetworkSampler<N, Q>
where
    N: Namespaces + Sync,
    Q: LinkStatsQuery + Sync,
{
    pub fn new(layout: CgroupLayout, namespaces: N, query: Q) -> Self {
        Self {
            layout,
            namespaces,
            query,
        }
    }

    /// Returns the network records of a container.
    ///
    /// Failures are logged and yield no records.
    pub fn read_network(&self, container_id: &ContainerID) -> Vec<MetricRecord> {
        match self.sample(container_id) {
            Ok(output) => link::parse_link_stats(&output),
            Err(err) => {
                log::warn!(
                    target: "netns",
                    "failed sampling network: container_id={}, error={}",
                    container_id,
                    err
                );
                Vec::new()
            }
        }
    }

    /// Runs the link statistics query inside the container's namespace and
    /// returns its raw output.
    ///
    /// # Errors
    ///
    /// Returns an error if the sampler thread cannot be spawned or panics, or
    /// if any namespace step or the query itself fails.
    pub fn sample(&self, container_id: &ContainerID) -> Result<String> {
        thread::scope(|scope| {
            let handle = thread::Builder::new()
                .name(SAMPLER_THREAD_NAME.to_owned())
                .spawn_scoped(scope, || self.query_in_namespace(container_id))
                .map_err(Error::SpawnThread)?;
            handle.join().unwrap_or(Err(Error::SamplerPanicked))
        })
    }

    fn query_in_namespace(&self, container_id: &ContainerID) -> Result<String> {
        let original = self
            .namespaces
            .current()
            .map_err(Error::namespace(NamespaceOp::GetCurrent))?;
        let pid = cgroup::read_first_pid(self.layout.tasks_file(container_id))?;
        let target = self
            .namespaces
            .from_pid(pid)
            .map_err(Error::namespace(NamespaceOp::GetByPid))?;

        let mut lease = NamespaceLease::new(&self.namespaces, original, target);
        lease.switch()?;
        let output = self.query.link_stats();
        if let Err(err) = lease.restore() {
            log::error!(target: "netns", "container_id={}: {}", container_id, err);
        }

        output
    }
}
