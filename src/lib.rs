//! Docker Graphite: reports per-container resource metrics to Graphite.
//!
//! Each cycle discovers the running containers through the Docker Engine API,
//! derives a metric-path name for every container, reads its cgroup v1
//! accounting files and network interface counters, and sends the records to
//! a Graphite server using the plaintext protocol.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::task::JoinSet;
use tokio::time::MissedTickBehavior;

pub mod cgroup;
pub mod collector;
pub mod config;
pub mod container;
pub mod discovery;
pub mod error;
pub mod fsutil;
pub mod graphite;
pub mod metric;
pub mod naming;
pub mod netns;

use cgroup::{CgroupLayout, CgroupReader};
use collector::Collector;
use config::Config;
use discovery::DockerClient;
use graphite::{ContainerMetrics, GraphiteClient};
use naming::Resolver;
use netns::{HostNamespaces, IpCommand, NetworkSampler};

/// Runs the polling loop until the process is stopped.
///
/// # Errors
///
/// Returns an error if the Graphite server cannot be reached at startup.
/// Failures inside a cycle are logged and the loop keeps running.
pub async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let hostname = config.hostname();
    log::debug!("Hostname: {}", &hostname);
    let resolver = Resolver::new(hostname);

    let layout = CgroupLayout::new(&config.cgroup_root);
    let collector = Arc::new(Collector::new(
        CgroupReader::new(layout.clone(), &config.block_device_root),
        NetworkSampler::new(
            layout,
            HostNamespaces::new(&config.proc_root),
            IpCommand::new(&config.ip_command).with_timeout(config.collect_timeout()),
        ),
    ));
    let docker = DockerClient::new(config.docker_host.clone());
    let graphite = GraphiteClient::new(
        &config.graphite_host,
        config.graphite_port,
        &config.graphite_prefix,
    );

    graphite
        .probe()
        .await
        .map_err(|source| error::Error::Graphite {
            address: graphite.address().to_owned(),
            source,
        })?;
    log::info!(
        "Reporting metrics of {} to {} every {:?}",
        docker.endpoint(),
        graphite.address(),
        config.delay()
    );

    let mut interval = tokio::time::interval(config.delay());
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        interval.tick().await;
        let start = Instant::now();
        match run_cycle(
            &docker,
            &resolver,
            &collector,
            &graphite,
            config.collect_timeout(),
        )
        .await
        {
            Ok(sent) => log::trace!("cycle sent {} metrics in {:?}", sent, start.elapsed()),
            Err(err) => log::error!("cycle failed after {:?}: {}", start.elapsed(), err),
        }
    }
}

/// Runs one discovery, collection and transmission cycle.
///
/// Returns the number of metric lines sent.
async fn run_cycle(
    docker: &DockerClient,
    resolver: &Resolver,
    collector: &Arc<Collector>,
    graphite: &GraphiteClient,
    collect_timeout: Duration,
) -> error::Result<usize> {
    let containers = docker.containers().await?;
    let timestamp = graphite::unix_timestamp();
    log::debug!("discovered {} containers", containers.len());

    let mut tasks = JoinSet::new();
    for container in containers {
        let name = match resolver.resolve(&container) {
            Ok(name) => name,
            Err(err) => {
                log::error!("{}", err);
                continue;
            }
        };
        log::debug!("container {} is named {}", container.id(), name);

        let collector = Arc::clone(collector);
        tasks.spawn(async move {
            let container_id = container.id().clone();
            let start = Instant::now();
            let collect = tokio::task::spawn_blocking(move || collector.collect(&container));
            match tokio::time::timeout(collect_timeout, collect).await {
                Ok(Ok(records)) => {
                    log::trace!("collected {} in {:?}", container_id, start.elapsed());
                    Some(ContainerMetrics { name, records })
                }
                Ok(Err(err)) => {
                    log::error!("collection of {} failed: {}", container_id, err);
                    None
                }
                Err(_) => {
                    log::warn!(
                        "collection of {} timed out after {:?}",
                        container_id,
                        collect_timeout
                    );
                    None
                }
            }
        });
    }

    let mut batch = Vec::with_capacity(tasks.len());
    while let Some(result) = tasks.join_next().await {
        match result {
            Ok(Some(metrics)) => batch.push(metrics),
            Ok(None) => {}
            Err(err) => log::error!("collection task failed: {}", err),
        }
    }

    graphite
        .send(&batch, timestamp)
        .await
        .map_err(|source| error::Error::Graphite {
            address: graphite.address().to_owned(),
            source,
        })
}
