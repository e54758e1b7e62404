use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::discovery::DockerEndpoint;

const FALLBACK_HOSTNAME: &str = "me";

/// Runtime configuration, from command-line flags or environment variables.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "docker-graphite",
    version,
    about = "A tool to report container metrics to a graphite backend"
)]
pub struct Config {
    /// Enable verbose logging.
    #[arg(long, env = "DOCKER_GRAPHITE_DEBUG")]
    pub debug: bool,

    /// Hostname to report.
    ///
    /// Defaults to `/etc/hostname`, then `/proc/sys/kernel/hostname`, and
    /// only then to the literal `me`. Pass `--hostname me` to keep metric
    /// paths produced with a fixed `me` default.
    #[arg(long, env = "DOCKER_GRAPHITE_HOSTNAME")]
    pub hostname: Option<String>,

    /// Graphite host.
    #[arg(long = "host", env = "DOCKER_GRAPHITE_HOST")]
    pub graphite_host: String,

    /// Graphite plaintext port.
    #[arg(long = "port", env = "DOCKER_GRAPHITE_PORT", default_value_t = 2003)]
    pub graphite_port: u16,

    /// Prefix of every metric path.
    #[arg(
        long = "prefix",
        env = "DOCKER_GRAPHITE_PREFIX",
        default_value = "containers.metrics"
    )]
    pub graphite_prefix: String,

    /// Delay between metric reports, in milliseconds.
    #[arg(long = "delay", env = "DOCKER_GRAPHITE_DELAY", default_value_t = 10_000)]
    pub delay_ms: u64,

    /// Docker host to contact, `unix:<path>` or `tcp:<host>:<port>`.
    #[arg(
        long = "dockerhost",
        env = "DOCKER_GRAPHITE_DOCKERHOST",
        default_value = "unix:/var/run/docker.sock"
    )]
    pub docker_host: DockerEndpoint,

    /// Root of the cgroup v1 hierarchy.
    #[arg(long, env = "DOCKER_GRAPHITE_CGROUP_ROOT", default_value = "/sys/fs/cgroup")]
    pub cgroup_root: PathBuf,

    /// Directory holding `<major>:<minor>/uevent` block device entries.
    #[arg(
        long,
        env = "DOCKER_GRAPHITE_BLOCK_DEVICE_ROOT",
        default_value = "/sys/dev/block"
    )]
    pub block_device_root: PathBuf,

    /// procfs mount used to open container network namespaces.
    #[arg(long, env = "DOCKER_GRAPHITE_PROC_ROOT", default_value = "/proc")]
    pub proc_root: PathBuf,

    /// `ip` binary used to read link statistics.
    #[arg(long, env = "DOCKER_GRAPHITE_IP_COMMAND", default_value = "ip")]
    pub ip_command: PathBuf,

    /// Upper bound for collecting one container, in milliseconds. Also the
    /// deadline after which a hanging `ip` process is killed.
    #[arg(
        long = "collect-timeout",
        env = "DOCKER_GRAPHITE_COLLECT_TIMEOUT",
        default_value_t = 5_000
    )]
    pub collect_timeout_ms: u64,
}

impl Config {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn collect_timeout(&self) -> Duration {
        Duration::from_millis(self.collect_timeout_ms)
    }

    /// Returns the configured hostname, falling back to the host's own name.
    pub fn hostname(&self) -> String {
        if let Some(hostname) = self.hostname.as_deref().filter(|h| !h.is_empty()) {
            return hostname.to_owned();
        }

        match std::fs::read_to_string("/etc/hostname")
            .or_else(|_| std::fs::read_to_string("/proc/sys/kernel/hostname"))
        {
            Ok(hostname) if !hostname.trim().is_empty() => hostname.trim().to_owned(),
            Ok(_) => FALLBACK_HOSTNAME.to_owned(),
            Err(err) => {
                log::warn!(
                    "failed to read hostname, using `{}`: {}",
                    FALLBACK_HOSTNAME,
                    err
                );
                FALLBACK_HOSTNAME.to_owned()
            }
        }
    }
}
