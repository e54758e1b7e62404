//! Derives a stable, human-readable metric-path name for a container.
//!
//! Three naming conventions compete, in this order:
//!
//! 1. Orchestrator allocations (`NOMAD_ALLOC_NAME`, `NOMAD_JOB_NAME`, `NOMAD_TASK_NAME`).
//! 2. Service registrations (`SERVICE_NAME`, `SERVICE_TAGS`).
//! 3. The container's display name with any embedded UUID removed.
//!
//! The winning name is then normalised by [`sanitize`] so that arbitrary
//! operator-supplied values always yield a valid dotted path.
//!
//! # Example
//!
//! ```
//! use docker_graphite::container::{Container, ContainerID};
//! use docker_graphite::naming::Resolver;
//!
//! let container = Container::new(
//!     ContainerID::new("abc123").unwrap(),
//!     vec!["/web".to_owned()],
//!     vec!["SERVICE_NAME=web".to_owned(), "SERVICE_TAGS=blue,green".to_owned()],
//!     0,
//!     "running",
//! );
//! let resolver = Resolver::new("node1");
//! assert_eq!(resolver.resolve(&container).unwrap(), "registrator.web.blue.node1");
//! ```

mod error;
mod sanitize;
mod strategy;

pub use error::{Error, Result};
pub use sanitize::{collapse_underscores, replace_illegal, sanitize, trim_underscores_around_dots};

use crate::container::Container;

/// Resolves container names for one host.
#[derive(Debug, Clone)]
pub struct Resolver {
    hostname: String,
}

impl Resolver {
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
        }
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Resolves and sanitises the name of `container`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoNameResolved`] if no strategy applies.
    pub fn resolve(&self, container: &Container) -> Result<String> {
        resolve(container, &self.hostname)
    }
}

/// Returns the name produced by the first applicable strategy, before sanitising.
pub fn raw_name(container: &Container, hostname: &str) -> Option<String> {
    strategy::STRATEGIES
        .iter()
        .filter_map(|strategy| strategy(container, hostname))
        .find(|name| !name.is_empty())
}

/// Resolves the sanitised name of `container` as seen from `hostname`.
///
/// # Errors
///
/// Returns [`Error::NoNameResolved`] carrying the container id if no strategy applies.
pub fn resolve(container: &Container, hostname: &str) -> Result<String> {
    let name = raw_name(container, hostname).ok_or_else(|| Error::NoNameResolved {
        container_id: container.id().clone(),
    })?;
    Ok(sanitize(&name))
}
