//! Samples per-interface network counters from inside container network namespaces.
//!
//! Network namespaces are bound to OS threads. [`NetworkSampler`] therefore
//! runs each sample on a dedicated thread that holds a [`NamespaceLease`]:
//! the thread captures its original namespace, enters the namespace of the
//! container's leading process, runs the link statistics query
//! ([`LinkStatsQuery`], `ip -s -o link` by default) and restores the original
//! namespace on every exit path.
//!
//! # Key Components
//!
//! - [`Namespaces`] / [`HostNamespaces`]: get-current, get-by-pid and set primitives.
//! - [`NamespaceLease`]: scoped switch with guaranteed restore.
//! - [`link`]: parser for the query output.
//!
//! # Platform Requirements
//!
//! - Linux, `CAP_SYS_ADMIN` (for `setns(2)`) and `CAP_SYS_PTRACE` to open
//!   other processes' namespaces.
//! - `ip` from iproute2.
mod error;
mod lease;
pub mod link;
mod namespaces;
mod query;
mod sampler;

pub use error::{Error, NamespaceOp, Result};
pub use lease::NamespaceLease;
pub use namespaces::{HostNamespaces, Namespaces};
pub use query::{IpCommand, LinkStatsQuery};
pub use sampler::NetworkSampler;
