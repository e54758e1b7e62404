//! Container discovery through the Docker Engine API.
//!
//! The engine is reached over its unix socket (or TCP) with plain HTTP/1.1.
//! Only the list and inspect endpoints are used.

mod docker;
mod endpoint;
mod error;
pub mod models;

pub use docker::DockerClient;
pub use endpoint::DockerEndpoint;
pub use error::{Error, Result};
