use std::fmt;
use std::process::ExitStatus;

use crate::cgroup;

/// The namespace primitive that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamespaceOp {
    GetCurrent,
    GetByPid,
    Switch,
    Restore,
}

impl fmt::Display for NamespaceOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NamespaceOp::GetCurrent => "get current",
            NamespaceOp::GetByPid => "get process",
            NamespaceOp::Switch => "switch to container",
            NamespaceOp::Restore => "restore original",
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to {op} network namespace: {source}")]
    Namespace {
        op: NamespaceOp,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to find container process: {0}")]
    Tasks(#[from] cgroup::Error),
    #[error("failed to run link statistics query: {0}")]
    Query(#[source] std::io::Error),
    #[error("link statistics query exited with {status}: {stderr}")]
    QueryStatus { status: ExitStatus, stderr: String },
    #[error("link statistics query did not finish within {timeout:?}")]
    QueryTimeout { timeout: std::time::Duration },
    #[error("failed to spawn sampler thread: {0}")]
    SpawnThread(#[source] std::io::Error),
    #[error("sampler thread panicked")]
    SamplerPanicked,
}

impl Error {
    pub(super) fn namespace(op: NamespaceOp) -> impl FnOnce(std::io::Error) -> Self {
        move |source| Error::Namespace { op, source }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
