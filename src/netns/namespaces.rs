use std::fs::File;
use std::path::{Path, PathBuf};

use nix::sched::{CloneFlags, setns};

/// Network namespace primitives.
///
/// Namespace membership is a property of the calling OS thread; every method
/// acts on the thread it is called from.
pub trait Namespaces {
    /// An open reference to a namespace. Dropping it closes the reference.
    type Handle;

    /// Returns a handle to the calling thread's current namespace.
    fn current(&self) -> std::io::Result<Self::Handle>;

    /// Returns a handle to the namespace of process `pid`.
    fn from_pid(&self, pid: u32) -> std::io::Result<Self::Handle>;

    /// Moves the calling thread into the namespace behind `handle`.
    fn set(&self, handle: &Self::Handle) -> std::io::Result<()>;
}

/// [`Namespaces`] backed by `/proc/<pid>/ns/net` and `setns(2)`.
#[derive(Debug, Clone)]
pub struct HostNamespaces {
    proc_root: PathBuf,
}

impl Default for HostNamespaces {
    fn default() -> Self {
        Self::new("/proc")
    }
}

impl HostNamespaces {
    /// Creates namespace primitives resolving process ids below `proc_root`.
    pub fn new(proc_root: impl Into<PathBuf>) -> Self {
        Self {
            proc_root: proc_root.into(),
        }
    }

    pub fn proc_root(&self) -> &Path {
        &self.proc_root
    }
}

impl Namespaces for HostNamespaces {
    type Handle = File;

    fn current(&self) -> std::io::Result<File> {
        // Must be the calling thread, not the process leader.
        File::open("/proc/thread-self/ns/net")
    }

    fn from_pid(&self, pid: u32) -> std::io::Result<File> {
        File::open(self.proc_root.join(pid.to_string()).join("ns/net"))
    }

    fn set(&self, handle: &File) -> std::io::Result<()> {
        setns(handle, CloneFlags::CLONE_NEWNET).map_err(std::io::Error::from)
    }
}
