use super::error::NamespaceOp;
use super::{Error, Namespaces, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LeaseState {
    Idle,
    Switched,
    Restored,
}

/// A scoped stay of the calling thread in another network namespace.
///
/// The lease owns both the original and the target handle. Once a switch has
/// been attempted, the original namespace is restored exactly once: either
/// by [`NamespaceLease::restore`] or, on any other exit path, when the lease
/// is dropped. The target handle is closed before the original one.
///
/// A lease must stay on the thread that created it.
pub struct NamespaceLease<'a, N: Namespaces> {
    namespaces: &'a N,
    // Field order is drop order.
    target: N::Handle,
    original: N::Handle,
    state: LeaseState,
}

impl<'a, N: Namespaces> NamespaceLease<'a, N> {
    pub fn new(namespaces: &'a N, original: N::Handle, target: N::Handle) -> Self {
        Self {
            namespaces,
            target,
            original,
            state: LeaseState::Idle,
        }
    }

    /// Moves the calling thread into the target namespace.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Namespace`] if the switch fails. The original
    /// namespace is still restored when the lease is dropped, since a failed
    /// switch may have left the thread in an unknown state.
    pub fn switch(&mut self) -> Result<()> {
        self.state = LeaseState::Switched;
        self.namespaces
            .set(&self.target)
            .map_err(Error::namespace(NamespaceOp::Switch))
    }

    /// Moves the calling thread back into the original namespace and
    /// releases both handles.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Namespace`] if restoring fails.
    pub fn restore(mut self) -> Result<()> {
        self.restore_once()
    }

    fn restore_once(&mut self) -> Result<()> {
        if self.state != LeaseState::Switched {
            return Ok(());
        }
        self.state = LeaseState::Restored;
        self.namespaces
            .set(&self.original)
            .map_err(Error::namespace(NamespaceOp::Restore))
    }
}

impl<N: Namespaces> Drop for NamespaceLease<'_, N> {
    fn drop(&mut self) {
        if let Err(err) = self.restore_once() {
            log::error!(target: "netns", "{}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::FakeNamespaces;
    use super::*;

    fn lease(namespaces: &FakeNamespaces) -> NamespaceLease<'_, FakeNamespaces> {
        let original = namespaces.current().unwrap();
        let target = namespaces.from_pid(1).unwrap();
        NamespaceLease::new(namespaces, original, target)
    }

    #[test]
    fn test_switch_and_restore() {
        let namespaces = FakeNamespaces::default();
        let mut lease = lease(&namespaces);
        assert_eq!(namespaces.live_handles(), 2);

        lease.switch().unwrap();
        lease.restore().unwrap();

        assert_eq!(namespaces.set_calls(), ["container", "host"]);
        assert_eq!(namespaces.live_handles(), 0);
    }

    #[test]
    fn test_drop_restores() {
        let namespaces = FakeNamespaces::default();
        {
            let mut lease = lease(&namespaces);
            lease.switch().unwrap();
        }
        assert_eq!(namespaces.set_calls(), ["container", "host"]);
        assert_eq!(namespaces.live_handles(), 0);
    }

    #[test]
    fn test_failed_switch_restores_exactly_once() {
        let namespaces = FakeNamespaces::failing_switch();
        let mut lease = lease(&namespaces);

        let err = lease.switch().unwrap_err();
        assert!(matches!(
            err,
            Error::Namespace {
                op: NamespaceOp::Switch,
                ..
            }
        ));
        drop(lease);

        assert_eq!(namespaces.set_calls(), ["container", "host"]);
        assert_eq!(namespaces.live_handles(), 0);
    }

    #[test]
    fn test_failed_switch_then_explicit_restore() {
        let namespaces = FakeNamespaces::failing_switch();
        let mut lease = lease(&namespaces);

        assert!(lease.switch().is_err());
        lease.restore().unwrap();

        assert_eq!(namespaces.set_calls(), ["container", "host"]);
        assert_eq!(namespaces.live_handles(), 0);
    }

    #[test]
    fn test_unused_lease_does_not_touch_namespaces() {
        let namespaces = FakeNamespaces::default();
        drop(lease(&namespaces));
        assert!(namespaces.set_calls().is_empty());
        assert_eq!(namespaces.live_handles(), 0);
    }
}
