use tether_shared::{ConnectionHandle, RemoteIdentity};

/// Adapter-level record binding a relay connection handle to the remote
/// identity behind it.
///
/// On the server side records are pooled: allocated once at initialization,
/// bound to a handle when a connection completes, and returned to the free
/// pool when it closes. A record sitting in the pool holds whatever it was
/// last bound to; its fields are only meaningful while it is in the registry.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct Connection {
    handle: ConnectionHandle,
    remote: RemoteIdentity,
}

impl Connection {
    pub(crate) fn unbound() -> Self {
        Self {
            handle: ConnectionHandle::from_u64(0),
            remote: RemoteIdentity::from_u64(0),
        }
    }

    pub(crate) fn bind(&mut self, handle: ConnectionHandle, remote: RemoteIdentity) {
        self.handle = handle;
        self.remote = remote;
    }

    /// The relay SDK handle this record is bound to.
    pub fn handle(&self) -> ConnectionHandle {
        self.handle
    }

    /// The remote peer's identity on the relay network.
    pub fn remote(&self) -> RemoteIdentity {
        self.remote
    }
}
