use tether_shared::{ConnectionHandle, RemoteIdentity};

/// Adapter-level record binding the host connection's relay handle to the
/// host's remote identity.
///
/// Unlike the server side there is no pool: a client holds exactly one peer
/// connection, so the record is allocated when the connection completes and
/// dropped when it closes.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct Connection {
    handle: ConnectionHandle,
    remote: RemoteIdentity,
}

impl Connection {
    pub(crate) fn new(handle: ConnectionHandle, remote: RemoteIdentity) -> Self {
        Self { handle, remote }
    }

    /// The relay SDK handle this record is bound to.
    pub fn handle(&self) -> ConnectionHandle {
        self.handle
    }

    /// The host's identity on the relay network.
    pub fn remote(&self) -> RemoteIdentity {
        self.remote
    }
}
