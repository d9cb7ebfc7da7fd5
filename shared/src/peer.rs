use std::fmt;

/// Opaque identifier for a live transport-level connection, issued by the
/// relay SDK. Unique per active connection; never reused while that
/// connection is live.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct ConnectionHandle(u64);

impl ConnectionHandle {
    pub fn from_u64(value: u64) -> Self {
        ConnectionHandle(value)
    }

    pub fn to_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionHandle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque 64-bit peer identity on the relay network (the account/identity
/// key a peer is addressed by, as opposed to a per-connection handle).
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct RemoteIdentity(u64);

impl RemoteIdentity {
    pub fn from_u64(value: u64) -> Self {
        RemoteIdentity(value)
    }

    pub fn to_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RemoteIdentity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
