use std::fmt;

use crate::{
    constants::MAX_MESSAGE_SIZE, error::RelayError, peer::ConnectionHandle, peer::RemoteIdentity,
    send_mode::SendMode,
};

/// The relay-SDK connection states this layer reacts to. Any other state the
/// SDK reports is ignored by the adapter.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum ConnectionState {
    /// A remote peer has started connecting; the adapter must accept or
    /// close. Acceptance does not guarantee a later `Connected`.
    Connecting,
    /// The connection is established and may carry messages.
    Connected,
    /// The remote peer closed the connection (or it timed out at the relay).
    ClosedByPeer,
}

/// A single connection-state notification drained from the relay SDK.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct StateChange {
    pub handle: ConnectionHandle,
    pub remote: RemoteIdentity,
    pub state: ConnectionState,
}

/// Protocol-level close codes sent alongside a connection close.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum CloseCode {
    Graceful,
    ServerFull,
}

impl CloseCode {
    /// Numeric code placed on the wire by the relay SDK.
    pub fn code(&self) -> u32 {
        match self {
            CloseCode::Graceful => 0,
            CloseCode::ServerFull => 1,
        }
    }

    /// Human-readable reason placed on the wire next to the code.
    pub fn reason(&self) -> &'static str {
        match self {
            CloseCode::Graceful => "graceful disconnect",
            CloseCode::ServerFull => "max connection count",
        }
    }
}

/// Reason surfaced to the host engine alongside a peer-disconnected event.
///
/// The relay collapses peer closes and timeouts into one `ClosedByPeer`
/// state, so a single reason covers both.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum DisconnectReason {
    /// The remote peer closed the connection, or it timed out at the relay.
    PeerClosed,
}

impl fmt::Display for DisconnectReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DisconnectReason::PeerClosed => write!(f, "closed by peer"),
        }
    }
}

/// Contract of the external relay-networking SDK.
///
/// Every method is synchronous and non-blocking; state notifications are
/// handed over via [`RelaySocket::poll_state_changes`] from within the
/// adapter's own poll, never from a background thread. The SDK owns message
/// framing, buffering, reassembly, and retransmission; payloads cross this
/// seam as opaque bytes.
pub trait RelaySocket {
    /// Whether the SDK session has finished initializing. The adapter polls
    /// this across ticks and defers all networking calls until it holds.
    fn is_ready(&self) -> bool;

    /// The local peer's identity on the relay network.
    fn local_identity(&self) -> RemoteIdentity;

    /// Open the listen-side socket so remote peers can start connecting.
    fn listen(&mut self) -> Result<(), RelayError>;

    /// Close the listen-side socket. In-flight connection attempts are
    /// dropped by the SDK.
    fn close_listen(&mut self);

    /// Start connecting to a remote identity. Returns the handle the SDK
    /// assigned to the new connection attempt.
    fn connect(&mut self, remote: RemoteIdentity) -> Result<ConnectionHandle, RelayError>;

    /// Accept an inbound connection reported as `Connecting`.
    fn accept(&mut self, handle: ConnectionHandle) -> Result<(), RelayError>;

    /// Close a connection with a protocol-level close code.
    fn close(&mut self, handle: ConnectionHandle, code: CloseCode);

    /// Queue an outbound message on a connection.
    fn send(
        &mut self,
        handle: ConnectionHandle,
        payload: &[u8],
        mode: SendMode,
    ) -> Result<(), RelayError>;

    /// Flush any coalesced sends pending on a connection.
    fn flush(&mut self, handle: ConnectionHandle);

    /// Next pending inbound message on a connection, or `None` when the
    /// connection's queue is empty. Successive calls yield messages in
    /// arrival order (FIFO per handle). The returned borrow is valid until
    /// the next call on the socket.
    fn receive(&mut self, handle: ConnectionHandle) -> Result<Option<&[u8]>, RelayError>;

    /// Drain pending connection-state notifications into `out`.
    fn poll_state_changes(&mut self, out: &mut Vec<StateChange>);

    /// Largest payload accepted by a single send call.
    fn max_message_size(&self) -> usize {
        MAX_MESSAGE_SIZE
    }
}
