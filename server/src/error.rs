use thiserror::Error;

use tether_shared::{ConnectionHandle, RelayError};

/// Errors raised by the server-role adapter.
///
/// Nothing here is fatal to the process: every variant degrades to "this one
/// connection attempt or operation did not succeed" and is surfaced through
/// logging or the polled error events, never by unwinding past the tick
/// boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServerError {
    /// An inbound connection attempt arrived while the registry was full.
    #[error("inbound connection rejected: server is at capacity ({capacity} clients)")]
    CapacityExceeded { capacity: usize },

    /// A state change reported a handle that is already bound.
    #[error("connection handle {handle} is already bound")]
    DuplicateConnection { handle: ConnectionHandle },

    /// An operation referenced a handle with no bound record.
    #[error("no connection record bound to handle {handle}")]
    NotFound { handle: ConnectionHandle },

    /// An underlying relay SDK call failed.
    #[error("relay error: {0}")]
    Relay(#[from] RelayError),
}
