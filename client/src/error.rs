use thiserror::Error;

use tether_shared::RelayError;

/// Errors raised by the client-role adapter. Like the server side, nothing
/// here is fatal; failures degrade to a single abandoned operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// A send or disconnect was requested while no host connection is bound.
    #[error("no connection to a host is currently bound")]
    NotConnected,

    /// An underlying relay SDK call failed.
    #[error("relay error: {0}")]
    Relay(#[from] RelayError),
}
