use thiserror::Error;

/// Failure codes surfaced by calls into the relay SDK.
///
/// None of these are fatal: the adapter logs the failure and abandons the
/// triggering operation. Retry, if any, is the SDK's or the caller's
/// responsibility, never this layer's.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    /// The SDK session has not finished initializing; networking calls are
    /// illegal until the readiness flag reports true.
    #[error("relay session is not ready for networking calls")]
    NotReady,

    /// The SDK could not open the listen-side socket.
    #[error("listen call failed with SDK result code {code}")]
    Listen { code: i32 },

    /// The SDK refused to accept an inbound connection.
    #[error("accept call failed with SDK result code {code}")]
    Accept { code: i32 },

    /// The SDK could not start connecting to a remote identity.
    #[error("connect call failed with SDK result code {code}")]
    Connect { code: i32 },

    /// The SDK rejected an outbound message.
    #[error("send call failed with SDK result code {code}")]
    Send { code: i32 },

    /// The SDK failed while draining inbound messages.
    #[error("receive call failed with SDK result code {code}")]
    Recv { code: i32 },
}
