/// Delivery mode for sends on a relay connection.
///
/// Mirrors the relay SDK's send flags: the adapter picks one of these as its
/// default for engine/control traffic, while user payloads choose between
/// reliable and unreliable per call via [`UserSendMode`].
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum SendMode {
    /// Best-effort datagram delivery.
    Unreliable,
    /// Acknowledged, retransmitted, ordered delivery.
    Reliable,
    /// Best-effort delivery, bypassing Nagle-style coalescing of small sends.
    NoNagle,
    /// Best-effort delivery, bypassing both coalescing and send buffering.
    NoDelay,
}

impl Default for SendMode {
    fn default() -> Self {
        SendMode::NoNagle
    }
}

/// Per-call reliability choice for user payload sends.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum UserSendMode {
    Unreliable,
    Reliable,
}

impl From<UserSendMode> for SendMode {
    fn from(mode: UserSendMode) -> Self {
        match mode {
            UserSendMode::Unreliable => SendMode::Unreliable,
            UserSendMode::Reliable => SendMode::Reliable,
        }
    }
}
