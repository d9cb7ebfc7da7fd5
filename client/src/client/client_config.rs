use std::default::Default;

use tether_shared::SendMode;

/// Contains config properties which will be used by the client-role adapter.
#[derive(Clone)]
pub struct ClientConfig {
    /// Delivery mode used for engine/control sends.
    pub send_mode: SendMode,
    /// Whether to flush the relay connection after every engine/control
    /// send. Trades throughput for latency.
    pub force_flush: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            send_mode: SendMode::default(),
            force_flush: true,
        }
    }
}
