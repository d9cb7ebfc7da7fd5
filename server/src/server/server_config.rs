use std::default::Default;

use tether_shared::SendMode;

/// Contains config properties which will be used by the server-role adapter.
#[derive(Clone)]
pub struct ServerConfig {
    /// Maximum number of simultaneously connected clients. Also the size of
    /// the connection-record pool allocated at initialization.
    pub max_clients: usize,
    /// Delivery mode used for engine/control sends.
    pub send_mode: SendMode,
    /// Whether to flush the relay connection after every engine/control
    /// send. Trades throughput for latency.
    pub force_flush: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_clients: 16,
            send_mode: SendMode::default(),
            force_flush: true,
        }
    }
}
