//! # Tether Server
//! Host-role transport adapter: admits inbound relay connections up to a
//! configured capacity, binds SDK connection handles to pooled connection
//! records, and drains inbound messages once per engine tick.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use tether_shared::{
        CloseCode, ConnectionHandle, ConnectionState, DisconnectReason, RelayError, RelaySocket,
        RemoteIdentity, SendMode, StateChange, UserSendMode, MAX_MESSAGES_PER_TICK,
        MAX_MESSAGE_SIZE,
    };
}

mod connection;
mod error;
mod events;
mod server;

pub use connection::{Connection, ConnectionRegistry, FreePool};
pub use error::ServerError;
pub use events::{
    ConnectEvent, DisconnectEvent, ErrorEvent, MessageEvent, ServerEvent, ServerEvents,
};
pub use server::{Server, ServerConfig};
