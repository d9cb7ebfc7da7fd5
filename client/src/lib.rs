//! # Tether Client
//! Client-role transport adapter: connects to a host peer by relay identity,
//! tracks the single connection to that host, and drains its messages once
//! per engine tick.

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

mod client;
mod connection;
mod error;
mod events;

pub use client::{Client, ClientConfig, ConnectionStatus};
pub use connection::Connection;
pub use error::ClientError;
pub use events::{
    ClientEvent, ClientEvents, ConnectEvent, DisconnectEvent, ErrorEvent, MessageEvent,
};
