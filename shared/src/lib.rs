//! # Tether Shared
//! Common types and trait seams shared between the tether-server &
//! tether-client relay transport adapters.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

mod constants;
mod error;
mod peer;
mod relay;
mod send_mode;

pub use constants::{MAX_MESSAGES_PER_TICK, MAX_MESSAGE_SIZE};
pub use error::RelayError;
pub use peer::{ConnectionHandle, RemoteIdentity};
pub use relay::{CloseCode, ConnectionState, DisconnectReason, RelaySocket, StateChange};
pub use send_mode::{SendMode, UserSendMode};
