use std::mem;

use log::{info, warn};

use tether_shared::{
    CloseCode, ConnectionHandle, ConnectionState, DisconnectReason, RelaySocket, RemoteIdentity,
    SendMode, StateChange, UserSendMode, MAX_MESSAGES_PER_TICK,
};

use crate::{client::ClientConfig, connection::Connection, events::ClientEvents, ClientError};

/// Where the client currently stands with its host.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum ConnectionStatus {
    Disconnected,
    Connecting,
    Connected,
}

/// Client-role transport adapter.
///
/// Tracks a single connection to a host peer. The lifecycle machine is the
/// same shape as the server's, except that a closed host connection tears
/// down the whole client session rather than one entry in a registry.
/// [`Client::receive`] must be called once per engine tick.
pub struct Client {
    config: ClientConfig,
    socket: Box<dyn RelaySocket>,
    // Host connection
    connection: Option<Connection>,
    pending_connect: Option<RemoteIdentity>,
    host_handle: Option<ConnectionHandle>,
    // Events
    incoming_events: ClientEvents,
    state_changes: Vec<StateChange>,
}

impl Client {
    pub fn new<S: Into<Box<dyn RelaySocket>>>(config: ClientConfig, socket: S) -> Self {
        Self {
            config,
            socket: socket.into(),
            connection: None,
            pending_connect: None,
            host_handle: None,
            incoming_events: ClientEvents::new(),
            state_changes: Vec::new(),
        }
    }

    /// Start connecting to the host with the given relay identity. Deferred
    /// until the SDK session reports ready; readiness is polled once per
    /// [`Client::receive`] tick, never blocked on.
    pub fn connect(&mut self, remote: RemoteIdentity) {
        self.pending_connect = Some(remote);
        if self.socket.is_ready() {
            self.try_connect();
        }
    }

    pub fn connection_status(&self) -> ConnectionStatus {
        if self.connection.is_some() {
            ConnectionStatus::Connected
        } else if self.host_handle.is_some() || self.pending_connect.is_some() {
            ConnectionStatus::Connecting
        } else {
            ConnectionStatus::Disconnected
        }
    }

    /// The bound host connection, if the session is established.
    pub fn connection(&self) -> Option<&Connection> {
        self.connection.as_ref()
    }

    /// The local peer's identity on the relay network. Only meaningful once
    /// the SDK session reports ready.
    pub fn local_identity(&self) -> RemoteIdentity {
        self.socket.local_identity()
    }

    /// Must be called once per engine tick. Drives the deferred connect,
    /// applies pending state changes for the host connection, drains its
    /// inbound messages, and returns the accumulated events.
    pub fn receive(&mut self) -> ClientEvents {
        self.maintain_socket();

        // return all received events and reset the buffer
        mem::replace(&mut self.incoming_events, ClientEvents::new())
    }

    // Send paths

    /// Engine/control send to the host: uses the configured default delivery
    /// mode, then flushes if force-flush is set. Rejected while no host
    /// connection is bound, never forwarded on a stale handle.
    pub fn send(&mut self, payload: &[u8]) -> Result<(), ClientError> {
        let Some(connection) = self.connection else {
            return Err(ClientError::NotConnected);
        };
        self.socket
            .send(connection.handle(), payload, self.config.send_mode)?;
        if self.config.force_flush {
            self.socket.flush(connection.handle());
        }
        Ok(())
    }

    /// User payload send to the host: reliability chosen per call, never
    /// flushed.
    pub fn send_user(&mut self, payload: &[u8], mode: UserSendMode) -> Result<(), ClientError> {
        let Some(connection) = self.connection else {
            return Err(ClientError::NotConnected);
        };
        self.socket.send(connection.handle(), payload, mode.into())?;
        Ok(())
    }

    /// Flush and gracefully close the host connection, tearing down the
    /// session. An in-flight connection attempt is closed at the SDK as
    /// well, so the handshake cannot complete after the engine has let go.
    /// A no-op while disconnected.
    pub fn disconnect(&mut self) {
        if let Some(connection) = self.connection.take() {
            info!("sending disconnect to host {}", connection.remote());
            self.socket.flush(connection.handle());
            self.socket.close(connection.handle(), CloseCode::Graceful);
        } else if let Some(handle) = self.host_handle {
            info!("abandoning in-flight connection attempt on handle {handle}");
            self.socket.close(handle, CloseCode::Graceful);
        }
        self.pending_connect = None;
        self.host_handle = None;
    }

    /// Tear down the session and drop undrained events.
    pub fn shutdown(&mut self) {
        self.disconnect();
        self.incoming_events = ClientEvents::new();
    }

    /// Largest payload accepted by a single send call.
    pub fn max_message_size(&self) -> usize {
        self.socket.max_message_size()
    }

    // Config hot-updates

    pub fn set_send_mode(&mut self, mode: SendMode) {
        self.config.send_mode = mode;
    }

    pub fn set_force_flush(&mut self, force_flush: bool) {
        self.config.force_flush = force_flush;
    }

    // Private methods

    fn maintain_socket(&mut self) {
        if !self.socket.is_ready() {
            // keep polling the readiness flag across ticks
            return;
        }

        if self.pending_connect.is_some() {
            self.try_connect();
        }

        let mut changes = mem::take(&mut self.state_changes);
        self.socket.poll_state_changes(&mut changes);
        for change in changes.drain(..) {
            match change.state {
                ConnectionState::Connecting => self.on_connecting(change),
                ConnectionState::Connected => self.on_connected(change),
                ConnectionState::ClosedByPeer => self.on_closed_by_peer(change),
            }
        }
        self.state_changes = changes;

        self.drain_messages();
    }

    fn try_connect(&mut self) {
        let Some(remote) = self.pending_connect.take() else {
            return;
        };

        match self.socket.connect(remote) {
            Ok(handle) => {
                info!("connecting to host {remote}");
                self.host_handle = Some(handle);
            }
            Err(error) => {
                warn!("could not start connecting to host {remote}: {error}");
                self.incoming_events.push_error(error.into());
            }
        }
    }

    fn on_connecting(&mut self, change: StateChange) {
        info!("connection to host {} in progress", change.remote);
    }

    fn on_connected(&mut self, change: StateChange) {
        if self.connection.is_some() {
            // spurious duplicate notification; the first binding wins and
            // the engine is not notified
            warn!(
                "failed to bind host connection {}: already connected",
                change.handle
            );
            return;
        }
        if self.host_handle != Some(change.handle) {
            // the attempt was abandoned before the handshake completed;
            // close the stale handle instead of binding it
            info!(
                "closing completed connection {} with no attempt pending",
                change.handle
            );
            self.socket.close(change.handle, CloseCode::Graceful);
            return;
        }

        info!("connected with host {}", change.remote);
        self.host_handle = Some(change.handle);
        self.connection = Some(Connection::new(change.handle, change.remote));
        self.incoming_events
            .push_connection(change.handle, change.remote);
    }

    fn on_closed_by_peer(&mut self, change: StateChange) {
        let Some(connection) = self.connection else {
            if self.host_handle == Some(change.handle) {
                // the attempt was closed before completing (rejected, or the
                // host went away); no record was ever bound, so the engine is
                // not notified
                warn!("connection attempt to host {} was closed", change.remote);
                self.host_handle = None;
                self.socket.close(change.handle, CloseCode::Graceful);
            } else {
                // already handled, or never bound
                info!(
                    "ignoring close for unknown connection handle {}",
                    change.handle
                );
            }
            return;
        };
        if connection.handle() != change.handle {
            info!(
                "ignoring close for unknown connection handle {}",
                change.handle
            );
            return;
        }

        info!("removed from the host (kicked, or the host shut down)");
        self.incoming_events.push_disconnection(
            connection.handle(),
            connection.remote(),
            DisconnectReason::PeerClosed,
        );

        // a closed host connection ends the whole client session
        self.connection = None;
        self.pending_connect = None;
        self.host_handle = None;
        self.socket.close(change.handle, CloseCode::Graceful);
    }

    /// Drain up to [`MAX_MESSAGES_PER_TICK`] inbound messages from the host
    /// connection, copying each payload out of the SDK's borrow into an
    /// owned event.
    fn drain_messages(&mut self) {
        let Some(connection) = self.connection else {
            return;
        };
        let handle = connection.handle();

        for _ in 0..MAX_MESSAGES_PER_TICK {
            match self.socket.receive(handle) {
                Ok(Some(payload)) => {
                    let payload: Box<[u8]> = payload.into();
                    self.incoming_events.push_message(handle, payload);
                }
                Ok(None) => break,
                Err(error) => {
                    self.incoming_events.push_error(error.into());
                    break;
                }
            }
        }
    }
}
