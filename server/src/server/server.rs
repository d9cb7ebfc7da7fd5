use std::mem;

use log::{info, warn};

use tether_shared::{
    CloseCode, ConnectionHandle, ConnectionState, DisconnectReason, RelaySocket, RemoteIdentity,
    SendMode, StateChange, UserSendMode, MAX_MESSAGES_PER_TICK,
};

use crate::{
    connection::{ConnectionRegistry, FreePool},
    events::ServerEvents,
    server::ServerConfig,
    ServerError,
};

/// Host-role transport adapter.
///
/// Owns the admission policy for inbound relay connections, the mapping from
/// SDK connection handles to pooled connection records, and the per-tick
/// message drain. Everything runs on the engine's update thread:
/// [`Server::receive`] must be called once per tick and is the only place
/// SDK state notifications are processed.
pub struct Server {
    config: ServerConfig,
    socket: Box<dyn RelaySocket>,
    // Connections
    registry: ConnectionRegistry,
    free_pool: FreePool,
    // Events
    incoming_events: ServerEvents,
    state_changes: Vec<StateChange>,
    // Listen socket
    listen_requested: bool,
    listening: bool,
}

impl Server {
    /// Create a new Server. A pool of `max_clients` connection records is
    /// allocated up front; no networking call is issued until the SDK
    /// reports ready.
    pub fn new<S: Into<Box<dyn RelaySocket>>>(config: ServerConfig, socket: S) -> Self {
        let max_clients = config.max_clients;
        Self {
            config,
            socket: socket.into(),
            registry: ConnectionRegistry::new(),
            free_pool: FreePool::with_capacity(max_clients),
            incoming_events: ServerEvents::new(),
            state_changes: Vec::new(),
            listen_requested: false,
            listening: false,
        }
    }

    /// Request the listen socket be opened. Deferred until the SDK session
    /// reports ready; readiness is polled once per [`Server::receive`] tick,
    /// never blocked on.
    pub fn listen(&mut self) {
        self.listen_requested = true;
        if self.socket.is_ready() {
            self.try_listen();
        }
    }

    /// Whether the listen socket is open and accepting connections.
    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// The local peer's identity on the relay network. Only meaningful once
    /// the SDK session reports ready.
    pub fn local_identity(&self) -> RemoteIdentity {
        self.socket.local_identity()
    }

    /// Must be called once per engine tick. Drives the deferred listen,
    /// applies all pending connection-state changes, drains inbound
    /// messages, and returns the accumulated events.
    pub fn receive(&mut self) -> ServerEvents {
        self.maintain_socket();

        // return all received events and reset the buffer
        mem::replace(&mut self.incoming_events, ServerEvents::new())
    }

    // Send paths

    /// Engine/control send: uses the configured default delivery mode, then
    /// flushes if force-flush is set. A handle with no bound record is
    /// rejected rather than forwarded to the SDK.
    pub fn send(&mut self, handle: ConnectionHandle, payload: &[u8]) -> Result<(), ServerError> {
        if !self.registry.contains(handle) {
            return Err(ServerError::NotFound { handle });
        }
        self.socket.send(handle, payload, self.config.send_mode)?;
        if self.config.force_flush {
            self.socket.flush(handle);
        }
        Ok(())
    }

    /// User payload send: reliability chosen per call, never flushed.
    pub fn send_user(
        &mut self,
        handle: ConnectionHandle,
        payload: &[u8],
        mode: UserSendMode,
    ) -> Result<(), ServerError> {
        if !self.registry.contains(handle) {
            return Err(ServerError::NotFound { handle });
        }
        self.socket.send(handle, payload, mode.into())?;
        Ok(())
    }

    // Connections

    /// Flush and close a connection, returning its record to the pool. A
    /// handle with no bound record is a logged no-op.
    pub fn disconnect(&mut self, handle: ConnectionHandle) {
        let Ok(record) = self.registry.unbind(handle) else {
            warn!("disconnect requested for unknown connection handle {handle}");
            return;
        };

        self.socket.flush(handle);
        self.socket.close(handle, CloseCode::Graceful);
        self.free_pool.put(record);

        info!(
            "remote identity {} disconnected from server",
            record.remote()
        );
    }

    /// Close every live connection and the listen socket. Undrained events
    /// are dropped.
    pub fn shutdown(&mut self) {
        let Self {
            registry,
            socket,
            free_pool,
            ..
        } = self;
        for record in registry.drain() {
            socket.close(record.handle(), CloseCode::Graceful);
            free_pool.put(record);
        }

        if self.listening {
            self.socket.close_listen();
            self.listening = false;
        }
        self.listen_requested = false;
        self.incoming_events = ServerEvents::new();
    }

    /// Number of currently connected clients.
    pub fn connection_count(&self) -> usize {
        self.registry.len()
    }

    /// Number of unbound records waiting in the free pool.
    pub fn free_record_count(&self) -> usize {
        self.free_pool.len()
    }

    /// Configured maximum number of clients.
    pub fn capacity(&self) -> usize {
        self.config.max_clients
    }

    /// The remote identity bound to a connection handle, if any.
    pub fn remote_identity(&self, handle: ConnectionHandle) -> Option<RemoteIdentity> {
        self.registry.lookup(handle).map(|record| record.remote())
    }

    /// Handles of all currently connected clients, in unspecified order.
    pub fn connection_handles(&self) -> Vec<ConnectionHandle> {
        self.registry.iter().map(|record| record.handle()).collect()
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

    /// One tick of socket maintenance: deferred listen, state changes, then
    /// the message drain.
    fn maintain_socket(&mut self) {
        if !self.socket.is_ready() {
            // keep polling the readiness flag across ticks
            return;
        }

        if self.listen_requested && !self.listening {
            self.try_listen();
        }

        // state changes first, so peers connected this tick get drained
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

    fn try_listen(&mut self) {
        match self.socket.listen() {
            Ok(()) => {
                info!("listening as remote identity {}", self.local_identity());
                self.listening = true;
            }
            Err(error) => {
                warn!("could not open listen socket: {error}");
                self.incoming_events.push_error(error.into());
                // no retry; a new listen() call is required
                self.listen_requested = false;
            }
        }
    }

    fn on_connecting(&mut self, change: StateChange) {
        if self.registry.len() == self.config.max_clients {
            warn!(
                "declining connection from remote identity {} (server is full)",
                change.remote
            );
            self.socket.close(change.handle, CloseCode::ServerFull);
            self.incoming_events.push_error(ServerError::CapacityExceeded {
                capacity: self.config.max_clients,
            });
            return;
        }

        match self.socket.accept(change.handle) {
            Ok(()) => {
                info!(
                    "accepting connection from remote identity {}",
                    change.remote
                );
            }
            Err(error) => {
                warn!(
                    "connection from remote identity {} could not be accepted: {error}",
                    change.remote
                );
                self.incoming_events.push_error(error.into());
            }
        }
    }

    fn on_connected(&mut self, change: StateChange) {
        let Some(mut record) = self.free_pool.take() else {
            // the SDK completed more connections than were admitted
            warn!(
                "no free connection record for remote identity {}, closing",
                change.remote
            );
            self.socket.close(change.handle, CloseCode::ServerFull);
            self.incoming_events.push_error(ServerError::CapacityExceeded {
                capacity: self.config.max_clients,
            });
            return;
        };

        record.bind(change.handle, change.remote);
        match self.registry.bind(record) {
            Ok(()) => {
                info!("connected with remote identity {}", change.remote);
                self.incoming_events
                    .push_connection(change.handle, change.remote);
            }
            Err(error) => {
                // spurious duplicate notification; the first binding wins
                // and the engine is not notified
                warn!(
                    "failed to bind remote identity {}: {error}",
                    change.remote
                );
                self.free_pool.put(record);
            }
        }
    }

    fn on_closed_by_peer(&mut self, change: StateChange) {
        let Ok(record) = self.registry.unbind(change.handle) else {
            // already handled, or never bound
            info!(
                "ignoring close for unknown connection handle {}",
                change.handle
            );
            return;
        };

        info!("remote identity {} disconnected", record.remote());
        self.incoming_events.push_disconnection(
            record.handle(),
            record.remote(),
            DisconnectReason::PeerClosed,
        );
        self.free_pool.put(record);
        self.socket.close(change.handle, CloseCode::Graceful);
    }

    /// Drain up to [`MAX_MESSAGES_PER_TICK`] inbound messages per bound
    /// connection, copying each payload out of the SDK's borrow into an
    /// owned event. FIFO per connection; remainders carry over to the next
    /// tick.
    fn drain_messages(&mut self) {
        let Self {
            registry,
            socket,
            incoming_events,
            ..
        } = self;

        for record in registry.iter() {
            let handle = record.handle();
            for _ in 0..MAX_MESSAGES_PER_TICK {
                match socket.receive(handle) {
                    Ok(Some(payload)) => {
                        incoming_events.push_message(handle, payload.into());
                    }
                    Ok(None) => break,
                    Err(error) => {
                        incoming_events.push_error(error.into());
                        break;
                    }
                }
            }
        }
    }
}
