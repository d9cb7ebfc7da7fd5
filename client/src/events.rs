use std::{mem, vec::IntoIter};

use tether_shared::{ConnectionHandle, DisconnectReason, RemoteIdentity};

use crate::ClientError;

/// Events accumulated during one tick, returned by [`crate::Client::receive`]
/// and drained by the host engine. Messages arrive in the order the relay
/// delivered them.
pub struct ClientEvents {
    connections: Vec<(ConnectionHandle, RemoteIdentity)>,
    disconnections: Vec<(ConnectionHandle, RemoteIdentity, DisconnectReason)>,
    messages: Vec<(ConnectionHandle, Box<[u8]>)>,
    errors: Vec<ClientError>,

    empty: bool,
}

impl ClientEvents {
    pub(crate) fn new() -> Self {
        Self {
            connections: Vec::new(),
            disconnections: Vec::new(),
            messages: Vec::new(),
            errors: Vec::new(),

            empty: true,
        }
    }

    // Public

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    pub fn read<V: ClientEvent>(&mut self) -> V::Iter {
        return V::iter(self);
    }

    pub fn has<V: ClientEvent>(&self) -> bool {
        return V::has(self);
    }

    // Crate-public

    pub(crate) fn push_connection(&mut self, handle: ConnectionHandle, remote: RemoteIdentity) {
        self.connections.push((handle, remote));
        self.empty = false;
    }

    pub(crate) fn push_disconnection(
        &mut self,
        handle: ConnectionHandle,
        remote: RemoteIdentity,
        reason: DisconnectReason,
    ) {
        self.disconnections.push((handle, remote, reason));
        self.empty = false;
    }

    pub(crate) fn push_message(&mut self, handle: ConnectionHandle, payload: Box<[u8]>) {
        self.messages.push((handle, payload));
        self.empty = false;
    }

    pub(crate) fn push_error(&mut self, error: ClientError) {
        self.errors.push(error);
        self.empty = false;
    }
}

// Event Trait
pub trait ClientEvent {
    type Iter;

    fn iter(events: &mut ClientEvents) -> Self::Iter;

    fn has(events: &ClientEvents) -> bool;
}

// ConnectEvent
pub struct ConnectEvent;
impl ClientEvent for ConnectEvent {
    type Iter = IntoIter<(ConnectionHandle, RemoteIdentity)>;

    fn iter(events: &mut ClientEvents) -> Self::Iter {
        let list = mem::take(&mut events.connections);
        return IntoIterator::into_iter(list);
    }

    fn has(events: &ClientEvents) -> bool {
        !events.connections.is_empty()
    }
}

// DisconnectEvent
pub struct DisconnectEvent;
impl ClientEvent for DisconnectEvent {
    type Iter = IntoIter<(ConnectionHandle, RemoteIdentity, DisconnectReason)>;

    fn iter(events: &mut ClientEvents) -> Self::Iter {
        let list = mem::take(&mut events.disconnections);
        return IntoIterator::into_iter(list);
    }

    fn has(events: &ClientEvents) -> bool {
        !events.disconnections.is_empty()
    }
}

// MessageEvent
pub struct MessageEvent;
impl ClientEvent for MessageEvent {
    type Iter = IntoIter<(ConnectionHandle, Box<[u8]>)>;

    fn iter(events: &mut ClientEvents) -> Self::Iter {
        let list = mem::take(&mut events.messages);
        return IntoIterator::into_iter(list);
    }

    fn has(events: &ClientEvents) -> bool {
        !events.messages.is_empty()
    }
}

// ErrorEvent
pub struct ErrorEvent;
impl ClientEvent for ErrorEvent {
    type Iter = IntoIter<ClientError>;

    fn iter(events: &mut ClientEvents) -> Self::Iter {
        let list = mem::take(&mut events.errors);
        return IntoIterator::into_iter(list);
    }

    fn has(events: &ClientEvents) -> bool {
        !events.errors.is_empty()
    }
}
