use std::collections::{hash_map::Entry, HashMap, VecDeque};

use tether_shared::ConnectionHandle;

use crate::{connection::Connection, error::ServerError};

/// Mapping from relay connection handles to bound connection records.
///
/// Binding a handle that is already present is rejected rather than
/// overwritten: the relay SDK can emit spurious duplicate notifications,
/// and the first binding must win. Iteration order is unspecified.
pub struct ConnectionRegistry {
    connections: HashMap<ConnectionHandle, Connection>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            connections: HashMap::new(),
        }
    }

    /// Insert a bound record under its handle. Fails with
    /// `DuplicateConnection` if the handle is already present, leaving the
    /// registry unchanged; the caller keeps the record.
    pub fn bind(&mut self, record: Connection) -> Result<(), ServerError> {
        let handle = record.handle();
        match self.connections.entry(handle) {
            Entry::Occupied(_) => Err(ServerError::DuplicateConnection { handle }),
            Entry::Vacant(entry) => {
                entry.insert(record);
                Ok(())
            }
        }
    }

    /// The record bound to `handle`, if any.
    pub fn lookup(&self, handle: ConnectionHandle) -> Option<&Connection> {
        self.connections.get(&handle)
    }

    pub fn contains(&self, handle: ConnectionHandle) -> bool {
        self.connections.contains_key(&handle)
    }

    /// Remove and return the record bound to `handle`. Fails with `NotFound`
    /// if absent. The caller is responsible for returning the record to the
    /// free pool.
    pub fn unbind(&mut self, handle: ConnectionHandle) -> Result<Connection, ServerError> {
        self.connections
            .remove(&handle)
            .ok_or(ServerError::NotFound { handle })
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Connection> {
        self.connections.values()
    }

    /// Remove every record, yielding them for repooling.
    pub(crate) fn drain(&mut self) -> impl Iterator<Item = Connection> + '_ {
        self.connections.drain().map(|(_, record)| record)
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Queue of unbound connection records awaiting assignment.
///
/// Created with one record per configured client slot; pool size plus
/// registry size stays equal to that capacity across any sequence of
/// connects and disconnects.
pub struct FreePool {
    records: VecDeque<Connection>,
}

impl FreePool {
    pub fn with_capacity(capacity: usize) -> Self {
        let mut records = VecDeque::with_capacity(capacity);
        for _ in 0..capacity {
            records.push_back(Connection::unbound());
        }
        Self { records }
    }

    pub fn take(&mut self) -> Option<Connection> {
        self.records.pop_front()
    }

    pub fn put(&mut self, record: Connection) {
        self.records.push_back(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
