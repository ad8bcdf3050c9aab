use std::{mem, vec::IntoIter};

use tether_shared::{ConnectionId, Tick};

use crate::{MirrorEntity, PeerError};

pub struct PeerEvents {
    connections: Vec<ConnectionId>,
    connection_failures: Vec<String>,
    disconnections: Vec<ConnectionId>,
    spawns: Vec<ConnectionId>,
    despawns: Vec<MirrorEntity>,
    errors: Vec<PeerError>,
    ticks: Vec<Tick>,
    empty: bool,
}

impl Default for PeerEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl PeerEvents {
    pub(crate) fn new() -> Self {
        Self {
            connections: Vec::new(),
            connection_failures: Vec::new(),
            disconnections: Vec::new(),
            spawns: Vec::new(),
            despawns: Vec::new(),
            errors: Vec::new(),
            ticks: Vec::new(),
            empty: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    pub fn read<V: PeerEvent>(&mut self) -> V::Iter {
        V::iter(self)
    }

    pub fn has<V: PeerEvent>(&self) -> bool {
        V::has(self)
    }

    /// Moves every event out of `other`, after the ones already buffered
    pub fn append(&mut self, mut other: PeerEvents) {
        self.connections.append(&mut other.connections);
        self.connection_failures
            .append(&mut other.connection_failures);
        self.disconnections.append(&mut other.disconnections);
        self.spawns.append(&mut other.spawns);
        self.despawns.append(&mut other.despawns);
        self.errors.append(&mut other.errors);
        self.ticks.append(&mut other.ticks);
        self.empty &= other.empty;
    }

    pub(crate) fn push_connection(&mut self, connection_id: ConnectionId) {
        self.connections.push(connection_id);
        self.empty = false;
    }

    pub(crate) fn push_connection_failure(&mut self, reason: String) {
        self.connection_failures.push(reason);
        self.empty = false;
    }

    pub(crate) fn push_disconnection(&mut self, connection_id: ConnectionId) {
        self.disconnections.push(connection_id);
        self.empty = false;
    }

    pub(crate) fn push_spawn(&mut self, connection_id: ConnectionId) {
        self.spawns.push(connection_id);
        self.empty = false;
    }

    pub(crate) fn push_despawn(&mut self, mirror: MirrorEntity) {
        self.despawns.push(mirror);
        self.empty = false;
    }

    pub(crate) fn push_error(&mut self, error: PeerError) {
        self.errors.push(error);
        self.empty = false;
    }

    pub(crate) fn push_tick(&mut self, tick: Tick) {
        self.ticks.push(tick);
        self.empty = false;
    }
}

// Event Trait
pub trait PeerEvent {
    type Iter;

    fn iter(events: &mut PeerEvents) -> Self::Iter;

    fn has(events: &PeerEvents) -> bool;
}

// Connect Event, carries the local connection id
pub struct ConnectEvent;
impl PeerEvent for ConnectEvent {
    type Iter = IntoIter<ConnectionId>;

    fn iter(events: &mut PeerEvents) -> Self::Iter {
        mem::take(&mut events.connections).into_iter()
    }

    fn has(events: &PeerEvents) -> bool {
        !events.connections.is_empty()
    }
}

// Connection Failed Event
pub struct ConnectionFailedEvent;
impl PeerEvent for ConnectionFailedEvent {
    type Iter = IntoIter<String>;

    fn iter(events: &mut PeerEvents) -> Self::Iter {
        mem::take(&mut events.connection_failures).into_iter()
    }

    fn has(events: &PeerEvents) -> bool {
        !events.connection_failures.is_empty()
    }
}

// Disconnect Event, carries the local connection id that was lost
pub struct DisconnectEvent;
impl PeerEvent for DisconnectEvent {
    type Iter = IntoIter<ConnectionId>;

    fn iter(events: &mut PeerEvents) -> Self::Iter {
        mem::take(&mut events.disconnections).into_iter()
    }

    fn has(events: &PeerEvents) -> bool {
        !events.disconnections.is_empty()
    }
}

// Spawn Event
pub struct SpawnEvent;
impl PeerEvent for SpawnEvent {
    type Iter = IntoIter<ConnectionId>;

    fn iter(events: &mut PeerEvents) -> Self::Iter {
        mem::take(&mut events.spawns).into_iter()
    }

    fn has(events: &PeerEvents) -> bool {
        !events.spawns.is_empty()
    }
}

// Despawn Event
pub struct DespawnEvent;
impl PeerEvent for DespawnEvent {
    type Iter = IntoIter<MirrorEntity>;

    fn iter(events: &mut PeerEvents) -> Self::Iter {
        mem::take(&mut events.despawns).into_iter()
    }

    fn has(events: &PeerEvents) -> bool {
        !events.despawns.is_empty()
    }
}

// Error Event
pub struct ErrorEvent;
impl PeerEvent for ErrorEvent {
    type Iter = IntoIter<PeerError>;

    fn iter(events: &mut PeerEvents) -> Self::Iter {
        mem::take(&mut events.errors).into_iter()
    }

    fn has(events: &PeerEvents) -> bool {
        !events.errors.is_empty()
    }
}

// Tick Event
pub struct TickEvent;
impl PeerEvent for TickEvent {
    type Iter = IntoIter<Tick>;

    fn iter(events: &mut PeerEvents) -> Self::Iter {
        mem::take(&mut events.ticks).into_iter()
    }

    fn has(events: &PeerEvents) -> bool {
        !events.ticks.is_empty()
    }
}
