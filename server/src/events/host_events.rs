use std::{mem, vec::IntoIter};

use tether_shared::{ConnectionId, Tick};

use crate::{AuthorityEntity, AuthorityError};

pub struct HostEvents {
    joins: Vec<ConnectionId>,
    leaves: Vec<AuthorityEntity>,
    timeouts: Vec<ConnectionId>,
    errors: Vec<AuthorityError>,
    ticks: Vec<Tick>,

    empty: bool,
}

impl Default for HostEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl HostEvents {
    pub(crate) fn new() -> Self {
        Self {
            joins: Vec::new(),
            leaves: Vec::new(),
            timeouts: Vec::new(),
            errors: Vec::new(),
            ticks: Vec::new(),

            empty: true,
        }
    }

    // Public

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    pub fn read<V: HostEvent>(&mut self) -> V::Iter {
        V::iter(self)
    }

    pub fn has<V: HostEvent>(&self) -> bool {
        V::has(self)
    }

    /// Moves every event out of `other`, after the ones already buffered
    pub fn append(&mut self, mut other: HostEvents) {
        self.joins.append(&mut other.joins);
        self.leaves.append(&mut other.leaves);
        self.timeouts.append(&mut other.timeouts);
        self.errors.append(&mut other.errors);
        self.ticks.append(&mut other.ticks);
        self.empty &= other.empty;
    }

    // Crate-public

    pub(crate) fn push_join(&mut self, connection_id: ConnectionId) {
        self.joins.push(connection_id);
        self.empty = false;
    }

    pub(crate) fn push_leave(&mut self, entity: AuthorityEntity) {
        self.leaves.push(entity);
        self.empty = false;
    }

    pub(crate) fn push_timeout(&mut self, connection_id: ConnectionId) {
        self.timeouts.push(connection_id);
        self.empty = false;
    }

    pub(crate) fn push_error(&mut self, error: AuthorityError) {
        self.errors.push(error);
        self.empty = false;
    }

    pub(crate) fn push_tick(&mut self, tick: Tick) {
        self.ticks.push(tick);
        self.empty = false;
    }
}

// Event Trait
pub trait HostEvent {
    type Iter;

    fn iter(events: &mut HostEvents) -> Self::Iter;

    fn has(events: &HostEvents) -> bool;
}

// JoinEvent: an AuthorityEntity was created
pub struct JoinEvent;
impl HostEvent for JoinEvent {
    type Iter = IntoIter<ConnectionId>;

    fn iter(events: &mut HostEvents) -> Self::Iter {
        mem::take(&mut events.joins).into_iter()
    }

    fn has(events: &HostEvents) -> bool {
        !events.joins.is_empty()
    }
}

// LeaveEvent: an AuthorityEntity was destroyed
pub struct LeaveEvent;
impl HostEvent for LeaveEvent {
    type Iter = IntoIter<AuthorityEntity>;

    fn iter(events: &mut HostEvents) -> Self::Iter {
        mem::take(&mut events.leaves).into_iter()
    }

    fn has(events: &HostEvents) -> bool {
        !events.leaves.is_empty()
    }
}

// TimeoutEvent: a connection never joined and was dropped
pub struct TimeoutEvent;
impl HostEvent for TimeoutEvent {
    type Iter = IntoIter<ConnectionId>;

    fn iter(events: &mut HostEvents) -> Self::Iter {
        mem::take(&mut events.timeouts).into_iter()
    }

    fn has(events: &HostEvents) -> bool {
        !events.timeouts.is_empty()
    }
}

// Error Event
pub struct ErrorEvent;
impl HostEvent for ErrorEvent {
    type Iter = IntoIter<AuthorityError>;

    fn iter(events: &mut HostEvents) -> Self::Iter {
        mem::take(&mut events.errors).into_iter()
    }

    fn has(events: &HostEvents) -> bool {
        !events.errors.is_empty()
    }
}

// Tick Event
pub struct TickEvent;
impl HostEvent for TickEvent {
    type Iter = IntoIter<Tick>;

    fn iter(events: &mut HostEvents) -> Self::Iter {
        mem::take(&mut events.ticks).into_iter()
    }

    fn has(events: &HostEvents) -> bool {
        !events.ticks.is_empty()
    }
}
