use std::collections::BTreeMap;

use tether_shared::{ConnectionId, Tick};

/// Where a connection stands in the join handshake. A closed connection has
/// no state at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandshakeState {
    /// Transport connected, not yet trusted
    Connected { connected_at: Tick },
    /// Sent a well-formed Join and owns an entity
    Joined,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JoinOutcome {
    /// First Join for this connection, it is now admitted
    Joined,
    /// Connection had already joined
    Duplicate,
    /// Connection is closed or was never seen
    UnknownConnection,
}

/// Authority-side join state machine, one entry per open connection:
/// `Connected -> Joined` on a Join, `Connected -> Closed` on disconnect or
/// timeout.
pub struct HandshakeManager {
    states: BTreeMap<ConnectionId, HandshakeState>,
    timeout_ticks: Option<Tick>,
}

impl HandshakeManager {
    pub fn new(timeout_ticks: Option<Tick>) -> Self {
        Self {
            states: BTreeMap::new(),
            timeout_ticks,
        }
    }

    pub fn on_connected(&mut self, connection_id: ConnectionId, tick: Tick) -> bool {
        if self.states.contains_key(&connection_id) {
            return false;
        }
        self.states
            .insert(connection_id, HandshakeState::Connected { connected_at: tick });
        true
    }

    pub fn on_join(&mut self, connection_id: ConnectionId) -> JoinOutcome {
        match self.states.get_mut(&connection_id) {
            None => JoinOutcome::UnknownConnection,
            Some(HandshakeState::Joined) => JoinOutcome::Duplicate,
            Some(state) => {
                *state = HandshakeState::Joined;
                JoinOutcome::Joined
            }
        }
    }

    /// Returns whether the connection was open
    pub fn on_closed(&mut self, connection_id: &ConnectionId) -> bool {
        self.states.remove(connection_id).is_some()
    }

    pub fn state(&self, connection_id: &ConnectionId) -> Option<HandshakeState> {
        self.states.get(connection_id).copied()
    }

    pub fn is_joined(&self, connection_id: &ConnectionId) -> bool {
        self.state(connection_id) == Some(HandshakeState::Joined)
    }

    pub fn joined_ids(&self) -> Vec<ConnectionId> {
        self.states
            .iter()
            .filter(|(_, state)| **state == HandshakeState::Joined)
            .map(|(connection_id, _)| *connection_id)
            .collect()
    }

    /// Un-joined connections that have waited at least the timeout by `now`
    pub fn expired(&self, now: Tick) -> Vec<ConnectionId> {
        let Some(timeout_ticks) = self.timeout_ticks else {
            return Vec::new();
        };
        self.states
            .iter()
            .filter_map(|(connection_id, state)| match state {
                HandshakeState::Connected { connected_at }
                    if now.saturating_sub(*connected_at) >= timeout_ticks =>
                {
                    Some(*connection_id)
                }
                _ => None,
            })
            .collect()
    }

    pub fn reset(&mut self) {
        self.states.clear();
    }
}
