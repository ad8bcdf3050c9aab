use std::mem;

use log::{debug, info, warn};

use tether_shared::{
    ConnectionId, ControlMessage, IdentityProvider, JoinMessage, ProtocolViolation, Tick,
};

use crate::{peer_events::PeerEvents, PeerError, PeerRegistry, SpawnOutcome};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PeerState {
    /// Outbound connection requested, transport has not answered yet
    Connecting { address: String },
    Connected { connection_id: ConnectionId },
}

/// Peer role state: the mirror registry, the outbound connection it depends
/// on, and the messages and events produced while updating them.
pub struct Peer {
    state: PeerState,
    registry: PeerRegistry,
    outbox: Vec<ControlMessage>,
    events: PeerEvents,
}

impl Peer {
    pub fn connecting(address: &str) -> Self {
        Self {
            state: PeerState::Connecting {
                address: address.to_string(),
            },
            registry: PeerRegistry::new(),
            outbox: Vec::new(),
            events: PeerEvents::new(),
        }
    }

    // Transport events

    /// The transport confirmed the connection. Queues the Join announcing
    /// `identity` to the authority.
    pub fn on_connected(&mut self, connection_id: ConnectionId, identity: &dyn IdentityProvider) {
        if let PeerState::Connected {
            connection_id: existing,
        } = self.state
        {
            debug!(
                "ignoring repeated connect as {}, already connected as {}",
                connection_id, existing
            );
            return;
        }

        info!("connected to authority as {}", connection_id);
        self.state = PeerState::Connected { connection_id };
        self.registry.set_local_connection(connection_id);
        self.outbox.push(ControlMessage::Join(JoinMessage::new(
            identity.display_name(),
            identity.account_id(),
        )));
        self.events.push_connection(connection_id);
    }

    pub fn on_connection_failed(&mut self, reason: String) {
        if self.is_connected() {
            debug!("ignoring late connection failure: {}", reason);
            return;
        }
        warn!("connection to {} failed: {}", self.address(), reason);
        self.events.push_connection_failure(reason);
    }

    pub fn on_message(&mut self, payload: &[u8], tick: Tick) {
        match ControlMessage::decode(payload) {
            Ok(ControlMessage::Spawn(descriptor)) => {
                let connection_id = descriptor.connection_id;
                match self.registry.on_spawn_received(descriptor, tick) {
                    Ok(SpawnOutcome::Created) => {
                        debug!("mirroring {}", connection_id);
                        self.events.push_spawn(connection_id);
                    }
                    Ok(SpawnOutcome::Duplicate) | Ok(SpawnOutcome::LocalConnection) => {}
                    Err(error) => self.push_error(error),
                }
            }
            Ok(ControlMessage::Despawn(connection_id)) => {
                if let Some(mirror) = self.registry.on_despawn_observed(&connection_id) {
                    debug!("{} left, mirror destroyed", connection_id);
                    self.events.push_despawn(mirror);
                }
            }
            Ok(message) => self.push_error(
                ProtocolViolation::UnexpectedMessage {
                    kind: message.kind().name(),
                    receiver: "peer",
                }
                .into(),
            ),
            Err(violation) => self.push_error(violation.into()),
        }
    }

    /// Per-tick hook
    pub fn tick(&mut self, tick: Tick) {
        self.events.push_tick(tick);
    }

    /// The local connection is gone, through either side. Destroys every
    /// mirror and returns how many there were.
    pub fn on_local_disconnected(&mut self) -> usize {
        let connection_id = self.local_connection();
        let mirrors = self.registry.on_local_disconnected();
        let destroyed = mirrors.len();
        for mirror in mirrors {
            self.events.push_despawn(mirror);
        }
        self.outbox.clear();

        if let Some(connection_id) = connection_id {
            info!(
                "disconnected from authority as {}, {} mirrors destroyed",
                connection_id, destroyed
            );
            self.events.push_disconnection(connection_id);
        }
        destroyed
    }

    // Accessors

    pub fn state(&self) -> &PeerState {
        &self.state
    }

    pub fn is_connected(&self) -> bool {
        matches!(self.state, PeerState::Connected { .. })
    }

    pub fn local_connection(&self) -> Option<ConnectionId> {
        match self.state {
            PeerState::Connected { connection_id } => Some(connection_id),
            PeerState::Connecting { .. } => None,
        }
    }

    pub fn registry(&self) -> &PeerRegistry {
        &self.registry
    }

    /// Messages waiting to be sent to the authority
    pub fn take_outbox(&mut self) -> Vec<ControlMessage> {
        mem::take(&mut self.outbox)
    }

    pub fn take_events(&mut self) -> PeerEvents {
        mem::take(&mut self.events)
    }

    // Private methods

    fn address(&self) -> &str {
        match &self.state {
            PeerState::Connecting { address } => address,
            PeerState::Connected { .. } => "authority",
        }
    }

    fn push_error(&mut self, error: PeerError) {
        warn!("{}", error);
        self.events.push_error(error);
    }
}
