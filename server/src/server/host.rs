use std::mem;

use log::{debug, info, warn};

use tether_shared::{
    ConnectionId, ControlMessage, JoinMessage, ProtocolViolation, Tick, TickClock,
};

use crate::{
    events::HostEvents, handshake::HandshakeManager, AuthorityError, AuthorityRegistry,
    HandshakeState, JoinOutcome, ServerConfig,
};

/// Work the host needs the transport to do on its behalf
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HostCommand {
    Send {
        connection_id: ConnectionId,
        message: ControlMessage,
    },
    Disconnect(ConnectionId),
}

/// Authority role state: the registry, the join handshake driving it, and
/// the buffers of outbound commands and events produced while mutating them.
///
/// Every method is synchronous and never panics on duplicate, unknown or
/// malformed input.
pub struct Host {
    registry: AuthorityRegistry,
    handshakes: HandshakeManager,
    commands: Vec<HostCommand>,
    events: HostEvents,
}

impl Host {
    pub fn new(server_config: &ServerConfig, clock: &TickClock) -> Self {
        let timeout_ticks = server_config
            .handshake_timeout
            .map(|timeout| clock.ticks_for(timeout).max(1));

        Self {
            registry: AuthorityRegistry::new(),
            handshakes: HandshakeManager::new(timeout_ticks),
            commands: Vec::new(),
            events: HostEvents::new(),
        }
    }

    // Transport events

    pub fn on_peer_connected(&mut self, connection_id: ConnectionId, tick: Tick) {
        if !self.registry.on_peer_connected(connection_id) {
            return;
        }
        self.handshakes.on_connected(connection_id, tick);
        info!("connection {} awaiting join", connection_id);
    }

    pub fn on_peer_disconnected(&mut self, connection_id: ConnectionId) {
        self.close(connection_id, true);
    }

    pub fn on_message(&mut self, connection_id: ConnectionId, payload: &[u8], tick: Tick) {
        if !self.registry.is_connected(&connection_id) {
            debug!("dropping message from closed connection {}", connection_id);
            return;
        }

        match ControlMessage::decode(payload) {
            Ok(ControlMessage::Join(join)) => self.on_join(connection_id, join, tick),
            Ok(message) => self.push_violation(
                connection_id,
                ProtocolViolation::UnexpectedMessage {
                    kind: message.kind().name(),
                    receiver: "authority",
                },
            ),
            Err(violation) => {
                self.push_violation(connection_id, violation);
                if !self.handshakes.is_joined(&connection_id) {
                    warn!("closing {}: handshake failed", connection_id);
                    self.force_disconnect(connection_id);
                }
            }
        }
    }

    /// Per-tick hook: drops connections that never joined in time
    pub fn tick(&mut self, tick: Tick) {
        for connection_id in self.handshakes.expired(tick) {
            warn!("closing {}: no join before the handshake timeout", connection_id);
            self.force_disconnect(connection_id);
            self.events.push_timeout(connection_id);
        }
        self.events.push_tick(tick);
    }

    /// Destroys every entity and forgets every connection. Returns how many
    /// entities were destroyed.
    pub fn shutdown(&mut self) -> usize {
        let mut destroyed = 0;
        for connection_id in self.registry.connection_ids() {
            if self.close(connection_id, false) {
                destroyed += 1;
            }
        }
        self.handshakes.reset();
        self.commands.clear();
        info!("authority shut down, {} entities destroyed", destroyed);
        destroyed
    }

    // Accessors

    pub fn registry(&self) -> &AuthorityRegistry {
        &self.registry
    }

    pub fn set_payload(&mut self, connection_id: &ConnectionId, payload: Vec<u8>) -> bool {
        self.registry.set_payload(connection_id, payload)
    }

    pub fn handshake_state(&self, connection_id: &ConnectionId) -> Option<HandshakeState> {
        self.handshakes.state(connection_id)
    }

    pub fn take_commands(&mut self) -> Vec<HostCommand> {
        mem::take(&mut self.commands)
    }

    pub fn take_events(&mut self) -> HostEvents {
        mem::take(&mut self.events)
    }

    // Private methods

    fn on_join(&mut self, connection_id: ConnectionId, join: JoinMessage, tick: Tick) {
        match self.handshakes.on_join(connection_id) {
            JoinOutcome::Joined => {}
            JoinOutcome::Duplicate => {
                debug!("ignoring repeated join from {}", connection_id);
                return;
            }
            JoinOutcome::UnknownConnection => {
                debug!("ignoring join from closed connection {}", connection_id);
                return;
            }
        }

        match self.registry.create_entity(
            connection_id,
            &join.display_name,
            join.account_id,
            Vec::new(),
            tick,
        ) {
            Ok(true) => {}
            Ok(false) => return,
            Err(error) => {
                self.events.push_error(error);
                return;
            }
        }
        info!(
            "{} joined as '{}' ({})",
            connection_id, join.display_name, join.account_id
        );

        // catch the newcomer up, and only the newcomer
        for descriptor in self.registry.catch_up_spawns(connection_id) {
            self.send(connection_id, ControlMessage::Spawn(descriptor));
        }

        // introduce the newcomer to everyone already joined
        if let Some(entity) = self.registry.entity(&connection_id) {
            let descriptor = entity.spawn_descriptor();
            for other in self.handshakes.joined_ids() {
                if other != connection_id {
                    self.send(other, ControlMessage::Spawn(descriptor.clone()));
                }
            }
        }

        self.events.push_join(connection_id);
    }

    /// Returns whether an entity was destroyed
    fn close(&mut self, connection_id: ConnectionId, notify_peers: bool) -> bool {
        self.handshakes.on_closed(&connection_id);
        let Some(entity) = self.registry.on_peer_disconnected(connection_id) else {
            return false;
        };

        if notify_peers {
            for other in self.handshakes.joined_ids() {
                self.send(other, ControlMessage::Despawn(connection_id));
            }
        }
        info!("{} left, entity destroyed", connection_id);
        self.events.push_leave(entity);
        true
    }

    fn force_disconnect(&mut self, connection_id: ConnectionId) {
        self.close(connection_id, true);
        self.commands.push(HostCommand::Disconnect(connection_id));
    }

    fn send(&mut self, connection_id: ConnectionId, message: ControlMessage) {
        self.commands.push(HostCommand::Send {
            connection_id,
            message,
        });
    }

    fn push_violation(&mut self, connection_id: ConnectionId, violation: ProtocolViolation) {
        warn!("protocol violation from {}: {}", connection_id, violation);
        self.events.push_error(AuthorityError::Protocol {
            connection_id,
            violation,
        });
    }
}
