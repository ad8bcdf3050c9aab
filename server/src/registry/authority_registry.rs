use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use tether_shared::{ConnectionId, EntityDescriptor, NetEntity, Tick};

use crate::{AuthorityEntity, AuthorityError};

/// Host-side map from connection to authoritative entity.
///
/// A connection is recorded as soon as the transport reports it, but its
/// entity only appears once the join handshake supplies identity data.
/// Duplicate and unknown-id signals are absorbed, never panicked on.
pub struct AuthorityRegistry {
    connections: BTreeSet<ConnectionId>,
    entities: BTreeMap<ConnectionId, AuthorityEntity>,
}

impl AuthorityRegistry {
    pub fn new() -> Self {
        Self {
            connections: BTreeSet::new(),
            entities: BTreeMap::new(),
        }
    }

    // Connections

    /// Records a transport-level connection. Returns false for a duplicate
    /// connect event.
    pub fn on_peer_connected(&mut self, connection_id: ConnectionId) -> bool {
        if !self.connections.insert(connection_id) {
            debug!("ignoring duplicate connect for {}", connection_id);
            return false;
        }
        true
    }

    /// Forgets the connection and destroys its entity, if any. Returns the
    /// destroyed entity so the caller can release what it held.
    pub fn on_peer_disconnected(&mut self, connection_id: ConnectionId) -> Option<AuthorityEntity> {
        if !self.connections.remove(&connection_id) {
            debug!("ignoring disconnect for unknown {}", connection_id);
        }
        self.entities.remove(&connection_id)
    }

    pub fn is_connected(&self, connection_id: &ConnectionId) -> bool {
        self.connections.contains(connection_id)
    }

    pub fn connection_ids(&self) -> Vec<ConnectionId> {
        self.connections.iter().copied().collect()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    // Entities

    /// Creates the entity for a connection that completed its handshake.
    /// Returns `Ok(false)` without touching anything if one already exists.
    pub fn create_entity(
        &mut self,
        connection_id: ConnectionId,
        display_name: &str,
        account_id: u64,
        payload: Vec<u8>,
        tick: Tick,
    ) -> Result<bool, AuthorityError> {
        if !self.connections.contains(&connection_id) {
            return Err(AuthorityError::UnknownConnection { connection_id });
        }
        if self.entities.contains_key(&connection_id) {
            debug!("entity for {} already exists, ignoring", connection_id);
            return Ok(false);
        }

        let descriptor = EntityDescriptor::new(connection_id, display_name, account_id, payload);
        self.entities
            .insert(connection_id, AuthorityEntity::new(descriptor, tick));
        Ok(true)
    }

    /// Spawn descriptors of every entity except the given connection's own,
    /// to be sent to that connection only
    pub fn catch_up_spawns(&self, new_connection: ConnectionId) -> Vec<EntityDescriptor> {
        self.entities
            .values()
            .filter(|entity| entity.descriptor().connection_id != new_connection)
            .map(AuthorityEntity::spawn_descriptor)
            .collect()
    }

    /// Replaces the opaque gameplay payload future Spawns of this entity carry
    pub fn set_payload(&mut self, connection_id: &ConnectionId, payload: Vec<u8>) -> bool {
        let Some(entity) = self.entities.get_mut(connection_id) else {
            return false;
        };
        entity.set_payload(payload);
        true
    }

    pub fn entity(&self, connection_id: &ConnectionId) -> Option<&AuthorityEntity> {
        self.entities.get(connection_id)
    }

    pub fn has_entity(&self, connection_id: &ConnectionId) -> bool {
        self.entities.contains_key(connection_id)
    }

    pub fn entities(&self) -> impl Iterator<Item = &AuthorityEntity> {
        self.entities.values()
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty() && self.entities.is_empty()
    }
}

impl Default for AuthorityRegistry {
    fn default() -> Self {
        Self::new()
    }
}
