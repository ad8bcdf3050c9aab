use std::collections::BTreeMap;

use log::debug;

use tether_shared::{ConnectionId, EntityDescriptor, NetEntity, ProtocolViolation, Tick};

use crate::{MirrorEntity, PeerError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpawnOutcome {
    /// A new mirror exists
    Created,
    /// Identical spawn for an existing mirror, nothing changed
    Duplicate,
    /// Spawn was about this peer itself and is never mirrored
    LocalConnection,
}

/// One peer's mirror of the remote connections the authority told it about.
///
/// Mirrors only exist while the local connection is established, never for
/// the local connection itself, and at most once per connection.
pub struct PeerRegistry {
    local_connection: Option<ConnectionId>,
    mirrors: BTreeMap<ConnectionId, MirrorEntity>,
}

impl PeerRegistry {
    pub fn new() -> Self {
        Self {
            local_connection: None,
            mirrors: BTreeMap::new(),
        }
    }

    /// Records the id the authority knows this peer by, once connected
    pub fn set_local_connection(&mut self, connection_id: ConnectionId) {
        self.local_connection = Some(connection_id);
    }

    pub fn local_connection(&self) -> Option<ConnectionId> {
        self.local_connection
    }

    pub fn on_spawn_received(
        &mut self,
        descriptor: EntityDescriptor,
        tick: Tick,
    ) -> Result<SpawnOutcome, PeerError> {
        let connection_id = descriptor.connection_id;
        let Some(local_connection) = self.local_connection else {
            return Err(PeerError::NotConnected { connection_id });
        };
        if connection_id == local_connection {
            debug!("ignoring spawn for local connection {}", connection_id);
            return Ok(SpawnOutcome::LocalConnection);
        }

        if let Some(existing) = self.mirrors.get(&connection_id) {
            if existing.descriptor() == &descriptor {
                debug!("ignoring repeated spawn for {}", connection_id);
                return Ok(SpawnOutcome::Duplicate);
            }
            return Err(ProtocolViolation::MismatchedSpawn { connection_id }.into());
        }

        self.mirrors
            .insert(connection_id, MirrorEntity::new(descriptor, tick));
        Ok(SpawnOutcome::Created)
    }

    pub fn on_despawn_observed(&mut self, connection_id: &ConnectionId) -> Option<MirrorEntity> {
        let removed = self.mirrors.remove(connection_id);
        if removed.is_none() {
            debug!("ignoring despawn for unmirrored {}", connection_id);
        }
        removed
    }

    /// The local connection is gone: no remote state can be trusted any
    /// more. Destroys every mirror and returns them.
    pub fn on_local_disconnected(&mut self) -> Vec<MirrorEntity> {
        self.local_connection = None;
        let mirrors = std::mem::take(&mut self.mirrors);
        mirrors.into_values().collect()
    }

    pub fn mirror(&self, connection_id: &ConnectionId) -> Option<&MirrorEntity> {
        self.mirrors.get(connection_id)
    }

    pub fn contains(&self, connection_id: &ConnectionId) -> bool {
        self.mirrors.contains_key(connection_id)
    }

    pub fn mirrors(&self) -> impl Iterator<Item = &MirrorEntity> {
        self.mirrors.values()
    }

    pub fn connection_ids(&self) -> Vec<ConnectionId> {
        self.mirrors.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.mirrors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mirrors.is_empty()
    }
}

impl Default for PeerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
