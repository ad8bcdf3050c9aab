use tether_shared::{EntityDescriptor, NetEntity, Tick};

/// The authoritative record of one joined peer. Lives exactly as long as its
/// connection is open on the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorityEntity {
    descriptor: EntityDescriptor,
    spawned_at: Tick,
}

impl AuthorityEntity {
    pub(crate) fn new(descriptor: EntityDescriptor, spawned_at: Tick) -> Self {
        Self {
            descriptor,
            spawned_at,
        }
    }

    /// The Spawn payload peers need to mirror this entity
    pub fn spawn_descriptor(&self) -> EntityDescriptor {
        self.descriptor.clone()
    }

    pub(crate) fn set_payload(&mut self, payload: Vec<u8>) {
        self.descriptor.payload = payload;
    }
}

impl NetEntity for AuthorityEntity {
    fn descriptor(&self) -> &EntityDescriptor {
        &self.descriptor
    }

    fn spawned_at(&self) -> Tick {
        self.spawned_at
    }
}
