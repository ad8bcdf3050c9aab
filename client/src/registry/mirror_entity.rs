use tether_shared::{EntityDescriptor, NetEntity, Tick};

/// Local stand-in for a remote connection's entity
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MirrorEntity {
    descriptor: EntityDescriptor,
    spawned_at: Tick,
}

impl MirrorEntity {
    pub(crate) fn new(descriptor: EntityDescriptor, spawned_at: Tick) -> Self {
        Self {
            descriptor,
            spawned_at,
        }
    }
}

impl NetEntity for MirrorEntity {
    fn descriptor(&self) -> &EntityDescriptor {
        &self.descriptor
    }

    fn spawned_at(&self) -> Tick {
        self.spawned_at
    }
}
