mod mirror_entity;
mod peer_registry;

pub use mirror_entity::MirrorEntity;
pub use peer_registry::{PeerRegistry, SpawnOutcome};
