//! PROPERTY-BASED TESTS: registry invariants
//!
//! Random sequences of transport events and control messages must never
//! leave the host or peer registries in an inconsistent state.
//!
//! Key invariants:
//! 1. At most one entity or mirror per connection
//! 2. No entity survives its connection's disconnect
//! 3. A peer never mirrors its own connection

use std::{
    collections::{BTreeMap, BTreeSet},
    time::Duration,
};

use proptest::prelude::*;

use tether_client::Peer;
use tether_server::{Host, ServerConfig};
use tether_shared::{
    ConnectionId, ControlMessage, EntityDescriptor, JoinMessage, LocalIdentity, NetEntity,
    TickClock, TickConfig,
};

#[derive(Clone, Debug)]
enum HostInput {
    Connect(u64),
    Disconnect(u64),
    Join(u64),
    Garbage(u64, Vec<u8>),
}

fn host_input_strategy() -> impl Strategy<Value = HostInput> {
    prop_oneof![
        (1u64..8).prop_map(HostInput::Connect),
        (1u64..8).prop_map(HostInput::Disconnect),
        (1u64..8).prop_map(HostInput::Join),
        ((1u64..8), prop::collection::vec(any::<u8>(), 0..12))
            .prop_map(|(id, bytes)| HostInput::Garbage(id, bytes)),
    ]
}

#[derive(Clone, Debug)]
enum PeerInput {
    Spawn(u64, u8),
    Despawn(u64),
}

fn peer_input_strategy() -> impl Strategy<Value = PeerInput> {
    prop_oneof![
        ((1u64..8), (0u8..2)).prop_map(|(id, variant)| PeerInput::Spawn(id, variant)),
        (1u64..8).prop_map(PeerInput::Despawn),
    ]
}

fn host() -> Host {
    let clock = TickClock::new(&TickConfig::default());
    let config = ServerConfig {
        handshake_timeout: Some(Duration::from_millis(250)),
    };
    Host::new(&config, &clock)
}

proptest! {
    /// Entities exist only for live connections, once each
    #[test]
    fn prop_host_registry_tracks_live_connections(
        inputs in prop::collection::vec(host_input_strategy(), 0..64)
    ) {
        let mut host = host();
        let mut live = BTreeSet::new();

        for (step, input) in inputs.into_iter().enumerate() {
            let tick = step as u64;
            match input {
                HostInput::Connect(id) => {
                    host.on_peer_connected(ConnectionId::new(id), tick);
                    live.insert(id);
                }
                HostInput::Disconnect(id) => {
                    host.on_peer_disconnected(ConnectionId::new(id));
                    live.remove(&id);
                    prop_assert!(!host.registry().has_entity(&ConnectionId::new(id)));
                }
                HostInput::Join(id) => {
                    let join = ControlMessage::Join(JoinMessage::new("player", id));
                    host.on_message(ConnectionId::new(id), &join.encode(), tick);
                }
                HostInput::Garbage(id, bytes) => {
                    host.on_message(ConnectionId::new(id), &bytes, tick);
                }
            }
            host.tick(tick);

            // closes the host decided on by itself
            for connection_id in live.clone() {
                if !host.registry().is_connected(&ConnectionId::new(connection_id)) {
                    live.remove(&connection_id);
                }
            }

            let entity_ids: Vec<u64> = host
                .registry()
                .entities()
                .map(|entity| entity.connection_id().value())
                .collect();
            let unique: BTreeSet<u64> = entity_ids.iter().copied().collect();
            prop_assert_eq!(unique.len(), entity_ids.len());
            prop_assert!(unique.is_subset(&live));
        }
    }

    /// A peer holds at most one mirror per remote connection and never one
    /// for itself
    #[test]
    fn prop_peer_registry_never_mirrors_itself(
        local in 1u64..8,
        inputs in prop::collection::vec(peer_input_strategy(), 0..64)
    ) {
        let mut peer = Peer::connecting("authority");
        peer.on_connected(ConnectionId::new(local), &LocalIdentity::new("me", local));
        // spawned minus despawned remote ids, with the name of the first spawn
        let mut model: BTreeMap<u64, &str> = BTreeMap::new();

        for input in inputs {
            let message = match input {
                PeerInput::Spawn(id, variant) => {
                    let name = if variant == 0 { "first" } else { "second" };
                    if id != local {
                        model.entry(id).or_insert(name);
                    }
                    ControlMessage::Spawn(EntityDescriptor::new(
                        ConnectionId::new(id),
                        name,
                        id,
                        Vec::new(),
                    ))
                }
                PeerInput::Despawn(id) => {
                    model.remove(&id);
                    ControlMessage::Despawn(ConnectionId::new(id))
                }
            };
            peer.on_message(&message.encode(), 0);

            let mirrored: BTreeMap<u64, &str> = peer
                .registry()
                .mirrors()
                .map(|mirror| (mirror.connection_id().value(), mirror.display_name()))
                .collect();
            prop_assert_eq!(&mirrored, &model);
            prop_assert!(!peer.registry().contains(&ConnectionId::new(local)));
        }

        peer.on_local_disconnected();
        prop_assert!(peer.registry().is_empty());
    }
}
