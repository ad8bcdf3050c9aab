//! # Tether Client
//! The peer side of a session: announces itself to the authority with a
//! Join, then mirrors every remote entity the authority spawns until either
//! side goes away.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod transport;

mod client;
mod error;
mod peer_events;
mod registry;

pub use client::{Peer, PeerState};
pub use error::PeerError;
pub use peer_events::{
    ConnectEvent, ConnectionFailedEvent, DespawnEvent, DisconnectEvent, ErrorEvent, PeerEvent,
    PeerEvents, SpawnEvent, TickEvent,
};
pub use registry::{MirrorEntity, PeerRegistry, SpawnOutcome};
