//! # Tether Server
//! The authority side of a session: tracks transport connections, admits
//! them through the join handshake and owns the authoritative entity of every
//! joined peer.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod transport;

mod error;
mod events;
mod handshake;
mod registry;
mod server;

pub use error::AuthorityError;
pub use events::{
    ErrorEvent, HostEvent, HostEvents, JoinEvent, LeaveEvent, TickEvent, TimeoutEvent,
};
pub use handshake::{HandshakeManager, HandshakeState, JoinOutcome};
pub use registry::{AuthorityEntity, AuthorityRegistry};
pub use server::{Host, HostCommand, ServerConfig};
