//! # Tether Shared
//! Common functionality shared between tether-server & tether-client crates.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

pub use tether_serde::{ByteReader, ByteWriter, Serde, SerdeErr};

mod entity;
mod identity;
mod messages;
mod tick_clock;
mod transport;
mod types;

pub use entity::{EntityDescriptor, NetEntity};
pub use identity::{IdentityProvider, LocalIdentity};
pub use messages::{
    control_message::{ControlMessage, MessageKind},
    error::ProtocolViolation,
    join::{JoinMessage, MAX_DISPLAY_NAME_LENGTH},
};
pub use tick_clock::{CatchUpPolicy, TickClock, TickConfig};
pub use transport::error::TransportError;
pub use types::{ConnectionId, DeliveryMode, Tick};
