//! # Tether Session
//! Drives a process's part in a multiplayer session: hosts, connects, or
//! both at once, and steps every active role on a shared fixed-rate tick.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

mod error;
mod session;
mod session_events;
mod subscriptions;

pub use error::SessionError;
pub use session::{Role, Session, SessionConfig};
pub use session_events::SessionEvents;
pub use subscriptions::TickSubscription;
