use thiserror::Error;

use tether_shared::TransportError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Session is already hosting")]
    AlreadyHosting,

    /// A connection is established or still pending
    #[error("Session already has an outbound connection")]
    AlreadyConnected,

    /// The transport refused to start; nothing changed
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}
