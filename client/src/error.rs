use thiserror::Error;

use tether_shared::{ConnectionId, ProtocolViolation};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeerError {
    /// Remote state arrived while this peer had no established connection
    #[error("Spawn for connection {connection_id} arrived before the local connection was established")]
    NotConnected {
        connection_id: ConnectionId,
    },

    /// The authority sent something the protocol does not allow
    #[error("Protocol violation from the authority: {0}")]
    Protocol(#[from] ProtocolViolation),
}
