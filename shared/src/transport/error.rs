use thiserror::Error;

use crate::ConnectionId;

/// Failures reported by a transport implementation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The listener could not be bound
    #[error("Failed to start listening: {reason}")]
    ListenFailed {
        reason: String,
    },

    /// An outbound connection attempt could not be started
    #[error("Failed to connect to '{address}': {reason}")]
    ConnectFailed {
        address: String,
        reason: String,
    },

    /// Payload could not be handed to the given connection
    #[error("Failed to send payload to connection {connection_id}")]
    SendFailed {
        connection_id: ConnectionId,
    },

    /// The transport is not listening or not connected
    #[error("Transport is not running")]
    NotRunning,
}
