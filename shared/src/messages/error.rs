use thiserror::Error;

use crate::ConnectionId;

/// Breaches of the join/spawn/despawn protocol. These are surfaced to the
/// surrounding system rather than merged silently.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolViolation {
    /// Bytes could not be decoded as a control message
    #[error("Malformed {context} message: the payload could not be decoded")]
    MalformedMessage {
        context: &'static str,
    },

    /// A well-formed message arrived at a role that never receives it
    #[error("Unexpected {kind} message received by the {receiver}")]
    UnexpectedMessage {
        kind: &'static str,
        receiver: &'static str,
    },

    /// A spawn for an already mirrored connection carried different data,
    /// meaning the authority and this peer have drifted apart
    #[error("Spawn for connection {connection_id} conflicts with the entity already mirrored for it")]
    MismatchedSpawn {
        connection_id: ConnectionId,
    },

    /// A join message decoded but carried unusable identity fields
    #[error("Join message rejected: {reason}")]
    InvalidJoin {
        reason: &'static str,
    },
}
