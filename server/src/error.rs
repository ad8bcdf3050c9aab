use thiserror::Error;

use tether_shared::{ConnectionId, ProtocolViolation};

/// Errors the authority surfaces to the surrounding system. Duplicate and
/// unknown-id events are absorbed and never show up here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthorityError {
    /// An entity was requested for a connection the transport never reported
    #[error("Connection {connection_id} is not known to the authority")]
    UnknownConnection {
        connection_id: ConnectionId,
    },

    /// A connection sent something the protocol does not allow
    #[error("Protocol violation from connection {connection_id}: {violation}")]
    Protocol {
        connection_id: ConnectionId,
        violation: ProtocolViolation,
    },
}
