use tether_shared::{ConnectionId, DeliveryMode, TransportError};

/// Something the listening transport observed, handed to the session to be
/// processed on the tick thread
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ServerTransportEvent {
    PeerConnected(ConnectionId),
    PeerDisconnected(ConnectionId),
    MessageReceived(ConnectionId, Box<[u8]>, DeliveryMode),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendTarget {
    Connection(ConnectionId),
    Broadcast,
}

/// The listening half of a transport. Delivery, NAT traversal and encryption
/// all live behind this trait.
pub trait ServerTransport {
    /// Binds the listener. Failure here is fatal to the hosting attempt.
    fn start_listening(&mut self) -> Result<(), TransportError>;
    fn stop_listening(&mut self);
    fn is_listening(&self) -> bool;
    fn send(
        &mut self,
        target: SendTarget,
        payload: &[u8],
        mode: DeliveryMode,
    ) -> Result<(), TransportError>;
    /// Closes one connection from the authority side
    fn disconnect_peer(&mut self, connection_id: ConnectionId);
    /// Returns the next pending event, if any
    fn receive(&mut self) -> Option<ServerTransportEvent>;
}
