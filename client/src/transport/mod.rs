use tether_shared::{ConnectionId, DeliveryMode, TransportError};

/// Something the outbound connection observed, handed to the session to be
/// processed on the tick thread
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClientTransportEvent {
    /// Connection established, carrying the id the authority knows us by
    Connected(ConnectionId),
    ConnectionFailed(String),
    /// Connection lost or closed by the authority
    Disconnected,
    MessageReceived(Box<[u8]>, DeliveryMode),
}

/// The connecting half of a transport
pub trait ClientTransport {
    /// Starts connecting. Completion arrives later as `Connected` or
    /// `ConnectionFailed`; an `Err` here means the attempt never started.
    fn connect_to(&mut self, address: &str) -> Result<(), TransportError>;
    fn disconnect_self(&mut self);
    fn send(&mut self, payload: &[u8], mode: DeliveryMode) -> Result<(), TransportError>;
    /// Returns the next pending event, if any
    fn receive(&mut self) -> Option<ClientTransportEvent>;
}
