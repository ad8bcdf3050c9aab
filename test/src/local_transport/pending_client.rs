use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use tether_client::transport::{ClientTransport, ClientTransportEvent};
use tether_shared::{ConnectionId, DeliveryMode, TransportError};

#[derive(Default)]
struct PendingState {
    address: Option<String>,
    connected: bool,
    events: VecDeque<ClientTransportEvent>,
    sent: Vec<Box<[u8]>>,
}

/// Client transport whose connection attempts never complete on their own.
/// Clones share state, so a test keeps one handle and decides when (or
/// whether) the connection resolves.
#[derive(Clone, Default)]
pub struct PendingClientTransport {
    state: Arc<Mutex<PendingState>>,
}

impl PendingClientTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Address of the attempt in flight, if any
    pub fn pending_address(&self) -> Option<String> {
        let state = self.lock();
        if state.connected {
            return None;
        }
        state.address.clone()
    }

    /// Completes the attempt in flight as `connection_id`
    pub fn confirm(&self, connection_id: ConnectionId) {
        let mut state = self.lock();
        state.connected = true;
        state
            .events
            .push_back(ClientTransportEvent::Connected(connection_id));
    }

    /// Closes the connection, established or not
    pub fn close(&self) {
        let mut state = self.lock();
        state.connected = false;
        state.address = None;
        state.events.push_back(ClientTransportEvent::Disconnected);
    }

    /// Payloads sent while connected, oldest first
    pub fn sent(&self) -> Vec<Box<[u8]>> {
        self.lock().sent.clone()
    }

    fn lock(&self) -> MutexGuard<'_, PendingState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ClientTransport for PendingClientTransport {
    fn connect_to(&mut self, address: &str) -> Result<(), TransportError> {
        self.lock().address = Some(address.to_string());
        Ok(())
    }

    fn disconnect_self(&mut self) {
        let mut state = self.lock();
        state.connected = false;
        state.address = None;
        state.events.clear();
    }

    fn send(&mut self, payload: &[u8], _: DeliveryMode) -> Result<(), TransportError> {
        let mut state = self.lock();
        if !state.connected {
            return Err(TransportError::NotRunning);
        }
        state.sent.push(payload.into());
        Ok(())
    }

    fn receive(&mut self) -> Option<ClientTransportEvent> {
        self.lock().events.pop_front()
    }
}
