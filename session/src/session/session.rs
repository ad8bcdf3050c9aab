use std::{mem, time::Duration};

use log::{debug, info, warn};

use tether_client::{
    transport::{ClientTransport, ClientTransportEvent},
    Peer, PeerRegistry,
};
use tether_server::{
    transport::{SendTarget, ServerTransport, ServerTransportEvent},
    AuthorityRegistry, Host, HostCommand,
};
use tether_shared::{ConnectionId, IdentityProvider, Tick, TickClock};

use crate::{
    subscriptions::TickSubscriptions, Role, SessionConfig, SessionError, SessionEvents,
    TickSubscription,
};

/// Owns the tick clock and both transports, and routes everything the
/// transports observe into whichever roles are active.
///
/// All processing happens inside `update`, on the caller's thread.
pub struct Session {
    config: SessionConfig,
    clock: TickClock,
    role: Role,
    server_transport: Box<dyn ServerTransport>,
    client_transport: Box<dyn ClientTransport>,
    identity: Box<dyn IdentityProvider>,
    subscriptions: TickSubscriptions,
    pending_events: SessionEvents,
}

impl Session {
    pub fn new<S, C, I>(
        config: SessionConfig,
        server_transport: S,
        client_transport: C,
        identity: I,
    ) -> Self
    where
        S: ServerTransport + 'static,
        C: ClientTransport + 'static,
        I: IdentityProvider + 'static,
    {
        let clock = TickClock::new(&config.tick);
        Self {
            config,
            clock,
            role: Role::Inactive,
            server_transport: Box::new(server_transport),
            client_transport: Box::new(client_transport),
            identity: Box::new(identity),
            subscriptions: TickSubscriptions::new(),
            pending_events: SessionEvents::new(),
        }
    }

    // Roles

    /// Starts listening and takes on the authority role
    pub fn start_hosting(&mut self) -> Result<(), SessionError> {
        if self.role.host().is_some() {
            return Err(SessionError::AlreadyHosting);
        }
        self.server_transport.start_listening()?;

        let host = Host::new(&self.config.server, &self.clock);
        if self.role.add_host(host).is_err() {
            return Err(SessionError::AlreadyHosting);
        }
        info!("hosting at tick {}", self.clock.current_tick());
        Ok(())
    }

    /// Destroys every authority entity, then stops listening. Returns how
    /// many entities were destroyed.
    pub fn stop_hosting(&mut self) -> usize {
        let Some(mut host) = self.role.take_host() else {
            debug!("stop_hosting called while not hosting");
            return 0;
        };
        let destroyed = host.shutdown();
        self.pending_events.append_host(host.take_events());
        self.server_transport.stop_listening();
        self.settle_clock();
        info!("stopped hosting");
        destroyed
    }

    /// Starts connecting to an authority. The peer role exists from now on,
    /// but `is_connected` stays false until the transport confirms.
    pub fn connect(&mut self, address: &str) -> Result<(), SessionError> {
        if self.role.peer().is_some() {
            return Err(SessionError::AlreadyConnected);
        }
        self.client_transport.connect_to(address)?;

        if self.role.add_peer(Peer::connecting(address)).is_err() {
            return Err(SessionError::AlreadyConnected);
        }
        info!("connecting to {}", address);
        Ok(())
    }

    /// Destroys every mirror, then closes the outbound connection. Returns
    /// how many mirrors were destroyed.
    pub fn disconnect(&mut self) -> usize {
        let Some(mut peer) = self.role.take_peer() else {
            debug!("disconnect called without a connection");
            return 0;
        };
        let destroyed = peer.on_local_disconnected();
        self.pending_events.append_peer(peer.take_events());
        self.client_transport.disconnect_self();
        self.settle_clock();
        destroyed
    }

    /// Leaves every role: mirrors are destroyed and the connection closed,
    /// then every hosted entity is destroyed and the listener stopped.
    /// Returns how many entities and mirrors were destroyed in total.
    pub fn shutdown(&mut self) -> usize {
        let destroyed = self.disconnect() + self.stop_hosting();
        info!("session shut down at tick {}", self.clock.current_tick());
        destroyed
    }

    pub fn is_hosting(&self) -> bool {
        self.role.host().is_some()
    }

    pub fn is_connected(&self) -> bool {
        self.role.peer().is_some_and(Peer::is_connected)
    }

    pub fn role(&self) -> &Role {
        &self.role
    }

    // Registries

    pub fn authority_registry(&self) -> Option<&AuthorityRegistry> {
        self.role.host().map(Host::registry)
    }

    pub fn peer_registry(&self) -> Option<&PeerRegistry> {
        self.role.peer().map(Peer::registry)
    }

    /// Attaches gameplay state to a hosted entity, carried by every spawn
    /// sent for it from now on
    pub fn set_payload(&mut self, connection_id: &ConnectionId, payload: Vec<u8>) -> bool {
        self.role
            .host_mut()
            .is_some_and(|host| host.set_payload(connection_id, payload))
    }

    // Ticks

    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick()
    }

    /// Registers a callback run once per completed tick, after every role
    /// has processed that tick
    pub fn subscribe<F: FnMut(Tick) + 'static>(&mut self, callback: F) -> TickSubscription {
        self.subscriptions.subscribe(Box::new(callback))
    }

    /// Returns whether the subscription was still registered
    pub fn unsubscribe(&mut self, subscription: TickSubscription) -> bool {
        self.subscriptions.unsubscribe(subscription)
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Must be called regularly. Drains both transports into the active
    /// roles, sends what they produced, then advances the clock by `delta`.
    pub fn update(&mut self, delta: Duration) -> SessionEvents {
        self.receive_server_events();
        self.receive_client_events();
        self.send_outgoing();
        self.advance(delta);
        self.collect_events();

        mem::take(&mut self.pending_events)
    }

    // Private methods

    fn receive_server_events(&mut self) {
        let Some(host) = self.role.host_mut() else {
            return;
        };
        let tick = self.clock.current_tick();

        while let Some(event) = self.server_transport.receive() {
            match event {
                ServerTransportEvent::PeerConnected(connection_id) => {
                    host.on_peer_connected(connection_id, tick);
                }
                ServerTransportEvent::PeerDisconnected(connection_id) => {
                    host.on_peer_disconnected(connection_id);
                }
                ServerTransportEvent::MessageReceived(connection_id, payload, _) => {
                    host.on_message(connection_id, &payload, tick);
                }
            }
        }
    }

    fn receive_client_events(&mut self) {
        let tick = self.clock.current_tick();

        while self.role.peer().is_some() {
            let Some(event) = self.client_transport.receive() else {
                break;
            };
            match event {
                ClientTransportEvent::Connected(connection_id) => {
                    if let Some(peer) = self.role.peer_mut() {
                        peer.on_connected(connection_id, self.identity.as_ref());
                    }
                }
                ClientTransportEvent::ConnectionFailed(reason) => {
                    if self.is_connected() {
                        debug!("ignoring connection failure while connected: {}", reason);
                        continue;
                    }
                    if let Some(mut peer) = self.role.take_peer() {
                        peer.on_connection_failed(reason);
                        self.pending_events.append_peer(peer.take_events());
                    }
                    self.settle_clock();
                }
                ClientTransportEvent::Disconnected => {
                    if let Some(mut peer) = self.role.take_peer() {
                        if peer.is_connected() {
                            peer.on_local_disconnected();
                        } else {
                            peer.on_connection_failed(
                                "connection closed before it was established".to_string(),
                            );
                        }
                        self.pending_events.append_peer(peer.take_events());
                    }
                    self.settle_clock();
                }
                ClientTransportEvent::MessageReceived(payload, _) => {
                    if let Some(peer) = self.role.peer_mut() {
                        peer.on_message(&payload, tick);
                    }
                }
            }
        }
    }

    fn send_outgoing(&mut self) {
        if let Some(host) = self.role.host_mut() {
            for command in host.take_commands() {
                match command {
                    HostCommand::Send {
                        connection_id,
                        message,
                    } => {
                        let payload = message.encode();
                        if let Err(error) = self.server_transport.send(
                            SendTarget::Connection(connection_id),
                            &payload,
                            message.delivery_mode(),
                        ) {
                            warn!(
                                "failed to send {} to {}: {}",
                                message.kind().name(),
                                connection_id,
                                error
                            );
                        }
                    }
                    HostCommand::Disconnect(connection_id) => {
                        self.server_transport.disconnect_peer(connection_id);
                    }
                }
            }
        }

        if let Some(peer) = self.role.peer_mut() {
            for message in peer.take_outbox() {
                let payload = message.encode();
                if let Err(error) = self
                    .client_transport
                    .send(&payload, message.delivery_mode())
                {
                    warn!(
                        "failed to send {} to authority: {}",
                        message.kind().name(),
                        error
                    );
                }
            }
        }
    }

    fn advance(&mut self, delta: Duration) {
        if !self.is_ticking() {
            self.clock.reset_accumulator();
            return;
        }

        let steps = self.clock.advance(delta);
        for _ in 0..steps {
            let tick = self.clock.current_tick();
            if let Some(host) = self.role.host_mut() {
                host.tick(tick);
            }
            if let Some(peer) = self.role.peer_mut() {
                if peer.is_connected() {
                    peer.tick(tick);
                }
            }
            self.send_outgoing();
            self.subscriptions.notify(tick);
            self.pending_events.push_tick(tick);
            self.clock.complete_step();
        }
    }

    fn collect_events(&mut self) {
        if let Some(host) = self.role.host_mut() {
            self.pending_events.append_host(host.take_events());
        }
        if let Some(peer) = self.role.peer_mut() {
            self.pending_events.append_peer(peer.take_events());
        }
    }

    /// Ticks run only while hosting or holding an established connection;
    /// a connection that is still pending does not count
    fn is_ticking(&self) -> bool {
        self.is_hosting() || self.is_connected()
    }

    /// With no active role left, no time may carry over into the next one
    fn settle_clock(&mut self) {
        if !self.is_ticking() {
            self.clock.reset_accumulator();
        }
    }
}
