use tether_client::PeerEvents;
use tether_server::HostEvents;
use tether_shared::Tick;

/// Everything that happened during one `Session::update`, plus whatever
/// role teardown produced since the previous one
#[derive(Default)]
pub struct SessionEvents {
    host: HostEvents,
    peer: PeerEvents,
    ticks: Vec<Tick>,
}

impl SessionEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.host.is_empty() && self.peer.is_empty() && self.ticks.is_empty()
    }

    /// Events raised by the authority role
    pub fn host(&mut self) -> &mut HostEvents {
        &mut self.host
    }

    /// Events raised by the peer role
    pub fn peer(&mut self) -> &mut PeerEvents {
        &mut self.peer
    }

    /// Every tick completed during the update, in order
    pub fn ticks(&self) -> &[Tick] {
        &self.ticks
    }

    /// Moves every event out of `other`, after the ones already buffered
    pub fn append(&mut self, other: SessionEvents) {
        self.host.append(other.host);
        self.peer.append(other.peer);
        self.ticks.extend(other.ticks);
    }

    pub(crate) fn append_host(&mut self, events: HostEvents) {
        self.host.append(events);
    }

    pub(crate) fn append_peer(&mut self, events: PeerEvents) {
        self.peer.append(events);
    }

    pub(crate) fn push_tick(&mut self, tick: Tick) {
        self.ticks.push(tick);
    }
}
