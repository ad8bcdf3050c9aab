use std::mem;

use tether_client::Peer;
use tether_server::Host;

/// Which parts of a session this process currently plays
pub enum Role {
    Inactive,
    Hosting(Host),
    Connected(Peer),
    /// Hosting while also connected as a peer, usually to itself
    Both(Host, Peer),
}

impl Role {
    pub fn is_inactive(&self) -> bool {
        matches!(self, Role::Inactive)
    }

    pub fn host(&self) -> Option<&Host> {
        match self {
            Role::Hosting(host) | Role::Both(host, _) => Some(host),
            Role::Inactive | Role::Connected(_) => None,
        }
    }

    pub fn host_mut(&mut self) -> Option<&mut Host> {
        match self {
            Role::Hosting(host) | Role::Both(host, _) => Some(host),
            Role::Inactive | Role::Connected(_) => None,
        }
    }

    pub fn peer(&self) -> Option<&Peer> {
        match self {
            Role::Connected(peer) | Role::Both(_, peer) => Some(peer),
            Role::Inactive | Role::Hosting(_) => None,
        }
    }

    pub fn peer_mut(&mut self) -> Option<&mut Peer> {
        match self {
            Role::Connected(peer) | Role::Both(_, peer) => Some(peer),
            Role::Inactive | Role::Hosting(_) => None,
        }
    }

    // Crate-public

    /// Adds the authority role. Hands `host` back if one is already active.
    pub(crate) fn add_host(&mut self, host: Host) -> Result<(), Host> {
        match mem::replace(self, Role::Inactive) {
            Role::Inactive => *self = Role::Hosting(host),
            Role::Connected(peer) => *self = Role::Both(host, peer),
            existing @ (Role::Hosting(_) | Role::Both(_, _)) => {
                *self = existing;
                return Err(host);
            }
        }
        Ok(())
    }

    /// Adds the peer role. Hands `peer` back if one is already active.
    pub(crate) fn add_peer(&mut self, peer: Peer) -> Result<(), Peer> {
        match mem::replace(self, Role::Inactive) {
            Role::Inactive => *self = Role::Connected(peer),
            Role::Hosting(host) => *self = Role::Both(host, peer),
            existing @ (Role::Connected(_) | Role::Both(_, _)) => {
                *self = existing;
                return Err(peer);
            }
        }
        Ok(())
    }

    pub(crate) fn take_host(&mut self) -> Option<Host> {
        match mem::replace(self, Role::Inactive) {
            Role::Hosting(host) => Some(host),
            Role::Both(host, peer) => {
                *self = Role::Connected(peer);
                Some(host)
            }
            other => {
                *self = other;
                None
            }
        }
    }

    pub(crate) fn take_peer(&mut self) -> Option<Peer> {
        match mem::replace(self, Role::Inactive) {
            Role::Connected(peer) => Some(peer),
            Role::Both(host, peer) => {
                *self = Role::Hosting(host);
                Some(peer)
            }
            other => {
                *self = other;
                None
            }
        }
    }
}
