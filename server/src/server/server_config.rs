use std::{default::Default, time::Duration};

/// Contains Config properties which will be used by the Host
#[derive(Clone)]
pub struct ServerConfig {
    /// How long a connection may stay un-joined before it is force
    /// disconnected. `None` waits forever.
    pub handshake_timeout: Option<Duration>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            handshake_timeout: Some(Duration::from_secs(5)),
        }
    }
}
