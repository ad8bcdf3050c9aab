use tether_server::ServerConfig;
use tether_shared::TickConfig;

/// Contains Config properties which will be used by a Session
#[derive(Clone, Default)]
pub struct SessionConfig {
    /// Fixed step shared by every role
    pub tick: TickConfig,
    /// Used while hosting
    pub server: ServerConfig,
}
