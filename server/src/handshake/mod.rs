mod handshake_manager;

pub use handshake_manager::{HandshakeManager, HandshakeState, JoinOutcome};
