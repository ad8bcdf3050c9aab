mod role;
mod session;
mod session_config;

pub use role::Role;
pub use session::Session;
pub use session_config::SessionConfig;
