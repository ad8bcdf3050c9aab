mod server_config;
pub use server_config::ServerConfig;

mod host;
pub use host::{Host, HostCommand};
