pub mod helpers;

pub use helpers::*;
pub use local_transport::{
    LocalClientTransport, LocalHub, LocalServerTransport, PendingClientTransport,
};
