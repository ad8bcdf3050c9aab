pub(crate) mod host_events;

pub use host_events::*;
