
pub use test_session::{pending_session, pump, test_config, test_session, TICK_INTERVAL};
