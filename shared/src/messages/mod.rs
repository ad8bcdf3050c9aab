pub mod control_message;
pub mod error;
pub mod join;
