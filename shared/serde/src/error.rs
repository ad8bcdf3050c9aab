use thiserror::Error;

/// Returned when incoming bytes cannot be read as the requested type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Failed to deserialize value: input was truncated or malformed")]
pub struct SerdeErr;
