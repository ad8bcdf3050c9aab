use tether_serde::{ByteReader, ByteWriter, Serde, SerdeErr};

use crate::ProtocolViolation;

/// Longest display name, in bytes, the authority accepts
pub const MAX_DISPLAY_NAME_LENGTH: usize = 64;

/// The only message a peer must send before it can appear in anyone's world.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JoinMessage {
    pub display_name: String,
    pub account_id: u64,
}

impl JoinMessage {
    pub fn new(display_name: impl Into<String>, account_id: u64) -> Self {
        Self {
            display_name: display_name.into(),
            account_id,
        }
    }

    /// Checks the identity fields an authority relies on
    pub fn validate(&self) -> Result<(), ProtocolViolation> {
        if self.display_name.trim().is_empty() {
            return Err(ProtocolViolation::InvalidJoin {
                reason: "display name is empty",
            });
        }
        if self.display_name.len() > MAX_DISPLAY_NAME_LENGTH {
            return Err(ProtocolViolation::InvalidJoin {
                reason: "display name is longer than 64 bytes",
            });
        }
        if self.display_name.chars().any(char::is_control) {
            return Err(ProtocolViolation::InvalidJoin {
                reason: "display name contains control characters",
            });
        }
        Ok(())
    }
}

impl Serde for JoinMessage {
    fn ser(&self, writer: &mut ByteWriter) {
        self.display_name.ser(writer);
        self.account_id.ser(writer);
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        let display_name = String::de(reader)?;
        let account_id = u64::de(reader)?;
        Ok(Self {
            display_name,
            account_id,
        })
    }

    fn byte_length(&self) -> usize {
        self.display_name.byte_length() + self.account_id.byte_length()
    }
}
