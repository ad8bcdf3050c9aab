use tether_serde::{ByteReader, ByteWriter, Serde, SerdeErr};

use crate::{ConnectionId, DeliveryMode, EntityDescriptor, JoinMessage, ProtocolViolation};

/// Leading byte identifying which control message follows
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Join,
    Spawn,
    Despawn,
}

impl MessageKind {
    pub fn tag(&self) -> u8 {
        match self {
            MessageKind::Join => 0,
            MessageKind::Spawn => 1,
            MessageKind::Despawn => 2,
        }
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(MessageKind::Join),
            1 => Some(MessageKind::Spawn),
            2 => Some(MessageKind::Despawn),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MessageKind::Join => "Join",
            MessageKind::Spawn => "Spawn",
            MessageKind::Despawn => "Despawn",
        }
    }
}

/// The messages this crate puts on the wire to keep registries consistent.
/// Join flows peer → authority, Spawn and Despawn flow authority → peer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlMessage {
    Join(JoinMessage),
    Spawn(EntityDescriptor),
    Despawn(ConnectionId),
}

impl ControlMessage {
    pub fn kind(&self) -> MessageKind {
        match self {
            ControlMessage::Join(_) => MessageKind::Join,
            ControlMessage::Spawn(_) => MessageKind::Spawn,
            ControlMessage::Despawn(_) => MessageKind::Despawn,
        }
    }

    /// Every control message must arrive, in order
    pub fn delivery_mode(&self) -> DeliveryMode {
        DeliveryMode::Reliable
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut writer = ByteWriter::new();
        writer.write_byte(self.kind().tag());
        match self {
            ControlMessage::Join(join) => join.ser(&mut writer),
            ControlMessage::Spawn(descriptor) => descriptor.ser(&mut writer),
            ControlMessage::Despawn(connection_id) => connection_id.ser(&mut writer),
        }
        writer.to_bytes()
    }

    /// Decodes a complete message. Unknown tags, truncated fields, trailing
    /// bytes and unusable Join identity fields are all rejected.
    pub fn decode(bytes: &[u8]) -> Result<Self, ProtocolViolation> {
        let mut reader = ByteReader::new(bytes);

        let kind = reader
            .read_byte()
            .ok()
            .and_then(MessageKind::from_tag)
            .ok_or(ProtocolViolation::MalformedMessage { context: "control" })?;

        let malformed = |_: SerdeErr| ProtocolViolation::MalformedMessage {
            context: kind.name(),
        };
        let message = match kind {
            MessageKind::Join => {
                ControlMessage::Join(JoinMessage::de(&mut reader).map_err(malformed)?)
            }
            MessageKind::Spawn => {
                ControlMessage::Spawn(EntityDescriptor::de(&mut reader).map_err(malformed)?)
            }
            MessageKind::Despawn => {
                ControlMessage::Despawn(ConnectionId::de(&mut reader).map_err(malformed)?)
            }
        };

        if !reader.is_empty() {
            return Err(ProtocolViolation::MalformedMessage {
                context: kind.name(),
            });
        }

        if let ControlMessage::Join(join) = &message {
            join.validate()?;
        }

        Ok(message)
    }
}
